//! Request building.
//!
//! Turns an [`OperationDescriptor`] plus caller attributes into the absolute
//! URL and form body of one gateway request. Credentials are laid down first
//! (site, then shop) and caller attributes are merged over them, so a caller
//! field with a credential's name wins.

use std::fmt;

use gmopg_proto::fields::{SHOP_PASS, SITE_PASS};
use gmopg_proto::{AttributeMap, encode_form};
use serde::Serialize;

use crate::config::{Credentials, GatewayConfig};
use crate::operation::{CredentialScope, OperationDescriptor};

const REDACTED: &str = "********";

/// A fully built gateway request.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct GatewayRequest {
    /// Absolute endpoint URL.
    pub url: String,
    /// Merged form fields.
    pub form: AttributeMap,
}

impl GatewayRequest {
    /// Returns the `application/x-www-form-urlencoded` body.
    #[must_use]
    pub fn body(&self) -> String {
        encode_form(&self.form)
    }

    /// Returns a copy with `SitePass` / `ShopPass` masked, for logs and dry runs.
    #[must_use]
    pub fn redacted(&self) -> Self {
        let mut form = self.form.clone();
        for key in [SITE_PASS, SHOP_PASS] {
            if form.contains_key(key) {
                form.insert(key, REDACTED);
            }
        }
        Self {
            url: self.url.clone(),
            form,
        }
    }
}

impl fmt::Debug for GatewayRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redacted = self.redacted();
        f.debug_struct("GatewayRequest")
            .field("url", &redacted.url)
            .field("form", &redacted.form)
            .finish()
    }
}

/// Merges the credential subset and caller attributes into one form map.
#[must_use]
pub fn merge_credentials(
    scope: CredentialScope,
    credentials: &Credentials,
    attributes: AttributeMap,
) -> AttributeMap {
    let mut form = AttributeMap::with_capacity(attributes.len() + 4);
    if scope.site {
        form.merge(credentials.site_fields());
    }
    if scope.shop {
        form.merge(credentials.shop_fields());
    }
    form.merge(attributes);
    form
}

impl OperationDescriptor {
    /// Returns the absolute URL of this operation.
    #[must_use]
    pub fn url(&self, config: &GatewayConfig) -> String {
        format!("{}{}", config.base_url(), self.path)
    }

    /// Builds the request for this operation.
    #[must_use]
    pub fn build_request(&self, config: &GatewayConfig, attributes: AttributeMap) -> GatewayRequest {
        let scope = self.credentials.resolve(&attributes);
        GatewayRequest {
            url: self.url(config),
            form: merge_credentials(scope, &config.credentials, attributes),
        }
    }
}
