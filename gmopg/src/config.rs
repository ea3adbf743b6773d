//! Merchant credentials and gateway settings.
//!
//! A [`GatewayConfig`] is built once at startup (from a file, the
//! environment, or test fixtures) and handed to the
//! [`GatewayClient`](crate::GatewayClient), which keeps it read-only for its
//! whole lifetime.
//!
//! Field names follow the host configuration surface (`gmo_payment_url`,
//! `site_id`, `site_pass`, `shop_id`, `shop_pass`), so a config table can be
//! deserialized directly:
//!
//! ```toml
//! gmo_payment_url = "https://pt01.mul-pay.jp"
//! site_id = "tsite00012345"
//! site_pass = "xxxxxxxx"
//! shop_id = "tshop00012345"
//! shop_pass = "xxxxxxxx"
//! locale = "ja"
//! ```

use std::fmt;

use gmopg_proto::AttributeMap;
use gmopg_proto::fields::{SHOP_ID, SHOP_PASS, SITE_ID, SITE_PASS};
use serde::{Deserialize, Serialize};

/// Production endpoint of the gateway.
pub const PRODUCTION_URL: &str = "https://p01.mul-pay.jp";

/// Test (sandbox) endpoint of the gateway.
pub const SANDBOX_URL: &str = "https://pt01.mul-pay.jp";

/// Locale used for error messages when none is configured.
pub const DEFAULT_LOCALE: &str = "ja";

/// The four merchant identifiers issued by the gateway.
///
/// Missing values deserialize as empty strings and are still sent, so an
/// incomplete configuration surfaces as a gateway-reported error rather than
/// a silently dropped field.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    /// Site identifier (`SiteID`).
    pub site_id: String,
    /// Site password (`SitePass`).
    pub site_pass: String,
    /// Shop identifier (`ShopID`).
    pub shop_id: String,
    /// Shop password (`ShopPass`).
    pub shop_pass: String,
}

impl Credentials {
    /// Creates a credential set.
    pub fn new(
        site_id: impl Into<String>,
        site_pass: impl Into<String>,
        shop_id: impl Into<String>,
        shop_pass: impl Into<String>,
    ) -> Self {
        Self {
            site_id: site_id.into(),
            site_pass: site_pass.into(),
            shop_id: shop_id.into(),
            shop_pass: shop_pass.into(),
        }
    }

    /// Returns `SiteID` / `SitePass` as request fields.
    #[must_use]
    pub fn site_fields(&self) -> AttributeMap {
        AttributeMap::from([
            (SITE_ID, self.site_id.as_str()),
            (SITE_PASS, self.site_pass.as_str()),
        ])
    }

    /// Returns `ShopID` / `ShopPass` as request fields.
    #[must_use]
    pub fn shop_fields(&self) -> AttributeMap {
        AttributeMap::from([
            (SHOP_ID, self.shop_id.as_str()),
            (SHOP_PASS, self.shop_pass.as_str()),
        ])
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("site_id", &self.site_id)
            .field("site_pass", &"<redacted>")
            .field("shop_id", &self.shop_id)
            .field("shop_pass", &"<redacted>")
            .finish()
    }
}

/// Gateway endpoint, credentials and error-message locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Base URL every endpoint path is appended to.
    #[serde(default = "default_payment_url")]
    pub gmo_payment_url: String,

    /// Merchant credentials.
    #[serde(flatten)]
    pub credentials: Credentials,

    /// Locale used to look up error messages.
    #[serde(default = "default_locale")]
    pub locale: String,
}

fn default_payment_url() -> String {
    SANDBOX_URL.to_owned()
}

fn default_locale() -> String {
    DEFAULT_LOCALE.to_owned()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            gmo_payment_url: default_payment_url(),
            credentials: Credentials::default(),
            locale: default_locale(),
        }
    }
}

impl GatewayConfig {
    /// Creates a config for the given base URL and credentials.
    pub fn new(gmo_payment_url: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            gmo_payment_url: gmo_payment_url.into(),
            credentials,
            locale: default_locale(),
        }
    }

    /// Sets the error-message locale.
    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Returns the base URL without trailing slashes.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.gmo_payment_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_flat_table() {
        let config: GatewayConfig = serde_json::from_value(serde_json::json!({
            "gmo_payment_url": "https://p01.mul-pay.jp",
            "site_id": "site",
            "site_pass": "site-pass",
            "shop_id": "shop",
            "shop_pass": "shop-pass",
            "locale": "en"
        }))
        .unwrap();

        assert_eq!(config.gmo_payment_url, PRODUCTION_URL);
        assert_eq!(
            config.credentials,
            Credentials::new("site", "site-pass", "shop", "shop-pass")
        );
        assert_eq!(config.locale, "en");
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let config: GatewayConfig =
            serde_json::from_value(serde_json::json!({ "shop_id": "shop" })).unwrap();

        assert_eq!(config.gmo_payment_url, SANDBOX_URL);
        assert_eq!(config.locale, DEFAULT_LOCALE);
        assert_eq!(config.credentials.shop_id, "shop");
        assert_eq!(config.credentials.shop_pass, "");

        let fields = config.credentials.shop_fields();
        assert_eq!(fields.get_str("ShopPass").as_deref(), Some(""));
    }

    #[test]
    fn test_base_url_trims_trailing_slash() {
        let config = GatewayConfig::new("https://pt01.mul-pay.jp//", Credentials::default());
        assert_eq!(config.base_url(), "https://pt01.mul-pay.jp");
    }

    #[test]
    fn test_debug_redacts_passwords() {
        let credentials = Credentials::new("site", "s3cret-site", "shop", "s3cret-shop");
        let debug = format!("{credentials:?}");
        assert!(debug.contains("site"));
        assert!(!debug.contains("s3cret"));
    }
}
