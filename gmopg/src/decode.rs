//! Response decoding with error expansion.

use std::fmt;
use std::sync::Arc;

use gmopg_proto::{ErrorMessages, ResponseMap};

use crate::catalog::{ErrorCatalog, MessageCatalog};
use crate::config::DEFAULT_LOCALE;

/// Decodes raw gateway bodies and expands reported error codes.
///
/// When the body carries a non-empty `ErrCode`, every code listed in
/// `ErrInfo` is looked up in the catalog and the result is attached to the
/// response as its `errors` mapping, in `ErrInfo` order. A repeated code
/// appears once. An error response without `ErrInfo` codes still receives an
/// (empty) `errors` mapping, so callers can rely on `errors()` to detect
/// failure.
#[derive(Clone)]
pub struct ResponseDecoder {
    catalog: Arc<dyn ErrorCatalog>,
    locale: String,
}

impl ResponseDecoder {
    /// Creates a decoder over a catalog and locale.
    pub fn new(catalog: Arc<dyn ErrorCatalog>, locale: impl Into<String>) -> Self {
        Self {
            catalog,
            locale: locale.into(),
        }
    }

    /// Returns the locale used for lookups.
    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Decodes one response body. Never fails.
    #[must_use]
    pub fn decode(&self, body: &str) -> ResponseMap {
        let mut response = ResponseMap::parse(body);
        if response.has_error() {
            let errors = self.expand(&response);
            response.set_errors(errors);
        }
        response
    }

    fn expand(&self, response: &ResponseMap) -> ErrorMessages {
        let mut errors = ErrorMessages::new();
        for code in response.error_info_codes() {
            if !errors.contains_key(code) {
                let message = self.catalog.message(&self.locale, code);
                errors.insert(code.to_owned(), message);
            }
        }
        errors
    }
}

impl Default for ResponseDecoder {
    fn default() -> Self {
        Self::new(Arc::new(MessageCatalog::new()), DEFAULT_LOCALE)
    }
}

impl fmt::Debug for ResponseDecoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseDecoder")
            .field("locale", &self.locale)
            .finish_non_exhaustive()
    }
}
