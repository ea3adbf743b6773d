//! Error code → localized message lookup.
//!
//! The gateway reports failures as opaque codes (`E01010001`, `E92000001`,
//! ...). A [`ErrorCatalog`] turns each code into a human-readable message for
//! a locale. The bundled [`MessageCatalog`] is a plain in-memory table that
//! can be filled programmatically or deserialized from a config file:
//!
//! ```toml
//! [ja]
//! E01010001 = "ショップIDが指定されていません。"
//!
//! [en]
//! E01010001 = "Shop ID is not specified."
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Namespace under which error messages are looked up.
pub const ERROR_NAMESPACE: &str = "gmopg-errors";

/// Returns the namespaced lookup key of an error code (`gmopg-errors.<code>`).
///
/// This is also what a catalog returns for a code it does not know, so an
/// unknown code is still identifiable in the `errors` mapping.
#[must_use]
pub fn lookup_key(code: &str) -> String {
    format!("{ERROR_NAMESPACE}.{code}")
}

/// Source of localized error messages.
pub trait ErrorCatalog: Send + Sync {
    /// Returns the message for `code` in `locale`.
    ///
    /// Lookup never fails: implementations return [`lookup_key`] for codes
    /// they have no message for.
    fn message(&self, locale: &str, code: &str) -> String;
}

impl<F> ErrorCatalog for F
where
    F: Fn(&str, &str) -> String + Send + Sync,
{
    fn message(&self, locale: &str, code: &str) -> String {
        self(locale, code)
    }
}

/// An in-memory message table keyed by locale, then error code.
///
/// Lookups try the requested locale first, then the fallback locale (if
/// one is set), then give up with the namespaced key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageCatalog {
    #[serde(flatten)]
    locales: HashMap<String, HashMap<String, String>>,
    #[serde(skip)]
    fallback_locale: Option<String>,
}

impl MessageCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) one message.
    pub fn insert(
        &mut self,
        locale: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.locales
            .entry(locale.into())
            .or_default()
            .insert(code.into(), message.into());
    }

    /// Adds a batch of messages for one locale.
    #[must_use]
    pub fn with_messages<I, C, M>(mut self, locale: &str, messages: I) -> Self
    where
        I: IntoIterator<Item = (C, M)>,
        C: Into<String>,
        M: Into<String>,
    {
        let table = self.locales.entry(locale.to_owned()).or_default();
        table.extend(
            messages
                .into_iter()
                .map(|(code, message)| (code.into(), message.into())),
        );
        self
    }

    /// Sets the locale consulted when the requested one has no message.
    #[must_use]
    pub fn with_fallback_locale(mut self, locale: impl Into<String>) -> Self {
        self.fallback_locale = Some(locale.into());
        self
    }

    /// Returns the message for `code` in exactly `locale`, without fallback.
    #[must_use]
    pub fn get(&self, locale: &str, code: &str) -> Option<&str> {
        self.locales
            .get(locale)
            .and_then(|table| table.get(code))
            .map(String::as_str)
    }

    /// Returns the locales that have at least one message.
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.locales.keys().map(String::as_str)
    }

    /// Returns `true` if the catalog holds no messages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locales.values().all(HashMap::is_empty)
    }
}

impl ErrorCatalog for MessageCatalog {
    fn message(&self, locale: &str, code: &str) -> String {
        self.get(locale, code)
            .or_else(|| {
                self.fallback_locale
                    .as_deref()
                    .and_then(|fallback| self.get(fallback, code))
            })
            .map_or_else(|| lookup_key(code), str::to_owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> MessageCatalog {
        MessageCatalog::new()
            .with_messages(
                "ja",
                [
                    ("E01010001", "ショップIDが指定されていません。"),
                    ("E01020001", "ショップパスワードが指定されていません。"),
                ],
            )
            .with_messages("en", [("E01010001", "Shop ID is not specified.")])
    }

    #[test]
    fn test_message_for_locale() {
        let catalog = catalog();
        assert_eq!(
            catalog.message("ja", "E01010001"),
            "ショップIDが指定されていません。"
        );
        assert_eq!(catalog.message("en", "E01010001"), "Shop ID is not specified.");
    }

    #[test]
    fn test_miss_returns_namespaced_key() {
        let catalog = catalog();
        assert_eq!(catalog.message("ja", "E99999999"), "gmopg-errors.E99999999");
        assert_eq!(catalog.message("en", "E01020001"), "gmopg-errors.E01020001");
        assert_eq!(MessageCatalog::new().message("ja", "100"), "gmopg-errors.100");
    }

    #[test]
    fn test_fallback_locale() {
        let catalog = catalog().with_fallback_locale("ja");
        assert_eq!(
            catalog.message("en", "E01020001"),
            "ショップパスワードが指定されていません。"
        );
        assert_eq!(catalog.message("fr", "E01010001"), "ショップIDが指定されていません。");
    }

    #[test]
    fn test_insert_replaces() {
        let mut catalog = catalog();
        catalog.insert("en", "E01010001", "Missing shop.");
        assert_eq!(catalog.get("en", "E01010001"), Some("Missing shop."));
        assert!(!catalog.is_empty());
    }

    #[test]
    fn test_deserialize_locale_tables() {
        let catalog: MessageCatalog = serde_json::from_value(serde_json::json!({
            "ja": { "E01010001": "ショップIDが指定されていません。" },
            "en": { "E01010001": "Shop ID is not specified." }
        }))
        .unwrap();

        assert_eq!(catalog.get("en", "E01010001"), Some("Shop ID is not specified."));
        let mut locales: Vec<&str> = catalog.locales().collect();
        locales.sort_unstable();
        assert_eq!(locales, ["en", "ja"]);
    }

    #[test]
    fn test_closure_catalog() {
        let catalog = |locale: &str, code: &str| format!("[{locale}] {code}");
        assert_eq!(catalog.message("en", "E01"), "[en] E01");
    }
}
