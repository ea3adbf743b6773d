//! CLI configuration.
//!
//! Loads gateway settings from a TOML file with support for environment
//! variable expansion in string values. Variables use `$VAR` or `${VAR}`
//! syntax.
//!
//! # Example Configuration
//!
//! ```toml
//! gmo_payment_url = "https://pt01.mul-pay.jp"
//! site_id = "tsite00012345"
//! site_pass = "$GMOPG_SITE_PASS"
//! shop_id = "tshop00012345"
//! shop_pass = "${GMOPG_SHOP_PASS}"
//! locale = "ja"
//! timeout_secs = 30
//!
//! [errors.ja]
//! E01010001 = "ショップIDが指定されていません。"
//! ```
//!
//! # Environment Variables
//!
//! - `GMOPG_CONFIG` — Path to configuration file (default: `gmopg.toml`)
//! - `GMOPG_PAYMENT_URL` — Override the gateway base URL
//! - `GMOPG_SITE_ID` / `GMOPG_SITE_PASS` — Override site credentials
//! - `GMOPG_SHOP_ID` / `GMOPG_SHOP_PASS` — Override shop credentials
//! - `GMOPG_LOCALE` — Override the error-message locale

use std::path::{Path, PathBuf};

use gmopg::{GatewayConfig, MessageCatalog};
use serde::{Deserialize, Serialize};

/// Default configuration file name.
pub const DEFAULT_CONFIG_PATH: &str = "gmopg.toml";

/// Errors raised while loading the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        /// The configuration path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid TOML for this schema.
    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        /// The configuration path.
        path: PathBuf,
        /// The underlying TOML error.
        #[source]
        source: toml::de::Error,
    },
}

/// Top-level CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Gateway URL, credentials and locale (top-level keys).
    #[serde(flatten)]
    pub gateway: GatewayConfig,

    /// HTTP timeout in seconds (default: the transport's own default).
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Locale consulted when the configured one has no message for a code.
    #[serde(default)]
    pub fallback_locale: Option<String>,

    /// Error messages keyed by locale, then gateway error code.
    #[serde(default)]
    pub errors: MessageCatalog,
}

impl CliConfig {
    /// Loads configuration from a file path.
    ///
    /// A missing file is not an error: defaults and environment overrides
    /// are used instead. `$VAR` / `${VAR}` references inside string values
    /// are expanded from the process environment, and `GMOPG_*` variables
    /// override the file values afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = if path.exists() {
            std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_owned(),
                source,
            })?
        } else {
            String::new()
        };

        let mut config = Self::parse_with(&content, env_lookup).map_err(|source| {
            ConfigError::Parse {
                path: path.to_owned(),
                source,
            }
        })?;
        config.apply_overrides(env_lookup);
        Ok(config)
    }

    /// Parses TOML text, then expands variables in its string values
    /// through `lookup`.
    ///
    /// Expansion happens after parsing, so substituted values are taken
    /// verbatim and never reinterpreted as TOML.
    ///
    /// # Errors
    ///
    /// Returns the TOML error if the text does not parse or does not match
    /// the schema.
    pub fn parse_with<F>(content: &str, lookup: F) -> Result<Self, toml::de::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut document = toml::Value::Table(content.parse::<toml::Table>()?);
        expand_strings(&mut document, &lookup);
        document.try_into()
    }

    /// Applies `GMOPG_*` overrides resolved through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let gateway = &mut self.gateway;
        let credentials = &mut gateway.credentials;
        for (name, slot) in [
            ("GMOPG_PAYMENT_URL", &mut gateway.gmo_payment_url),
            ("GMOPG_SITE_ID", &mut credentials.site_id),
            ("GMOPG_SITE_PASS", &mut credentials.site_pass),
            ("GMOPG_SHOP_ID", &mut credentials.shop_id),
            ("GMOPG_SHOP_PASS", &mut credentials.shop_pass),
            ("GMOPG_LOCALE", &mut gateway.locale),
        ] {
            if let Some(value) = lookup(name) {
                *slot = value;
            }
        }
    }

    /// Returns the configured error catalog, with its fallback locale applied.
    #[must_use]
    pub fn catalog(&self) -> MessageCatalog {
        let catalog = self.errors.clone();
        match &self.fallback_locale {
            Some(locale) => catalog.with_fallback_locale(locale.clone()),
            None => catalog,
        }
    }
}

fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Expands variables in every string of a parsed TOML document.
fn expand_strings<F>(value: &mut toml::Value, lookup: &F)
where
    F: Fn(&str) -> Option<String>,
{
    match value {
        toml::Value::String(text) => *text = expand_vars(text, lookup),
        toml::Value::Array(items) => {
            for item in items {
                expand_strings(item, lookup);
            }
        }
        toml::Value::Table(table) => {
            table
                .iter_mut()
                .for_each(|(_, item)| expand_strings(item, lookup));
        }
        _ => {}
    }
}

/// Expands `$VAR` and `${VAR}` patterns in a string through `lookup`.
///
/// Unresolved variables are left as-is.
fn expand_vars<F>(input: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '$' {
            result.push(ch);
            continue;
        }

        let braced = chars.next_if_eq(&'{').is_some();
        let mut name = String::new();
        let mut closed = false;
        while let Some(&c) = chars.peek() {
            if braced {
                chars.next();
                if c == '}' {
                    closed = true;
                    break;
                }
                name.push(c);
            } else if c.is_ascii_alphanumeric() || c == '_' {
                chars.next();
                name.push(c);
            } else {
                break;
            }
        }

        match lookup(&name) {
            Some(value) if !name.is_empty() && (closed || !braced) => result.push_str(&value),
            _ => {
                result.push('$');
                if braced {
                    result.push('{');
                }
                result.push_str(&name);
                if closed {
                    result.push('}');
                }
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use gmopg::{ErrorCatalog, SANDBOX_URL};

    fn vars(name: &str) -> Option<String> {
        match name {
            "SHOP_PASS" => Some("s3cret".to_owned()),
            "SITE" => Some("tsite0001".to_owned()),
            _ => None,
        }
    }

    #[test]
    fn test_expand_plain_and_braced() {
        assert_eq!(expand_vars("pass = \"$SHOP_PASS\"", vars), "pass = \"s3cret\"");
        assert_eq!(expand_vars("${SITE}-x", vars), "tsite0001-x");
    }

    #[test]
    fn test_unresolved_left_as_is() {
        assert_eq!(expand_vars("$MISSING and ${MISSING}", vars), "$MISSING and ${MISSING}");
        assert_eq!(expand_vars("cost: $5 $", vars), "cost: $5 $");
        assert_eq!(expand_vars("${SITE", vars), "${SITE");
    }

    #[test]
    fn test_parse_full_config() {
        let config = CliConfig::parse_with(
            r#"
gmo_payment_url = "https://p01.mul-pay.jp"
site_id = "$SITE"
site_pass = "site-pass"
shop_id = "tshop0001"
shop_pass = "${SHOP_PASS}"
locale = "en"
timeout_secs = 30
fallback_locale = "ja"

[errors.ja]
E01010001 = "ショップIDが指定されていません。"

[errors.en]
E01020001 = "Shop password is not specified."
"#,
            vars,
        )
        .unwrap();

        assert_eq!(config.gateway.gmo_payment_url, "https://p01.mul-pay.jp");
        assert_eq!(config.gateway.credentials.site_id, "tsite0001");
        assert_eq!(config.gateway.credentials.shop_pass, "s3cret");
        assert_eq!(config.gateway.locale, "en");
        assert_eq!(config.timeout_secs, Some(30));

        let catalog = config.catalog();
        assert_eq!(
            catalog.message("en", "E01020001"),
            "Shop password is not specified."
        );
        assert_eq!(
            catalog.message("en", "E01010001"),
            "ショップIDが指定されていません。"
        );
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = CliConfig::parse_with("", vars).unwrap();
        assert_eq!(config.gateway.gmo_payment_url, SANDBOX_URL);
        assert_eq!(config.gateway.locale, "ja");
        assert!(config.errors.is_empty());
        assert_eq!(config.catalog().message("ja", "E01"), "gmopg-errors.E01");
    }

    #[test]
    fn test_env_overrides_win() {
        let mut config = CliConfig::parse_with("shop_id = \"from-file\"\nlocale = \"ja\"", vars)
            .unwrap();
        config.apply_overrides(|name| match name {
            "GMOPG_SHOP_ID" => Some("from-env".to_owned()),
            "GMOPG_LOCALE" => Some("en".to_owned()),
            _ => None,
        });

        assert_eq!(config.gateway.credentials.shop_id, "from-env");
        assert_eq!(config.gateway.locale, "en");
        assert_eq!(config.gateway.credentials.site_id, "");
    }

    #[test]
    fn test_expanded_values_are_taken_verbatim() {
        let password = r#"ab"c\td$x"#;
        let config = CliConfig::parse_with(
            "site_pass = \"$SITE_PASS\"\nshop_pass = \"${SHOP_PASS}\"",
            |name| (name == "SITE_PASS" || name == "SHOP_PASS").then(|| password.to_owned()),
        )
        .unwrap();

        assert_eq!(config.gateway.credentials.site_pass, password);
        assert_eq!(config.gateway.credentials.shop_pass, password);
    }

    #[test]
    fn test_expansion_reaches_error_messages() {
        let config = CliConfig::parse_with("[errors.ja]\nE01 = \"contact ${SITE}\"", vars)
            .unwrap();
        assert_eq!(config.catalog().message("ja", "E01"), "contact tsite0001");
    }

    #[test]
    fn test_example_config_parses() {
        let config =
            CliConfig::parse_with(include_str!("../gmopg.example.toml"), |_| None).unwrap();
        let credentials = &config.gateway.credentials;
        assert_eq!(credentials.site_id, "");
        assert_eq!(credentials.site_pass, "");
        assert_eq!(credentials.shop_id, "");
        assert_eq!(credentials.shop_pass, "");
        assert_eq!(config.timeout_secs, Some(60));
        assert_eq!(
            config.catalog().message("en", "E01040010"),
            "The order ID already exists."
        );
    }

    #[test]
    fn test_example_config_takes_credentials_from_env() {
        let env = |name: &str| match name {
            "GMOPG_SHOP_ID" => Some("tshop0001".to_owned()),
            "GMOPG_SHOP_PASS" => Some(r#"p"a\ss"#.to_owned()),
            _ => None,
        };
        let mut config = CliConfig::parse_with(include_str!("../gmopg.example.toml"), env).unwrap();
        config.apply_overrides(env);

        assert_eq!(config.gateway.credentials.shop_id, "tshop0001");
        assert_eq!(config.gateway.credentials.shop_pass, r#"p"a\ss"#);
        assert_eq!(config.gateway.credentials.site_id, "");
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let config = CliConfig::load_from(Path::new("/nonexistent/gmopg.toml")).unwrap();
        assert!(config.timeout_secs.is_none());
    }
}
