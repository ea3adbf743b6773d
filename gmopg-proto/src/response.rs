//! Decoded gateway responses.
//!
//! The gateway answers every call with a form-encoded body such as
//! `ACS=0&OrderID=ORD1&Forward=2a99662` or, on failure,
//! `ErrCode=E01|E01&ErrInfo=E01010001|E01020001`. [`ResponseMap::parse`]
//! turns that text into an ordered map of string values. Localized error
//! messages are attached later by the client through
//! [`ResponseMap::set_errors`].

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::fields::{ERR_CODE, ERR_INFO, MULTI_VALUE_SEPARATOR};
use crate::form::decode_pairs;

/// Localized messages keyed by gateway error code, in `ErrInfo` order.
pub type ErrorMessages = IndexMap<String, String>;

/// A decoded response field value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseValue {
    /// A plain `key=value` field.
    Single(String),
    /// Values accumulated from repeated `key[]=value` pairs.
    List(Vec<String>),
}

impl ResponseValue {
    /// Returns the value if this is a [`ResponseValue::Single`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Single(s) => Some(s),
            Self::List(_) => None,
        }
    }

    /// Returns the values if this is a [`ResponseValue::List`].
    #[must_use]
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::Single(_) => None,
            Self::List(items) => Some(items),
        }
    }
}

/// A decoded gateway response.
///
/// Field values are never converted: numbers and flags stay strings exactly
/// as the gateway sent them. When the gateway reported a business error the
/// client attaches an `errors` mapping (error code → localized message),
/// which serializes next to the native fields:
///
/// ```json
/// { "ErrCode": "E01", "ErrInfo": "E01010001", "errors": { "E01010001": "..." } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseMap {
    #[serde(flatten)]
    fields: IndexMap<String, ResponseValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    errors: Option<ErrorMessages>,
}

impl ResponseMap {
    /// Decodes a raw response body.
    ///
    /// Pairs are percent-decoded. A name ending in `[]` accumulates into a
    /// [`ResponseValue::List`] under the bare name; any other repeated name
    /// keeps its last value. Pairs with an empty name are dropped.
    ///
    /// Decoding is total: every input yields a map, possibly empty.
    #[must_use]
    pub fn parse(body: &str) -> Self {
        let mut fields: IndexMap<String, ResponseValue> = IndexMap::new();
        for (name, value) in decode_pairs(body) {
            if let Some(base) = name.strip_suffix("[]") {
                if base.is_empty() {
                    continue;
                }
                if let Some(ResponseValue::List(items)) = fields.get_mut(base) {
                    items.push(value.into_owned());
                    continue;
                }
                fields.insert(base.to_owned(), ResponseValue::List(vec![value.into_owned()]));
            } else if !name.is_empty() {
                fields.insert(name.into_owned(), ResponseValue::Single(value.into_owned()));
            }
        }
        Self {
            fields,
            errors: None,
        }
    }

    /// Returns a single-valued field.
    ///
    /// List fields (`key[]`) are not returned here; use
    /// [`get_value`](Self::get_value) for those.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(ResponseValue::as_str)
    }

    /// Returns a field regardless of its shape.
    #[must_use]
    pub fn get_value(&self, key: &str) -> Option<&ResponseValue> {
        self.fields.get(key)
    }

    /// Returns `true` if the gateway sent the field.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Splits a pipe-separated field such as `CardSeq=0|1|2`.
    ///
    /// Returns an empty vector when the field is absent.
    #[must_use]
    pub fn split_pipe(&self, key: &str) -> Vec<&str> {
        self.get(key)
            .map(|v| v.split(MULTI_VALUE_SEPARATOR).collect())
            .unwrap_or_default()
    }

    /// Returns the raw `ErrCode` field.
    #[must_use]
    pub fn error_code(&self) -> Option<&str> {
        self.get(ERR_CODE)
    }

    /// Returns the raw `ErrInfo` field.
    #[must_use]
    pub fn error_info(&self) -> Option<&str> {
        self.get(ERR_INFO)
    }

    /// Returns `true` if the gateway reported a business error.
    #[must_use]
    pub fn has_error(&self) -> bool {
        self.error_code().is_some_and(|code| !code.is_empty())
    }

    /// Returns the detailed error codes listed in `ErrInfo`, in order.
    ///
    /// Empty tokens are skipped, so an absent or empty `ErrInfo` yields no
    /// codes.
    #[must_use]
    pub fn error_info_codes(&self) -> Vec<&str> {
        self.error_info()
            .map(|info| {
                info.split(MULTI_VALUE_SEPARATOR)
                    .filter(|code| !code.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Returns the localized error messages, if any were attached.
    #[must_use]
    pub const fn errors(&self) -> Option<&ErrorMessages> {
        self.errors.as_ref()
    }

    /// Attaches localized error messages.
    pub fn set_errors(&mut self, errors: ErrorMessages) {
        self.errors = Some(errors);
    }

    /// Returns the native gateway fields.
    #[must_use]
    pub const fn fields(&self) -> &IndexMap<String, ResponseValue> {
        &self.fields
    }

    /// Consumes the map, returning the native fields and attached errors.
    #[must_use]
    pub fn into_parts(self) -> (IndexMap<String, ResponseValue>, Option<ErrorMessages>) {
        (self.fields, self.errors)
    }

    /// Returns the number of native fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the body carried no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
