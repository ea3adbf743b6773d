//! Caller-supplied request attributes.
//!
//! An [`AttributeMap`] is the set of gateway-specific fields a caller passes
//! to an operation (order ID, amount, card token, ...). Values are forwarded
//! verbatim; nothing here validates or coerces them beyond rendering scalars
//! as text on the wire.

use std::borrow::Cow;
use std::fmt;

use indexmap::IndexMap;
use indexmap::map::{IntoIter, Iter};
use serde::{Deserialize, Serialize};

/// A scalar request field value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// Free-form text.
    Text(String),
    /// Signed integer (amounts, tax, sequence numbers).
    Integer(i64),
    /// Unsigned integer that does not fit an `i64`.
    Unsigned(u64),
    /// Boolean flag, rendered as `1` / `0`.
    Bool(bool),
}

impl AttributeValue {
    /// Returns the text sent on the wire for this value.
    #[must_use]
    pub fn to_wire(&self) -> Cow<'_, str> {
        match self {
            Self::Text(s) => Cow::Borrowed(s),
            Self::Integer(n) => Cow::Owned(n.to_string()),
            Self::Unsigned(n) => Cow::Owned(n.to_string()),
            Self::Bool(true) => Cow::Borrowed("1"),
            Self::Bool(false) => Cow::Borrowed("0"),
        }
    }

    /// Returns `true` if the value renders as an empty string.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::Integer(_) | Self::Unsigned(_) | Self::Bool(_) => false,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_wire())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<&String> for AttributeValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for AttributeValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<u32> for AttributeValue {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<u64> for AttributeValue {
    fn from(value: u64) -> Self {
        i64::try_from(value).map_or(Self::Unsigned(value), Self::Integer)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Insertion-ordered map of request fields.
///
/// Inserting an existing key replaces its value but keeps the key's original
/// position, so merging credentials and caller attributes yields a stable
/// field order with last-write-wins values.
///
/// # Example
///
/// ```rust
/// use gmopg_proto::AttributeMap;
///
/// let attributes = AttributeMap::new()
///     .with("OrderID", "ORD1")
///     .with("Amount", 1000);
/// assert_eq!(attributes.get_str("Amount").as_deref(), Some("1000"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeMap(IndexMap<String, AttributeValue>);

impl AttributeMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Creates an empty map with room for `capacity` fields.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self(IndexMap::with_capacity(capacity))
    }

    /// Inserts a field, returning the value it replaced.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Option<AttributeValue> {
        self.0.insert(key.into(), value.into())
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Merges `other` into `self`; values from `other` win on collision.
    pub fn merge(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    /// Returns the value of a field.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.0.get(key)
    }

    /// Returns the wire text of a field.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<Cow<'_, str>> {
        self.0.get(key).map(AttributeValue::to_wire)
    }

    /// Returns `true` if the field is present, even with an empty value.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns `true` if the field is present and renders as non-empty text.
    #[must_use]
    pub fn has_non_empty(&self, key: &str) -> bool {
        self.0.get(key).is_some_and(|v| !v.is_empty())
    }

    /// Removes a field, keeping the order of the remaining ones.
    pub fn remove(&mut self, key: &str) -> Option<AttributeValue> {
        self.0.shift_remove(key)
    }

    /// Returns the field names in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Iterates over the fields in order.
    pub fn iter(&self) -> Iter<'_, String, AttributeValue> {
        self.0.iter()
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for AttributeMap
where
    K: Into<String>,
    V: Into<AttributeValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K, V> Extend<(K, V)> for AttributeMap
where
    K: Into<String>,
    V: Into<AttributeValue>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for AttributeMap
where
    K: Into<String>,
    V: Into<AttributeValue>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl IntoIterator for AttributeMap {
    type Item = (String, AttributeValue);
    type IntoIter = IntoIter<String, AttributeValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a AttributeMap {
    type Item = (&'a String, &'a AttributeValue);
    type IntoIter = Iter<'a, String, AttributeValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_first_position_and_last_value() {
        let mut map = AttributeMap::from([("ShopID", "shop"), ("ShopPass", "pass")]);
        map.insert("OrderID", "ORD1");
        map.insert("ShopID", "override");

        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys, ["ShopID", "ShopPass", "OrderID"]);
        assert_eq!(map.get_str("ShopID").as_deref(), Some("override"));
    }

    #[test]
    fn test_merge_other_wins() {
        let mut base = AttributeMap::from([("SiteID", "site"), ("SitePass", "secret")]);
        base.merge(AttributeMap::from([("SitePass", "caller"), ("MemberID", "M1")]));

        assert_eq!(base.len(), 3);
        assert_eq!(base.get_str("SitePass").as_deref(), Some("caller"));
        assert_eq!(base.get_str("MemberID").as_deref(), Some("M1"));
    }

    #[test]
    fn test_scalar_wire_rendering() {
        assert_eq!(AttributeValue::from(1000).to_wire(), "1000");
        assert_eq!(AttributeValue::from(-5_i64).to_wire(), "-5");
        assert_eq!(AttributeValue::from(u64::MAX).to_wire(), u64::MAX.to_string());
        assert_eq!(AttributeValue::from(true).to_wire(), "1");
        assert_eq!(AttributeValue::from(false).to_wire(), "0");
        assert_eq!(AttributeValue::from("abc").to_string(), "abc");
    }

    #[test]
    fn test_has_non_empty() {
        let map = AttributeMap::new()
            .with("MemberID", "")
            .with("CardSeq", 0)
            .with("OrderID", "ORD1");

        assert!(map.contains_key("MemberID"));
        assert!(!map.has_non_empty("MemberID"));
        assert!(map.has_non_empty("CardSeq"));
        assert!(map.has_non_empty("OrderID"));
        assert!(!map.has_non_empty("Missing"));
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut map = AttributeMap::from([("A", "1"), ("B", "2"), ("C", "3")]);
        assert_eq!(map.remove("B"), Some(AttributeValue::from("2")));
        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys, ["A", "C"]);
    }

    #[test]
    fn test_serde_untagged_values() {
        let map = AttributeMap::new()
            .with("OrderID", "ORD1")
            .with("Amount", 1000)
            .with("Tax", 0);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"OrderID":"ORD1","Amount":1000,"Tax":0}"#);

        let parsed: AttributeMap = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, map);
    }
}
