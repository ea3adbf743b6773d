//! `application/x-www-form-urlencoded` encoding and decoding.
//!
//! Requests are serialized with [`encode_form`]; response bodies use the same
//! encoding and are split into raw pairs with [`decode_pairs`] before
//! [`ResponseMap`](crate::ResponseMap) applies its key rules.

use std::borrow::Cow;

use url::form_urlencoded;

use crate::attributes::AttributeMap;

/// MIME type of request bodies sent to the gateway.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Serializes an [`AttributeMap`] as a form body, keeping field order.
///
/// ```rust
/// use gmopg_proto::{AttributeMap, encode_form};
///
/// let body = encode_form(&AttributeMap::from([("OrderID", "ORD 1"), ("Amount", "1000")]));
/// assert_eq!(body, "OrderID=ORD+1&Amount=1000");
/// ```
#[must_use]
pub fn encode_form(attributes: &AttributeMap) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in attributes {
        serializer.append_pair(key, &value.to_wire());
    }
    serializer.finish()
}

/// Splits a form body into percent-decoded `(name, value)` pairs.
///
/// Empty segments are skipped and a segment without `=` yields an empty
/// value. Decoding never fails; invalid UTF-8 is replaced lossily.
pub fn decode_pairs(body: &str) -> impl Iterator<Item = (Cow<'_, str>, Cow<'_, str>)> {
    form_urlencoded::parse(body.trim().as_bytes())
}
