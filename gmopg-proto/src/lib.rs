//! Wire format types for the GMO Payment Gateway protocol.
//!
//! The gateway speaks a plain form protocol: requests are
//! `application/x-www-form-urlencoded` bodies, and responses are
//! `key=value&key=value` text that carries business failures in-band through
//! the `ErrCode` / `ErrInfo` fields. This crate holds the shared data
//! structures for both directions and has no knowledge of credentials,
//! endpoints or HTTP.
//!
//! # Modules
//!
//! - [`attributes`] — Caller-supplied request fields (`AttributeMap`)
//! - [`fields`] — Well-known gateway field names
//! - [`form`] — Form encoding and raw pair decoding
//! - [`response`] — Decoded gateway responses (`ResponseMap`)

pub mod attributes;
pub mod fields;
pub mod form;
pub mod response;

pub use attributes::{AttributeMap, AttributeValue};
pub use form::encode_form;
pub use response::{ErrorMessages, ResponseMap, ResponseValue};
