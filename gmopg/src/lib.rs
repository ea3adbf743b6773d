#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Core client for the GMO Payment Gateway (GMO-PG) transaction API.
//!
//! Every gateway call follows the same exchange: caller attributes are merged
//! with the merchant credentials the operation requires, form-encoded and
//! POSTed to a fixed endpoint path, and the `key=value&...` response is
//! decoded back into a [`ResponseMap`]. Business failures arrive in-band
//! through `ErrCode` / `ErrInfo` and are expanded into localized messages
//! under `errors`.
//!
//! # Overview
//!
//! A [`GatewayClient`] owns the shared exchange. Four services compose it and
//! expose one method per gateway operation:
//!
//! - [`CreditCardService`] — card entry/execution, 3DS 2.0, alteration, search
//! - [`LinePayService`] — LINE Pay payments and RegKey management
//! - [`PayPayService`] — PayPay payments, push billing and use consent
//! - [`MemberCardService`] — stored members and cards
//!
//! ```rust,no_run
//! # async fn run(transport: impl gmopg::Transport + 'static) -> Result<(), gmopg::GatewayError> {
//! use gmopg::{AttributeMap, Credentials, GatewayClient, GatewayConfig, SANDBOX_URL};
//!
//! let config = GatewayConfig::new(
//!     SANDBOX_URL,
//!     Credentials::new("site", "site-pass", "shop", "shop-pass"),
//! );
//! let client = GatewayClient::new(config, transport);
//!
//! let response = client
//!     .credit_card()
//!     .entry_tran(AttributeMap::from([("OrderID", "ORD1"), ("Amount", "1000")]))
//!     .await?;
//! if let Some(errors) = response.errors() {
//!     for (code, message) in errors {
//!         eprintln!("{code}: {message}");
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`config`] — Merchant credentials and gateway settings
//! - [`operation`] — Operation descriptors and credential requirements
//! - [`request`] — Request building (URL + merged form body)
//! - [`catalog`] — Error code → localized message lookup
//! - [`decode`] — Response decoding with error expansion
//! - [`transport`] — The HTTP seam implemented by `gmopg-http`
//! - [`client`] — The shared [`GatewayClient`]
//! - [`services`] — Operation tables for the four services
//!
//! # Feature Flags
//!
//! - `telemetry` - Enables tracing instrumentation of gateway calls

pub mod catalog;
pub mod client;
pub mod config;
pub mod decode;
pub mod error;
pub mod operation;
pub mod request;
pub mod services;
pub mod transport;

pub use gmopg_proto as proto;
pub use gmopg_proto::{AttributeMap, AttributeValue, ErrorMessages, ResponseMap, ResponseValue};

pub use catalog::{ErrorCatalog, MessageCatalog};
pub use client::GatewayClient;
pub use config::{Credentials, GatewayConfig, PRODUCTION_URL, SANDBOX_URL};
pub use decode::ResponseDecoder;
pub use error::GatewayError;
pub use operation::{CredentialRequirement, CredentialScope, MemberCondition, OperationDescriptor};
pub use request::GatewayRequest;
pub use services::{CreditCardService, LinePayService, MemberCardService, PayPayService, Service};
pub use transport::{BoxFuture, Transport, TransportError};
