//! HTTP transport for the GMO Payment Gateway client.
//!
//! Implements [`gmopg::Transport`] on top of `reqwest` (through
//! `reqwest-middleware`, so retry or logging middleware can be stacked by the
//! caller).
//!
//! ```rust,no_run
//! # async fn run() -> Result<(), gmopg::GatewayError> {
//! use std::time::Duration;
//!
//! use gmopg::{AttributeMap, Credentials, GatewayClient, GatewayConfig, SANDBOX_URL};
//! use gmopg_http::HttpTransport;
//!
//! let transport = HttpTransport::new().with_timeout(Duration::from_secs(30));
//! let config = GatewayConfig::new(SANDBOX_URL, Credentials::default());
//! let client = GatewayClient::new(config, transport);
//!
//! let response = client
//!     .credit_card()
//!     .search_trade(AttributeMap::from([("OrderID", "ORD1")]))
//!     .await?;
//! assert!(response.get("Status").is_some() || response.errors().is_some());
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`constants`] — Content type and default timeout
//! - [`error`] — HTTP transport error types
//! - [`transport`] — The [`HttpTransport`] itself
//!
//! # Feature Flags
//!
//! - `telemetry` - Enables tracing spans around each POST

pub mod constants;
pub mod error;
pub mod transport;

pub use error::HttpTransportError;
pub use transport::HttpTransport;
