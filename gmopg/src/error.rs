//! Error types for gateway calls.
//!
//! Only failures that prevent a response from being obtained are errors.
//! Business failures reported by the gateway (`ErrCode` / `ErrInfo`) are
//! part of a successful [`ResponseMap`](crate::ResponseMap).

use crate::transport::TransportError;

/// Errors returned by [`GatewayClient`](crate::GatewayClient) and the
/// service lookup helpers.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GatewayError {
    /// The request could not be sent or the gateway answered with a
    /// non-success HTTP status.
    #[error("Transport error: {0}")]
    Transport(#[source] TransportError),

    /// No service with this name exists.
    #[error("Unknown service: {0}")]
    UnknownService(String),

    /// The service has no operation with this name.
    #[error("Unknown operation {operation} for service {service}")]
    UnknownOperation {
        /// The service that was searched.
        service: &'static str,
        /// The requested operation name.
        operation: String,
    },
}
