//! HTTP transport error types.

use http::StatusCode;

/// Errors that can occur while POSTing to the gateway.
#[derive(Debug, thiserror::Error)]
pub enum HttpTransportError {
    /// The request could not be sent (connection, TLS, timeout, middleware).
    #[error("HTTP error: {context}: {source}")]
    Http {
        /// Human-readable context.
        context: String,
        /// The underlying error.
        #[source]
        source: reqwest_middleware::Error,
    },
    /// The gateway answered with a non-success status.
    #[error("Unexpected HTTP status {status}: {context}: {body}")]
    HttpStatus {
        /// Human-readable context.
        context: String,
        /// The HTTP status code.
        status: StatusCode,
        /// The response body.
        body: String,
    },
    /// Failed to read the response body.
    #[error("Failed to read response body as text: {context}: {source}")]
    ResponseBodyRead {
        /// Human-readable context.
        context: String,
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },
}

impl HttpTransportError {
    /// Returns the HTTP status if the gateway answered at all.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            Self::Http { .. } | Self::ResponseBodyRead { .. } => None,
        }
    }
}
