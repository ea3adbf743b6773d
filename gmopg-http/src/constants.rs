//! HTTP-specific constants for gateway requests.

pub use gmopg::proto::form::FORM_CONTENT_TYPE;

/// Timeout applied by [`HttpTransport::new`](crate::HttpTransport::new).
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// `User-Agent` sent with every request.
pub const USER_AGENT: &str = concat!("gmopg-rs/", env!("CARGO_PKG_VERSION"));
