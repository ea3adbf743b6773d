//! The HTTP seam.
//!
//! The core crate never talks to the network itself. A [`Transport`] takes a
//! fully built [`GatewayRequest`], POSTs its form body and hands back the raw
//! response text. `gmopg-http` provides the reqwest-backed implementation;
//! tests plug in an in-memory one.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::request::GatewayRequest;

/// A boxed, sendable future.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Error produced by a [`Transport`].
pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

/// Sends form-encoded requests to the gateway.
pub trait Transport: Send + Sync {
    /// POSTs `request.body()` to `request.url` and returns the response text.
    ///
    /// Implementations must treat non-success HTTP statuses and network
    /// failures as errors. Business errors travel in-band in the body and
    /// are not errors at this level.
    fn post_form<'a>(
        &'a self,
        request: &'a GatewayRequest,
    ) -> BoxFuture<'a, Result<String, TransportError>>;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn post_form<'a>(
        &'a self,
        request: &'a GatewayRequest,
    ) -> BoxFuture<'a, Result<String, TransportError>> {
        (**self).post_form(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn post_form<'a>(
        &'a self,
        request: &'a GatewayRequest,
    ) -> BoxFuture<'a, Result<String, TransportError>> {
        (**self).post_form(request)
    }
}
