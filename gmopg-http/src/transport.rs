//! A [`gmopg::Transport`] implementation that POSTs form bodies over HTTP.
//!
//! [`HttpTransport`] sends each [`GatewayRequest`] as
//! `application/x-www-form-urlencoded` and returns the response text.
//!
//! ## Features
//!
//! - Uses `reqwest` (wrapped in `reqwest-middleware`) for async HTTP requests
//! - Supports optional timeout and headers
//! - Integrates with `tracing` if the `telemetry` feature is enabled
//!
//! Non-success statuses are surfaced as [`HttpTransportError::HttpStatus`]
//! with the body attached. A 200 answer carrying `ErrCode` is a business
//! error and is left to the decoder.

use std::fmt::Display;
use std::time::Duration;

use gmopg::{BoxFuture, GatewayRequest, Transport, TransportError};
use http::HeaderMap;
use http::header::{CONTENT_TYPE, USER_AGENT};
use reqwest_middleware::ClientWithMiddleware;

#[cfg(feature = "telemetry")]
use tracing::{Span, instrument};

use crate::constants::{DEFAULT_TIMEOUT_SECS, FORM_CONTENT_TYPE, USER_AGENT as USER_AGENT_VALUE};
use crate::error::HttpTransportError;

/// HTTP transport for gateway requests.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    /// Shared HTTP client (with any caller-supplied middleware).
    client: ClientWithMiddleware,
    /// Custom headers sent with each request.
    headers: HeaderMap,
    /// Request timeout.
    timeout: Option<Duration>,
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl From<reqwest::Client> for HttpTransport {
    fn from(client: reqwest::Client) -> Self {
        Self::with_client(client.into())
    }
}

impl From<ClientWithMiddleware> for HttpTransport {
    fn from(client: ClientWithMiddleware) -> Self {
        Self::with_client(client)
    }
}

impl HttpTransport {
    /// Creates a transport with a fresh client and the default timeout.
    #[must_use]
    pub fn new() -> Self {
        Self::with_client(reqwest::Client::new().into())
            .with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a transport over an existing client, without a timeout.
    #[must_use]
    pub fn with_client(client: ClientWithMiddleware) -> Self {
        Self {
            client,
            headers: HeaderMap::new(),
            timeout: None,
        }
    }

    /// Attaches custom headers to all future requests.
    #[must_use]
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Sets a timeout for all future requests.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Removes the request timeout.
    #[must_use]
    pub const fn without_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }

    /// Returns any custom headers configured on the transport.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the configured timeout, if any.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// POSTs the form body of `request` and returns the response text.
    ///
    /// # Errors
    ///
    /// Returns [`HttpTransportError`] if the request cannot be sent, the
    /// gateway answers with a non-success status, or the body cannot be read.
    #[cfg_attr(
        feature = "telemetry",
        instrument(
            name = "gmopg.http.post_form",
            skip_all,
            fields(
                url = %request.url,
                timeout = ?self.timeout,
                otel.status_code = tracing::field::Empty,
                error.message = tracing::field::Empty,
            )
        )
    )]
    pub async fn post(&self, request: &GatewayRequest) -> Result<String, HttpTransportError> {
        let context = format!("POST {}", request.url);

        let mut req = self
            .client
            .post(request.url.as_str())
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .header(USER_AGENT, USER_AGENT_VALUE)
            .body(request.body());
        for (key, value) in &self.headers {
            req = req.header(key, value);
        }
        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }

        let result = match req.send().await {
            Err(source) => Err(HttpTransportError::Http { context, source }),
            Ok(response) => {
                let status = response.status();
                match response.text().await {
                    Err(source) => Err(HttpTransportError::ResponseBodyRead { context, source }),
                    Ok(body) if status.is_success() => Ok(body),
                    Ok(body) => Err(HttpTransportError::HttpStatus {
                        context,
                        status,
                        body,
                    }),
                }
            }
        };

        record_result_on_span(&result);

        result
    }
}

impl Transport for HttpTransport {
    fn post_form<'a>(
        &'a self,
        request: &'a GatewayRequest,
    ) -> BoxFuture<'a, Result<String, TransportError>> {
        Box::pin(async move { self.post(request).await.map_err(TransportError::from) })
    }
}

/// Records the outcome of a request on a tracing span, including status and errors.
#[cfg(feature = "telemetry")]
fn record_result_on_span<R, E: Display>(result: &Result<R, E>) {
    let span = Span::current();
    match result {
        Ok(_) => {
            span.record("otel.status_code", "OK");
        }
        Err(err) => {
            span.record("otel.status_code", "ERROR");
            span.record("error.message", tracing::field::display(err));
            tracing::event!(tracing::Level::ERROR, error = %err, "Request to gateway failed");
        }
    }
}

/// Records the outcome of a request on a tracing span, including status and errors.
/// Noop if telemetry feature is off.
#[cfg(not(feature = "telemetry"))]
const fn record_result_on_span<R, E: Display>(_result: &Result<R, E>) {}

#[cfg(test)]
mod tests {
    use super::*;
    use gmopg::{AttributeMap, Credentials, GatewayClient, GatewayConfig, GatewayError};
    use http::{HeaderValue, StatusCode};
    use wiremock::matchers::{body_string, body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> GatewayClient {
        let config = GatewayConfig::new(
            server.uri(),
            Credentials::new("site", "site-pass", "shop", "shop-pass"),
        );
        GatewayClient::new(config, HttpTransport::new())
    }

    #[tokio::test]
    async fn test_entry_tran_posts_form_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/payment/EntryTran.idPass"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string(
                "ShopID=shop&ShopPass=shop-pass&OrderID=ORD1&Amount=1000",
            ))
            .respond_with(ResponseTemplate::new(200).set_body_string("AccessID=a1&AccessPass=p1"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let response = client(&mock_server)
            .credit_card()
            .entry_tran(AttributeMap::from([("OrderID", "ORD1"), ("Amount", "1000")]))
            .await
            .unwrap();

        assert_eq!(response.get("AccessID"), Some("a1"));
        assert_eq!(response.get("AccessPass"), Some("p1"));
        assert!(response.errors().is_none());
    }

    #[tokio::test]
    async fn test_business_error_is_not_a_transport_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/payment/SaveMember.idPass"))
            .and(body_string_contains("SiteID=site"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string("ErrCode=E01&ErrInfo=E01390002"),
            )
            .mount(&mock_server)
            .await;

        let response = client(&mock_server)
            .member_card()
            .save_member(AttributeMap::from([("MemberID", "M1")]))
            .await
            .unwrap();

        assert_eq!(
            response.errors().unwrap()["E01390002"],
            "gmopg-errors.E01390002"
        );
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/payment/SearchTrade.idPass"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&mock_server)
            .await;

        let err = client(&mock_server)
            .credit_card()
            .search_trade(AttributeMap::from([("OrderID", "ORD1")]))
            .await
            .unwrap_err();

        let source = match err {
            GatewayError::Transport(source) => source,
            other => panic!("expected transport error, got {other:?}"),
        };
        let http_err = source.downcast_ref::<HttpTransportError>().unwrap();
        assert_eq!(http_err.status(), Some(StatusCode::SERVICE_UNAVAILABLE));
        assert!(http_err.to_string().contains("maintenance"));
    }

    #[tokio::test]
    async fn test_custom_headers_are_sent() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(header("x-request-id", "req-1"))
            .respond_with(ResponseTemplate::new(200).set_body_string("OK=1"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut headers = HeaderMap::new();
        headers.insert("x-request-id", HeaderValue::from_static("req-1"));
        let transport = HttpTransport::new().with_headers(headers);
        let request = GatewayRequest {
            url: format!("{}/payment/Tds2Result.idPass", mock_server.uri()),
            form: AttributeMap::from([("AccessID", "a1")]),
        };

        let body = transport.post(&request).await.unwrap();
        assert_eq!(body, "OK=1");
    }

    #[tokio::test]
    async fn test_connection_failure_is_an_error() {
        let transport = HttpTransport::new().with_timeout(Duration::from_secs(2));
        let request = GatewayRequest {
            url: "http://127.0.0.1:1/payment/EntryTran.idPass".to_owned(),
            form: AttributeMap::new(),
        };

        let err = transport.post(&request).await.unwrap_err();
        assert!(matches!(err, HttpTransportError::Http { .. }));
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_builder_options() {
        let transport = HttpTransport::new();
        assert_eq!(
            transport.timeout(),
            Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
        );
        assert!(transport.without_timeout().timeout().is_none());
    }
}
