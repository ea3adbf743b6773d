//! The shared gateway client.
//!
//! [`GatewayClient`] owns the configuration, the transport and the response
//! decoder. Every service method funnels through [`GatewayClient::call`]:
//! build the request, POST it, decode the body. Cloning is cheap and clones
//! share the same transport.

use std::fmt;
use std::sync::Arc;

use gmopg_proto::{AttributeMap, ResponseMap};

#[cfg(feature = "telemetry")]
use tracing::instrument;

use crate::catalog::{ErrorCatalog, MessageCatalog};
use crate::config::GatewayConfig;
use crate::decode::ResponseDecoder;
use crate::error::GatewayError;
use crate::operation::OperationDescriptor;
use crate::request::GatewayRequest;
use crate::services::{CreditCardService, LinePayService, MemberCardService, PayPayService};
use crate::transport::Transport;

/// Client for the GMO Payment Gateway.
#[derive(Clone)]
pub struct GatewayClient {
    config: Arc<GatewayConfig>,
    transport: Arc<dyn Transport>,
    decoder: ResponseDecoder,
}

impl fmt::Debug for GatewayClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayClient")
            .field("config", &self.config)
            .field("decoder", &self.decoder)
            .finish_non_exhaustive()
    }
}

impl GatewayClient {
    /// Creates a client with an empty message catalog.
    ///
    /// Unknown error codes then expand to their `gmopg-errors.<code>` key;
    /// use [`with_catalog`](Self::with_catalog) to supply messages.
    pub fn new(config: GatewayConfig, transport: impl Transport + 'static) -> Self {
        Self::from_parts(Arc::new(config), Arc::new(transport))
    }

    /// Creates a client from already shared parts.
    #[must_use]
    pub fn from_parts(config: Arc<GatewayConfig>, transport: Arc<dyn Transport>) -> Self {
        let decoder = ResponseDecoder::new(Arc::new(MessageCatalog::new()), config.locale.clone());
        Self {
            config,
            transport,
            decoder,
        }
    }

    /// Replaces the error-message catalog.
    #[must_use]
    pub fn with_catalog(mut self, catalog: impl ErrorCatalog + 'static) -> Self {
        self.decoder = ResponseDecoder::new(Arc::new(catalog), self.config.locale.clone());
        self
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Returns the response decoder.
    #[must_use]
    pub const fn decoder(&self) -> &ResponseDecoder {
        &self.decoder
    }

    /// Builds the request an operation would send, without sending it.
    #[must_use]
    pub fn build_request(
        &self,
        operation: &OperationDescriptor,
        attributes: AttributeMap,
    ) -> GatewayRequest {
        operation.build_request(&self.config, attributes)
    }

    /// Executes one gateway operation.
    ///
    /// A gateway-reported business error is not an `Err`: the returned map
    /// carries `ErrCode` / `ErrInfo` and the expanded `errors` mapping.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] if the request could not be sent
    /// or the gateway answered with a non-success HTTP status.
    #[cfg_attr(
        feature = "telemetry",
        instrument(
            name = "gmopg.client.call",
            skip_all,
            fields(operation = operation.name, path = operation.path),
            err
        )
    )]
    pub async fn call(
        &self,
        operation: &OperationDescriptor,
        attributes: AttributeMap,
    ) -> Result<ResponseMap, GatewayError> {
        let request = self.build_request(operation, attributes);
        let body = self
            .transport
            .post_form(&request)
            .await
            .map_err(GatewayError::Transport)?;
        let response = self.decoder.decode(&body);
        record_business_error(&response);
        Ok(response)
    }

    /// Credit card operations.
    #[must_use]
    pub fn credit_card(&self) -> CreditCardService {
        CreditCardService::new(self.clone())
    }

    /// LINE Pay operations.
    #[must_use]
    pub fn line_pay(&self) -> LinePayService {
        LinePayService::new(self.clone())
    }

    /// PayPay operations.
    #[must_use]
    pub fn paypay(&self) -> PayPayService {
        PayPayService::new(self.clone())
    }

    /// Member and stored card operations.
    #[must_use]
    pub fn member_card(&self) -> MemberCardService {
        MemberCardService::new(self.clone())
    }
}

/// Logs a gateway-reported business error on the current span.
#[cfg(feature = "telemetry")]
fn record_business_error(response: &ResponseMap) {
    if response.has_error() {
        tracing::warn!(
            err_code = response.error_code().unwrap_or_default(),
            err_info = response.error_info().unwrap_or_default(),
            "Gateway reported an error"
        );
    }
}

/// Noop if telemetry feature is off.
#[cfg(not(feature = "telemetry"))]
const fn record_business_error(_response: &ResponseMap) {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Credentials;
    use crate::operation::CredentialRequirement;
    use crate::transport::testing::RecordingTransport;

    const ENTRY: OperationDescriptor = OperationDescriptor::new(
        "EntryTran",
        "/payment/EntryTran.idPass",
        CredentialRequirement::Shop,
    );

    fn config() -> GatewayConfig {
        GatewayConfig::new(
            "https://pt01.mul-pay.jp",
            Credentials::new("site", "site-pass", "shop", "shop-pass"),
        )
    }

    #[tokio::test]
    async fn test_call_sends_built_request() {
        let transport = Arc::new(RecordingTransport::replying("AccessID=a1&AccessPass=p1"));
        let client = GatewayClient::new(config(), Arc::clone(&transport));

        let response = client
            .call(&ENTRY, AttributeMap::from([("OrderID", "ORD1")]))
            .await
            .unwrap();

        assert_eq!(response.get("AccessID"), Some("a1"));
        let request = transport.last_request();
        assert_eq!(request.url, "https://pt01.mul-pay.jp/payment/EntryTran.idPass");
        assert_eq!(request.body(), "ShopID=shop&ShopPass=shop-pass&OrderID=ORD1");
    }

    #[tokio::test]
    async fn test_call_expands_errors_with_catalog() {
        let transport = RecordingTransport::replying("ErrCode=E01&ErrInfo=E01010001");
        let catalog = MessageCatalog::new().with_messages(
            "en",
            [("E01010001", "Shop ID is not specified.")],
        );
        let client = GatewayClient::new(config().with_locale("en"), transport).with_catalog(catalog);

        let response = client.call(&ENTRY, AttributeMap::new()).await.unwrap();

        assert_eq!(
            response.errors().unwrap()["E01010001"],
            "Shop ID is not specified."
        );
    }

    #[tokio::test]
    async fn test_transport_failure_is_an_error() {
        let client = GatewayClient::new(config(), RecordingTransport::failing("connection refused"));

        let err = client.call(&ENTRY, AttributeMap::new()).await.unwrap_err();

        assert!(matches!(err, GatewayError::Transport(_)));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_build_request_does_not_send() {
        let transport = Arc::new(RecordingTransport::replying(""));
        let client = GatewayClient::new(config(), Arc::clone(&transport));

        let request = client.build_request(&ENTRY, AttributeMap::from([("Amount", 1000)]));

        assert_eq!(request.form.get_str("Amount").as_deref(), Some("1000"));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_clones_share_transport() {
        let transport = Arc::new(RecordingTransport::replying("OK=1"));
        let client = GatewayClient::new(config(), Arc::clone(&transport));
        let clone = client.clone();

        client.call(&ENTRY, AttributeMap::new()).await.unwrap();
        clone.call(&ENTRY, AttributeMap::new()).await.unwrap();

        assert_eq!(transport.requests().len(), 2);
    }
}
