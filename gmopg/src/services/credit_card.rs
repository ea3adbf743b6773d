//! Credit card operations: entry/execution, 3DS 2.0 authentication, alteration and search.

use gmopg_proto::{AttributeMap, ResponseMap};

use crate::client::GatewayClient;
use crate::error::GatewayError;
use crate::operation::{CredentialRequirement, MemberCondition, OperationDescriptor};

/// Credit card operations: entry/execution, 3DS 2.0 authentication, alteration and search.
#[derive(Debug, Clone)]
pub struct CreditCardService {
    client: GatewayClient,
}

impl CreditCardService {
    /// `EntryTran`.
    pub const ENTRY_TRAN: OperationDescriptor = OperationDescriptor::new(
        "EntryTran",
        "/payment/EntryTran.idPass",
        CredentialRequirement::Shop,
    );

    /// `ExecTran`.
    pub const EXEC_TRAN: OperationDescriptor = OperationDescriptor::new(
        "ExecTran",
        "/payment/ExecTran.idPass",
        CredentialRequirement::Conditional(MemberCondition::SiteInsteadOfShop),
    );

    /// `Tds2Auth`.
    pub const TDS2_AUTH: OperationDescriptor = OperationDescriptor::new(
        "Tds2Auth",
        "/payment/Tds2Auth.idPass",
        CredentialRequirement::None,
    );

    /// `Tds2Result`.
    pub const TDS2_RESULT: OperationDescriptor = OperationDescriptor::new(
        "Tds2Result",
        "/payment/Tds2Result.idPass",
        CredentialRequirement::None,
    );

    /// `Tds2AuthApp`.
    pub const TDS2_AUTH_APP: OperationDescriptor = OperationDescriptor::new(
        "Tds2AuthApp",
        "/payment/Tds2AuthApp.idPass",
        CredentialRequirement::None,
    );

    /// `Tds2ResultApp`.
    pub const TDS2_RESULT_APP: OperationDescriptor = OperationDescriptor::new(
        "Tds2ResultApp",
        "/payment/Tds2ResultApp.idPass",
        CredentialRequirement::None,
    );

    /// `SecureTran2`.
    pub const SECURE_TRAN2: OperationDescriptor = OperationDescriptor::new(
        "SecureTran2",
        "/payment/SecureTran2.idPass",
        CredentialRequirement::None,
    );

    /// `AlterTran`.
    pub const ALTER_TRAN: OperationDescriptor = OperationDescriptor::new(
        "AlterTran",
        "/payment/AlterTran.idPass",
        CredentialRequirement::Shop,
    );

    /// `ChangeTran`.
    pub const CHANGE_TRAN: OperationDescriptor = OperationDescriptor::new(
        "ChangeTran",
        "/payment/ChangeTran.idPass",
        CredentialRequirement::Shop,
    );

    /// `SearchTrade`.
    pub const SEARCH_TRADE: OperationDescriptor = OperationDescriptor::new(
        "SearchTrade",
        "/payment/SearchTrade.idPass",
        CredentialRequirement::Shop,
    );

    /// Every operation of this service.
    pub const OPERATIONS: &'static [OperationDescriptor] = &[
        Self::ENTRY_TRAN,
        Self::EXEC_TRAN,
        Self::TDS2_AUTH,
        Self::TDS2_RESULT,
        Self::TDS2_AUTH_APP,
        Self::TDS2_RESULT_APP,
        Self::SECURE_TRAN2,
        Self::ALTER_TRAN,
        Self::CHANGE_TRAN,
        Self::SEARCH_TRADE,
    ];

    /// Creates the service over a shared client.
    #[must_use]
    pub const fn new(client: GatewayClient) -> Self {
        Self { client }
    }

    /// Returns the underlying client.
    #[must_use]
    pub const fn client(&self) -> &GatewayClient {
        &self.client
    }

    /// Registers a transaction and returns its `AccessID` / `AccessPass`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] if the request fails.
    pub async fn entry_tran(&self, attributes: AttributeMap) -> Result<ResponseMap, GatewayError> {
        self.client.call(&Self::ENTRY_TRAN, attributes).await
    }

    /// Executes a registered transaction.
    ///
    /// With a non-empty `MemberID` the payment is made with a stored card and the
    /// request carries site credentials instead of shop credentials.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] if the request fails.
    pub async fn exec_tran(&self, attributes: AttributeMap) -> Result<ResponseMap, GatewayError> {
        self.client.call(&Self::EXEC_TRAN, attributes).await
    }

    /// Continues 3DS 2.0 authentication after the browser challenge.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] if the request fails.
    pub async fn tds2_auth(&self, attributes: AttributeMap) -> Result<ResponseMap, GatewayError> {
        self.client.call(&Self::TDS2_AUTH, attributes).await
    }

    /// Fetches the 3DS 2.0 authentication result.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] if the request fails.
    pub async fn tds2_result(&self, attributes: AttributeMap) -> Result<ResponseMap, GatewayError> {
        self.client.call(&Self::TDS2_RESULT, attributes).await
    }

    /// Continues 3DS 2.0 authentication for app (SDK) flows.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] if the request fails.
    pub async fn tds2_auth_app(
        &self,
        attributes: AttributeMap,
    ) -> Result<ResponseMap, GatewayError> {
        self.client.call(&Self::TDS2_AUTH_APP, attributes).await
    }

    /// Fetches the 3DS 2.0 authentication result for app flows.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] if the request fails.
    pub async fn tds2_result_app(
        &self,
        attributes: AttributeMap,
    ) -> Result<ResponseMap, GatewayError> {
        self.client.call(&Self::TDS2_RESULT_APP, attributes).await
    }

    /// Completes a 3DS 2.0 payment after authentication.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] if the request fails.
    pub async fn secure_tran2(
        &self,
        attributes: AttributeMap,
    ) -> Result<ResponseMap, GatewayError> {
        self.client.call(&Self::SECURE_TRAN2, attributes).await
    }

    /// Alters a transaction (capture, void, refund, re-authorization).
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] if the request fails.
    pub async fn alter_tran(&self, attributes: AttributeMap) -> Result<ResponseMap, GatewayError> {
        self.client.call(&Self::ALTER_TRAN, attributes).await
    }

    /// Changes the amount of a transaction.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] if the request fails.
    pub async fn change_tran(&self, attributes: AttributeMap) -> Result<ResponseMap, GatewayError> {
        self.client.call(&Self::CHANGE_TRAN, attributes).await
    }

    /// Searches a transaction by order ID.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] if the request fails.
    pub async fn search_trade(
        &self,
        attributes: AttributeMap,
    ) -> Result<ResponseMap, GatewayError> {
        self.client.call(&Self::SEARCH_TRADE, attributes).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::{Credentials, GatewayConfig, SANDBOX_URL};
    use crate::transport::testing::RecordingTransport;

    fn service(transport: &Arc<RecordingTransport>) -> CreditCardService {
        let config = GatewayConfig::new(
            SANDBOX_URL,
            Credentials::new("site", "site-pass", "shop", "shop-pass"),
        );
        GatewayClient::new(config, Arc::clone(transport)).credit_card()
    }

    #[tokio::test]
    async fn test_entry_tran_posts_shop_credentials_and_attributes() {
        let transport = Arc::new(RecordingTransport::replying("AccessID=a1&AccessPass=p1"));

        let response = service(&transport)
            .entry_tran(AttributeMap::from([("OrderID", "ORD1"), ("Amount", "1000")]))
            .await
            .unwrap();

        let request = transport.last_request();
        assert_eq!(
            request.url,
            "https://pt01.mul-pay.jp/payment/EntryTran.idPass"
        );
        let body = request.body();
        assert!(body.contains("ShopID=shop"));
        assert!(body.contains("ShopPass=shop-pass"));
        assert!(body.contains("OrderID=ORD1"));
        assert!(body.contains("Amount=1000"));
        assert!(!body.contains("SiteID"));

        assert_eq!(response.get("AccessID"), Some("a1"));
        assert!(response.errors().is_none());
    }

    #[tokio::test]
    async fn test_exec_tran_with_member_uses_site_credentials() {
        let transport = Arc::new(RecordingTransport::replying("ACS=0&OrderID=ORD1"));

        service(&transport)
            .exec_tran(AttributeMap::from([
                ("AccessID", "a1"),
                ("AccessPass", "p1"),
                ("MemberID", "M1"),
                ("CardSeq", "0"),
            ]))
            .await
            .unwrap();

        let form = transport.last_request().form;
        assert_eq!(form.get_str("SiteID").as_deref(), Some("site"));
        assert!(!form.contains_key("ShopID"));
    }

    #[tokio::test]
    async fn test_exec_tran_with_token_uses_shop_credentials() {
        let transport = Arc::new(RecordingTransport::replying("ACS=0&OrderID=ORD1"));

        service(&transport)
            .exec_tran(AttributeMap::from([
                ("AccessID", "a1"),
                ("AccessPass", "p1"),
                ("Token", "tok"),
            ]))
            .await
            .unwrap();

        let form = transport.last_request().form;
        assert_eq!(form.get_str("ShopID").as_deref(), Some("shop"));
        assert!(!form.contains_key("SiteID"));
    }

    #[tokio::test]
    async fn test_three_d_secure_calls_send_no_credentials() {
        let transport = Arc::new(RecordingTransport::replying("Result=Y"));
        let service = service(&transport);

        service
            .tds2_auth(AttributeMap::from([("AccessID", "a1"), ("AccessPass", "p1")]))
            .await
            .unwrap();
        service
            .secure_tran2(AttributeMap::from([("AccessID", "a1"), ("AccessPass", "p1")]))
            .await
            .unwrap();

        for request in transport.requests() {
            assert_eq!(request.body(), "AccessID=a1&AccessPass=p1");
        }
        assert!(transport.requests()[1].url.ends_with("/payment/SecureTran2.idPass"));
    }

    #[tokio::test]
    async fn test_business_error_is_returned_in_band() {
        let transport = Arc::new(RecordingTransport::replying("ErrCode=E01&ErrInfo=100|200"));

        let response = service(&transport)
            .alter_tran(AttributeMap::from([("JobCd", "SALES")]))
            .await
            .unwrap();

        let errors = response.errors().unwrap();
        let codes: Vec<&String> = errors.keys().collect();
        assert_eq!(codes, ["100", "200"]);
        assert_eq!(errors["100"], "gmopg-errors.100");
    }
}
