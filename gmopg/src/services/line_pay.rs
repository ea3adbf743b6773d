//! LINE Pay operations, including RegKey (automatic payment) management.

use gmopg_proto::{AttributeMap, ResponseMap};

use crate::client::GatewayClient;
use crate::error::GatewayError;
use crate::operation::{CredentialRequirement, OperationDescriptor};

/// LINE Pay operations, including RegKey (automatic payment) management.
#[derive(Debug, Clone)]
pub struct LinePayService {
    client: GatewayClient,
}

impl LinePayService {
    /// `EntryTranLinepay`.
    pub const ENTRY_TRAN_LINEPAY: OperationDescriptor = OperationDescriptor::new(
        "EntryTranLinepay",
        "/payment/EntryTranLinepay.idPass",
        CredentialRequirement::Shop,
    );

    /// `ExecTranLinepay`.
    pub const EXEC_TRAN_LINEPAY: OperationDescriptor = OperationDescriptor::new(
        "ExecTranLinepay",
        "/payment/ExecTranLinepay.idPass",
        CredentialRequirement::Shop,
    );

    /// `LinepayStart`.
    pub const LINEPAY_START: OperationDescriptor = OperationDescriptor::new(
        "LinepayStart",
        "/payment/LinepayStart.idPass",
        CredentialRequirement::None,
    );

    /// `LinepayCancelReturn`.
    pub const LINEPAY_CANCEL_RETURN: OperationDescriptor = OperationDescriptor::new(
        "LinepayCancelReturn",
        "/payment/LinepayCancelReturn.idPass",
        CredentialRequirement::Shop,
    );

    /// `LinepaySales`.
    pub const LINEPAY_SALES: OperationDescriptor = OperationDescriptor::new(
        "LinepaySales",
        "/payment/LinepaySales.idPass",
        CredentialRequirement::Shop,
    );

    /// `SearchTradeMulti`.
    pub const SEARCH_TRADE_MULTI: OperationDescriptor = OperationDescriptor::new(
        "SearchTradeMulti",
        "/payment/SearchTradeMulti.idPass",
        CredentialRequirement::Shop,
    );

    /// `LinepayInquiryRegkey`.
    pub const LINEPAY_INQUIRY_REGKEY: OperationDescriptor = OperationDescriptor::new(
        "LinepayInquiryRegkey",
        "/payment/LinepayInquiryRegkey.idPass",
        CredentialRequirement::Shop,
    );

    /// `LinepayEndRegkey`.
    pub const LINEPAY_END_REGKEY: OperationDescriptor = OperationDescriptor::new(
        "LinepayEndRegkey",
        "/payment/LinepayEndRegkey.idPass",
        CredentialRequirement::Shop,
    );

    /// Every operation of this service.
    pub const OPERATIONS: &'static [OperationDescriptor] = &[
        Self::ENTRY_TRAN_LINEPAY,
        Self::EXEC_TRAN_LINEPAY,
        Self::LINEPAY_START,
        Self::LINEPAY_CANCEL_RETURN,
        Self::LINEPAY_SALES,
        Self::SEARCH_TRADE_MULTI,
        Self::LINEPAY_INQUIRY_REGKEY,
        Self::LINEPAY_END_REGKEY,
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

    /// Registers a LINE Pay transaction.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] if the request fails.
    pub async fn entry_tran_linepay(
        &self,
        attributes: AttributeMap,
    ) -> Result<ResponseMap, GatewayError> {
        self.client.call(&Self::ENTRY_TRAN_LINEPAY, attributes).await
    }

    /// Executes a LINE Pay transaction and returns the redirect token.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] if the request fails.
    pub async fn exec_tran_linepay(
        &self,
        attributes: AttributeMap,
    ) -> Result<ResponseMap, GatewayError> {
        self.client.call(&Self::EXEC_TRAN_LINEPAY, attributes).await
    }

    /// Starts the LINE Pay payment screen flow.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] if the request fails.
    pub async fn linepay_start(
        &self,
        attributes: AttributeMap,
    ) -> Result<ResponseMap, GatewayError> {
        self.client.call(&Self::LINEPAY_START, attributes).await
    }

    /// Cancels or refunds a LINE Pay payment.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] if the request fails.
    pub async fn linepay_cancel_return(
        &self,
        attributes: AttributeMap,
    ) -> Result<ResponseMap, GatewayError> {
        self.client.call(&Self::LINEPAY_CANCEL_RETURN, attributes).await
    }

    /// Captures an authorized LINE Pay payment.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] if the request fails.
    pub async fn linepay_sales(
        &self,
        attributes: AttributeMap,
    ) -> Result<ResponseMap, GatewayError> {
        self.client.call(&Self::LINEPAY_SALES, attributes).await
    }

    /// Searches a LINE Pay transaction by order ID.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] if the request fails.
    pub async fn search_trade_multi(
        &self,
        attributes: AttributeMap,
    ) -> Result<ResponseMap, GatewayError> {
        self.client.call(&Self::SEARCH_TRADE_MULTI, attributes).await
    }

    /// Checks the status of a LINE Pay RegKey.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] if the request fails.
    pub async fn linepay_inquiry_regkey(
        &self,
        attributes: AttributeMap,
    ) -> Result<ResponseMap, GatewayError> {
        self.client.call(&Self::LINEPAY_INQUIRY_REGKEY, attributes).await
    }

    /// Expires a LINE Pay RegKey.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] if the request fails.
    pub async fn linepay_end_regkey(
        &self,
        attributes: AttributeMap,
    ) -> Result<ResponseMap, GatewayError> {
        self.client.call(&Self::LINEPAY_END_REGKEY, attributes).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::{Credentials, GatewayConfig};
    use crate::transport::testing::RecordingTransport;

    #[tokio::test]
    async fn test_linepay_start_sends_attributes_only() {
        let transport = Arc::new(RecordingTransport::replying(""));
        let config = GatewayConfig::new(
            "https://pt01.mul-pay.jp/",
            Credentials::new("site", "site-pass", "shop", "shop-pass"),
        );
        let service = GatewayClient::new(config, Arc::clone(&transport)).line_pay();

        let response = service
            .linepay_start(AttributeMap::from([("AccessID", "a1"), ("Token", "tok")]))
            .await
            .unwrap();
        assert!(response.is_empty());

        let request = transport.last_request();
        assert_eq!(
            request.url,
            "https://pt01.mul-pay.jp/payment/LinepayStart.idPass"
        );
        assert_eq!(request.body(), "AccessID=a1&Token=tok");

        service
            .linepay_end_regkey(AttributeMap::from([("RegKey", "rk")]))
            .await
            .unwrap();
        assert_eq!(
            transport.last_request().body(),
            "ShopID=shop&ShopPass=shop-pass&RegKey=rk"
        );
    }
}
