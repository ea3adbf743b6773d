//! PayPay operations: payments, push billing and use consent (accept) flows.

use gmopg_proto::{AttributeMap, ResponseMap};

use crate::client::GatewayClient;
use crate::error::GatewayError;
use crate::operation::{CredentialRequirement, OperationDescriptor};

/// PayPay operations: payments, push billing and use consent (accept) flows.
#[derive(Debug, Clone)]
pub struct PayPayService {
    client: GatewayClient,
}

impl PayPayService {
    /// `EntryTranPaypay`.
    pub const ENTRY_TRAN_PAYPAY: OperationDescriptor = OperationDescriptor::new(
        "EntryTranPaypay",
        "/payment/EntryTranPaypay.idPass",
        CredentialRequirement::Shop,
    );

    /// `ExecTranPaypay`.
    pub const EXEC_TRAN_PAYPAY: OperationDescriptor = OperationDescriptor::new(
        "ExecTranPaypay",
        "/payment/ExecTranPaypay.idPass",
        CredentialRequirement::Shop,
    );

    /// `PaypayStart`.
    pub const PAYPAY_START: OperationDescriptor = OperationDescriptor::new(
        "PaypayStart",
        "/payment/PaypayStart.idPass",
        CredentialRequirement::None,
    );

    /// `PaypaySales`.
    pub const PAYPAY_SALES: OperationDescriptor = OperationDescriptor::new(
        "PaypaySales",
        "/payment/PaypaySales.idPass",
        CredentialRequirement::Shop,
    );

    /// `PaypayCancelReturn`.
    pub const PAYPAY_CANCEL_RETURN: OperationDescriptor = OperationDescriptor::new(
        "PaypayCancelReturn",
        "/payment/PaypayCancelReturn.idPass",
        CredentialRequirement::Shop,
    );

    /// `PaypayAcceptPush`.
    pub const PAYPAY_ACCEPT_PUSH: OperationDescriptor = OperationDescriptor::new(
        "PaypayAcceptPush",
        "/payment/PaypayAcceptPush.idPass",
        CredentialRequirement::Shop,
    );

    /// `PaypayAcceptPushCancel`.
    // Shares the accept-push endpoint. Kept as published until confirmed
    // against the gateway API reference.
    pub const PAYPAY_ACCEPT_PUSH_CANCEL: OperationDescriptor = OperationDescriptor::new(
        "PaypayAcceptPushCancel",
        "/payment/PaypayAcceptPush.idPass",
        CredentialRequirement::Shop,
    );

    /// `SearchTradeMulti`.
    pub const SEARCH_TRADE_MULTI: OperationDescriptor = OperationDescriptor::new(
        "SearchTradeMulti",
        "/payment/SearchTradeMulti.idPass",
        CredentialRequirement::Shop,
    );

    /// `EntryTranPaypayAccept`.
    pub const ENTRY_TRAN_PAYPAY_ACCEPT: OperationDescriptor = OperationDescriptor::new(
        "EntryTranPaypayAccept",
        "/payment/EntryTranPaypayAccept.idPass",
        CredentialRequirement::Shop,
    );

    /// `ExecTranPaypayAccept`.
    pub const EXEC_TRAN_PAYPAY_ACCEPT: OperationDescriptor = OperationDescriptor::new(
        "ExecTranPaypayAccept",
        "/payment/ExecTranPaypayAccept.idPass",
        CredentialRequirement::Shop,
    );

    /// `PaypayAcceptStart`.
    pub const PAYPAY_ACCEPT_START: OperationDescriptor = OperationDescriptor::new(
        "PaypayAcceptStart",
        "/payment/PaypayAcceptStart.idPass",
        CredentialRequirement::None,
    );

    /// `PaypayAcceptEnd`.
    pub const PAYPAY_ACCEPT_END: OperationDescriptor = OperationDescriptor::new(
        "PaypayAcceptEnd",
        "/payment/PaypayAcceptEnd.idPass",
        CredentialRequirement::Shop,
    );

    /// Every operation of this service.
    pub const OPERATIONS: &'static [OperationDescriptor] = &[
        Self::ENTRY_TRAN_PAYPAY,
        Self::EXEC_TRAN_PAYPAY,
        Self::PAYPAY_START,
        Self::PAYPAY_SALES,
        Self::PAYPAY_CANCEL_RETURN,
        Self::PAYPAY_ACCEPT_PUSH,
        Self::PAYPAY_ACCEPT_PUSH_CANCEL,
        Self::SEARCH_TRADE_MULTI,
        Self::ENTRY_TRAN_PAYPAY_ACCEPT,
        Self::EXEC_TRAN_PAYPAY_ACCEPT,
        Self::PAYPAY_ACCEPT_START,
        Self::PAYPAY_ACCEPT_END,
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

    /// Registers a PayPay transaction.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] if the request fails.
    pub async fn entry_tran_paypay(
        &self,
        attributes: AttributeMap,
    ) -> Result<ResponseMap, GatewayError> {
        self.client.call(&Self::ENTRY_TRAN_PAYPAY, attributes).await
    }

    /// Executes a PayPay transaction.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] if the request fails.
    pub async fn exec_tran_paypay(
        &self,
        attributes: AttributeMap,
    ) -> Result<ResponseMap, GatewayError> {
        self.client.call(&Self::EXEC_TRAN_PAYPAY, attributes).await
    }

    /// Starts the PayPay payment screen flow.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] if the request fails.
    pub async fn paypay_start(
        &self,
        attributes: AttributeMap,
    ) -> Result<ResponseMap, GatewayError> {
        self.client.call(&Self::PAYPAY_START, attributes).await
    }

    /// Captures an authorized PayPay payment.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] if the request fails.
    pub async fn paypay_sales(
        &self,
        attributes: AttributeMap,
    ) -> Result<ResponseMap, GatewayError> {
        self.client.call(&Self::PAYPAY_SALES, attributes).await
    }

    /// Cancels or refunds a PayPay payment.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] if the request fails.
    pub async fn paypay_cancel_return(
        &self,
        attributes: AttributeMap,
    ) -> Result<ResponseMap, GatewayError> {
        self.client.call(&Self::PAYPAY_CANCEL_RETURN, attributes).await
    }

    /// Requests a push payment against a use consent.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] if the request fails.
    pub async fn paypay_accept_push(
        &self,
        attributes: AttributeMap,
    ) -> Result<ResponseMap, GatewayError> {
        self.client.call(&Self::PAYPAY_ACCEPT_PUSH, attributes).await
    }

    /// Cancels a push payment request.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] if the request fails.
    pub async fn paypay_accept_push_cancel(
        &self,
        attributes: AttributeMap,
    ) -> Result<ResponseMap, GatewayError> {
        self.client.call(&Self::PAYPAY_ACCEPT_PUSH_CANCEL, attributes).await
    }

    /// Searches a PayPay transaction by order ID.
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

    /// Registers a PayPay use-consent transaction.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] if the request fails.
    pub async fn entry_tran_paypay_accept(
        &self,
        attributes: AttributeMap,
    ) -> Result<ResponseMap, GatewayError> {
        self.client.call(&Self::ENTRY_TRAN_PAYPAY_ACCEPT, attributes).await
    }

    /// Executes a PayPay use-consent transaction.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] if the request fails.
    pub async fn exec_tran_paypay_accept(
        &self,
        attributes: AttributeMap,
    ) -> Result<ResponseMap, GatewayError> {
        self.client.call(&Self::EXEC_TRAN_PAYPAY_ACCEPT, attributes).await
    }

    /// Starts the PayPay use-consent screen flow.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] if the request fails.
    pub async fn paypay_accept_start(
        &self,
        attributes: AttributeMap,
    ) -> Result<ResponseMap, GatewayError> {
        self.client.call(&Self::PAYPAY_ACCEPT_START, attributes).await
    }

    /// Terminates a PayPay use consent.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] if the request fails.
    pub async fn paypay_accept_end(
        &self,
        attributes: AttributeMap,
    ) -> Result<ResponseMap, GatewayError> {
        self.client.call(&Self::PAYPAY_ACCEPT_END, attributes).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::{Credentials, GatewayConfig, SANDBOX_URL};
    use crate::transport::testing::RecordingTransport;

    #[tokio::test]
    async fn test_accept_push_and_cancel_hit_same_endpoint() {
        let transport = Arc::new(RecordingTransport::replying("Status=REQSUCCESS"));
        let config = GatewayConfig::new(
            SANDBOX_URL,
            Credentials::new("site", "site-pass", "shop", "shop-pass"),
        );
        let service = GatewayClient::new(config, Arc::clone(&transport)).paypay();

        service
            .paypay_accept_push(AttributeMap::from([("OrderID", "ORD1")]))
            .await
            .unwrap();
        service
            .paypay_accept_push_cancel(AttributeMap::from([("OrderID", "ORD1")]))
            .await
            .unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].url, requests[1].url);
        assert!(requests[1].url.ends_with("/payment/PaypayAcceptPush.idPass"));
        assert_eq!(
            requests[1].body(),
            "ShopID=shop&ShopPass=shop-pass&OrderID=ORD1"
        );
    }
}
