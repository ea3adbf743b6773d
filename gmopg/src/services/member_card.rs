//! Member and stored card operations.

use gmopg_proto::{AttributeMap, ResponseMap};

use crate::client::GatewayClient;
use crate::error::GatewayError;
use crate::operation::{CredentialRequirement, MemberCondition, OperationDescriptor};

/// Member and stored card operations.
#[derive(Debug, Clone)]
pub struct MemberCardService {
    client: GatewayClient,
}

impl MemberCardService {
    /// `SaveMember`.
    pub const SAVE_MEMBER: OperationDescriptor = OperationDescriptor::new(
        "SaveMember",
        "/payment/SaveMember.idPass",
        CredentialRequirement::Site,
    );

    /// `UpdateMember`.
    pub const UPDATE_MEMBER: OperationDescriptor = OperationDescriptor::new(
        "UpdateMember",
        "/payment/UpdateMember.idPass",
        CredentialRequirement::Site,
    );

    /// `SearchMember`.
    pub const SEARCH_MEMBER: OperationDescriptor = OperationDescriptor::new(
        "SearchMember",
        "/payment/SearchMember.idPass",
        CredentialRequirement::Site,
    );

    /// `DeleteMember`.
    pub const DELETE_MEMBER: OperationDescriptor = OperationDescriptor::new(
        "DeleteMember",
        "/payment/DeleteMember.idPass",
        CredentialRequirement::Site,
    );

    /// `SaveCard`.
    pub const SAVE_CARD: OperationDescriptor = OperationDescriptor::new(
        "SaveCard",
        "/payment/SaveCard.idPass",
        CredentialRequirement::Site,
    );

    /// `TradedCard`.
    pub const TRADED_CARD: OperationDescriptor = OperationDescriptor::new(
        "TradedCard",
        "/payment/TradedCard.idPass",
        CredentialRequirement::Both,
    );

    /// `SearchCard`.
    pub const SEARCH_CARD: OperationDescriptor = OperationDescriptor::new(
        "SearchCard",
        "/payment/SearchCard.idPass",
        CredentialRequirement::Site,
    );

    /// `SearchCardDetail`.
    pub const SEARCH_CARD_DETAIL: OperationDescriptor = OperationDescriptor::new(
        "SearchCardDetail",
        "/payment/SearchCardDetail.idPass",
        CredentialRequirement::Conditional(MemberCondition::SiteAlongsideShop),
    );

    /// `DeleteCard`.
    pub const DELETE_CARD: OperationDescriptor = OperationDescriptor::new(
        "DeleteCard",
        "/payment/DeleteCard.idPass",
        CredentialRequirement::Site,
    );

    /// Every operation of this service.
    pub const OPERATIONS: &'static [OperationDescriptor] = &[
        Self::SAVE_MEMBER,
        Self::UPDATE_MEMBER,
        Self::SEARCH_MEMBER,
        Self::DELETE_MEMBER,
        Self::SAVE_CARD,
        Self::TRADED_CARD,
        Self::SEARCH_CARD,
        Self::SEARCH_CARD_DETAIL,
        Self::DELETE_CARD,
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

    /// Registers a member.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] if the request fails.
    pub async fn save_member(&self, attributes: AttributeMap) -> Result<ResponseMap, GatewayError> {
        self.client.call(&Self::SAVE_MEMBER, attributes).await
    }

    /// Updates a member.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] if the request fails.
    pub async fn update_member(
        &self,
        attributes: AttributeMap,
    ) -> Result<ResponseMap, GatewayError> {
        self.client.call(&Self::UPDATE_MEMBER, attributes).await
    }

    /// Looks up a member.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] if the request fails.
    pub async fn search_member(
        &self,
        attributes: AttributeMap,
    ) -> Result<ResponseMap, GatewayError> {
        self.client.call(&Self::SEARCH_MEMBER, attributes).await
    }

    /// Deletes a member.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] if the request fails.
    pub async fn delete_member(
        &self,
        attributes: AttributeMap,
    ) -> Result<ResponseMap, GatewayError> {
        self.client.call(&Self::DELETE_MEMBER, attributes).await
    }

    /// Stores a card for a member.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] if the request fails.
    pub async fn save_card(&self, attributes: AttributeMap) -> Result<ResponseMap, GatewayError> {
        self.client.call(&Self::SAVE_CARD, attributes).await
    }

    /// Stores the card of a completed transaction for a member.
    ///
    /// Carries both site and shop credentials.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] if the request fails.
    pub async fn traded_card(&self, attributes: AttributeMap) -> Result<ResponseMap, GatewayError> {
        self.client.call(&Self::TRADED_CARD, attributes).await
    }

    /// Lists the stored cards of a member.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] if the request fails.
    pub async fn search_card(&self, attributes: AttributeMap) -> Result<ResponseMap, GatewayError> {
        self.client.call(&Self::SEARCH_CARD, attributes).await
    }

    /// Looks up card details by token or stored card.
    ///
    /// Site credentials are added whenever the caller sends a `MemberID`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] if the request fails.
    pub async fn search_card_detail(
        &self,
        attributes: AttributeMap,
    ) -> Result<ResponseMap, GatewayError> {
        self.client.call(&Self::SEARCH_CARD_DETAIL, attributes).await
    }

    /// Deletes a stored card.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] if the request fails.
    pub async fn delete_card(&self, attributes: AttributeMap) -> Result<ResponseMap, GatewayError> {
        self.client.call(&Self::DELETE_CARD, attributes).await
    }
}
