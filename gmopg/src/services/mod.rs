//! Operation tables for the four gateway services.
//!
//! Each service is a thin handle over a shared
//! [`GatewayClient`](crate::GatewayClient): a static
//! table of [`OperationDescriptor`]s plus one method per operation. Services
//! never branch on their own; all variation between operations lives in the
//! descriptor data.
//!
//! The [`Service`] enum offers the same tables by name, for callers that
//! pick operations at runtime (the CLI, routing layers).

mod credit_card;
mod line_pay;
mod member_card;
mod paypay;

use std::fmt;
use std::str::FromStr;

pub use credit_card::CreditCardService;
pub use line_pay::LinePayService;
pub use member_card::MemberCardService;
pub use paypay::PayPayService;

use crate::error::GatewayError;
use crate::operation::OperationDescriptor;

/// The gateway service groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    /// Credit card payments and 3DS 2.0.
    CreditCard,
    /// LINE Pay.
    LinePay,
    /// PayPay.
    PayPay,
    /// Stored members and cards.
    MemberCard,
}

impl Service {
    /// All services, in display order.
    pub const ALL: [Self; 4] = [
        Self::CreditCard,
        Self::LinePay,
        Self::PayPay,
        Self::MemberCard,
    ];

    /// Returns the kebab-case service name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::CreditCard => "credit-card",
            Self::LinePay => "line-pay",
            Self::PayPay => "paypay",
            Self::MemberCard => "member-card",
        }
    }

    /// Returns the operation table of this service.
    #[must_use]
    pub const fn operations(self) -> &'static [OperationDescriptor] {
        match self {
            Self::CreditCard => CreditCardService::OPERATIONS,
            Self::LinePay => LinePayService::OPERATIONS,
            Self::PayPay => PayPayService::OPERATIONS,
            Self::MemberCard => MemberCardService::OPERATIONS,
        }
    }

    /// Looks up an operation by name, ignoring ASCII case.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::UnknownOperation`] if the service has no such
    /// operation.
    pub fn find_operation(
        self,
        operation: &str,
    ) -> Result<&'static OperationDescriptor, GatewayError> {
        self.operations()
            .iter()
            .find(|descriptor| descriptor.name.eq_ignore_ascii_case(operation))
            .ok_or_else(|| GatewayError::UnknownOperation {
                service: self.name(),
                operation: operation.to_owned(),
            })
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Service {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|service| service.name().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| GatewayError::UnknownService(s.to_owned()))
    }
}

/// Looks up an operation by service and operation name.
///
/// # Errors
///
/// Returns [`GatewayError::UnknownService`] or
/// [`GatewayError::UnknownOperation`] if either name does not resolve.
pub fn find_operation(
    service: &str,
    operation: &str,
) -> Result<&'static OperationDescriptor, GatewayError> {
    service.parse::<Service>()?.find_operation(operation)
}
