//! Operation descriptors.
//!
//! Each gateway operation is a static triple: a name, a fixed endpoint path
//! and the subset of merchant credentials the request must carry. Services
//! declare their descriptors as `const`s; nothing here changes at runtime.

use gmopg_proto::AttributeMap;
use gmopg_proto::fields::MEMBER_ID;

/// How a conditional credential requirement reacts to `MemberID`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberCondition {
    /// Shop credentials, replaced by site credentials when the caller sends a
    /// non-empty `MemberID` (member payments through `ExecTran`).
    SiteInsteadOfShop,
    /// Shop credentials, with site credentials added whenever the caller
    /// sends a `MemberID` field (`SearchCardDetail` on a stored card).
    ///
    /// Credentials are merged before the caller's attributes here as for
    /// every other operation, so a caller-supplied `SiteID` / `SitePass`
    /// wins. The PHP `searchCardDetail` merged the site credentials last,
    /// letting them override the caller.
    SiteAlongsideShop,
}

/// The credential subset an operation merges into its request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialRequirement {
    /// Caller attributes only.
    None,
    /// `SiteID` / `SitePass`.
    Site,
    /// `ShopID` / `ShopPass`.
    Shop,
    /// Site then shop credentials.
    Both,
    /// Depends on the caller's `MemberID` field.
    Conditional(MemberCondition),
}

impl CredentialRequirement {
    /// Resolves the concrete credential subset for a set of attributes.
    #[must_use]
    pub fn resolve(self, attributes: &AttributeMap) -> CredentialScope {
        match self {
            Self::None => CredentialScope::NONE,
            Self::Site => CredentialScope::SITE,
            Self::Shop => CredentialScope::SHOP,
            Self::Both => CredentialScope::BOTH,
            Self::Conditional(MemberCondition::SiteInsteadOfShop) => {
                if attributes.has_non_empty(MEMBER_ID) {
                    CredentialScope::SITE
                } else {
                    CredentialScope::SHOP
                }
            }
            Self::Conditional(MemberCondition::SiteAlongsideShop) => {
                if attributes.contains_key(MEMBER_ID) {
                    CredentialScope::BOTH
                } else {
                    CredentialScope::SHOP
                }
            }
        }
    }
}

/// A resolved credential subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CredentialScope {
    /// Merge `SiteID` / `SitePass`.
    pub site: bool,
    /// Merge `ShopID` / `ShopPass`.
    pub shop: bool,
}

impl CredentialScope {
    /// No credentials.
    pub const NONE: Self = Self {
        site: false,
        shop: false,
    };
    /// Site credentials only.
    pub const SITE: Self = Self {
        site: true,
        shop: false,
    };
    /// Shop credentials only.
    pub const SHOP: Self = Self {
        site: false,
        shop: true,
    };
    /// Site and shop credentials.
    pub const BOTH: Self = Self {
        site: true,
        shop: true,
    };
}

/// Static metadata of one gateway operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OperationDescriptor {
    /// Operation name as documented by the gateway (e.g. `"EntryTran"`).
    pub name: &'static str,
    /// Endpoint path appended to the base URL (e.g. `"/payment/EntryTran.idPass"`).
    pub path: &'static str,
    /// Credentials merged into the request body.
    pub credentials: CredentialRequirement,
}

impl OperationDescriptor {
    /// Creates a descriptor.
    #[must_use]
    pub const fn new(
        name: &'static str,
        path: &'static str,
        credentials: CredentialRequirement,
    ) -> Self {
        Self {
            name,
            path,
            credentials,
        }
    }
}
