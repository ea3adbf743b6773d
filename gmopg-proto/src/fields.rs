//! Well-known field names of the GMO Payment Gateway protocol.

/// Site identifier credential.
pub const SITE_ID: &str = "SiteID";

/// Site password credential.
pub const SITE_PASS: &str = "SitePass";

/// Shop identifier credential.
pub const SHOP_ID: &str = "ShopID";

/// Shop password credential.
pub const SHOP_PASS: &str = "ShopPass";

/// Member identifier used by stored-card operations.
pub const MEMBER_ID: &str = "MemberID";

/// Pipe-separated error codes reported by the gateway.
pub const ERR_CODE: &str = "ErrCode";

/// Pipe-separated detailed error codes reported by the gateway.
pub const ERR_INFO: &str = "ErrInfo";

/// Separator of multi-valued gateway fields.
pub const MULTI_VALUE_SEPARATOR: char = '|';
