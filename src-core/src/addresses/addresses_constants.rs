pub const SLOPE_FLAT: &str = "flat";
pub const SLOPE_MILD: &str = "mild";
pub const SLOPE_STEEP: &str = "steep";

pub const VERIFICATION_STATUS_PENDING: &str = "pending";
pub const VERIFICATION_STATUS_VERIFIED: &str = "verified";
pub const VERIFICATION_STATUS_REJECTED: &str = "rejected";
