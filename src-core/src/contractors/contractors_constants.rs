pub const TIER_PROBATION: &str = "probation";
pub const TIER_STANDARD: &str = "standard";
pub const TIER_PREMIUM: &str = "premium";

pub const APPROVAL_STATUS_PENDING: &str = "pending";
pub const APPROVAL_STATUS_APPROVED: &str = "approved";
pub const APPROVAL_STATUS_REJECTED: &str = "rejected";

/// Completed jobs required for probation → standard
pub const STANDARD_MIN_COMPLETED_JOBS: i64 = 5;

/// Completed jobs required per contractor for standard → premium
pub const PREMIUM_MIN_COMPLETED_JOBS: i64 = 50;

/// Platform-wide completed jobs required before premium promotion is
/// evaluated at all
pub const PREMIUM_PLATFORM_MIN_COMPLETED_JOBS: i64 = 50;
