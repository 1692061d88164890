pub const NOTIFICATION_BOOKING_CONFIRMED: &str = "booking_confirmed";
pub const NOTIFICATION_BOOKING_CANCELLED: &str = "booking_cancelled";
pub const NOTIFICATION_JOB_APPROVED: &str = "job_approved";
pub const NOTIFICATION_TIER_PROMOTED: &str = "tier_promoted";
