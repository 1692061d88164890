pub const BOOKING_STATUS_PENDING_PAYMENT: &str = "pending_payment";
pub const BOOKING_STATUS_CONFIRMED: &str = "confirmed";
pub const BOOKING_STATUS_IN_PROGRESS: &str = "in_progress";
pub const BOOKING_STATUS_COMPLETED_PENDING_VERIFICATION: &str = "completed_pending_verification";
pub const BOOKING_STATUS_COMPLETED: &str = "completed";
pub const BOOKING_STATUS_CANCELLED: &str = "cancelled";

pub const PAYOUT_STATUS_PENDING: &str = "pending";
pub const PAYOUT_STATUS_PROCESSING: &str = "processing";
pub const PAYOUT_STATUS_RELEASED: &str = "released";
pub const PAYOUT_STATUS_FAILED: &str = "failed";

pub const GRASS_LENGTH_SHORT: &str = "short";
pub const GRASS_LENGTH_MEDIUM: &str = "medium";
pub const GRASS_LENGTH_LONG: &str = "long";
pub const GRASS_LENGTH_OVERGROWN: &str = "overgrown";
