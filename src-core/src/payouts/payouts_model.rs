use serde::{Deserialize, Serialize};

/// Result of a release call. `released` is true when the funds have moved,
/// now or on an earlier attempt; replays of a released booking succeed.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PayoutRelease {
    pub released: bool,
    pub payout_ref: Option<String>,
}

/// Provider-side state of a contractor's payment account
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentAccountStatus {
    pub account_ref: String,
    pub onboarding_complete: bool,
    pub payouts_enabled: bool,
}

/// Account-status webhook payload from the payment provider
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PaymentAccountEvent {
    pub account_ref: String,
    pub onboarding_complete: bool,
    pub payouts_enabled: bool,
}

/// Per-booking outcome of a retry pass over failed payouts
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PayoutRetryOutcome {
    pub booking_id: String,
    pub released: bool,
    pub error: Option<String>,
}
