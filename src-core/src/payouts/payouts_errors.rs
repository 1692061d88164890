use thiserror::Error;

/// Custom error type for the payout and payment-account path
#[derive(Debug, Error)]
pub enum PayoutError {
    #[error("Payment provider error: {0}")]
    Provider(String),

    #[error("Contractor {0} has no active payment account")]
    MissingAccount(String),

    #[error("Payout release already in progress for booking {0}")]
    ReleaseInFlight(String),
}
