use async_trait::async_trait;
use rust_decimal::Decimal;

use super::payouts_errors::PayoutError;
use super::payouts_model::{
    PaymentAccountEvent, PaymentAccountStatus, PayoutRelease, PayoutRetryOutcome,
};
use crate::errors::Result;

/// External payment provider behind the payout and account-provisioning
/// operations.
#[async_trait]
pub trait PaymentProviderTrait: Send + Sync {
    /// Provision a payment account for a contractor; returns the account ref.
    async fn create_account(&self, contractor_id: &str)
        -> std::result::Result<String, PayoutError>;

    async fn account_status(
        &self,
        account_ref: &str,
    ) -> std::result::Result<PaymentAccountStatus, PayoutError>;

    /// A fresh onboarding URL for the contractor to finish account setup.
    async fn onboarding_link(&self, account_ref: &str)
        -> std::result::Result<String, PayoutError>;

    /// Transfer the held amount to the contractor's account. The booking id
    /// doubles as the provider-side idempotency key.
    async fn release_payout(
        &self,
        booking_id: &str,
        account_ref: &str,
        amount: Decimal,
    ) -> std::result::Result<String, PayoutError>;
}

/// Trait defining the contract for payout coordination.
#[async_trait]
pub trait PayoutServiceTrait: Send + Sync {
    /// Release the held funds for a booking to its contractor. Keyed on the
    /// booking id: calling twice never moves funds twice, and a booking
    /// already released reports success.
    async fn release(&self, booking_id: &str) -> Result<PayoutRelease>;

    /// Re-drive every booking whose payout is in the retryable failed state.
    async fn retry_failed(&self) -> Result<Vec<PayoutRetryOutcome>>;

    /// Provision a payment account for a contractor (idempotent).
    async fn create_account(&self, contractor_id: &str) -> Result<PaymentAccountStatus>;

    async fn onboarding_link(&self, contractor_id: &str) -> Result<String>;

    async fn account_status(&self, contractor_id: &str) -> Result<PaymentAccountStatus>;

    /// Ingest a provider account-status webhook event.
    async fn handle_account_event(&self, event: PaymentAccountEvent) -> Result<()>;
}
