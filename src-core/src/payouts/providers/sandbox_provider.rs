use async_trait::async_trait;
use log::debug;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::payouts::payouts_errors::PayoutError;
use crate::payouts::payouts_model::PaymentAccountStatus;
use crate::payouts::payouts_traits::PaymentProviderTrait;

/// In-memory provider for local development: every account is ready and
/// every transfer succeeds with a fabricated reference.
pub struct SandboxPaymentProvider;

#[async_trait]
impl PaymentProviderTrait for SandboxPaymentProvider {
    async fn create_account(&self, contractor_id: &str) -> Result<String, PayoutError> {
        let account_ref = format!("acct_sandbox_{}", Uuid::new_v4().simple());
        debug!(
            "Sandbox account {} created for contractor {}",
            account_ref, contractor_id
        );
        Ok(account_ref)
    }

    async fn account_status(&self, account_ref: &str) -> Result<PaymentAccountStatus, PayoutError> {
        Ok(PaymentAccountStatus {
            account_ref: account_ref.to_string(),
            onboarding_complete: true,
            payouts_enabled: true,
        })
    }

    async fn onboarding_link(&self, account_ref: &str) -> Result<String, PayoutError> {
        Ok(format!("https://sandbox.invalid/onboarding/{}", account_ref))
    }

    async fn release_payout(
        &self,
        booking_id: &str,
        account_ref: &str,
        amount: Decimal,
    ) -> Result<String, PayoutError> {
        let transfer_ref = format!("tr_sandbox_{}", Uuid::new_v4().simple());
        debug!(
            "Sandbox transfer {} of {} to {} for booking {}",
            transfer_ref, amount, account_ref, booking_id
        );
        Ok(transfer_ref)
    }
}
