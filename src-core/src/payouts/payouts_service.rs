use async_trait::async_trait;
use log::{error, info, warn};
use std::sync::Arc;

use super::payouts_errors::PayoutError;
use super::payouts_model::{
    PaymentAccountEvent, PaymentAccountStatus, PayoutRelease, PayoutRetryOutcome,
};
use super::payouts_traits::{PaymentProviderTrait, PayoutServiceTrait};
use crate::bookings::{BookingRepositoryTrait, PayoutClaim};
use crate::contractors::ContractorRepositoryTrait;
use crate::errors::{Error, Result, ValidationError};

/// Coordinates release of held funds to contractors.
///
/// The release is keyed on the booking id: the payout status row acts as
/// the idempotency record, and the provider call carries the same key, so
/// neither a replay nor a concurrent attempt can move funds twice.
pub struct PayoutService {
    booking_repository: Arc<dyn BookingRepositoryTrait>,
    contractor_repository: Arc<dyn ContractorRepositoryTrait>,
    payment_provider: Arc<dyn PaymentProviderTrait>,
}

impl PayoutService {
    pub fn new(
        booking_repository: Arc<dyn BookingRepositoryTrait>,
        contractor_repository: Arc<dyn ContractorRepositoryTrait>,
        payment_provider: Arc<dyn PaymentProviderTrait>,
    ) -> Self {
        Self {
            booking_repository,
            contractor_repository,
            payment_provider,
        }
    }

    fn account_ref_for(&self, contractor_id: &str) -> Result<String> {
        let contractor = self.contractor_repository.get_contractor(contractor_id)?;
        contractor
            .payment_account_ref
            .ok_or_else(|| Error::Validation(ValidationError::MissingField(
                "payment_account_ref".to_string(),
            )))
    }
}

#[async_trait]
impl PayoutServiceTrait for PayoutService {
    async fn release(&self, booking_id: &str) -> Result<PayoutRelease> {
        let booking = self.booking_repository.get_booking(booking_id)?;

        match self.booking_repository.claim_payout(booking_id).await? {
            PayoutClaim::AlreadyReleased(payout_ref) => {
                return Ok(PayoutRelease {
                    released: true,
                    payout_ref,
                })
            }
            PayoutClaim::InFlight => {
                return Err(PayoutError::ReleaseInFlight(booking_id.to_string()).into())
            }
            PayoutClaim::Claimed => {}
        }

        let contractor_id = match booking.contractor_id.as_deref() {
            Some(contractor_id) => contractor_id,
            None => {
                self.booking_repository.mark_payout_failed(booking_id).await?;
                return Err(Error::Validation(ValidationError::MissingField(
                    "contractor_id".to_string(),
                )));
            }
        };

        let contractor = self.contractor_repository.get_contractor(contractor_id)?;
        let account_ref = match contractor.payment_account_ref.as_deref() {
            Some(account_ref) if contractor.payouts_enabled => account_ref,
            _ => {
                self.booking_repository.mark_payout_failed(booking_id).await?;
                return Err(PayoutError::MissingAccount(contractor_id.to_string()).into());
            }
        };

        match self
            .payment_provider
            .release_payout(booking_id, account_ref, booking.total_price)
            .await
        {
            Ok(transfer_ref) => {
                self.booking_repository
                    .mark_payout_released(booking_id, &transfer_ref)
                    .await?;
                info!(
                    "Released payout {} for booking {} to contractor {}",
                    transfer_ref, booking_id, contractor_id
                );
                Ok(PayoutRelease {
                    released: true,
                    payout_ref: Some(transfer_ref),
                })
            }
            Err(e) => {
                error!("Provider payout failed for booking {}: {}", booking_id, e);
                self.booking_repository.mark_payout_failed(booking_id).await?;
                Err(e.into())
            }
        }
    }

    async fn retry_failed(&self) -> Result<Vec<PayoutRetryOutcome>> {
        let booking_ids = self.booking_repository.failed_payout_booking_ids()?;
        let mut outcomes = Vec::with_capacity(booking_ids.len());

        for booking_id in booking_ids {
            match self.release(&booking_id).await {
                Ok(release) => outcomes.push(PayoutRetryOutcome {
                    booking_id,
                    released: release.released,
                    error: None,
                }),
                Err(e) => {
                    warn!("Payout retry for booking {} failed: {}", booking_id, e);
                    outcomes.push(PayoutRetryOutcome {
                        booking_id,
                        released: false,
                        error: Some(e.to_string()),
                    });
                }
            }
        }
        Ok(outcomes)
    }

    async fn create_account(&self, contractor_id: &str) -> Result<PaymentAccountStatus> {
        let contractor = self.contractor_repository.get_contractor(contractor_id)?;

        if let Some(account_ref) = contractor.payment_account_ref.as_deref() {
            return Ok(self.payment_provider.account_status(account_ref).await?);
        }

        let account_ref = self.payment_provider.create_account(contractor_id).await?;
        self.contractor_repository
            .set_payment_account(contractor_id, &account_ref)
            .await?;
        info!(
            "Provisioned payment account {} for contractor {}",
            account_ref, contractor_id
        );

        Ok(PaymentAccountStatus {
            account_ref,
            onboarding_complete: false,
            payouts_enabled: false,
        })
    }

    async fn onboarding_link(&self, contractor_id: &str) -> Result<String> {
        let account_ref = self.account_ref_for(contractor_id)?;
        Ok(self.payment_provider.onboarding_link(&account_ref).await?)
    }

    async fn account_status(&self, contractor_id: &str) -> Result<PaymentAccountStatus> {
        let account_ref = self.account_ref_for(contractor_id)?;
        Ok(self.payment_provider.account_status(&account_ref).await?)
    }

    async fn handle_account_event(&self, event: PaymentAccountEvent) -> Result<()> {
        let matched = self
            .contractor_repository
            .set_account_state(&event.account_ref, event.payouts_enabled)
            .await?;
        if matched == 0 {
            warn!(
                "Account event for unknown payment account {}",
                event.account_ref
            );
        }
        Ok(())
    }
}
