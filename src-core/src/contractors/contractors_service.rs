use async_trait::async_trait;
use log::{debug, info};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

use super::contractors_constants::*;
use super::contractors_model::{Contractor, Tier, TierPromotion};
use super::contractors_traits::{ContractorRepositoryTrait, ContractorServiceTrait};
use crate::bookings::BookingRepositoryTrait;
use crate::disputes::DisputeRepositoryTrait;
use crate::errors::Result;
use crate::notifications::{NotificationServiceTrait, NOTIFICATION_TIER_PROMOTED};

/// Contractor reads plus the scheduled tier promotion pass.
pub struct ContractorService {
    contractor_repository: Arc<dyn ContractorRepositoryTrait>,
    booking_repository: Arc<dyn BookingRepositoryTrait>,
    dispute_repository: Arc<dyn DisputeRepositoryTrait>,
    notification_service: Arc<dyn NotificationServiceTrait>,
}

impl ContractorService {
    pub fn new(
        contractor_repository: Arc<dyn ContractorRepositoryTrait>,
        booking_repository: Arc<dyn BookingRepositoryTrait>,
        dispute_repository: Arc<dyn DisputeRepositoryTrait>,
        notification_service: Arc<dyn NotificationServiceTrait>,
    ) -> Self {
        Self {
            contractor_repository,
            booking_repository,
            dispute_repository,
            notification_service,
        }
    }

    /// probation → standard: enough completed jobs and a high enough
    /// average over at least one review.
    fn standard_target(&self, contractor: &Contractor) -> Result<Option<Tier>> {
        let completed = self
            .booking_repository
            .completed_count_for_contractor(&contractor.id)?;
        if completed < STANDARD_MIN_COMPLETED_JOBS {
            return Ok(None);
        }
        if contractor.total_ratings_count == 0 {
            return Ok(None);
        }
        if contractor.average_rating >= dec!(4.5) {
            Ok(Some(Tier::Standard))
        } else {
            Ok(None)
        }
    }

    /// standard → premium: higher volume and rating bars, plus a dispute
    /// rate strictly under 3% of completed jobs.
    fn premium_target(&self, contractor: &Contractor) -> Result<Option<Tier>> {
        let completed_ids = self
            .booking_repository
            .completed_booking_ids_for_contractor(&contractor.id)?;
        let completed = completed_ids.len() as i64;
        if completed < PREMIUM_MIN_COMPLETED_JOBS {
            return Ok(None);
        }
        if contractor.total_ratings_count == 0 || contractor.average_rating < dec!(4.7) {
            return Ok(None);
        }

        let disputes = self.dispute_repository.count_for_bookings(&completed_ids)?;
        let dispute_rate = Decimal::from(disputes) / Decimal::from(completed);
        if dispute_rate < dec!(0.03) {
            Ok(Some(Tier::Premium))
        } else {
            Ok(None)
        }
    }
}

#[async_trait]
impl ContractorServiceTrait for ContractorService {
    fn get_contractor(&self, contractor_id: &str) -> Result<Contractor> {
        self.contractor_repository.get_contractor(contractor_id)
    }

    fn get_by_user_id(&self, user_id: &str) -> Result<Contractor> {
        self.contractor_repository.get_by_user_id(user_id)
    }

    async fn run_tier_promotions(&self) -> Result<Vec<TierPromotion>> {
        let candidates = self.contractor_repository.list_promotion_candidates()?;
        let platform_completed = self.booking_repository.platform_completed_count()?;
        let premium_gate_open = platform_completed >= PREMIUM_PLATFORM_MIN_COMPLETED_JOBS;
        debug!(
            "Evaluating {} contractors for promotion (platform completed: {})",
            candidates.len(),
            platform_completed
        );

        let mut promotions = Vec::new();
        for contractor in candidates {
            // Each rule is checked against the tier read at the start of
            // the pass, so a contractor moves at most one tier per run.
            let target = match contractor.tier {
                Tier::Probation => self.standard_target(&contractor)?,
                Tier::Standard if premium_gate_open => self.premium_target(&contractor)?,
                _ => None,
            };
            let Some(to) = target else {
                continue;
            };

            self.contractor_repository
                .set_tier(&contractor.id, to)
                .await?;
            self.notification_service.notify_detached(
                &contractor.user_id,
                NOTIFICATION_TIER_PROMOTED,
                &format!("You have been promoted to the {} tier.", to.as_str()),
            );
            info!(
                "Promoted contractor {} from {} to {}",
                contractor.id,
                contractor.tier.as_str(),
                to.as_str()
            );
            promotions.push(TierPromotion {
                contractor_id: contractor.id,
                from: contractor.tier,
                to,
            });
        }

        Ok(promotions)
    }
}
