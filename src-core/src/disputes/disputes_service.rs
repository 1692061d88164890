use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use super::disputes_model::{Dispute, NewDispute};
use super::disputes_traits::{DisputeRepositoryTrait, DisputeServiceTrait};
use crate::bookings::BookingRepositoryTrait;
use crate::errors::{Error, Result};

pub struct DisputeService {
    dispute_repository: Arc<dyn DisputeRepositoryTrait>,
    booking_repository: Arc<dyn BookingRepositoryTrait>,
}

impl DisputeService {
    pub fn new(
        dispute_repository: Arc<dyn DisputeRepositoryTrait>,
        booking_repository: Arc<dyn BookingRepositoryTrait>,
    ) -> Self {
        Self {
            dispute_repository,
            booking_repository,
        }
    }
}

#[async_trait]
impl DisputeServiceTrait for DisputeService {
    async fn open_dispute(
        &self,
        user_id: &str,
        booking_id: &str,
        reason: Option<String>,
    ) -> Result<Dispute> {
        let booking = self.booking_repository.get_booking(booking_id)?;
        if booking.user_id != user_id {
            return Err(Error::Authorization(format!(
                "booking {} does not belong to this user",
                booking_id
            )));
        }

        let dispute = self
            .dispute_repository
            .open_dispute(&NewDispute {
                booking_id: booking_id.to_string(),
                reason,
            })
            .await?;
        info!("Dispute {} opened for booking {}", dispute.id, booking_id);
        Ok(dispute)
    }
}
