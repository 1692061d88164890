use async_trait::async_trait;
use chrono::{Duration, Utc};
use log::{debug, error, info, warn};
use std::sync::Arc;

use super::bookings_model::{ApproveJobRequest, Booking, BookingStatus, NewBookingRequest};
use super::bookings_traits::{BookingRepositoryTrait, BookingServiceTrait};
use crate::contractors::ContractorRepositoryTrait;
use crate::errors::{Error, Result, ValidationError};
use crate::notifications::{
    NotificationServiceTrait, NOTIFICATION_BOOKING_CANCELLED, NOTIFICATION_BOOKING_CONFIRMED,
    NOTIFICATION_JOB_APPROVED,
};
use crate::payouts::PayoutServiceTrait;
use crate::pricing::PricingSettingRepositoryTrait;
use crate::quotes::{QuoteRequest, QuoteServiceTrait};
use crate::reviews::{NewReview, ReviewServiceTrait};

/// The booking state machine. Owns every status transition and the
/// settlement path triggered by the customer's final approval.
pub struct BookingService {
    booking_repository: Arc<dyn BookingRepositoryTrait>,
    contractor_repository: Arc<dyn ContractorRepositoryTrait>,
    pricing_repository: Arc<dyn PricingSettingRepositoryTrait>,
    quote_service: Arc<dyn QuoteServiceTrait>,
    payout_service: Arc<dyn PayoutServiceTrait>,
    review_service: Arc<dyn ReviewServiceTrait>,
    notification_service: Arc<dyn NotificationServiceTrait>,
}

impl BookingService {
    pub fn new(
        booking_repository: Arc<dyn BookingRepositoryTrait>,
        contractor_repository: Arc<dyn ContractorRepositoryTrait>,
        pricing_repository: Arc<dyn PricingSettingRepositoryTrait>,
        quote_service: Arc<dyn QuoteServiceTrait>,
        payout_service: Arc<dyn PayoutServiceTrait>,
        review_service: Arc<dyn ReviewServiceTrait>,
        notification_service: Arc<dyn NotificationServiceTrait>,
    ) -> Self {
        Self {
            booking_repository,
            contractor_repository,
            pricing_repository,
            quote_service,
            payout_service,
            review_service,
            notification_service,
        }
    }

    fn assigned_contractor_booking(
        &self,
        contractor_user_id: &str,
        booking_id: &str,
    ) -> Result<Booking> {
        let contractor = self.contractor_repository.get_by_user_id(contractor_user_id)?;
        let booking = self.booking_repository.get_booking(booking_id)?;
        if booking.contractor_id.as_deref() != Some(contractor.id.as_str()) {
            return Err(Error::Authorization(format!(
                "booking {} is not assigned to this contractor",
                booking_id
            )));
        }
        Ok(booking)
    }

    fn notify_contractor(&self, contractor_id: &str, kind: &str, message: &str) {
        match self.contractor_repository.get_contractor(contractor_id) {
            Ok(contractor) => {
                self.notification_service
                    .notify_detached(&contractor.user_id, kind, message);
            }
            Err(e) => warn!(
                "Skipping notification, contractor {} lookup failed: {}",
                contractor_id, e
            ),
        }
    }
}

#[async_trait]
impl BookingServiceTrait for BookingService {
    fn get_booking(&self, booking_id: &str) -> Result<Booking> {
        self.booking_repository.get_booking(booking_id)
    }

    async fn create_booking(&self, user_id: &str, request: NewBookingRequest) -> Result<Booking> {
        let quote_request = QuoteRequest {
            address_id: request.address_id.clone(),
            selected_date: request.scheduled_date,
            grass_length: request.grass_length,
            clippings_removal: request.clippings_removal,
        };
        let response = self.quote_service.get_quote(user_id, &quote_request)?;
        if response.is_preliminary {
            return Err(ValidationError::InvalidInput(
                "address is not verified; a preliminary quote cannot be accepted".to_string(),
            )
            .into());
        }

        let booking = self
            .booking_repository
            .create_booking(user_id, &request, response.quote.total)
            .await?;
        debug!("Created booking {} at {}", booking.id, booking.total_price);
        Ok(booking)
    }

    async fn confirm_payment(&self, booking_id: &str, payment_intent_ref: &str) -> Result<Booking> {
        self.booking_repository
            .set_payment_intent(booking_id, payment_intent_ref)
            .await?;
        let booking = self
            .booking_repository
            .transition_status(
                booking_id,
                BookingStatus::PendingPayment,
                BookingStatus::Confirmed,
            )
            .await?;
        self.notification_service.notify_detached(
            &booking.user_id,
            NOTIFICATION_BOOKING_CONFIRMED,
            "Your booking is confirmed and waiting for a contractor.",
        );
        Ok(booking)
    }

    async fn assign_contractor(
        &self,
        contractor_user_id: &str,
        booking_id: &str,
    ) -> Result<Booking> {
        let contractor = self.contractor_repository.get_by_user_id(contractor_user_id)?;
        self.booking_repository
            .set_contractor(booking_id, &contractor.id)
            .await
    }

    async fn start_job(&self, contractor_user_id: &str, booking_id: &str) -> Result<Booking> {
        self.assigned_contractor_booking(contractor_user_id, booking_id)?;
        self.booking_repository
            .transition_status(booking_id, BookingStatus::Confirmed, BookingStatus::InProgress)
            .await
    }

    async fn finish_job(&self, contractor_user_id: &str, booking_id: &str) -> Result<Booking> {
        self.assigned_contractor_booking(contractor_user_id, booking_id)?;
        self.booking_repository
            .transition_status(
                booking_id,
                BookingStatus::InProgress,
                BookingStatus::CompletedPendingVerification,
            )
            .await
    }

    async fn approve_job(&self, user_id: &str, request: ApproveJobRequest) -> Result<()> {
        let booking = self.booking_repository.get_booking(&request.booking_id)?;

        if booking.user_id != user_id {
            return Err(Error::Authorization(format!(
                "booking {} does not belong to this user",
                request.booking_id
            )));
        }
        if booking.status != BookingStatus::CompletedPendingVerification {
            return Err(Error::Conflict(format!(
                "booking {} is {}, expected {}",
                booking.id,
                booking.status.as_str(),
                BookingStatus::CompletedPendingVerification.as_str()
            )));
        }

        // Money first. A provider failure is logged and must not hold the
        // booking in limbo; the payout stays in a retryable state.
        match self.payout_service.release(&booking.id).await {
            Ok(release) => debug!(
                "Payout for booking {} released (ref {:?})",
                booking.id, release.payout_ref
            ),
            Err(e) => error!("Payout release failed for booking {}: {}", booking.id, e),
        }

        let booking = self
            .booking_repository
            .transition_status(
                &booking.id,
                BookingStatus::CompletedPendingVerification,
                BookingStatus::Completed,
            )
            .await?;

        if let Some(contractor_id) = booking.contractor_id.as_deref() {
            self.notify_contractor(
                contractor_id,
                NOTIFICATION_JOB_APPROVED,
                "The customer approved your work. Your payout is on its way.",
            );
        }

        if let Some(rating) = request.rating {
            let contractor_id = booking.contractor_id.clone().ok_or_else(|| {
                Error::Validation(ValidationError::MissingField("contractor_id".to_string()))
            })?;
            // A duplicate review surfaces as a conflict to the caller; the
            // transition above has already taken effect.
            self.review_service
                .create_review(NewReview {
                    contractor_id,
                    booking_id: booking.id.clone(),
                    rating,
                    comment: request.comment,
                })
                .await?;
        }

        Ok(())
    }

    async fn cancel_booking(&self, user_id: &str, booking_id: &str) -> Result<Booking> {
        let booking = self.booking_repository.get_booking(booking_id)?;

        if booking.user_id != user_id {
            return Err(Error::Authorization(format!(
                "booking {} does not belong to this user",
                booking_id
            )));
        }
        if booking.status.is_terminal() {
            return Err(Error::Conflict(format!(
                "booking {} is already {}",
                booking_id,
                booking.status.as_str()
            )));
        }

        let cancelled = self
            .booking_repository
            .transition_status(booking_id, booking.status, BookingStatus::Cancelled)
            .await?;

        if let Some(contractor_id) = cancelled.contractor_id.as_deref() {
            self.notify_contractor(
                contractor_id,
                NOTIFICATION_BOOKING_CANCELLED,
                "A booking assigned to you was cancelled by the customer.",
            );
        }
        Ok(cancelled)
    }

    async fn expire_unconfirmed(&self) -> Result<Vec<String>> {
        let window_hours = self
            .pricing_repository
            .load_snapshot()?
            .contractor_response_window_hours();
        let cutoff = Utc::now().naive_utc() - Duration::hours(window_hours);

        let stale = self.booking_repository.unassigned_confirmed_before(cutoff)?;
        let mut cancelled = Vec::new();
        for booking in stale {
            match self
                .booking_repository
                .transition_status(&booking.id, BookingStatus::Confirmed, BookingStatus::Cancelled)
                .await
            {
                Ok(_) => {
                    self.notification_service.notify_detached(
                        &booking.user_id,
                        NOTIFICATION_BOOKING_CANCELLED,
                        "No contractor accepted your booking in time, so it was cancelled.",
                    );
                    cancelled.push(booking.id);
                }
                // Raced with an assignment or another run; leave it alone.
                Err(Error::Conflict(_)) => continue,
                Err(e) => return Err(e),
            }
        }

        if !cancelled.is_empty() {
            info!("Expired {} unconfirmed bookings", cancelled.len());
        }
        Ok(cancelled)
    }
}
