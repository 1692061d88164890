use async_trait::async_trait;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use super::bookings_model::{
    ApproveJobRequest, Booking, BookingStatus, NewBookingRequest, PayoutClaim,
};
use crate::errors::Result;

/// Trait defining the contract for booking repository operations.
#[async_trait]
pub trait BookingRepositoryTrait: Send + Sync {
    fn get_booking(&self, booking_id: &str) -> Result<Booking>;
    fn get_user_bookings(&self, user_id: &str) -> Result<Vec<Booking>>;

    async fn create_booking(
        &self,
        user_id: &str,
        request: &NewBookingRequest,
        total_price: Decimal,
    ) -> Result<Booking>;

    /// Atomically move a booking from `from` to `to`.
    /// Fails with a conflict when the booking is no longer in `from`.
    async fn transition_status(
        &self,
        booking_id: &str,
        from: BookingStatus,
        to: BookingStatus,
    ) -> Result<Booking>;

    /// Assign a contractor to a confirmed, unassigned booking.
    async fn set_contractor(&self, booking_id: &str, contractor_id: &str) -> Result<Booking>;

    async fn set_payment_intent(&self, booking_id: &str, payment_intent_ref: &str) -> Result<()>;

    fn completed_count_for_contractor(&self, contractor_id: &str) -> Result<i64>;
    fn completed_booking_ids_for_contractor(&self, contractor_id: &str) -> Result<Vec<String>>;
    fn platform_completed_count(&self) -> Result<i64>;

    /// Confirmed bookings no contractor accepted before the cutoff.
    fn unassigned_confirmed_before(&self, cutoff: NaiveDateTime) -> Result<Vec<Booking>>;

    /// Bookings whose payout release failed and is awaiting a retry.
    fn failed_payout_booking_ids(&self) -> Result<Vec<String>>;

    /// Claim the payout release for a booking. The claim is keyed on the
    /// booking id so that concurrent or replayed release attempts cannot
    /// move funds twice.
    async fn claim_payout(&self, booking_id: &str) -> Result<PayoutClaim>;
    async fn mark_payout_released(&self, booking_id: &str, payout_ref: &str) -> Result<()>;
    async fn mark_payout_failed(&self, booking_id: &str) -> Result<()>;
}

/// Trait defining the contract for the booking state machine.
#[async_trait]
pub trait BookingServiceTrait: Send + Sync {
    fn get_booking(&self, booking_id: &str) -> Result<Booking>;

    /// Create a booking from an accepted quote. The price is recomputed
    /// server-side; a preliminary quote cannot be accepted.
    async fn create_booking(&self, user_id: &str, request: NewBookingRequest) -> Result<Booking>;

    /// Payment collected for the booking (payment-provider webhook).
    async fn confirm_payment(&self, booking_id: &str, payment_intent_ref: &str) -> Result<Booking>;

    /// A contractor takes the job.
    async fn assign_contractor(&self, contractor_user_id: &str, booking_id: &str)
        -> Result<Booking>;

    /// The assigned contractor begins work.
    async fn start_job(&self, contractor_user_id: &str, booking_id: &str) -> Result<Booking>;

    /// The assigned contractor declares the work done.
    async fn finish_job(&self, contractor_user_id: &str, booking_id: &str) -> Result<Booking>;

    /// The customer confirms satisfactory work: releases the payout,
    /// advances the booking to completed and records an optional review.
    async fn approve_job(&self, user_id: &str, request: ApproveJobRequest) -> Result<()>;

    /// The customer cancels a non-terminal booking.
    async fn cancel_booking(&self, user_id: &str, booking_id: &str) -> Result<Booking>;

    /// Cancel confirmed bookings no contractor accepted within the
    /// configured response window. Returns the cancelled booking ids.
    async fn expire_unconfirmed(&self) -> Result<Vec<String>>;
}
