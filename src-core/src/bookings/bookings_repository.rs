use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use super::bookings_constants::*;
use super::bookings_model::{
    Booking, BookingDB, BookingStatus, NewBookingRequest, PayoutClaim,
};
use super::bookings_traits::BookingRepositoryTrait;
use crate::db::{get_connection, DbPool};
use crate::errors::{Error, Result};

pub struct BookingRepository {
    pool: Arc<DbPool>,
}

impl BookingRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        BookingRepository { pool }
    }
}

#[async_trait]
impl BookingRepositoryTrait for BookingRepository {
    fn get_booking(&self, booking_id: &str) -> Result<Booking> {
        use crate::schema::bookings;
        let mut conn = get_connection(&self.pool)?;
        let db: BookingDB = bookings::table.find(booking_id).first(&mut conn)?;
        db.try_into()
    }

    fn get_user_bookings(&self, user_id: &str) -> Result<Vec<Booking>> {
        use crate::schema::bookings;
        let mut conn = get_connection(&self.pool)?;
        let rows: Vec<BookingDB> = bookings::table
            .filter(bookings::user_id.eq(user_id))
            .order(bookings::created_at.desc())
            .load(&mut conn)?;
        rows.into_iter().map(Booking::try_from).collect()
    }

    async fn create_booking(
        &self,
        user_id: &str,
        request: &NewBookingRequest,
        total_price: Decimal,
    ) -> Result<Booking> {
        use crate::schema::bookings;
        let mut conn = get_connection(&self.pool)?;
        let now = Utc::now().naive_utc();

        let new_booking_record = (
            bookings::id.eq(Uuid::new_v4().to_string()),
            bookings::user_id.eq(user_id),
            bookings::address_id.eq(&request.address_id),
            bookings::status.eq(BOOKING_STATUS_PENDING_PAYMENT),
            bookings::scheduled_date.eq(request.scheduled_date),
            bookings::grass_length.eq(request.grass_length.as_str()),
            bookings::clippings_removal.eq(request.clippings_removal),
            bookings::total_price.eq(total_price.to_string()),
            bookings::payout_status.eq(PAYOUT_STATUS_PENDING),
            bookings::created_at.eq(now),
            bookings::updated_at.eq(now),
        );

        let db: BookingDB = diesel::insert_into(bookings::table)
            .values(new_booking_record)
            .get_result(&mut conn)?;
        db.try_into()
    }

    async fn transition_status(
        &self,
        booking_id: &str,
        from: BookingStatus,
        to: BookingStatus,
    ) -> Result<Booking> {
        use crate::schema::bookings;
        let mut conn = get_connection(&self.pool)?;

        // Guarded update: the row must still be in `from` when we write.
        let updated = diesel::update(
            bookings::table
                .filter(bookings::id.eq(booking_id))
                .filter(bookings::status.eq(from.as_str())),
        )
        .set((
            bookings::status.eq(to.as_str()),
            bookings::updated_at.eq(Utc::now().naive_utc()),
        ))
        .execute(&mut conn)?;

        if updated == 0 {
            let current: BookingDB = bookings::table.find(booking_id).first(&mut conn)?;
            return Err(Error::Conflict(format!(
                "booking {} is {}, expected {}",
                booking_id, current.status, from.as_str()
            )));
        }

        self.get_booking(booking_id)
    }

    async fn set_contractor(&self, booking_id: &str, contractor_id: &str) -> Result<Booking> {
        use crate::schema::bookings;
        let mut conn = get_connection(&self.pool)?;

        let updated = diesel::update(
            bookings::table
                .filter(bookings::id.eq(booking_id))
                .filter(bookings::status.eq(BOOKING_STATUS_CONFIRMED))
                .filter(bookings::contractor_id.is_null()),
        )
        .set((
            bookings::contractor_id.eq(contractor_id),
            bookings::updated_at.eq(Utc::now().naive_utc()),
        ))
        .execute(&mut conn)?;

        if updated == 0 {
            let current: BookingDB = bookings::table.find(booking_id).first(&mut conn)?;
            if current.contractor_id.is_some() {
                return Err(Error::Conflict(format!(
                    "booking {} already has a contractor",
                    booking_id
                )));
            }
            return Err(Error::Conflict(format!(
                "booking {} is {}, expected {}",
                booking_id, current.status, BOOKING_STATUS_CONFIRMED
            )));
        }

        self.get_booking(booking_id)
    }

    async fn set_payment_intent(
        &self,
        booking_id: &str,
        payment_intent_ref: &str,
    ) -> Result<()> {
        use crate::schema::bookings;
        let mut conn = get_connection(&self.pool)?;
        diesel::update(bookings::table.find(booking_id))
            .set((
                bookings::payment_intent_ref.eq(payment_intent_ref),
                bookings::updated_at.eq(Utc::now().naive_utc()),
            ))
            .execute(&mut conn)?;
        Ok(())
    }

    fn completed_count_for_contractor(&self, contractor_id: &str) -> Result<i64> {
        use crate::schema::bookings;
        let mut conn = get_connection(&self.pool)?;
        bookings::table
            .filter(bookings::contractor_id.eq(contractor_id))
            .filter(bookings::status.eq(BOOKING_STATUS_COMPLETED))
            .count()
            .get_result(&mut conn)
            .map_err(Error::from)
    }

    fn completed_booking_ids_for_contractor(&self, contractor_id: &str) -> Result<Vec<String>> {
        use crate::schema::bookings;
        let mut conn = get_connection(&self.pool)?;
        bookings::table
            .filter(bookings::contractor_id.eq(contractor_id))
            .filter(bookings::status.eq(BOOKING_STATUS_COMPLETED))
            .select(bookings::id)
            .load(&mut conn)
            .map_err(Error::from)
    }

    fn platform_completed_count(&self) -> Result<i64> {
        use crate::schema::bookings;
        let mut conn = get_connection(&self.pool)?;
        bookings::table
            .filter(bookings::status.eq(BOOKING_STATUS_COMPLETED))
            .count()
            .get_result(&mut conn)
            .map_err(Error::from)
    }

    fn unassigned_confirmed_before(&self, cutoff: NaiveDateTime) -> Result<Vec<Booking>> {
        use crate::schema::bookings;
        let mut conn = get_connection(&self.pool)?;
        let rows: Vec<BookingDB> = bookings::table
            .filter(bookings::status.eq(BOOKING_STATUS_CONFIRMED))
            .filter(bookings::contractor_id.is_null())
            .filter(bookings::updated_at.lt(cutoff))
            .load(&mut conn)?;
        rows.into_iter().map(Booking::try_from).collect()
    }

    fn failed_payout_booking_ids(&self) -> Result<Vec<String>> {
        use crate::schema::bookings;
        let mut conn = get_connection(&self.pool)?;
        bookings::table
            .filter(bookings::payout_status.eq(PAYOUT_STATUS_FAILED))
            .select(bookings::id)
            .load(&mut conn)
            .map_err(Error::from)
    }

    async fn claim_payout(&self, booking_id: &str) -> Result<PayoutClaim> {
        use crate::schema::bookings;
        let mut conn = get_connection(&self.pool)?;

        let claimed = diesel::update(
            bookings::table
                .filter(bookings::id.eq(booking_id))
                .filter(
                    bookings::payout_status
                        .eq(PAYOUT_STATUS_PENDING)
                        .or(bookings::payout_status.eq(PAYOUT_STATUS_FAILED)),
                ),
        )
        .set((
            bookings::payout_status.eq(PAYOUT_STATUS_PROCESSING),
            bookings::updated_at.eq(Utc::now().naive_utc()),
        ))
        .execute(&mut conn)?;

        if claimed == 1 {
            return Ok(PayoutClaim::Claimed);
        }

        let current: BookingDB = bookings::table.find(booking_id).first(&mut conn)?;
        if current.payout_status == PAYOUT_STATUS_RELEASED {
            Ok(PayoutClaim::AlreadyReleased(current.payout_ref))
        } else {
            Ok(PayoutClaim::InFlight)
        }
    }

    async fn mark_payout_released(&self, booking_id: &str, payout_ref: &str) -> Result<()> {
        use crate::schema::bookings;
        let mut conn = get_connection(&self.pool)?;
        diesel::update(bookings::table.find(booking_id))
            .set((
                bookings::payout_status.eq(PAYOUT_STATUS_RELEASED),
                bookings::payout_ref.eq(payout_ref),
                bookings::updated_at.eq(Utc::now().naive_utc()),
            ))
            .execute(&mut conn)?;
        Ok(())
    }

    async fn mark_payout_failed(&self, booking_id: &str) -> Result<()> {
        use crate::schema::bookings;
        let mut conn = get_connection(&self.pool)?;
        diesel::update(bookings::table.find(booking_id))
            .set((
                bookings::payout_status.eq(PAYOUT_STATUS_FAILED),
                bookings::updated_at.eq(Utc::now().naive_utc()),
            ))
            .execute(&mut conn)?;
        Ok(())
    }
}
