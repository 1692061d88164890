use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::bookings::bookings_constants::*;
use crate::errors::{Error, ValidationError};
use crate::utils::decimal_serde::decimal_serde;

/// Booking lifecycle states.
///
/// `Completed` and `Cancelled` are terminal; `Cancelled` is reachable from
/// every non-terminal state. A dispute is an informational marker kept in
/// its own table and does not appear here.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum BookingStatus {
    PendingPayment,
    Confirmed,
    InProgress,
    CompletedPendingVerification,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::PendingPayment => BOOKING_STATUS_PENDING_PAYMENT,
            BookingStatus::Confirmed => BOOKING_STATUS_CONFIRMED,
            BookingStatus::InProgress => BOOKING_STATUS_IN_PROGRESS,
            BookingStatus::CompletedPendingVerification => {
                BOOKING_STATUS_COMPLETED_PENDING_VERIFICATION
            }
            BookingStatus::Completed => BOOKING_STATUS_COMPLETED,
            BookingStatus::Cancelled => BOOKING_STATUS_CANCELLED,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Completed | BookingStatus::Cancelled)
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            s if s == BOOKING_STATUS_PENDING_PAYMENT => Ok(BookingStatus::PendingPayment),
            s if s == BOOKING_STATUS_CONFIRMED => Ok(BookingStatus::Confirmed),
            s if s == BOOKING_STATUS_IN_PROGRESS => Ok(BookingStatus::InProgress),
            s if s == BOOKING_STATUS_COMPLETED_PENDING_VERIFICATION => {
                Ok(BookingStatus::CompletedPendingVerification)
            }
            s if s == BOOKING_STATUS_COMPLETED => Ok(BookingStatus::Completed),
            s if s == BOOKING_STATUS_CANCELLED => Ok(BookingStatus::Cancelled),
            _ => Err(format!("Unknown booking status: {}", s)),
        }
    }
}

/// Payout lifecycle for a booking's held funds
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum PayoutStatus {
    Pending,
    Processing,
    Released,
    Failed,
}

impl PayoutStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PayoutStatus::Pending => PAYOUT_STATUS_PENDING,
            PayoutStatus::Processing => PAYOUT_STATUS_PROCESSING,
            PayoutStatus::Released => PAYOUT_STATUS_RELEASED,
            PayoutStatus::Failed => PAYOUT_STATUS_FAILED,
        }
    }
}

impl FromStr for PayoutStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            s if s == PAYOUT_STATUS_PENDING => Ok(PayoutStatus::Pending),
            s if s == PAYOUT_STATUS_PROCESSING => Ok(PayoutStatus::Processing),
            s if s == PAYOUT_STATUS_RELEASED => Ok(PayoutStatus::Released),
            s if s == PAYOUT_STATUS_FAILED => Ok(PayoutStatus::Failed),
            _ => Err(format!("Unknown payout status: {}", s)),
        }
    }
}

/// Grass length bands selected by the customer
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum GrassLength {
    Short,
    Medium,
    Long,
    Overgrown,
}

impl GrassLength {
    pub fn as_str(&self) -> &'static str {
        match self {
            GrassLength::Short => GRASS_LENGTH_SHORT,
            GrassLength::Medium => GRASS_LENGTH_MEDIUM,
            GrassLength::Long => GRASS_LENGTH_LONG,
            GrassLength::Overgrown => GRASS_LENGTH_OVERGROWN,
        }
    }
}

impl FromStr for GrassLength {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            s if s == GRASS_LENGTH_SHORT => Ok(GrassLength::Short),
            s if s == GRASS_LENGTH_MEDIUM => Ok(GrassLength::Medium),
            s if s == GRASS_LENGTH_LONG => Ok(GrassLength::Long),
            s if s == GRASS_LENGTH_OVERGROWN => Ok(GrassLength::Overgrown),
            _ => Err(format!("Unknown grass length: {}", s)),
        }
    }
}

/// Database model for bookings
#[derive(Queryable, Identifiable, Selectable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::bookings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct BookingDB {
    pub id: String,
    pub user_id: String,
    pub contractor_id: Option<String>,
    pub address_id: String,
    pub status: String,
    pub scheduled_date: NaiveDate,
    pub grass_length: String,
    pub clippings_removal: bool,
    pub total_price: String,
    pub payment_intent_ref: Option<String>,
    pub payout_status: String,
    pub payout_ref: Option<String>,
    pub contractor_rating_response: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Domain model with typed fields
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub user_id: String,
    pub contractor_id: Option<String>,
    pub address_id: String,
    pub status: BookingStatus,
    pub scheduled_date: NaiveDate,
    pub grass_length: GrassLength,
    pub clippings_removal: bool,
    #[serde(with = "decimal_serde")]
    pub total_price: Decimal,
    pub payment_intent_ref: Option<String>,
    pub payout_status: PayoutStatus,
    pub payout_ref: Option<String>,
    pub contractor_rating_response: Option<String>,
}

impl TryFrom<BookingDB> for Booking {
    type Error = Error;

    fn try_from(db: BookingDB) -> Result<Self, Self::Error> {
        let status = BookingStatus::from_str(&db.status)
            .map_err(ValidationError::InvalidInput)?;
        let payout_status = PayoutStatus::from_str(&db.payout_status)
            .map_err(ValidationError::InvalidInput)?;
        let grass_length = GrassLength::from_str(&db.grass_length)
            .map_err(ValidationError::InvalidInput)?;
        let total_price = Decimal::from_str(&db.total_price)?;

        Ok(Booking {
            id: db.id,
            user_id: db.user_id,
            contractor_id: db.contractor_id,
            address_id: db.address_id,
            status,
            scheduled_date: db.scheduled_date,
            grass_length,
            clippings_removal: db.clippings_removal,
            total_price,
            payment_intent_ref: db.payment_intent_ref,
            payout_status,
            payout_ref: db.payout_ref,
            contractor_rating_response: db.contractor_rating_response,
        })
    }
}

/// Input for creating a booking from an accepted quote
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewBookingRequest {
    pub address_id: String,
    pub scheduled_date: NaiveDate,
    pub grass_length: GrassLength,
    pub clippings_removal: bool,
}

/// Input for the approve-job transition
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ApproveJobRequest {
    pub booking_id: String,
    pub rating: Option<i32>,
    pub comment: Option<String>,
}

/// Outcome of attempting to claim a booking's payout for processing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayoutClaim {
    /// This caller owns the release now
    Claimed,
    /// Funds already moved; carries the stored payout reference
    AlreadyReleased(Option<String>),
    /// Another release attempt currently holds the claim
    InFlight,
}
