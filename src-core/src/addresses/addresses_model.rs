use std::str::FromStr;

use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::addresses::addresses_constants::*;
use crate::errors::{Error, ValidationError};
use crate::utils::decimal_serde::decimal_serde_option;

/// Lawn slope bands used by pricing
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Slope {
    Flat,
    Mild,
    Steep,
}

impl Slope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Slope::Flat => SLOPE_FLAT,
            Slope::Mild => SLOPE_MILD,
            Slope::Steep => SLOPE_STEEP,
        }
    }
}

impl FromStr for Slope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            s if s == SLOPE_FLAT => Ok(Slope::Flat),
            s if s == SLOPE_MILD => Ok(Slope::Mild),
            s if s == SLOPE_STEEP => Ok(Slope::Steep),
            _ => Err(format!("Unknown slope: {}", s)),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum VerificationStatus {
    Pending,
    Verified,
    Rejected,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::Pending => VERIFICATION_STATUS_PENDING,
            VerificationStatus::Verified => VERIFICATION_STATUS_VERIFIED,
            VerificationStatus::Rejected => VERIFICATION_STATUS_REJECTED,
        }
    }
}

impl FromStr for VerificationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            s if s == VERIFICATION_STATUS_PENDING => Ok(VerificationStatus::Pending),
            s if s == VERIFICATION_STATUS_VERIFIED => Ok(VerificationStatus::Verified),
            s if s == VERIFICATION_STATUS_REJECTED => Ok(VerificationStatus::Rejected),
            _ => Err(format!("Unknown verification status: {}", s)),
        }
    }
}

/// Database model for addresses
#[derive(Queryable, Identifiable, Selectable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::addresses)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct AddressDB {
    pub id: String,
    pub user_id: String,
    pub street_line: String,
    pub square_meters: Option<String>,
    pub slope: String,
    pub tier_count: i32,
    pub verification_status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Domain model with typed fields
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: String,
    pub user_id: String,
    pub street_line: String,
    #[serde(with = "decimal_serde_option")]
    pub square_meters: Option<Decimal>,
    pub slope: Slope,
    pub tier_count: i32,
    pub verification_status: VerificationStatus,
}

impl TryFrom<AddressDB> for Address {
    type Error = Error;

    fn try_from(db: AddressDB) -> Result<Self, Self::Error> {
        let slope = Slope::from_str(&db.slope)
            .map_err(ValidationError::InvalidInput)?;
        let verification_status = VerificationStatus::from_str(&db.verification_status)
            .map_err(ValidationError::InvalidInput)?;
        let square_meters = db
            .square_meters
            .as_deref()
            .map(Decimal::from_str)
            .transpose()?;

        Ok(Address {
            id: db.id,
            user_id: db.user_id,
            street_line: db.street_line,
            square_meters,
            slope,
            tier_count: db.tier_count,
            verification_status,
        })
    }
}

/// Model for creating a new address (intake surface)
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewAddress {
    pub user_id: String,
    pub street_line: String,
    #[serde(with = "decimal_serde_option")]
    pub square_meters: Option<Decimal>,
    pub slope: Slope,
    pub tier_count: i32,
}
