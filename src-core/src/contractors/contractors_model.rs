use std::str::FromStr;

use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::contractors::contractors_constants::*;
use crate::errors::{Error, ValidationError};
use crate::utils::decimal_serde::decimal_serde;

/// Contractor trust tiers, ordered lowest to highest.
/// Promotion is monotonic; there is no demotion path.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub enum Tier {
    Probation,
    Standard,
    Premium,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Probation => TIER_PROBATION,
            Tier::Standard => TIER_STANDARD,
            Tier::Premium => TIER_PREMIUM,
        }
    }
}

impl FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            s if s == TIER_PROBATION => Ok(Tier::Probation),
            s if s == TIER_STANDARD => Ok(Tier::Standard),
            s if s == TIER_PREMIUM => Ok(Tier::Premium),
            _ => Err(format!("Unknown tier: {}", s)),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApprovalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalStatus::Pending => APPROVAL_STATUS_PENDING,
            ApprovalStatus::Approved => APPROVAL_STATUS_APPROVED,
            ApprovalStatus::Rejected => APPROVAL_STATUS_REJECTED,
        }
    }
}

impl FromStr for ApprovalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            s if s == APPROVAL_STATUS_PENDING => Ok(ApprovalStatus::Pending),
            s if s == APPROVAL_STATUS_APPROVED => Ok(ApprovalStatus::Approved),
            s if s == APPROVAL_STATUS_REJECTED => Ok(ApprovalStatus::Rejected),
            _ => Err(format!("Unknown approval status: {}", s)),
        }
    }
}

/// Database model for contractors
#[derive(Queryable, Identifiable, Selectable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::contractors)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct ContractorDB {
    pub id: String,
    pub user_id: String,
    pub tier: String,
    pub payment_account_ref: Option<String>,
    pub payouts_enabled: bool,
    pub average_rating: String,
    pub total_ratings_count: i32,
    pub is_active: bool,
    pub approval_status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Domain model with typed fields
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Contractor {
    pub id: String,
    pub user_id: String,
    pub tier: Tier,
    pub payment_account_ref: Option<String>,
    pub payouts_enabled: bool,
    #[serde(with = "decimal_serde")]
    pub average_rating: Decimal,
    pub total_ratings_count: i32,
    pub is_active: bool,
    pub approval_status: ApprovalStatus,
}

impl TryFrom<ContractorDB> for Contractor {
    type Error = Error;

    fn try_from(db: ContractorDB) -> Result<Self, Self::Error> {
        let tier = Tier::from_str(&db.tier).map_err(ValidationError::InvalidInput)?;
        let approval_status = ApprovalStatus::from_str(&db.approval_status)
            .map_err(ValidationError::InvalidInput)?;
        let average_rating = Decimal::from_str(&db.average_rating)?;

        Ok(Contractor {
            id: db.id,
            user_id: db.user_id,
            tier,
            payment_account_ref: db.payment_account_ref,
            payouts_enabled: db.payouts_enabled,
            average_rating,
            total_ratings_count: db.total_ratings_count,
            is_active: db.is_active,
            approval_status,
        })
    }
}

/// A tier change applied by the promotion evaluator
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TierPromotion {
    pub contractor_id: String,
    pub from: Tier,
    pub to: Tier,
}
