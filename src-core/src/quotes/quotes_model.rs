use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::addresses::Slope;
use crate::bookings::GrassLength;
use crate::utils::decimal_serde::decimal_serde;

/// Input for the quote external interface
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub address_id: String,
    pub selected_date: NaiveDate,
    pub grass_length: GrassLength,
    pub clippings_removal: bool,
}

/// Resolved calculator input, assembled from the address row and the
/// customer's service selections.
#[derive(Debug, Clone)]
pub struct QuoteInput {
    pub square_meters: Decimal,
    pub slope: Slope,
    pub tier_count: i32,
    pub grass_length: GrassLength,
    pub clippings_removal: bool,
    pub scheduled_date: NaiveDate,
}

/// Priced breakdown for a prospective booking.
///
/// Money fields are rounded to cents; the multipliers are kept at full
/// precision so the breakdown can be replayed.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuoteBreakdown {
    #[serde(with = "decimal_serde")]
    pub base_price: Decimal,
    #[serde(with = "decimal_serde")]
    pub area_price: Decimal,
    pub slope_multiplier: Decimal,
    pub tier_multiplier: Decimal,
    pub grass_multiplier: Decimal,
    pub day_surcharge: Decimal,
    #[serde(with = "decimal_serde")]
    pub clippings_cost: Decimal,
    #[serde(with = "decimal_serde")]
    pub subtotal: Decimal,
    #[serde(with = "decimal_serde")]
    pub total: Decimal,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub quote: QuoteBreakdown,
    /// True when the address has not been verified yet; the quote is
    /// computable but non-binding.
    pub is_preliminary: bool,
}
