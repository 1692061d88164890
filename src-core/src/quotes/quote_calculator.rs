use chrono::Datelike;
use rust_decimal::{Decimal, RoundingStrategy};

use super::quotes_model::{QuoteBreakdown, QuoteInput};
use crate::constants::MONEY_DECIMAL_PRECISION;
use crate::pricing::PricingSnapshot;

/// Pure price computation over an immutable pricing snapshot.
///
/// Rounding happens in two stages: once after the area price, once after
/// the subtotal, and once on the final total. Reordering these changes the
/// final cent value, so the sequence below must stay as-is.
pub struct QuoteCalculator;

impl QuoteCalculator {
    pub fn calculate(input: &QuoteInput, pricing: &PricingSnapshot) -> QuoteBreakdown {
        let base_price = pricing.base_price();
        let area_price = round2(input.square_meters * pricing.price_per_sqm());

        let slope_multiplier = pricing.slope_multiplier(input.slope);
        let tier_multiplier =
            Decimal::ONE + Decimal::from(input.tier_count - 1) * pricing.tier_multiplier();
        let grass_multiplier = pricing.grass_multiplier(input.grass_length);
        let day_surcharge = pricing.weekend_surcharge(input.scheduled_date.weekday());
        let clippings_cost = if input.clippings_removal {
            pricing.clipping_removal_cost()
        } else {
            Decimal::ZERO
        };

        let subtotal = round2(
            (base_price + area_price) * slope_multiplier * tier_multiplier * grass_multiplier,
        );
        let total = round2(subtotal * day_surcharge + clippings_cost);

        QuoteBreakdown {
            base_price,
            area_price,
            slope_multiplier,
            tier_multiplier,
            grass_multiplier,
            day_surcharge,
            clippings_cost,
            subtotal,
            total,
        }
    }
}

fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_DECIMAL_PRECISION, RoundingStrategy::MidpointAwayFromZero)
}
