use std::collections::HashMap;
use std::str::FromStr;

use chrono::{NaiveDateTime, Weekday};
use diesel::prelude::*;
use log::warn;
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::addresses::Slope;
use crate::bookings::GrassLength;
use crate::constants::DEFAULT_CONTRACTOR_RESPONSE_WINDOW_HOURS;
use crate::pricing::pricing_constants::*;

/// Database model for pricing settings
#[derive(Queryable, Identifiable, Selectable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::pricing_settings)]
#[diesel(primary_key(setting_key))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct PricingSetting {
    pub setting_key: String,
    pub setting_value: String,
    pub updated_at: NaiveDateTime,
}

/// Model for inserting a pricing setting (configuration administration)
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::pricing_settings)]
#[serde(rename_all = "camelCase")]
pub struct NewPricingSetting {
    pub setting_key: String,
    pub setting_value: String,
}

/// Immutable snapshot of the pricing parameter table.
///
/// Loaded once per request and handed to the quote calculator, so the
/// calculator stays a pure function over its inputs. Missing or
/// non-numeric keys fall back to a multiplier of 1 / an additive charge
/// of 0.
#[derive(Debug, Clone, Default)]
pub struct PricingSnapshot {
    values: HashMap<String, Decimal>,
}

impl PricingSnapshot {
    pub fn new(settings: &[PricingSetting]) -> Self {
        let mut values = HashMap::new();
        for setting in settings {
            match Decimal::from_str(&setting.setting_value) {
                Ok(value) => {
                    values.insert(setting.setting_key.clone(), value);
                }
                Err(_) => {
                    warn!(
                        "Ignoring non-numeric pricing setting '{}'",
                        setting.setting_key
                    );
                }
            }
        }
        PricingSnapshot { values }
    }

    fn multiplier(&self, key: &str) -> Decimal {
        self.values.get(key).copied().unwrap_or(Decimal::ONE)
    }

    fn charge(&self, key: &str) -> Decimal {
        self.values.get(key).copied().unwrap_or(Decimal::ZERO)
    }

    pub fn base_price(&self) -> Decimal {
        self.charge(SETTING_BASE_PRICE)
    }

    pub fn price_per_sqm(&self) -> Decimal {
        self.charge(SETTING_PRICE_PER_SQM)
    }

    /// Additive per-extra-tier term: tier multiplier = 1 + (tiers - 1) * this
    pub fn tier_multiplier(&self) -> Decimal {
        self.charge(SETTING_TIER_MULTIPLIER)
    }

    pub fn slope_multiplier(&self, slope: Slope) -> Decimal {
        match slope {
            Slope::Flat => Decimal::ONE,
            Slope::Mild => self.multiplier(SETTING_SLOPE_MILD_MULTIPLIER),
            Slope::Steep => self.multiplier(SETTING_SLOPE_STEEP_MULTIPLIER),
        }
    }

    pub fn grass_multiplier(&self, grass_length: GrassLength) -> Decimal {
        match grass_length {
            GrassLength::Short => self.multiplier(SETTING_GRASS_SHORT_MULTIPLIER),
            GrassLength::Medium => self.multiplier(SETTING_GRASS_MEDIUM_MULTIPLIER),
            GrassLength::Long => self.multiplier(SETTING_GRASS_LONG_MULTIPLIER),
            GrassLength::Overgrown => self.multiplier(SETTING_GRASS_OVERGROWN_MULTIPLIER),
        }
    }

    pub fn clipping_removal_cost(&self) -> Decimal {
        self.charge(SETTING_CLIPPING_REMOVAL_COST)
    }

    /// Surcharge multiplier for the scheduled weekday; Saturday and Sunday only
    pub fn weekend_surcharge(&self, weekday: Weekday) -> Decimal {
        match weekday {
            Weekday::Sat => self.multiplier(SETTING_SATURDAY_SURCHARGE),
            Weekday::Sun => self.multiplier(SETTING_SUNDAY_SURCHARGE),
            _ => Decimal::ONE,
        }
    }

    pub fn contractor_response_window_hours(&self) -> i64 {
        self.values
            .get(SETTING_CONTRACTOR_RESPONSE_WINDOW_HOURS)
            .and_then(|value| value.to_i64())
            .unwrap_or(DEFAULT_CONTRACTOR_RESPONSE_WINDOW_HOURS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn setting(key: &str, value: &str) -> PricingSetting {
        PricingSetting {
            setting_key: key.to_string(),
            setting_value: value.to_string(),
            updated_at: Utc::now().naive_utc(),
        }
    }

    #[test]
    fn missing_keys_default_to_identity() {
        let snapshot = PricingSnapshot::default();
        assert_eq!(snapshot.base_price(), Decimal::ZERO);
        assert_eq!(snapshot.tier_multiplier(), Decimal::ZERO);
        assert_eq!(snapshot.slope_multiplier(Slope::Steep), Decimal::ONE);
        assert_eq!(snapshot.grass_multiplier(GrassLength::Long), Decimal::ONE);
        assert_eq!(snapshot.clipping_removal_cost(), Decimal::ZERO);
        assert_eq!(snapshot.weekend_surcharge(Weekday::Sat), Decimal::ONE);
        assert_eq!(
            snapshot.contractor_response_window_hours(),
            DEFAULT_CONTRACTOR_RESPONSE_WINDOW_HOURS
        );
    }

    #[test]
    fn flat_slope_is_never_looked_up() {
        let snapshot = PricingSnapshot::new(&[
            setting(SETTING_SLOPE_MILD_MULTIPLIER, "1.1"),
            setting(SETTING_SLOPE_STEEP_MULTIPLIER, "1.25"),
        ]);
        assert_eq!(snapshot.slope_multiplier(Slope::Flat), Decimal::ONE);
        assert_eq!(snapshot.slope_multiplier(Slope::Mild), dec!(1.1));
        assert_eq!(snapshot.slope_multiplier(Slope::Steep), dec!(1.25));
    }

    #[test]
    fn weekend_surcharge_only_applies_on_weekends() {
        let snapshot = PricingSnapshot::new(&[
            setting(SETTING_SATURDAY_SURCHARGE, "1.1"),
            setting(SETTING_SUNDAY_SURCHARGE, "1.2"),
        ]);
        assert_eq!(snapshot.weekend_surcharge(Weekday::Fri), Decimal::ONE);
        assert_eq!(snapshot.weekend_surcharge(Weekday::Sat), dec!(1.1));
        assert_eq!(snapshot.weekend_surcharge(Weekday::Sun), dec!(1.2));
    }

    #[test]
    fn non_numeric_values_are_skipped() {
        let snapshot = PricingSnapshot::new(&[setting(SETTING_BASE_PRICE, "not-a-number")]);
        assert_eq!(snapshot.base_price(), Decimal::ZERO);
    }
}
