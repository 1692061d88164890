pub const SETTING_BASE_PRICE: &str = "base_price";
pub const SETTING_PRICE_PER_SQM: &str = "price_per_sqm";
pub const SETTING_TIER_MULTIPLIER: &str = "tier_multiplier";
pub const SETTING_SLOPE_MILD_MULTIPLIER: &str = "slope_mild_multiplier";
pub const SETTING_SLOPE_STEEP_MULTIPLIER: &str = "slope_steep_multiplier";
pub const SETTING_GRASS_SHORT_MULTIPLIER: &str = "grass_short_multiplier";
pub const SETTING_GRASS_MEDIUM_MULTIPLIER: &str = "grass_medium_multiplier";
pub const SETTING_GRASS_LONG_MULTIPLIER: &str = "grass_long_multiplier";
pub const SETTING_GRASS_OVERGROWN_MULTIPLIER: &str = "grass_overgrown_multiplier";
pub const SETTING_CLIPPING_REMOVAL_COST: &str = "clipping_removal_cost";
pub const SETTING_SATURDAY_SURCHARGE: &str = "saturday_surcharge";
pub const SETTING_SUNDAY_SURCHARGE: &str = "sunday_surcharge";
pub const SETTING_CONTRACTOR_RESPONSE_WINDOW_HOURS: &str = "contractor_response_window_hours";
