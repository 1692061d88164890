/// Decimal precision for money amounts
pub const MONEY_DECIMAL_PRECISION: u32 = 2;

/// Decimal precision for rating aggregates
pub const RATING_DECIMAL_PRECISION: u32 = 2;

/// Fallback contractor response window when the setting is absent (hours)
pub const DEFAULT_CONTRACTOR_RESPONSE_WINDOW_HOURS: i64 = 24;
