/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Average number of days in a calendar year, leap years included
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Default number of days before expiry that counts as critical
pub const DEFAULT_CRITICAL_DAYS: i64 = 7;

/// Default number of days before expiry that counts as urgent
pub const DEFAULT_URGENT_DAYS: i64 = 14;

/// Default number of days before expiry that counts as a warning
pub const DEFAULT_WARNING_DAYS: i64 = 30;
