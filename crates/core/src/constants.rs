use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Decimal precision for intermediate calculations
pub const DECIMAL_PRECISION: u32 = 6;

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Average days per year, accounting for leap years
pub const DAYS_PER_YEAR: Decimal = dec!(365.25);
