//! Percentage rendering.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places shown for every displayed rate.
pub const DISPLAY_DECIMALS: u32 = 2;

/// Rounds a percentage to two decimal places, midpoint away from zero.
///
/// Zero is always returned with a positive sign so `-0.00` never surfaces.
pub fn round_percent(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(DISPLAY_DECIMALS, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(DISPLAY_DECIMALS);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded
}

/// Formats a value that is already expressed in percent, e.g. `7.325` -> `"7.33%"`.
pub fn format_percent(value: Decimal) -> String {
    format!("{}%", round_percent(value))
}

/// Formats a fraction as a percentage, e.g. `-0.005` -> `"-0.50%"`.
pub fn format_fraction_as_percent(value: Decimal) -> String {
    format_percent(value * Decimal::ONE_HUNDRED)
}
