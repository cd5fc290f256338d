//! Ceiling-rate calculator.
//!
//! Compares an inflation-indexed offer with a nominal one across a fixed set
//! of reserve steps. The reference and spread are compounded, not added:
//!
//! ```text
//! base    = (1 + reference / 100) * (1 + spread / 100) - 1
//! indexed = (base + step) * 100
//! nominal = nominal_rate + step * 100
//! ```
//!
//! `base` is evaluated once per call. Steps run from 0.00% down to -1.00% in
//! 0.05% decrements and the output keeps that order.

use rust_decimal::Decimal;

use crate::types::{CeilingRow, CeilingTable};

/// Number of reserve steps, and therefore of rows in every ceiling table.
pub const RESERVE_STEP_COUNT: usize = 21;

/// Distance between consecutive reserve steps (0.05%), as a fraction.
pub const RESERVE_STEP_SIZE: Decimal = Decimal::from_parts(5, 0, 0, false, 4);

/// The fixed reserve steps `0.0000, -0.0005, ..., -0.0100`.
pub fn reserve_steps() -> impl Iterator<Item = Decimal> {
    (0i64..).take(RESERVE_STEP_COUNT).map(|i| Decimal::new(-5 * i, 4))
}

/// Composes a reference rate and a spread, both in percent, into a fraction.
pub fn combined_rate(reference_rate: Decimal, spread: Decimal) -> Decimal {
    (Decimal::ONE + reference_rate / Decimal::ONE_HUNDRED)
        * (Decimal::ONE + spread / Decimal::ONE_HUNDRED)
        - Decimal::ONE
}

/// Builds the 21-row ceiling table.
///
/// All three inputs are percentages (`6.00` for 6%). Inputs are assumed to be
/// validated by the caller; the computation itself cannot fail.
pub fn compute_ceiling_table(
    reference_rate: Decimal,
    spread: Decimal,
    nominal_rate: Decimal,
) -> CeilingTable {
    let base = combined_rate(reference_rate, spread);
    let rows = reserve_steps()
        .map(|step| CeilingRow {
            reserve_step: step,
            ceiling_indexed_rate: (base + step) * Decimal::ONE_HUNDRED,
            ceiling_nominal_rate: nominal_rate + step * Decimal::ONE_HUNDRED,
        })
        .collect();
    CeilingTable::new(rows)
}
