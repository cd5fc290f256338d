//! Ceiling-rate table rows.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::format::{format_fraction_as_percent, format_percent};

/// One reserve scenario of the ceiling-rate comparison.
///
/// `reserve_step` is a fraction in `[-0.0100, 0.0000]`; the two ceiling rates
/// are percentages carried at full precision. Use the `*_display` helpers for
/// the two-decimal rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CeilingRow {
    /// Reserve offset as a fraction (e.g. `-0.0050` for -0.50%).
    pub reserve_step: Decimal,
    /// Ceiling on the inflation-indexed basis, in percent.
    pub ceiling_indexed_rate: Decimal,
    /// Ceiling on the nominal basis, in percent.
    pub ceiling_nominal_rate: Decimal,
}

impl CeilingRow {
    /// Reserve step rendered as a percentage, e.g. `"-0.50%"`.
    pub fn reserve_display(&self) -> String {
        format_fraction_as_percent(self.reserve_step)
    }

    /// Indexed ceiling rendered as a percentage, e.g. `"7.33%"`.
    pub fn indexed_display(&self) -> String {
        format_percent(self.ceiling_indexed_rate)
    }

    /// Nominal ceiling rendered as a percentage, e.g. `"7.00%"`.
    pub fn nominal_display(&self) -> String {
        format_percent(self.ceiling_nominal_rate)
    }
}

/// The full 21-row comparison, ordered from the 0.00% step to the -1.00% step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CeilingTable {
    rows: Vec<CeilingRow>,
}

impl CeilingTable {
    pub(crate) fn new(rows: Vec<CeilingRow>) -> Self {
        debug_assert!(!rows.is_empty());
        Self { rows }
    }

    /// Rows in step order.
    pub fn rows(&self) -> &[CeilingRow] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always false for a computed table.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The 0.00% reserve row.
    pub fn first(&self) -> &CeilingRow {
        &self.rows[0]
    }

    /// The -1.00% reserve row.
    pub fn last(&self) -> &CeilingRow {
        &self.rows[self.rows.len() - 1]
    }

    /// Iterates rows in step order.
    pub fn iter(&self) -> std::slice::Iter<'_, CeilingRow> {
        self.rows.iter()
    }
}

impl<'a> IntoIterator for &'a CeilingTable {
    type Item = &'a CeilingRow;
    type IntoIter = std::slice::Iter<'a, CeilingRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
