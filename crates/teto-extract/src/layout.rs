//! Expected shape of the published table.

use serde::{Deserialize, Serialize};
use teto_core::{TetoError, TetoResult};

/// Column and row positions of the indicative rate table.
///
/// Column indexes are 0-based positions in the combined grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableLayout {
    /// Exact column count every table fragment must have.
    pub columns: usize,
    /// Leading rows (captions and headers) dropped before data rows.
    pub header_rows: usize,
    /// Column holding the maturity date.
    pub maturity_column: usize,
    /// Column holding the indicative rate.
    pub rate_column: usize,
}

impl Default for TableLayout {
    fn default() -> Self {
        Self {
            columns: 11,
            header_rows: 5,
            maturity_column: 2,
            rate_column: 5,
        }
    }
}

impl TableLayout {
    /// Checks both columns fall inside the table and are distinct.
    ///
    /// # Errors
    ///
    /// Returns `TetoError::InvalidInput` naming the offending field.
    pub fn validate(&self) -> TetoResult<()> {
        if self.columns == 0 {
            return Err(TetoError::invalid_input("layout.columns", "must be positive"));
        }
        for (field, column) in [
            ("layout.maturity_column", self.maturity_column),
            ("layout.rate_column", self.rate_column),
        ] {
            if column >= self.columns {
                return Err(TetoError::invalid_input(
                    field,
                    format!("column {column} is outside a {}-column table", self.columns),
                ));
            }
        }
        if self.maturity_column == self.rate_column {
            return Err(TetoError::invalid_input(
                "layout.rate_column",
                "must differ from layout.maturity_column",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_is_valid() {
        assert!(TableLayout::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_out_of_range_columns() {
        let layout = TableLayout {
            rate_column: 11,
            ..TableLayout::default()
        };
        assert!(matches!(
            layout.validate(),
            Err(TetoError::InvalidInput { field, .. }) if field == "layout.rate_column"
        ));

        let layout = TableLayout {
            columns: 0,
            ..TableLayout::default()
        };
        assert!(layout.validate().is_err());
    }

    #[test]
    fn test_rejects_same_column() {
        let layout = TableLayout {
            maturity_column: 5,
            ..TableLayout::default()
        };
        assert!(layout.validate().is_err());
    }
}
