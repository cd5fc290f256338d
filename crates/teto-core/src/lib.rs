//! # Teto Core
//!
//! Core types and pure calculations for the NTN-B ceiling-rate tooling.
//!
//! This crate provides the building blocks used by the extraction pipeline and
//! the command-line front end:
//!
//! - **Types**: [`BusinessDate`], [`RateSeries`], [`CeilingRow`], [`CeilingTable`]
//! - **Calendar**: resolution of the last business day before "now"
//! - **Ceiling**: the closed-form ceiling-rate schedule over 21 reserve steps
//! - **Errors**: the [`TetoError`] taxonomy shared by every crate
//!
//! All rate arithmetic is done in [`rust_decimal::Decimal`] so that displayed
//! two-decimal percentages round exactly.
//!
//! ## Example
//!
//! ```rust
//! use teto_core::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let table = compute_ceiling_table(dec!(6.00), dec!(1.25), dec!(7.00));
//! assert_eq!(table.len(), 21);
//! assert_eq!(table.first().indexed_display(), "7.33%");
//! assert_eq!(table.last().nominal_display(), "6.00%");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]

pub mod calendar;
pub mod ceiling;
pub mod error;
pub mod format;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calendar::{resolve_from_local_now, resolve_last_business_day};
    pub use crate::ceiling::{compute_ceiling_table, reserve_steps, RESERVE_STEP_COUNT};
    pub use crate::error::{TetoError, TetoResult};
    pub use crate::format::format_percent;
    pub use crate::types::{BusinessDate, CeilingRow, CeilingTable, RateSeries};
}

// Re-export commonly used types at crate root
pub use error::{TetoError, TetoResult};
pub use types::{BusinessDate, CeilingRow, CeilingTable, RateSeries};
