//! Domain types.
//!
//! - [`BusinessDate`]: weekday-only calendar date the table is published for
//! - [`RateSeries`]: maturity -> indicative rate snapshot
//! - [`CeilingRow`] / [`CeilingTable`]: the derived ceiling-rate comparison

mod business_date;
mod ceiling;
mod rate_series;

pub use business_date::{BusinessDate, DISPLAY_FORMAT};
pub use ceiling::{CeilingRow, CeilingTable};
pub use rate_series::{Iter as RateSeriesIter, RateSeries};

pub(crate) use business_date::is_weekend;
