//! Resolution of the publication date to fetch.
//!
//! The table is published for the previous business day. Only weekends are
//! skipped: a public holiday on the resolved date is not detected, and the
//! source simply has no table for it.

use chrono::{Datelike, Days, Local, NaiveDateTime, Weekday};

use crate::types::{is_weekend, BusinessDate};

/// Returns the most recent business day strictly before `now`.
///
/// The day before `now` is taken; a Saturday rolls back one more day and a
/// Sunday two more, both landing on the preceding Friday.
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use teto_core::calendar::resolve_last_business_day;
///
/// // Monday 17 Aug 2026 -> Friday 14 Aug 2026
/// let now = NaiveDate::from_ymd_opt(2026, 8, 17).unwrap().and_hms_opt(9, 0, 0).unwrap();
/// assert_eq!(resolve_last_business_day(now).to_string(), "14/08/2026");
/// ```
pub fn resolve_last_business_day(now: NaiveDateTime) -> BusinessDate {
    let candidate = now.date() - Days::new(1);
    let candidate = match candidate.weekday() {
        Weekday::Sat => candidate - Days::new(1),
        Weekday::Sun => candidate - Days::new(2),
        _ => candidate,
    };
    debug_assert!(!is_weekend(candidate));
    BusinessDate::new_unchecked(candidate)
}

/// [`resolve_last_business_day`] evaluated at the host's local time.
pub fn resolve_from_local_now() -> BusinessDate {
    resolve_last_business_day(Local::now().naive_local())
}
