//! Business date newtype.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{TetoError, TetoResult};

/// Day/month/year format used by the published table and by the CLI.
pub const DISPLAY_FORMAT: &str = "%d/%m/%Y";

/// A calendar date that never falls on Saturday or Sunday.
///
/// Produced by [`crate::calendar::resolve_last_business_day`], or validated
/// from an arbitrary date with [`BusinessDate::new`]. Public holidays are not
/// considered.
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use teto_core::types::BusinessDate;
///
/// let friday = NaiveDate::from_ymd_opt(2026, 8, 14).unwrap();
/// assert!(BusinessDate::new(friday).is_ok());
///
/// let saturday = NaiveDate::from_ymd_opt(2026, 8, 15).unwrap();
/// assert!(BusinessDate::new(saturday).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct BusinessDate(NaiveDate);

impl BusinessDate {
    /// Validates that `date` is a weekday.
    ///
    /// # Errors
    ///
    /// Returns `TetoError::InvalidDate` for Saturdays and Sundays.
    pub fn new(date: NaiveDate) -> TetoResult<Self> {
        if is_weekend(date) {
            return Err(TetoError::invalid_date(format!(
                "{} is a {:?}, not a business day",
                date.format(DISPLAY_FORMAT),
                date.weekday()
            )));
        }
        Ok(BusinessDate(date))
    }

    /// Parses a `dd/mm/yyyy` string and validates it.
    pub fn parse(s: &str) -> TetoResult<Self> {
        let date = NaiveDate::parse_from_str(s.trim(), DISPLAY_FORMAT).map_err(|_| {
            TetoError::invalid_date(format!("Cannot parse '{s}', expected dd/mm/yyyy"))
        })?;
        Self::new(date)
    }

    /// Only for callers that have already established the weekday invariant.
    pub(crate) fn new_unchecked(date: NaiveDate) -> Self {
        debug_assert!(!is_weekend(date));
        BusinessDate(date)
    }

    /// Returns the underlying `NaiveDate`.
    #[must_use]
    pub fn as_naive_date(&self) -> NaiveDate {
        self.0
    }

    /// Returns the year component.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Returns the day of week.
    #[must_use]
    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }
}

impl fmt::Display for BusinessDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DISPLAY_FORMAT))
    }
}

impl TryFrom<NaiveDate> for BusinessDate {
    type Error = TetoError;

    fn try_from(date: NaiveDate) -> Result<Self, Self::Error> {
        Self::new(date)
    }
}

impl From<BusinessDate> for NaiveDate {
    fn from(date: BusinessDate) -> Self {
        date.0
    }
}

impl<'de> Deserialize<'de> for BusinessDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let date = NaiveDate::deserialize(deserializer)?;
        BusinessDate::new(date).map_err(serde::de::Error::custom)
    }
}

pub(crate) fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_weekday_accepted() {
        let date = BusinessDate::new(ymd(2026, 8, 14)).unwrap();
        assert_eq!(date.weekday(), Weekday::Fri);
        assert_eq!(date.year(), 2026);
        assert_eq!(date.month(), 8);
        assert_eq!(date.day(), 14);
    }

    #[test]
    fn test_weekend_rejected() {
        assert!(matches!(
            BusinessDate::new(ymd(2026, 8, 15)),
            Err(TetoError::InvalidDate { .. })
        ));
        assert!(BusinessDate::new(ymd(2026, 8, 16)).is_err());
    }

    #[test]
    fn test_parse_and_display() {
        let date = BusinessDate::parse("03/08/2026").unwrap();
        assert_eq!(date.as_naive_date(), ymd(2026, 8, 3));
        assert_eq!(date.to_string(), "03/08/2026");
        assert!(BusinessDate::parse("2026-08-03").is_err());
        assert!(BusinessDate::parse("01/08/2026").is_err()); // Saturday
    }

    #[test]
    fn test_serde_rejects_weekend() {
        let ok: BusinessDate = serde_json::from_str("\"2026-08-14\"").unwrap();
        assert_eq!(ok.day(), 14);
        assert!(serde_json::from_str::<BusinessDate>("\"2026-08-15\"").is_err());
    }
}
