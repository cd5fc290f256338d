//! Indicative rate series keyed by maturity.

use std::collections::btree_map::{self, BTreeMap};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::business_date::{BusinessDate, DISPLAY_FORMAT};
use crate::error::{TetoError, TetoResult};

/// Snapshot of published indicative rates, one per bond maturity.
///
/// Rates are percentages (`6.1234` means 6.1234% a year). A series always
/// holds at least one entry, its maturities are unique and no rate is
/// negative; [`RateSeries::from_entries`] is the only constructor and rejects
/// anything else. A new series replaces the old one on refresh; series are
/// never updated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RateSeries {
    reference_date: Option<BusinessDate>,
    rates: BTreeMap<NaiveDate, Decimal>,
}

impl RateSeries {
    /// Builds a series from `(maturity, rate)` pairs.
    ///
    /// # Errors
    ///
    /// Returns `TetoError::MalformedTable` when the input is empty, repeats a
    /// maturity, or carries a negative rate.
    pub fn from_entries<I>(entries: I) -> TetoResult<Self>
    where
        I: IntoIterator<Item = (NaiveDate, Decimal)>,
    {
        let mut rates = BTreeMap::new();
        for (maturity, rate) in entries {
            if rate.is_sign_negative() && !rate.is_zero() {
                return Err(TetoError::malformed_table(format!(
                    "negative indicative rate {rate} for maturity {}",
                    maturity.format(DISPLAY_FORMAT)
                )));
            }
            if rates.insert(maturity, rate).is_some() {
                return Err(TetoError::malformed_table(format!(
                    "maturity {} appears more than once",
                    maturity.format(DISPLAY_FORMAT)
                )));
            }
        }
        if rates.is_empty() {
            return Err(TetoError::malformed_table("table contains no data rows"));
        }
        Ok(Self {
            reference_date: None,
            rates,
        })
    }

    /// Tags the series with the business date it was published for.
    #[must_use]
    pub fn with_reference_date(mut self, date: BusinessDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    /// Business date of the published table, when known.
    pub fn reference_date(&self) -> Option<BusinessDate> {
        self.reference_date
    }

    /// Number of maturities.
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Always false for a constructed series.
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Rate for `maturity`, if published.
    pub fn get(&self, maturity: NaiveDate) -> Option<Decimal> {
        self.rates.get(&maturity).copied()
    }

    /// Rate for `maturity`.
    ///
    /// # Errors
    ///
    /// Returns `TetoError::InvalidSelection` if the maturity is absent.
    pub fn rate_for(&self, maturity: NaiveDate) -> TetoResult<Decimal> {
        self.get(maturity).ok_or_else(|| {
            TetoError::invalid_selection(maturity.format(DISPLAY_FORMAT).to_string())
        })
    }

    /// Resolves a `dd/mm/yyyy` key as shown in maturity listings.
    ///
    /// # Errors
    ///
    /// Returns `TetoError::InvalidSelection` if the key does not parse or does
    /// not name a maturity in this series.
    pub fn select(&self, key: &str) -> TetoResult<(NaiveDate, Decimal)> {
        let maturity = NaiveDate::parse_from_str(key.trim(), DISPLAY_FORMAT)
            .map_err(|_| TetoError::invalid_selection(key.trim()))?;
        let rate = self.rate_for(maturity)?;
        Ok((maturity, rate))
    }

    /// Maturities in ascending order.
    pub fn maturities(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.rates.keys().copied()
    }

    /// Maturities rendered as `dd/mm/yyyy` selection keys.
    pub fn maturity_keys(&self) -> Vec<String> {
        self.maturities()
            .map(|d| d.format(DISPLAY_FORMAT).to_string())
            .collect()
    }

    /// Iterates `(maturity, rate)` pairs in ascending maturity order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.rates.iter(),
        }
    }
}

/// Iterator over the entries of a [`RateSeries`].
pub struct Iter<'a> {
    inner: btree_map::Iter<'a, NaiveDate, Decimal>,
}

impl Iterator for Iter<'_> {
    type Item = (NaiveDate, Decimal);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(d, r)| (*d, *r))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> IntoIterator for &'a RateSeries {
    type Item = (NaiveDate, Decimal);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> RateSeries {
        RateSeries::from_entries(vec![
            (ymd(2035, 5, 15), dec!(7.1520)),
            (ymd(2026, 8, 15), dec!(9.8754)),
            (ymd(2030, 8, 15), dec!(7.4031)),
        ])
        .unwrap()
    }

    #[test]
    fn test_entries_are_ordered_by_maturity() {
        let series = sample();
        let maturities: Vec<_> = series.maturities().collect();
        assert_eq!(
            maturities,
            vec![ymd(2026, 8, 15), ymd(2030, 8, 15), ymd(2035, 5, 15)]
        );
        assert_eq!(series.len(), 3);
        assert!(!series.is_empty());
    }

    #[test]
    fn test_select_by_display_key() {
        let series = sample();
        let (maturity, rate) = series.select("15/08/2030").unwrap();
        assert_eq!(maturity, ymd(2030, 8, 15));
        assert_eq!(rate, dec!(7.4031));
    }

    #[test]
    fn test_absent_maturity_is_invalid_selection() {
        let series = sample();
        assert!(matches!(
            series.select("15/08/2032"),
            Err(TetoError::InvalidSelection { .. })
        ));
        assert!(matches!(
            series.select("not a date"),
            Err(TetoError::InvalidSelection { .. })
        ));
        assert!(matches!(
            series.rate_for(ymd(2024, 1, 1)),
            Err(TetoError::InvalidSelection { maturity }) if maturity == "01/01/2024"
        ));
    }

    #[test]
    fn test_empty_series_rejected() {
        let empty: Vec<(NaiveDate, Decimal)> = vec![];
        assert!(matches!(
            RateSeries::from_entries(empty),
            Err(TetoError::MalformedTable { .. })
        ));
    }

    #[test]
    fn test_duplicate_maturity_rejected() {
        let result = RateSeries::from_entries(vec![
            (ymd(2030, 8, 15), dec!(7.40)),
            (ymd(2030, 8, 15), dec!(7.41)),
        ]);
        assert!(matches!(result, Err(TetoError::MalformedTable { .. })));
    }

    #[test]
    fn test_negative_rate_rejected() {
        let result = RateSeries::from_entries(vec![(ymd(2030, 8, 15), dec!(-0.10))]);
        assert!(matches!(result, Err(TetoError::MalformedTable { .. })));
    }

    #[test]
    fn test_maturity_keys_and_reference_date() {
        let date = BusinessDate::parse("14/08/2026").unwrap();
        let series = sample().with_reference_date(date);
        assert_eq!(series.reference_date(), Some(date));
        assert_eq!(
            series.maturity_keys(),
            vec!["15/08/2026", "15/08/2030", "15/05/2035"]
        );
        assert_eq!(series.iter().count(), 3);
    }
}
