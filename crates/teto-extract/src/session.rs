//! The in-memory rate session.
//!
//! A session holds at most one [`RateSeries`] snapshot. [`RateSession::initial_load`]
//! and [`RateSession::refresh`] both resolve the target business date and run
//! the same extraction; a successful load replaces the snapshot wholesale and
//! a failed one leaves the previous snapshot untouched.

use chrono::{Local, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use teto_core::calendar::resolve_last_business_day;
use teto_core::ceiling::compute_ceiling_table;
use teto_core::{BusinessDate, CeilingTable, RateSeries, TetoError, TetoResult};
use teto_traits::PageRenderer;

use crate::extractor::TableExtractor;

/// Source of "now" for business date resolution.
pub trait Clock {
    /// Current local date and time.
    fn now(&self) -> NaiveDateTime;
}

/// The host's local clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock stopped at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Why a load ran; recorded in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadTrigger {
    Initial,
    Refresh,
}

/// Holds the current snapshot and answers selections against it.
pub struct RateSession<R> {
    extractor: TableExtractor<R>,
    clock: Box<dyn Clock>,
    pinned_date: Option<BusinessDate>,
    snapshot: Option<RateSeries>,
}

impl<R: PageRenderer> RateSession<R> {
    /// Creates an empty session using the local clock.
    pub fn new(extractor: TableExtractor<R>) -> Self {
        Self {
            extractor,
            clock: Box::new(SystemClock),
            pinned_date: None,
            snapshot: None,
        }
    }

    /// Replaces the clock used to resolve the target date.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Always targets `date` instead of resolving from the clock.
    #[must_use]
    pub fn with_pinned_date(mut self, date: BusinessDate) -> Self {
        self.pinned_date = Some(date);
        self
    }

    /// The extractor.
    pub fn extractor(&self) -> &TableExtractor<R> {
        &self.extractor
    }

    /// Business date the next load will fetch.
    pub fn target_date(&self) -> BusinessDate {
        self.pinned_date
            .unwrap_or_else(|| resolve_last_business_day(self.clock.now()))
    }

    /// URL the next load will fetch.
    pub fn target_url(&self) -> String {
        self.extractor.url_for(self.target_date())
    }

    /// Loads the first snapshot. If one is already held it is returned
    /// without fetching again.
    ///
    /// # Errors
    ///
    /// Propagates `SourceUnavailable` and `MalformedTable` from extraction.
    pub fn initial_load(&mut self) -> TetoResult<&RateSeries> {
        if self.snapshot.is_some() {
            tracing::debug!("Initial load skipped, snapshot already held");
            return self.current();
        }
        self.load(LoadTrigger::Initial)
    }

    /// Fetches again and replaces the snapshot on success.
    ///
    /// # Errors
    ///
    /// Propagates `SourceUnavailable` and `MalformedTable` from extraction;
    /// the previous snapshot, if any, is kept.
    pub fn refresh(&mut self) -> TetoResult<&RateSeries> {
        self.load(LoadTrigger::Refresh)
    }

    fn load(&mut self, trigger: LoadTrigger) -> TetoResult<&RateSeries> {
        let date = self.target_date();
        match self.extractor.extract(date) {
            Ok(series) => {
                tracing::info!(?trigger, %date, maturities = series.len(), "Snapshot replaced");
                Ok(self.snapshot.insert(series))
            }
            Err(e) => {
                tracing::warn!(
                    ?trigger,
                    %date,
                    kept_previous = self.snapshot.is_some(),
                    error = %e,
                    "Load failed"
                );
                Err(e)
            }
        }
    }

    fn current(&self) -> TetoResult<&RateSeries> {
        self.snapshot
            .as_ref()
            .ok_or_else(|| TetoError::invalid_selection("(no rate series loaded)"))
    }

    /// The current snapshot, if any load has succeeded.
    pub fn series(&self) -> Option<&RateSeries> {
        self.snapshot.as_ref()
    }

    /// Selectable maturities of the current snapshot, `dd/mm/yyyy`.
    pub fn maturity_keys(&self) -> Vec<String> {
        self.snapshot
            .as_ref()
            .map(RateSeries::maturity_keys)
            .unwrap_or_default()
    }

    /// Reference rate for a `dd/mm/yyyy` maturity key.
    ///
    /// # Errors
    ///
    /// `TetoError::InvalidSelection` when nothing is loaded or the maturity
    /// is not in the snapshot.
    pub fn select(&self, maturity: &str) -> TetoResult<(NaiveDate, Decimal)> {
        self.current()
            .map_err(|_| TetoError::invalid_selection(maturity.trim()))?
            .select(maturity)
    }

    /// Ceiling table for the selected maturity's reference rate.
    ///
    /// # Errors
    ///
    /// As [`RateSession::select`].
    pub fn ceiling_table(
        &self,
        maturity: &str,
        spread: Decimal,
        nominal_rate: Decimal,
    ) -> TetoResult<CeilingTable> {
        let (_, reference_rate) = self.select(maturity)?;
        Ok(compute_ceiling_table(reference_rate, spread, nominal_rate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use teto_traits::{RenderError, RenderedFragment};

    /// Serves queued responses and records requested URLs.
    struct ScriptedRenderer {
        responses: RefCell<Vec<Result<String, RenderError>>>,
        calls: Cell<usize>,
        urls: RefCell<Vec<String>>,
    }

    impl ScriptedRenderer {
        fn new(responses: Vec<Result<String, RenderError>>) -> Self {
            Self {
                responses: RefCell::new(responses),
                calls: Cell::new(0),
                urls: RefCell::new(Vec::new()),
            }
        }
    }

    impl PageRenderer for ScriptedRenderer {
        fn name(&self) -> &'static str {
            "scripted"
        }

        fn render_and_locate(
            &self,
            url: &str,
            element_path: &str,
        ) -> Result<RenderedFragment, RenderError> {
            self.calls.set(self.calls.get() + 1);
            self.urls.borrow_mut().push(url.to_string());
            let html = self.responses.borrow_mut().remove(0)?;
            Ok(RenderedFragment::new(url, element_path, html))
        }
    }

    fn table(rows: &[(&str, &str)]) -> String {
        let mut html = String::from("<table>");
        for _ in 0..5 {
            html.push_str("<tr><td colspan=11>header</td></tr>");
        }
        for (maturity, rate) in rows {
            html.push_str(&format!(
                "<tr><td>1</td><td>x</td><td>{maturity}</td><td>0</td><td>0</td><td>{rate}</td>\
                 <td>0</td><td>0</td><td>0</td><td>0</td><td>c</td></tr>"
            ));
        }
        html.push_str("</table>");
        html
    }

    fn tuesday_morning() -> FixedClock {
        FixedClock(
            NaiveDate::from_ymd_opt(2026, 8, 18)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
        )
    }

    fn session(responses: Vec<Result<String, RenderError>>) -> RateSession<ScriptedRenderer> {
        RateSession::new(TableExtractor::new(ScriptedRenderer::new(responses)))
            .with_clock(tuesday_morning())
    }

    #[test]
    fn test_select_before_load_is_invalid_selection() {
        let session = session(vec![]);
        assert_eq!(
            session.select("15/05/2035"),
            Err(TetoError::invalid_selection("15/05/2035"))
        );
        assert!(session.maturity_keys().is_empty());
    }

    #[test]
    fn test_initial_load_uses_resolved_date() {
        let mut session = session(vec![Ok(table(&[("15/05/2035", "6,00")]))]);
        assert_eq!(session.target_date().to_string(), "17/08/2026");
        let series = session.initial_load().unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(
            session.extractor().renderer().urls.borrow()[0],
            "https://www.anbima.com.br/informacoes/merc-sec/resultados/msec_17ago2026_ntn-b.asp"
        );
    }

    #[test]
    fn test_initial_load_does_not_refetch() {
        let mut session = session(vec![Ok(table(&[("15/05/2035", "6,00")]))]);
        session.initial_load().unwrap();
        session.initial_load().unwrap();
        assert_eq!(session.extractor().renderer().calls.get(), 1);
    }

    #[test]
    fn test_refresh_replaces_snapshot() {
        let mut session = session(vec![
            Ok(table(&[("15/05/2035", "6,00")])),
            Ok(table(&[("15/08/2040", "6,50")])),
        ]);
        session.initial_load().unwrap();
        session.refresh().unwrap();
        assert_eq!(session.maturity_keys(), vec!["15/08/2040"]);
        assert!(matches!(
            session.select("15/05/2035"),
            Err(TetoError::InvalidSelection { .. })
        ));
    }

    #[test]
    fn test_failed_refresh_keeps_previous_snapshot() {
        let mut session = session(vec![
            Ok(table(&[("15/05/2035", "6,00")])),
            Err(RenderError::Timeout(std::time::Duration::from_secs(30))),
            Ok(table(&[("15/05/2035", "abc")])),
        ]);
        session.initial_load().unwrap();

        let err = session.refresh().unwrap_err();
        assert!(err.is_source_failure());
        let err = session.refresh().unwrap_err();
        assert!(matches!(err, TetoError::MalformedTable { .. }));

        assert_eq!(session.maturity_keys(), vec!["15/05/2035"]);
    }

    #[test]
    fn test_pinned_date_overrides_clock() {
        let pinned = BusinessDate::parse("14/08/2026").unwrap();
        let session = session(vec![]).with_pinned_date(pinned);
        assert_eq!(session.target_date(), pinned);
        assert!(session.target_url().contains("msec_14ago2026_"));
    }

    #[test]
    fn test_ceiling_table_from_selection() {
        let mut session = session(vec![Ok(table(&[("15/05/2035", "6,00")]))]);
        session.initial_load().unwrap();
        let table = session
            .ceiling_table("15/05/2035", Decimal::new(125, 2), Decimal::new(7, 0))
            .unwrap();
        assert_eq!(table.first().indexed_display(), "7.33%");
        assert_eq!(table.last().nominal_display(), "6.00%");
    }
}
