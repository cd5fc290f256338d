//! Extraction against saved pages of the published table.

use std::path::PathBuf;

use rust_decimal_macros::dec;
use teto_core::{BusinessDate, TetoError};
use teto_ext_file::FileRenderer;
use teto_extract::{FixedClock, RateSession, SourceSettings, TableExtractor, DEFAULT_ELEMENT_PATH};
use teto_traits::{PageRenderer, RenderError, RenderedFragment};

/// Serves the named fixture for every URL.
fn saved_page(name: &str) -> FileRenderer {
    FileRenderer::from_file(
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("fixtures")
            .join(name),
    )
}

struct Offline;

impl PageRenderer for Offline {
    fn name(&self) -> &'static str {
        "offline"
    }

    fn render_and_locate(
        &self,
        _url: &str,
        _element_path: &str,
    ) -> Result<RenderedFragment, RenderError> {
        Err(RenderError::Navigation("net::ERR_NAME_NOT_RESOLVED".into()))
    }
}

fn friday() -> BusinessDate {
    BusinessDate::parse("14/08/2026").unwrap()
}

#[test]
fn test_well_formed_page() {
    let extractor = TableExtractor::new(saved_page("ntnb_14ago2026.html"));
    let series = extractor.extract(friday()).unwrap();

    assert_eq!(series.len(), 11);
    assert_eq!(series.reference_date(), Some(friday()));
    assert_eq!(series.maturity_keys().first().map(String::as_str), Some("15/08/2026"));
    assert_eq!(series.maturity_keys().last().map(String::as_str), Some("15/08/2060"));
    assert_eq!(series.select("15/05/2035").unwrap().1, dec!(7.3250));
}

#[test]
fn test_extraction_is_deterministic() {
    let extractor = TableExtractor::new(saved_page("ntnb_14ago2026.html"));
    assert_eq!(extractor.extract(friday()).unwrap(), extractor.extract(friday()).unwrap());
}

#[test]
fn test_table_split_across_fragments() {
    let source = SourceSettings {
        element_path: "/html/body/table/tbody/tr/td/div/div".into(),
        ..SourceSettings::default()
    };
    let split = TableExtractor::new(saved_page("ntnb_split.html"))
        .with_source(source)
        .extract(friday())
        .unwrap();
    let whole = TableExtractor::new(saved_page("ntnb_14ago2026.html"))
        .extract(friday())
        .unwrap();
    assert_eq!(split, whole);
}

#[test]
fn test_missing_element_is_source_unavailable() {
    // The split page has no second table directly under the content div.
    let err = TableExtractor::new(saved_page("ntnb_split.html"))
        .extract(friday())
        .unwrap_err();
    match err {
        TetoError::SourceUnavailable { url, reason } => {
            assert!(url.ends_with("msec_14ago2026_ntn-b.asp"));
            assert!(reason.contains(DEFAULT_ELEMENT_PATH));
        }
        other => panic!("expected SourceUnavailable, got {other:?}"),
    }
}

#[test]
fn test_navigation_failure_is_source_unavailable() {
    let err = TableExtractor::new(Offline).extract(friday()).unwrap_err();
    assert!(err.is_source_failure());
}

#[test]
fn test_wrong_column_count_is_malformed() {
    let err = TableExtractor::new(saved_page("ntnb_wrong_columns.html"))
        .extract(friday())
        .unwrap_err();
    assert_eq!(err, TetoError::malformed_table("expected 11 columns, found 10"));
}

#[test]
fn test_non_numeric_rate_is_malformed() {
    let err = TableExtractor::new(saved_page("ntnb_bad_rate.html"))
        .extract(friday())
        .unwrap_err();
    assert_eq!(err, TetoError::malformed_table("row 8: rate '--' is not a number"));
}

#[test]
fn test_session_over_saved_page() {
    let monday = chrono::NaiveDate::from_ymd_opt(2026, 8, 17)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap();
    let extractor = TableExtractor::new(saved_page("ntnb_14ago2026.html"));
    let mut session = RateSession::new(extractor).with_clock(FixedClock(monday));

    assert_eq!(session.target_date(), friday());
    session.initial_load().unwrap();

    let table = session
        .ceiling_table("15/05/2035", dec!(1.25), dec!(11.50))
        .unwrap();
    assert_eq!(table.len(), 21);
    // (1.07325 * 1.0125 - 1) * 100 = 8.6665625
    assert_eq!(table.first().indexed_display(), "8.67%");
    assert_eq!(table.first().nominal_display(), "11.50%");
    assert_eq!(table.last().indexed_display(), "7.67%");
    assert_eq!(table.last().nominal_display(), "10.50%");
}
