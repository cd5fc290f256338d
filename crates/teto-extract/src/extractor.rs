//! Rate table extraction.
//!
//! Extraction is all-or-nothing: a renderer failure becomes
//! `TetoError::SourceUnavailable`, any shape or cell problem becomes
//! `TetoError::MalformedTable`, and no partial series is ever returned.

use std::time::Instant;

use teto_core::{BusinessDate, RateSeries, TetoError, TetoResult};
use teto_html::{table, Document, Grid, GridError};
use teto_traits::PageRenderer;

use crate::layout::TableLayout;
use crate::locale::{parse_br_date, parse_br_decimal};
use crate::source::SourceSettings;

/// Fetches the published table for a business date and shapes it into a
/// [`RateSeries`].
pub struct TableExtractor<R> {
    renderer: R,
    source: SourceSettings,
    layout: TableLayout,
}

impl<R: PageRenderer> TableExtractor<R> {
    /// Creates an extractor for the default source and layout.
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            source: SourceSettings::default(),
            layout: TableLayout::default(),
        }
    }

    /// Overrides where the table is published.
    #[must_use]
    pub fn with_source(mut self, source: SourceSettings) -> Self {
        self.source = source;
        self
    }

    /// Overrides the expected table shape.
    #[must_use]
    pub fn with_layout(mut self, layout: TableLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Source settings in use.
    pub fn source(&self) -> &SourceSettings {
        &self.source
    }

    /// Table layout in use.
    pub fn layout(&self) -> &TableLayout {
        &self.layout
    }

    /// The page renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// URL of the page for `date`.
    pub fn url_for(&self, date: BusinessDate) -> String {
        self.source.url_for(date)
    }

    /// Renders the page for `date` and parses its rate table.
    ///
    /// # Errors
    ///
    /// - `TetoError::SourceUnavailable` when the renderer fails.
    /// - `TetoError::MalformedTable` when the table cannot be shaped.
    pub fn extract(&self, date: BusinessDate) -> TetoResult<RateSeries> {
        let url = self.url_for(date);
        let started = Instant::now();
        tracing::info!(
            %date,
            %url,
            renderer = self.renderer.name(),
            "Fetching indicative rate table"
        );

        let fragment = self
            .renderer
            .render_and_locate(&url, &self.source.element_path)
            .map_err(|e| {
                tracing::warn!(%url, error = %e, "Rate table source unavailable");
                TetoError::source_unavailable(&url, e.to_string())
            })?;

        let series = parse_rate_table(&fragment.html, &self.layout)
            .map_err(|e| {
                tracing::warn!(%url, error = %e, "Rate table rejected");
                e
            })?
            .with_reference_date(date);

        tracing::info!(
            %date,
            maturities = series.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Extracted indicative rates"
        );
        Ok(series)
    }
}

/// Parses the outer HTML of the table region into a series.
///
/// Every `<table>` in `html` becomes a grid; the grids must share one column
/// count and are stacked in document order. After the layout's header rows,
/// each row must carry a parseable maturity date and a non-negative rate.
///
/// # Errors
///
/// Returns `TetoError::InvalidInput` for an inconsistent layout and
/// `TetoError::MalformedTable` describing the first problem found.
pub fn parse_rate_table(html: &str, layout: &TableLayout) -> TetoResult<RateSeries> {
    layout.validate()?;
    let grid = combined_grid(html)?;
    if grid.width() != layout.columns {
        return Err(TetoError::malformed_table(format!(
            "expected {} columns, found {}",
            layout.columns,
            grid.width()
        )));
    }
    tracing::debug!(
        rows = grid.height(),
        header_rows = layout.header_rows,
        "Parsing rate rows"
    );

    let entries = grid
        .rows()
        .iter()
        .enumerate()
        .skip(layout.header_rows)
        .map(|(index, row)| {
            let line = index + 1;
            let cell = |column: usize| {
                row.get(column).ok_or_else(|| {
                    TetoError::malformed_table(format!("row {line}: no column {column}"))
                })
            };
            let maturity_cell = cell(layout.maturity_column)?;
            let rate_cell = cell(layout.rate_column)?;
            let maturity = parse_br_date(maturity_cell).ok_or_else(|| {
                TetoError::malformed_table(format!(
                    "row {line}: maturity '{maturity_cell}' is not a day/month/year date"
                ))
            })?;
            let rate = parse_br_decimal(rate_cell).ok_or_else(|| {
                TetoError::malformed_table(format!(
                    "row {line}: rate '{rate_cell}' is not a number"
                ))
            })?;
            Ok((maturity, rate))
        })
        .collect::<TetoResult<Vec<_>>>()?;

    RateSeries::from_entries(entries)
}

fn combined_grid(html: &str) -> TetoResult<Grid> {
    let document = Document::parse(html);
    let grids: Vec<Grid> = document
        .root_elements()
        .flat_map(table::parse_tables)
        .collect();
    Grid::concat(grids).map_err(|e| match e {
        GridError::Empty => {
            TetoError::malformed_table("no table with rows in the located element")
        }
        mismatch @ GridError::WidthMismatch { .. } => {
            TetoError::malformed_table(mismatch.to_string())
        }
    })
}
