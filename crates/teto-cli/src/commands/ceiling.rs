//! Ceiling command implementation.
//!
//! Selects a maturity, takes its indicative rate as the reference, and prints
//! the 21-step ceiling-rate table.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::Tabled;
use teto_core::format::format_percent;
use teto_core::types::DISPLAY_FORMAT;
use teto_core::{CeilingRow, CeilingTable, RateSeries, TetoError};

use crate::cli::OutputFormat;
use crate::commands::{validate_nominal_rate, validate_spread, Context};
use crate::output::{write_header, write_rows};

/// Arguments for the ceiling command.
#[derive(Args, Debug)]
pub struct CeilingArgs {
    /// Maturity (dd/mm/yyyy). Defaults to the first listed maturity.
    #[arg(short, long)]
    pub maturity: Option<String>,

    /// Spread in percent, 0.00 to 10.00 (default from config, 1.25)
    #[arg(short, long)]
    pub spread: Option<String>,

    /// Nominal rate in percent, 0.00 to 15.00 (default from config, 7.00)
    #[arg(short, long)]
    pub nominal: Option<String>,
}

/// One displayed row of the ceiling table.
#[derive(Debug, Serialize, Tabled)]
pub struct CeilingDisplayRow {
    #[tabled(rename = "Reserve")]
    pub reserve: String,
    #[tabled(rename = "Ceiling Indexed Rate")]
    pub ceiling_indexed_rate: String,
    #[tabled(rename = "Ceiling Nominal Rate")]
    pub ceiling_nominal_rate: String,
}

impl From<&CeilingRow> for CeilingDisplayRow {
    fn from(row: &CeilingRow) -> Self {
        Self {
            reserve: row.reserve_display(),
            ceiling_indexed_rate: row.indexed_display(),
            ceiling_nominal_rate: row.nominal_display(),
        }
    }
}

/// Inputs and result of one calculation.
#[derive(Debug, Serialize)]
pub struct CeilingReport {
    pub reference_date: Option<String>,
    pub maturity: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub reference_rate: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub spread: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub nominal_rate: Decimal,
    pub rows: Vec<CeilingDisplayRow>,
}

impl CeilingReport {
    /// Builds the report for an already computed table.
    pub fn new(
        series: &RateSeries,
        maturity: &str,
        reference_rate: Decimal,
        spread: Decimal,
        nominal_rate: Decimal,
        table: &CeilingTable,
    ) -> Self {
        Self {
            reference_date: series.reference_date().map(|d| d.to_string()),
            maturity: maturity.to_string(),
            reference_rate,
            spread,
            nominal_rate,
            rows: table.iter().map(CeilingDisplayRow::from).collect(),
        }
    }

    /// Writes the report. CSV carries the rows only.
    pub fn write(&self, out: &mut dyn Write, format: OutputFormat) -> Result<()> {
        match format {
            OutputFormat::Table => {
                writeln!(
                    out,
                    "NTN-B REF for {}: {}",
                    self.maturity,
                    format_percent(self.reference_rate)
                )?;
                writeln!(out, "Spread: {}%  Nominal rate: {}%", self.spread, self.nominal_rate)?;
                write_header(out, "Ceiling rates")?;
                write_rows(out, &self.rows, format)
            }
            OutputFormat::Json => {
                writeln!(out, "{}", serde_json::to_string_pretty(self)?)?;
                Ok(())
            }
            OutputFormat::Csv => write_rows(out, &self.rows, format),
        }
    }
}

/// The requested maturity key, or the first one in the series.
pub fn resolve_maturity(series: &RateSeries, requested: Option<&str>) -> Result<String, TetoError> {
    match requested {
        Some(key) => Ok(key.trim().to_string()),
        None => series
            .maturities()
            .next()
            .map(|d| d.format(DISPLAY_FORMAT).to_string())
            .ok_or_else(|| TetoError::invalid_selection("(empty series)")),
    }
}

/// Execute the ceiling command.
pub fn execute(args: CeilingArgs, ctx: &Context, out: &mut dyn Write) -> Result<()> {
    // Validate inputs before fetching anything
    let spread = match &args.spread {
        Some(text) => validate_spread(text)?,
        None => ctx.config.defaults.spread,
    };
    let nominal_rate = match &args.nominal {
        Some(text) => validate_nominal_rate(text)?,
        None => ctx.config.defaults.nominal_rate,
    };

    let mut session = ctx.session()?;
    session.initial_load()?;
    let series = session
        .series()
        .ok_or_else(|| TetoError::invalid_selection("(no rate series loaded)"))?;

    let maturity = resolve_maturity(series, args.maturity.as_deref())?;
    let (_, reference_rate) = session.select(&maturity)?;
    let table = session.ceiling_table(&maturity, spread, nominal_rate)?;
    tracing::debug!(%maturity, %reference_rate, %spread, %nominal_rate, "Computed ceiling table");

    CeilingReport::new(series, &maturity, reference_rate, spread, nominal_rate, &table)
        .write(out, ctx.format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use teto_core::ceiling::compute_ceiling_table;

    fn series() -> RateSeries {
        RateSeries::from_entries([
            (NaiveDate::from_ymd_opt(2040, 8, 15).unwrap(), dec!(6.50)),
            (NaiveDate::from_ymd_opt(2035, 5, 15).unwrap(), dec!(6.00)),
        ])
        .unwrap()
    }

    fn sample_report() -> CeilingReport {
        let table = compute_ceiling_table(dec!(6.00), dec!(1.25), dec!(7.00));
        CeilingReport::new(&series(), "15/05/2035", dec!(6.00), dec!(1.25), dec!(7.00), &table)
    }

    #[test]
    fn test_default_maturity_is_first() {
        assert_eq!(resolve_maturity(&series(), None).unwrap(), "15/05/2035");
        assert_eq!(resolve_maturity(&series(), Some(" 15/08/2040 ")).unwrap(), "15/08/2040");
    }

    #[test]
    fn test_report_rows_and_csv() {
        let report = sample_report();
        assert_eq!(report.rows.len(), 21);
        assert_eq!(report.rows[10].reserve, "-0.50%");

        let mut buf = Vec::new();
        report.write(&mut buf, OutputFormat::Csv).unwrap();
        let csv = String::from_utf8(buf).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("reserve,ceiling_indexed_rate,ceiling_nominal_rate")
        );
        assert_eq!(lines.next(), Some("0.00%,7.33%,7.00%"));
        assert_eq!(lines.last(), Some("-1.00%,6.33%,6.00%"));
    }

    #[test]
    fn test_report_table_shows_reference() {
        let report = sample_report();
        let mut buf = Vec::new();
        report.write(&mut buf, OutputFormat::Table).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("NTN-B REF for 15/05/2035: 6.00%"));
        assert!(text.contains("Ceiling Indexed Rate"));
    }
}
