//! Rates command implementation.
//!
//! Fetches the table and lists every maturity with its indicative rate.

use std::io::Write;

use anyhow::Result;
use serde::Serialize;
use tabled::Tabled;
use teto_core::types::DISPLAY_FORMAT;
use teto_core::RateSeries;

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::output::{write_header, write_rows};

/// One listed maturity.
#[derive(Debug, Serialize, Tabled)]
pub struct RateRow {
    #[tabled(rename = "Maturity")]
    pub maturity: String,
    #[tabled(rename = "Indicative Rate (%)")]
    pub indicative_rate: String,
}

/// Rows for `series`, ascending by maturity.
pub fn rate_rows(series: &RateSeries) -> Vec<RateRow> {
    series
        .iter()
        .map(|(maturity, rate)| RateRow {
            maturity: maturity.format(DISPLAY_FORMAT).to_string(),
            indicative_rate: rate.to_string(),
        })
        .collect()
}

/// Writes the series, with a title in table format.
pub fn write_series(out: &mut dyn Write, series: &RateSeries, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Table {
        let title = match series.reference_date() {
            Some(date) => format!("NTN-B indicative rates, {date}"),
            None => "NTN-B indicative rates".to_string(),
        };
        write_header(out, &title)?;
    }
    write_rows(out, &rate_rows(series), format)
}

/// Execute the rates command.
pub fn execute(ctx: &Context, out: &mut dyn Write) -> Result<()> {
    let mut session = ctx.session()?;
    let series = session.initial_load()?;
    write_series(out, series, ctx.format)
}
