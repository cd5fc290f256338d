//! Url command implementation.
//!
//! Shows what would be fetched without launching a renderer.

use std::io::Write;

use anyhow::Result;
use serde::Serialize;
use teto_core::calendar::resolve_from_local_now;
use teto_extract::date_token;

use crate::commands::Context;
use crate::output::{write_single, KeyValue};

/// Resolved source location.
#[derive(Debug, Serialize)]
pub struct SourceReport {
    pub business_date: String,
    pub date_token: String,
    pub url: String,
    pub element_path: String,
}

/// Execute the url command.
pub fn execute(ctx: &Context, out: &mut dyn Write) -> Result<()> {
    let date = ctx.date.unwrap_or_else(resolve_from_local_now);
    let report = SourceReport {
        business_date: date.to_string(),
        date_token: date_token(date),
        url: ctx.config.source.url_for(date),
        element_path: ctx.config.source.element_path.clone(),
    };
    let pairs = [
        KeyValue::new("Business date", &report.business_date),
        KeyValue::new("Date token", &report.date_token),
        KeyValue::new("URL", &report.url),
        KeyValue::new("Element path", &report.element_path),
    ];
    write_single(out, &report, &pairs, ctx.format)
}
