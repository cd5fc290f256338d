//! Output formatting utilities.
//!
//! Everything writes to a caller-supplied writer so the interactive session
//! and the one-shot commands share one rendering path.

use std::io::Write;

use colored::Colorize;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::cli::OutputFormat;

/// Writes rows in the requested format.
pub fn write_rows<T: Serialize + Tabled>(
    out: &mut dyn Write,
    data: &[T],
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => write_table(out, data),
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(data)?)?;
            Ok(())
        }
        OutputFormat::Csv => write_csv(out, data),
    }
}

/// Writes a single record: JSON object, one-row CSV, or a key/value table.
pub fn write_single<T: Serialize>(
    out: &mut dyn Write,
    data: &T,
    pairs: &[KeyValue],
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => write_table(out, pairs),
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(data)?)?;
            Ok(())
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(out);
            wtr.serialize(data)?;
            wtr.flush()?;
            Ok(())
        }
    }
}

fn write_table<T: Tabled>(out: &mut dyn Write, data: &[T]) -> anyhow::Result<()> {
    if data.is_empty() {
        writeln!(out, "No results.")?;
        return Ok(());
    }

    let table = Table::new(data)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .to_string();

    writeln!(out, "{table}")?;
    Ok(())
}

fn write_csv<T: Serialize>(out: &mut dyn Write, data: &[T]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    for item in data {
        wtr.serialize(item)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes a section header (table format only).
pub fn write_header(out: &mut dyn Write, title: &str) -> std::io::Result<()> {
    writeln!(out, "\n{}", title.bold().underline())
}

/// Prints an error message to stderr.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Prints a success message to stderr.
pub fn print_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message);
}

/// A key-value pair for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Field")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize, Tabled)]
    struct Row {
        #[tabled(rename = "Maturity")]
        maturity: &'static str,
        #[tabled(rename = "Rate")]
        rate: &'static str,
    }

    const ROWS: &[Row] = &[
        Row {
            maturity: "15/05/2035",
            rate: "7.3250",
        },
        Row {
            maturity: "15/08/2040",
            rate: "7.0415",
        },
    ];

    fn render(format: OutputFormat) -> String {
        let mut buf = Vec::new();
        write_rows(&mut buf, ROWS, format).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_csv_has_header_and_rows() {
        assert_eq!(
            render(OutputFormat::Csv),
            "maturity,rate\n15/05/2035,7.3250\n15/08/2040,7.0415\n"
        );
    }

    #[test]
    fn test_json_is_array() {
        let value: serde_json::Value = serde_json::from_str(&render(OutputFormat::Json)).unwrap();
        assert_eq!(value[1]["maturity"], "15/08/2040");
    }

    #[test]
    fn test_table_uses_renamed_headers() {
        let table = render(OutputFormat::Table);
        assert!(table.contains("Maturity"));
        assert!(table.contains("7.0415"));
    }

    #[test]
    fn test_empty_table() {
        let mut buf = Vec::new();
        write_rows::<Row>(&mut buf, &[], OutputFormat::Table).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "No results.\n");
    }
}
