//! CLI command implementations.

pub mod ceiling;
pub mod interactive;
pub mod rates;
pub mod url;

pub use ceiling::CeilingArgs;

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Result;
use rust_decimal::Decimal;
use teto_core::BusinessDate;
use teto_ext_chrome::ChromeRenderer;
use teto_ext_file::FileRenderer;
use teto_extract::{RateSession, TableExtractor};
use teto_traits::PageRenderer;

use crate::cli::OutputFormat;
use crate::config::TetoConfig;
use crate::error::{CliError, CliResult};

/// Largest accepted spread, in percent.
pub const MAX_SPREAD: Decimal = Decimal::from_parts(10, 0, 0, false, 0);

/// Largest accepted nominal rate, in percent.
pub const MAX_NOMINAL_RATE: Decimal = Decimal::from_parts(15, 0, 0, false, 0);

/// Decimal places accepted for calculator inputs.
const INPUT_DECIMALS: u32 = 2;

/// Renderer chosen for this invocation.
pub type DynRenderer = Box<dyn PageRenderer>;

/// Everything a command needs besides its own arguments.
pub struct Context {
    /// Output format.
    pub format: OutputFormat,
    /// Loaded configuration.
    pub config: TetoConfig,
    /// Pinned business date, if given.
    pub date: Option<BusinessDate>,
    /// Saved page or directory to serve instead of the browser.
    pub html_file: Option<PathBuf>,
}

impl Context {
    /// The file renderer when `--html-file` is set, otherwise headless Chromium.
    pub fn renderer(&self) -> Result<DynRenderer> {
        let renderer: DynRenderer = match &self.html_file {
            Some(path) => Box::new(FileRenderer::open(path)?),
            None => Box::new(ChromeRenderer::new(self.config.browser.to_chrome_config())),
        };
        Ok(renderer)
    }

    /// A fresh, unloaded session.
    pub fn session(&self) -> Result<RateSession<DynRenderer>> {
        let extractor = TableExtractor::new(self.renderer()?)
            .with_source(self.config.source.clone())
            .with_layout(self.config.layout);
        let session = RateSession::new(extractor);
        Ok(match self.date {
            Some(date) => session.with_pinned_date(date),
            None => session,
        })
    }
}

/// Parses a percentage argument; `,` is accepted as the decimal separator.
fn parse_rate_arg(field: &'static str, text: &str) -> CliResult<Decimal> {
    let normalized = text.trim().trim_end_matches('%').trim().replace(',', ".");
    Decimal::from_str(&normalized).map_err(|_| CliError::NotANumber {
        field,
        value: text.to_string(),
    })
}

fn validate_rate(field: &'static str, text: &str, max: Decimal) -> CliResult<Decimal> {
    let value = parse_rate_arg(field, text)?;
    if value < Decimal::ZERO || value > max {
        return Err(CliError::OutOfRange {
            field,
            value,
            min: Decimal::ZERO,
            max,
        });
    }
    if value.normalize().scale() > INPUT_DECIMALS {
        return Err(CliError::TooPrecise { field, value });
    }
    Ok(value)
}

/// Validates a spread: 0.00 to 10.00, at most two decimals.
pub fn validate_spread(text: &str) -> CliResult<Decimal> {
    validate_rate("spread", text, MAX_SPREAD)
}

/// Validates a nominal rate: 0.00 to 15.00, at most two decimals.
pub fn validate_nominal_rate(text: &str) -> CliResult<Decimal> {
    validate_rate("nominal rate", text, MAX_NOMINAL_RATE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_validate_spread() {
        assert_eq!(validate_spread("1.25").unwrap(), dec!(1.25));
        assert_eq!(validate_spread("1,25").unwrap(), dec!(1.25));
        assert_eq!(validate_spread("0").unwrap(), dec!(0));
        assert_eq!(validate_spread("10.00").unwrap(), dec!(10));
        assert_eq!(validate_spread("2.500").unwrap(), dec!(2.5));
    }

    #[test]
    fn test_validate_spread_rejects() {
        assert!(matches!(validate_spread("10.01"), Err(CliError::OutOfRange { .. })));
        assert!(matches!(validate_spread("-0.5"), Err(CliError::OutOfRange { .. })));
        assert!(matches!(validate_spread("1.255"), Err(CliError::TooPrecise { .. })));
        assert!(matches!(validate_spread("abc"), Err(CliError::NotANumber { .. })));
    }

    #[test]
    fn test_validate_nominal_rate() {
        assert_eq!(validate_nominal_rate("15").unwrap(), dec!(15));
        assert_eq!(validate_nominal_rate("7%").unwrap(), dec!(7));
        assert!(validate_nominal_rate("15.01").is_err());
        let message = validate_nominal_rate("16").unwrap_err().to_string();
        assert_eq!(message, "Invalid nominal rate: 16 must be between 0 and 15");
    }
}
