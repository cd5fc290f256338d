//! CLI error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// A rate argument that is not a decimal number.
    #[error("Invalid {field}: '{value}' is not a number")]
    NotANumber {
        /// Argument name.
        field: &'static str,
        /// Text as given.
        value: String,
    },

    /// A rate argument outside its allowed range.
    #[error("Invalid {field}: {value} must be between {min} and {max}")]
    OutOfRange {
        /// Argument name.
        field: &'static str,
        /// Parsed value.
        value: Decimal,
        /// Inclusive lower bound.
        min: Decimal,
        /// Inclusive upper bound.
        max: Decimal,
    },

    /// A rate argument with more than two decimal places.
    #[error("Invalid {field}: {value} has more than 2 decimal places")]
    TooPrecise {
        /// Argument name.
        field: &'static str,
        /// Parsed value.
        value: Decimal,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
