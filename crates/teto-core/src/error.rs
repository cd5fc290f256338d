//! Error types for Teto.
//!
//! Every failure the extraction pipeline or the calculator surfaces is one of
//! these variants. Callers match on them; nothing is defaulted or swallowed.

use thiserror::Error;

/// A specialized Result type for Teto operations.
pub type TetoResult<T> = Result<T, TetoError>;

/// The main error type for Teto operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TetoError {
    /// The published page could not be obtained (network, navigation,
    /// timeout, or the table region is missing from the rendered page).
    #[error("Source unavailable at {url}: {reason}")]
    SourceUnavailable {
        /// URL that was being fetched.
        url: String,
        /// Description of the failure.
        reason: String,
    },

    /// The page was retrieved but the table did not have the expected shape.
    #[error("Malformed table: {reason}")]
    MalformedTable {
        /// Description of what did not match.
        reason: String,
    },

    /// The caller selected a maturity that is not in the current series.
    #[error("Invalid selection: maturity {maturity} is not in the current rate series")]
    InvalidSelection {
        /// The requested maturity, as given by the caller.
        maturity: String,
    },

    /// A date could not be parsed or is not a business day.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// A caller-supplied value failed boundary validation.
    #[error("Invalid {field}: {reason}")]
    InvalidInput {
        /// Name of the offending input.
        field: String,
        /// Reason for rejection.
        reason: String,
    },
}

impl TetoError {
    /// Creates a source unavailable error.
    #[must_use]
    pub fn source_unavailable(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Creates a malformed table error.
    #[must_use]
    pub fn malformed_table(reason: impl Into<String>) -> Self {
        Self::MalformedTable {
            reason: reason.into(),
        }
    }

    /// Creates an invalid selection error.
    #[must_use]
    pub fn invalid_selection(maturity: impl Into<String>) -> Self {
        Self::InvalidSelection {
            maturity: maturity.into(),
        }
    }

    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Returns true for failures of the upstream source rather than of its content.
    pub fn is_source_failure(&self) -> bool {
        matches!(self, Self::SourceUnavailable { .. })
    }
}
