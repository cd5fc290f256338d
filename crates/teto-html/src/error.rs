//! Error types for paths and grids.

use thiserror::Error;

/// An element path that could not be parsed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid element path '{path}': {reason}")]
pub struct PathError {
    /// The offending path.
    pub path: String,
    /// What is wrong with it.
    pub reason: String,
}

impl PathError {
    pub(crate) fn new(path: &str, reason: impl Into<String>) -> Self {
        Self {
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}

/// Grids that cannot be combined into one rectangle.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridError {
    /// No grid was supplied.
    #[error("no table grids to combine")]
    Empty,

    /// A grid's column count differs from the first grid's.
    #[error("table {index} has {found} columns, expected {expected} (from the first table)")]
    WidthMismatch {
        /// Zero-based position of the offending grid.
        index: usize,
        /// Column count of the first grid.
        expected: usize,
        /// Column count of the offending grid.
        found: usize,
    },
}
