//! Error types for renderer operations.

use std::time::Duration;

use thiserror::Error;

/// Failure reported by a [`crate::PageRenderer`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// Navigation failed: network error, non-success status, or the renderer
    /// process could not produce a document.
    #[error("navigation failed: {0}")]
    Navigation(String),

    /// The element path did not resolve in the rendered document.
    #[error("element not found: {path}")]
    ElementNotFound {
        /// The element path that was looked up.
        path: String,
    },

    /// The renderer did not finish within its deadline.
    #[error("render timed out after {0:?}")]
    Timeout(Duration),

    /// The element path is not a supported absolute path.
    #[error("invalid element path '{path}': {reason}")]
    InvalidPath {
        /// The offending path.
        path: String,
        /// What is wrong with it.
        reason: String,
    },

    /// IO error while talking to the renderer.
    #[error("IO error: {0}")]
    Io(String),
}

impl RenderError {
    /// Creates an element-not-found error.
    #[must_use]
    pub fn element_not_found(path: impl Into<String>) -> Self {
        Self::ElementNotFound { path: path.into() }
    }

    /// Creates an invalid-path error.
    #[must_use]
    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

impl From<std::io::Error> for RenderError {
    fn from(e: std::io::Error) -> Self {
        RenderError::Io(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RenderError::element_not_found("/html/body/table[2]");
        assert_eq!(err.to_string(), "element not found: /html/body/table[2]");

        let err = RenderError::Timeout(Duration::from_secs(30));
        assert!(err.to_string().contains("30s"));
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "chromium");
        assert!(matches!(RenderError::from(io), RenderError::Io(msg) if msg.contains("chromium")));
    }
}
