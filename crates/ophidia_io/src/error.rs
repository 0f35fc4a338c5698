//! Error types for ophidia_io crate.
//!
//! Covers weight tables, history logs and run directories.

use ophidia_core::CoreError;
use std::path::Path;
use thiserror::Error;

/// Main error type for ophidia_io operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// File system errors
    #[error("File system error: {0}")]
    FileSystem(#[from] std::io::Error),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A text file with a malformed line
    #[error("Parse error in {path} line {line}: {message}")]
    Parse {
        path: String,
        line: usize,
        message: String,
    },

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Not found errors
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Errors raised by the simulation core
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Generic error with context
    #[error("{context}: {source}")]
    Context {
        context: String,
        source: Box<IoError>,
    },
}

/// Result type alias for ophidia_io operations.
pub type Result<T> = std::result::Result<T, IoError>;

impl IoError {
    /// Creates a new parse error for `line` (1-based) of `path`.
    #[must_use]
    pub fn parse<S: Into<String>>(path: &Path, line: usize, message: S) -> Self {
        Self::Parse {
            path: path.display().to_string(),
            line,
            message: message.into(),
        }
    }

    /// Creates a new validation error.
    #[must_use]
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Self::Validation(msg.into())
    }

    /// Creates a new not found error.
    #[must_use]
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        Self::NotFound(resource.into())
    }

    /// Wraps an error with additional context.
    #[must_use]
    pub fn with_context<S: Into<String>>(self, context: S) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }
}
