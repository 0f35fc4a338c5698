//! Error types for the simulation and evolution core.

use ophidia_data::ShapeMismatch;
use thiserror::Error;

/// Main error type for ophidia_core operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A genome, matrix or input vector does not have the shape its consumer needs.
    #[error("Shape mismatch in {context}: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        context: String,
        expected: (usize, usize),
        found: (usize, usize),
    },

    /// Invalid configuration, detected before any generation runs.
    #[error("Configuration error: {0}")]
    Config(String),

    /// No free cell was found for the fruit.
    #[error("Fruit placement failed after {attempts} attempts ({occupied} of {capacity} cells occupied)")]
    FruitPlacement {
        attempts: usize,
        occupied: usize,
        capacity: usize,
    },

    /// Any other fault raised while simulating a single genome.
    #[error("Episode fault: {0}")]
    EpisodeFault(String),
}

/// Result type alias for ophidia_core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

impl CoreError {
    #[must_use]
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    #[must_use]
    pub fn shape<S: Into<String>>(context: S, expected: (usize, usize), found: (usize, usize)) -> Self {
        Self::ShapeMismatch {
            context: context.into(),
            expected,
            found,
        }
    }
}

impl From<ShapeMismatch> for CoreError {
    fn from(err: ShapeMismatch) -> Self {
        Self::ShapeMismatch {
            context: err.context,
            expected: err.expected,
            found: err.found,
        }
    }
}

/// Fails with [`CoreError::Config`] unless `cond` holds.
macro_rules! ensure_config {
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            return Err($crate::error::CoreError::Config(format!($($arg)+)));
        }
    };
}
pub(crate) use ensure_config;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::config("population size must be positive");
        assert_eq!(
            err.to_string(),
            "Configuration error: population size must be positive"
        );
    }

    #[test]
    fn test_from_shape_mismatch() {
        let err: CoreError = ShapeMismatch::new("inputs", (24, 1), (12, 1)).into();
        assert!(matches!(
            err,
            CoreError::ShapeMismatch {
                expected: (24, 1),
                found: (12, 1),
                ..
            }
        ));
    }
}
