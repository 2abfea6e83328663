//! Error types for rustrack-core.

use thiserror::Error;

/// Result type alias for rustrack operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for rustrack operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Two buffers that must agree in length or dimension do not.
    #[error("dimension mismatch in {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Point dimension must be at least one.
    #[error("invalid point dimension: {0}")]
    InvalidDimension(usize),

    /// Sparse entry outside the matrix.
    #[error("index {index} out of bounds for matrix of dimension {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Configuration error.
    #[error("configuration error: {0}")]
    ConfigError(String),
}

impl Error {
    /// Shorthand for [`Error::DimensionMismatch`].
    #[must_use]
    pub fn mismatch(context: &'static str, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            context,
            expected,
            actual,
        }
    }
}
