//! Error types for the value-type layer.

use thiserror::Error;

/// Errors raised while constructing or combining value types.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum QisError {
    /// A radix below 2 was supplied.
    #[error("Radix {radix} at position {index} is invalid; radixes must be at least 2")]
    InvalidRadix { index: usize, radix: usize },

    /// No radixes were supplied.
    #[error("Radixes must describe at least one qudit")]
    EmptyRadixes,

    /// The matrix is not square.
    #[error("Expected a square matrix, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    /// The data dimension does not match the product of the radixes.
    #[error("Dimension {dim} does not match radixes {radixes} (expected {expected})")]
    DimensionMismatch {
        dim: usize,
        expected: usize,
        radixes: String,
    },

    /// Radixes could not be inferred from a dimension.
    #[error("Unable to infer radixes for dimension {0}; pass them explicitly")]
    UnknownRadixes(usize),

    /// The matrix is not unitary within the requested tolerance.
    #[error("Matrix is not unitary: max deviation {deviation:e} exceeds tolerance {tolerance:e}")]
    NotUnitary { deviation: f64, tolerance: f64 },

    /// The vector is not normalized within the requested tolerance.
    #[error("State vector is not normalized: squared norm {norm_sqr}")]
    NotNormalized { norm_sqr: f64 },

    /// A location does not fit the register.
    #[error("Invalid location {location:?} for a register of {size} qudits: {reason}")]
    InvalidLocation {
        location: Vec<usize>,
        size: usize,
        reason: &'static str,
    },

    /// The singular value decomposition did not converge.
    #[error("Singular value decomposition did not converge")]
    DecompositionFailed,
}

/// Result type for value-type operations.
pub type QisResult<T> = Result<T, QisError>;

impl QisError {
    /// Returns true for errors caused by a malformed shape or register rather
    /// than by numerical content.
    pub fn is_construction(&self) -> bool {
        matches!(
            self,
            QisError::InvalidRadix { .. }
                | QisError::EmptyRadixes
                | QisError::NotSquare { .. }
                | QisError::DimensionMismatch { .. }
                | QisError::UnknownRadixes(_)
                | QisError::InvalidLocation { .. }
        )
    }
}
