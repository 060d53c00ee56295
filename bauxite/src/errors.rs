//! Error types for spatial index operations.

use thiserror::Error;

/// Errors that can occur during spatial index operations.
#[derive(Debug, Error)]
pub enum SpatialError {
    /// A key or query geometry does not match the dimension the index was
    /// built with.
    #[error("Dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// The tree was constructed with an invalid entry configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result type for spatial operations.
pub type SpatialResult<T> = Result<T, SpatialError>;
