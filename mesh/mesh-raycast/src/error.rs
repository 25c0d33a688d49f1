//! Error types for ray casting and resampling.

use thiserror::Error;

/// Result type alias for ray casting operations.
pub type RaycastResult<T> = Result<T, RaycastError>;

/// Errors that can occur while resampling a surface onto a grid.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RaycastError {
    /// Target mesh has no faces.
    #[error("target mesh is empty")]
    EmptyMesh,

    /// Output shape disagrees with the axes.
    #[error("invalid dimension: {0}")]
    InvalidDimension(String),

    /// Resample parameter out of range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

impl RaycastError {
    /// Create an empty mesh error.
    #[must_use]
    pub const fn empty_mesh() -> Self {
        Self::EmptyMesh
    }

    /// Create an invalid dimension error.
    #[must_use]
    pub fn invalid_dimension(details: impl Into<String>) -> Self {
        Self::InvalidDimension(details.into())
    }

    /// Create an invalid parameter error.
    #[must_use]
    pub fn invalid_parameter(details: impl Into<String>) -> Self {
        Self::InvalidParameter(details.into())
    }
}
