//! Offset failures.

use thiserror::Error;

/// Shorthand for offset results.
pub type OffsetResult<T> = Result<T, OffsetError>;

/// Why a mesh could not be offset.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OffsetError {
    /// Thickness is negative or not finite.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Nothing to offset.
    #[error("mesh is empty")]
    EmptyMesh,

    /// A vertex carries no normal to offset along.
    #[error("vertex {vertex} has no normal")]
    MissingNormal {
        /// Index of the first vertex without a normal.
        vertex: usize,
    },
}

impl OffsetError {
    /// [`Self::InvalidParameter`] from any message.
    #[must_use]
    pub fn invalid_parameter(details: impl Into<String>) -> Self {
        Self::InvalidParameter(details.into())
    }
}
