//! Error types for the conformal-layer pipeline.

use mesh_heightfield::HeightfieldError;
use mesh_offset::OffsetError;
use mesh_raycast::RaycastError;
use thiserror::Error;

/// Result type alias for conformal-layer operations.
pub type ConformalResult<T> = Result<T, ConformalError>;

/// Errors that can occur while simulating a layer or editing channels.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConformalError {
    /// Inputs have incompatible shapes or counts.
    #[error("invalid dimension: {0}")]
    InvalidDimension(String),

    /// Thickness, scale or another parameter is out of range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// No channel carries the requested label.
    #[error("unknown channel: {0}")]
    UnknownChannel(String),

    /// Grid, normal or mesh construction failed.
    #[error("meshing failed: {0}")]
    Heightfield(#[from] HeightfieldError),

    /// Offset surface construction failed.
    #[error("offset failed: {0}")]
    Offset(#[from] OffsetError),

    /// Ray resampling failed.
    #[error("resampling failed: {0}")]
    Raycast(#[from] RaycastError),
}

impl ConformalError {
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

    /// Create an unknown channel error.
    #[must_use]
    pub fn unknown_channel(label: impl Into<String>) -> Self {
        Self::UnknownChannel(label.into())
    }

    /// Whether the input had malformed axes or shapes, at any stage.
    #[must_use]
    pub const fn is_invalid_dimension(&self) -> bool {
        match self {
            Self::InvalidDimension(_) | Self::Raycast(RaycastError::InvalidDimension(_)) => true,
            Self::Heightfield(e) => e.is_invalid_dimension(),
            _ => false,
        }
    }

    /// Whether a parameter was out of range, at any stage.
    #[must_use]
    pub const fn is_invalid_parameter(&self) -> bool {
        matches!(
            self,
            Self::InvalidParameter(_)
                | Self::Heightfield(HeightfieldError::InvalidParameter(_))
                | Self::Offset(OffsetError::InvalidParameter(_))
                | Self::Raycast(RaycastError::InvalidParameter(_))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConformalError::invalid_parameter("thickness must be >= 0, got -1");
        assert!(format!("{err}").contains("thickness"));
        assert!(err.is_invalid_parameter());
        assert!(!err.is_invalid_dimension());

        let err = ConformalError::unknown_channel("Phase");
        assert_eq!(format!("{err}"), "unknown channel: Phase");
    }

    #[test]
    fn test_wrapped_errors_are_classified() {
        let err: ConformalError = HeightfieldError::invalid_dimension("3x4 vs 3x5").into();
        assert!(err.is_invalid_dimension());
        assert!(format!("{err}").starts_with("meshing failed"));

        let err: ConformalError = HeightfieldError::NonMonotonicAxis { axis: "x", index: 2 }.into();
        assert!(err.is_invalid_dimension());

        let err: ConformalError = OffsetError::invalid_parameter("negative").into();
        assert!(err.is_invalid_parameter());

        let err: ConformalError = RaycastError::invalid_parameter("clearance").into();
        assert!(err.is_invalid_parameter());

        let err: ConformalError = OffsetError::EmptyMesh.into();
        assert!(!err.is_invalid_parameter());
        assert!(!err.is_invalid_dimension());
    }
}
