//! Error types for height-field meshing.

use thiserror::Error;

/// Result type alias for height-field operations.
pub type HeightfieldResult<T> = Result<T, HeightfieldError>;

/// Errors that can occur while building grids, normals or meshes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HeightfieldError {
    /// An axis is too short, or a matrix shape disagrees with the axes.
    #[error("invalid dimension: {0}")]
    InvalidDimension(String),

    /// An axis is not strictly increasing or holds a non-finite value.
    #[error("axis {axis} is not strictly increasing at index {index}")]
    NonMonotonicAxis {
        /// Axis name (`"x"` or `"y"`).
        axis: &'static str,
        /// First offending sample index.
        index: usize,
    },

    /// A parameter value is out of range or unrecognized.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

impl HeightfieldError {
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

    /// Whether this error reports malformed input shapes or axes.
    #[must_use]
    pub const fn is_invalid_dimension(&self) -> bool {
        matches!(
            self,
            Self::InvalidDimension(_) | Self::NonMonotonicAxis { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = HeightfieldError::invalid_dimension("height is 3x4, expected 3x5");
        assert!(format!("{err}").contains("3x5"));
        assert!(err.is_invalid_dimension());

        let err = HeightfieldError::NonMonotonicAxis { axis: "y", index: 7 };
        assert!(format!("{err}").contains("axis y"));
        assert!(err.is_invalid_dimension());

        let err = HeightfieldError::invalid_parameter("unknown colormap `rainbow`");
        assert!(format!("{err}").contains("rainbow"));
        assert!(!err.is_invalid_dimension());
    }
}
