//! Parameters for ray resampling.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{RaycastError, RaycastResult};

/// Parameters for [`resample`](crate::resample).
///
/// # Example
///
/// ```
/// use mesh_raycast::ResampleParams;
///
/// let params = ResampleParams::default();
/// assert!((params.ray_clearance - 1.0).abs() < 1e-12);
/// assert!(params.parallel);
///
/// let serial = ResampleParams::default().parallel(false).ray_clearance(0.5);
/// assert!(!serial.parallel);
/// assert!(serial.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ResampleParams {
    /// Height of the ray-origin plane above the target mesh's highest vertex.
    pub ray_clearance: f64,

    /// Epsilon for parallel-ray rejection (relative to edge lengths) and
    /// bounding-box padding.
    pub epsilon: f64,

    /// Slack on the barycentric bounds, so rays through shared edges and
    /// vertices are not lost between neighbouring triangles.
    pub barycentric_tolerance: f64,

    /// Cast rays on the rayon thread pool.
    pub parallel: bool,
}

impl Default for ResampleParams {
    fn default() -> Self {
        Self {
            ray_clearance: 1.0,
            epsilon: 1e-9,
            barycentric_tolerance: 1e-9,
            parallel: true,
        }
    }
}

impl ResampleParams {
    /// Params that cast every ray on the calling thread.
    #[must_use]
    pub fn serial() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Set the ray-origin clearance.
    #[must_use]
    pub const fn ray_clearance(mut self, clearance: f64) -> Self {
        self.ray_clearance = clearance;
        self
    }

    /// Set the intersection epsilon.
    #[must_use]
    pub const fn epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set the barycentric tolerance.
    #[must_use]
    pub const fn barycentric_tolerance(mut self, tolerance: f64) -> Self {
        self.barycentric_tolerance = tolerance;
        self
    }

    /// Enable or disable parallel ray casting.
    #[must_use]
    pub const fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Check that every value is in range.
    ///
    /// # Errors
    ///
    /// Returns [`RaycastError::InvalidParameter`] if `ray_clearance` is not
    /// finite and positive, or a tolerance is negative or not finite.
    pub fn validate(&self) -> RaycastResult<()> {
        if !(self.ray_clearance.is_finite() && self.ray_clearance > 0.0) {
            return Err(RaycastError::invalid_parameter(format!(
                "ray_clearance must be finite and > 0, got {}",
                self.ray_clearance
            )));
        }
        for (name, value) in [
            ("epsilon", self.epsilon),
            ("barycentric_tolerance", self.barycentric_tolerance),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(RaycastError::invalid_parameter(format!(
                    "{name} must be finite and >= 0, got {value}"
                )));
            }
        }
        Ok(())
    }
}
