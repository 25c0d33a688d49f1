//! Parameters for conformal-layer simulation.

use mesh_raycast::ResampleParams;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{ConformalError, ConformalResult};

/// Parameters for [`add_conformal_layer_with`](crate::add_conformal_layer_with).
///
/// `thickness` is measured in the rescaled frame: coordinates and heights
/// are multiplied by `scale` before meshing, the thickness is not.
///
/// Results come back in the mesh frame, where the lowest finite input
/// sample sits at zero. Set [`restore_base`](Self::restore_base()) to shift
/// them back into the input's height frame instead.
///
/// # Example
///
/// ```
/// use mesh_conformal::ConformalParams;
///
/// // Heights in meters, nanometer features: mesh at nanometer scale and
/// // coat with 2 nm.
/// let params = ConformalParams::new(2.0).scale(1e9);
/// assert!(params.validate().is_ok());
///
/// assert!(ConformalParams::new(-1.0).validate().is_err());
/// assert!(ConformalParams::new(1.0).scale(0.0).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConformalParams {
    /// Layer thickness, `>= 0`, in scaled units.
    pub thickness: f64,

    /// Factor applied to `x`, `y` and heights before meshing, `> 0`.
    pub scale: f64,

    /// Ray casting settings for the resample stage.
    #[cfg_attr(feature = "serde", serde(default))]
    pub resample: ResampleParams,

    /// Add the subtracted finite minimum back before unscaling.
    #[cfg_attr(feature = "serde", serde(default))]
    pub restore_base: bool,
}

impl Default for ConformalParams {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl ConformalParams {
    /// Params for a layer of `thickness` with unit scale.
    #[must_use]
    pub fn new(thickness: f64) -> Self {
        Self {
            thickness,
            scale: 1.0,
            resample: ResampleParams::default(),
            restore_base: false,
        }
    }

    /// Set the layer thickness.
    #[must_use]
    pub const fn thickness(mut self, thickness: f64) -> Self {
        self.thickness = thickness;
        self
    }

    /// Set the coordinate scale.
    #[must_use]
    pub const fn scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Set the resample parameters.
    #[must_use]
    pub const fn resample(mut self, resample: ResampleParams) -> Self {
        self.resample = resample;
        self
    }

    /// Report results in the input's height frame rather than the mesh frame.
    #[must_use]
    pub const fn restore_base(mut self, restore_base: bool) -> Self {
        self.restore_base = restore_base;
        self
    }

    /// Check that thickness and scale are in range.
    ///
    /// # Errors
    ///
    /// Returns [`ConformalError::InvalidParameter`] if `thickness < 0`,
    /// `scale <= 0`, or either is not finite.
    pub fn validate(&self) -> ConformalResult<()> {
        if !(self.thickness.is_finite() && self.thickness >= 0.0) {
            return Err(ConformalError::invalid_parameter(format!(
                "thickness must be finite and >= 0, got {}",
                self.thickness
            )));
        }
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(ConformalError::invalid_parameter(format!(
                "scale must be finite and > 0, got {}",
                self.scale
            )));
        }
        Ok(())
    }
}
