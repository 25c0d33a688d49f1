//! Conformal-layer simulation: mesh, offset, resample.

use mesh_heightfield::{Axis, HeightGrid, build_mesh, check_grid_shape, finite_min};
use mesh_offset::offset_mesh;
use mesh_raycast::{ResampleResult, ResampleStats, resample};
use tracing::{debug, info};

use crate::error::ConformalResult;
use crate::params::ConformalParams;

/// Simulate a uniform coating of `thickness` over a height grid.
///
/// Shorthand for [`add_conformal_layer_with`] with default resample
/// settings, returning only the grid.
///
/// # Errors
///
/// See [`add_conformal_layer_with`].
///
/// # Example
///
/// ```
/// use mesh_conformal::add_conformal_layer;
/// use mesh_heightfield::Axis;
/// use nalgebra::DMatrix;
///
/// let x = Axis::linspace("x", 0.0, 1.0, 5).unwrap();
/// let y = Axis::linspace("y", 0.0, 1.0, 5).unwrap();
/// let flat = DMatrix::zeros(5, 5);
///
/// let coated = add_conformal_layer(&x, &y, &flat, 1.0, 1.0).unwrap();
/// assert!(coated.iter().all(|&z| (z - 1.0).abs() < 1e-9));
/// ```
pub fn add_conformal_layer(
    x: &Axis,
    y: &Axis,
    height: &HeightGrid,
    thickness: f64,
    scale: f64,
) -> ConformalResult<HeightGrid> {
    let params = ConformalParams::new(thickness).scale(scale);
    add_conformal_layer_with(x, y, height, &params).map(ResampleResult::into_grid)
}

/// Simulate a uniform coating over a height grid.
///
/// 1. Multiply `x`, `y` and `height` by `params.scale`
/// 2. Mesh the scaled grid (heights shifted so the lowest sits at zero)
/// 3. Offset every vertex along its normal by `params.thickness`
/// 4. Drop one vertical ray per grid vertex onto the offset surface and
///    scatter the hit heights back onto the grid
/// 5. Divide by `params.scale`
///
/// The returned grid has the input's shape. Heights stay in the mesh
/// frame, measured from the lowest finite input sample, unless
/// [`ConformalParams::restore_base()`] asks for the input's frame. Cells
/// whose ray misses the offset surface, typically where the coating
/// retreats from the scan border, are `NaN`.
///
/// A zero thickness returns an exact copy of `height` without meshing; the
/// stats then report no rays and count the input's own gaps.
///
/// # Errors
///
/// - invalid dimension if `height` does not match the axes
/// - invalid parameter if `thickness < 0` or `scale <= 0`
///
/// Use [`ConformalError::is_invalid_dimension`] and
/// [`ConformalError::is_invalid_parameter`] to classify failures from any
/// stage.
///
/// [`ConformalError::is_invalid_dimension`]: crate::ConformalError::is_invalid_dimension
/// [`ConformalError::is_invalid_parameter`]: crate::ConformalError::is_invalid_parameter
pub fn add_conformal_layer_with(
    x: &Axis,
    y: &Axis,
    height: &HeightGrid,
    params: &ConformalParams,
) -> ConformalResult<ResampleResult> {
    check_grid_shape("height", height, x, y)?;
    params.validate()?;

    let (nx, ny) = height.shape();
    if params.thickness == 0.0 {
        debug!("Zero thickness; returning input unchanged");
        return Ok(ResampleResult {
            grid: height.clone(),
            stats: ResampleStats {
                gaps: height.iter().filter(|z| z.is_nan()).count(),
                ..ResampleStats::default()
            },
        });
    }

    info!(
        nx,
        ny,
        thickness = params.thickness,
        scale = params.scale,
        "Adding conformal layer"
    );

    let scale = params.scale;
    let sx = x.scaled(scale)?;
    let sy = y.scaled(scale)?;
    let scaled = height * scale;
    let shift = if params.restore_base {
        finite_min(&scaled).unwrap_or(0.0)
    } else {
        0.0
    };

    let mesh = build_mesh(&sx, &sy, &scaled, None)?;
    let coating = offset_mesh(&mesh, params.thickness)?;
    let mut result = resample(
        &mesh,
        &coating,
        sx.values(),
        sy.values(),
        (nx, ny),
        &params.resample,
    )?;

    result.grid.apply(|z| *z = (*z + shift) / scale);

    info!(
        hits = result.stats.rays_hit,
        gaps = result.stats.gaps,
        "Conformal layer complete"
    );

    Ok(result)
}
