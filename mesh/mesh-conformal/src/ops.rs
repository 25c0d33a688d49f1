//! Leveling operations on height grids.

use mesh_heightfield::{Axis, HeightGrid, check_grid_shape, finite_min};
use nalgebra::{Matrix3, Vector3};
use tracing::debug;

use crate::error::{ConformalError, ConformalResult};

/// Shift heights so the lowest finite sample is zero.
///
/// Gap samples stay `NaN`. A grid without finite samples is returned as is.
///
/// # Example
///
/// ```
/// use mesh_conformal::ops::min_to_zero;
/// use nalgebra::DMatrix;
///
/// let h = DMatrix::from_row_slice(2, 2, &[3.0, 5.0, f64::NAN, 4.0]);
/// let leveled = min_to_zero(&h);
/// assert_eq!(leveled[(0, 0)], 0.0);
/// assert_eq!(leveled[(0, 1)], 2.0);
/// assert!(leveled[(1, 0)].is_nan());
/// ```
#[must_use]
pub fn min_to_zero(height: &HeightGrid) -> HeightGrid {
    match finite_min(height) {
        Some(min) => height.map(|z| z - min),
        None => height.clone(),
    }
}

/// Least-squares plane `z = a x + b y + c` through the finite samples.
///
/// Returns `(a, b, c)`.
///
/// # Errors
///
/// - invalid dimension if `height` does not match the axes
/// - invalid parameter if the finite samples do not determine a plane
///   (fewer than three, or all on one line)
#[allow(clippy::cast_precision_loss, clippy::many_single_char_names)]
pub fn fit_plane(x: &Axis, y: &Axis, height: &HeightGrid) -> ConformalResult<(f64, f64, f64)> {
    check_grid_shape("height", height, x, y)?;

    let samples: Vec<(f64, f64, f64)> = x
        .values()
        .iter()
        .enumerate()
        .flat_map(|(i, &xi)| {
            y.values()
                .iter()
                .enumerate()
                .map(move |(j, &yj)| (i, j, xi, yj))
        })
        .map(|(i, j, xi, yj)| (xi, yj, height[(i, j)]))
        .filter(|(_, _, z)| z.is_finite())
        .collect();

    if samples.len() < 3 {
        return Err(ConformalError::invalid_parameter(format!(
            "plane fit needs at least 3 finite samples, got {}",
            samples.len()
        )));
    }

    // Center the coordinates for a well-conditioned normal system.
    let count = samples.len() as f64;
    let (mx, my) = samples
        .iter()
        .fold((0.0, 0.0), |(sx, sy), (x, y, _)| (sx + x, sy + y));
    let (mx, my) = (mx / count, my / count);

    let mut normal = Matrix3::zeros();
    let mut rhs = Vector3::zeros();
    for &(x, y, z) in &samples {
        let row = Vector3::new(x - mx, y - my, 1.0);
        normal += row * row.transpose();
        rhs += row * z;
    }

    let solution = normal.lu().solve(&rhs).ok_or_else(|| {
        ConformalError::invalid_parameter("finite samples are collinear; no unique plane")
    })?;
    let (a, b, c0) = (solution.x, solution.y, solution.z);
    let c = c0 - a * mx - b * my;

    debug!(a, b, c, samples = samples.len(), "Fitted plane");
    Ok((a, b, c))
}

/// Subtract the least-squares plane from every sample.
///
/// # Errors
///
/// See [`fit_plane`].
///
/// # Example
///
/// ```
/// use mesh_conformal::ops::plane_level;
/// use mesh_heightfield::Axis;
/// use nalgebra::DMatrix;
///
/// let x = Axis::linspace("x", 0.0, 1.0, 4).unwrap();
/// let y = Axis::linspace("y", 0.0, 1.0, 3).unwrap();
/// let tilted = DMatrix::from_fn(4, 3, |i, j| 2.0 * i as f64 - j as f64 + 7.0);
///
/// let leveled = plane_level(&x, &y, &tilted).unwrap();
/// assert!(leveled.iter().all(|z| z.abs() < 1e-9));
/// ```
pub fn plane_level(x: &Axis, y: &Axis, height: &HeightGrid) -> ConformalResult<HeightGrid> {
    let (a, b, c) = fit_plane(x, y, height)?;
    let (xs, ys) = (x.values(), y.values());
    Ok(HeightGrid::from_fn(height.nrows(), height.ncols(), |i, j| {
        height[(i, j)] - (a * xs[i] + b * ys[j] + c)
    }))
}
