//! Per-sample surface normals from height gradients.
//!
//! The gradient uses second-order central differences in the interior,
//! weighted for uneven spacing so that linear data is differentiated
//! exactly, and first-order one-sided differences on the two edges.
//! The upward unit normal of `h(x, y)` is then `(-dh/dx, -dh/dy, 1)`
//! normalized.

use nalgebra::{DMatrix, Vector3};
use tracing::debug;

use crate::axis::{Axis, HeightGrid, check_grid_shape};
use crate::coords::flat_index;
use crate::error::HeightfieldResult;

/// Normal substituted where the gradient vector cannot be normalized.
pub const DEFAULT_NORMAL: Vector3<f64> = Vector3::new(0.0, 0.0, 1.0);

/// Derivative of `values` with respect to `positions`.
///
/// Both slices must have the same length of at least two.
fn derivative(values: &[f64], positions: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut out = vec![0.0; n];
    if n < 2 {
        return out;
    }

    out[0] = (values[1] - values[0]) / (positions[1] - positions[0]);
    out[n - 1] = (values[n - 1] - values[n - 2]) / (positions[n - 1] - positions[n - 2]);

    for i in 1..n - 1 {
        let hs = positions[i] - positions[i - 1];
        let hd = positions[i + 1] - positions[i];
        // Written on differences so a constant run gives exactly zero.
        let forward = values[i + 1] - values[i];
        let backward = values[i] - values[i - 1];
        out[i] = (hs * hs).mul_add(forward, hd * hd * backward) / (hs * hd * (hs + hd));
    }

    out
}

/// Partial derivatives `(dh/dx, dh/dy)` of a height grid.
///
/// # Errors
///
/// Returns [`crate::HeightfieldError::InvalidDimension`] if `height` does not
/// have shape `(x.len(), y.len())`.
pub fn gradient(
    x: &Axis,
    y: &Axis,
    height: &HeightGrid,
) -> HeightfieldResult<(DMatrix<f64>, DMatrix<f64>)> {
    check_grid_shape("height", height, x, y)?;
    let (nx, ny) = height.shape();

    let mut dx = DMatrix::zeros(nx, ny);
    for j in 0..ny {
        let column: Vec<f64> = height.column(j).iter().copied().collect();
        for (i, d) in derivative(&column, x.values()).into_iter().enumerate() {
            dx[(i, j)] = d;
        }
    }

    let mut dy = DMatrix::zeros(nx, ny);
    for i in 0..nx {
        let row: Vec<f64> = height.row(i).iter().copied().collect();
        for (j, d) in derivative(&row, y.values()).into_iter().enumerate() {
            dy[(i, j)] = d;
        }
    }

    Ok((dx, dy))
}

/// Upward unit normal for a gradient, or `None` when the raw vector
/// `(dx, dy, -1)` has a non-finite or zero magnitude.
#[must_use]
pub fn normal_from_gradient(dx: f64, dy: f64) -> Option<Vector3<f64>> {
    let raw = Vector3::new(dx, dy, -1.0);
    let magnitude = raw.norm();
    if magnitude.is_finite() && magnitude > 0.0 {
        Some(-raw / magnitude)
    } else {
        None
    }
}

/// Unit normals for every sample of a height grid, in flattened order.
///
/// # Example
///
/// ```
/// use mesh_heightfield::{Axis, NormalField};
/// use nalgebra::DMatrix;
///
/// let x = Axis::linspace("x", 0.0, 1.0, 3).unwrap();
/// let y = Axis::linspace("y", 0.0, 1.0, 3).unwrap();
/// let flat = DMatrix::from_element(3, 3, 2.5);
///
/// let field = NormalField::estimate(&x, &y, &flat).unwrap();
/// assert!(field.normals().iter().all(|n| n.z == 1.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NormalField {
    nx: usize,
    ny: usize,
    normals: Vec<Vector3<f64>>,
    substituted: usize,
}

impl NormalField {
    /// Estimate normals from the height gradient.
    ///
    /// Samples whose gradient cannot be normalized (a gap sample or a gap
    /// neighbour makes it NaN) receive [`DEFAULT_NORMAL`]; the number of such
    /// substitutions is reported by [`NormalField::substituted`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::HeightfieldError::InvalidDimension`] if `height` does
    /// not have shape `(x.len(), y.len())`.
    pub fn estimate(x: &Axis, y: &Axis, height: &HeightGrid) -> HeightfieldResult<Self> {
        let (dx, dy) = gradient(x, y, height)?;
        let (nx, ny) = height.shape();

        let mut normals = vec![DEFAULT_NORMAL; nx * ny];
        let mut substituted = 0;
        for i in 0..nx {
            for j in 0..ny {
                match normal_from_gradient(dx[(i, j)], dy[(i, j)]) {
                    Some(n) => normals[flat_index(i, j, ny)] = n,
                    None => substituted += 1,
                }
            }
        }

        if substituted > 0 {
            debug!(substituted, "Substituted default normal for degenerate gradients");
        }

        Ok(Self {
            nx,
            ny,
            normals,
            substituted,
        })
    }

    /// Grid shape `(Nx, Ny)`.
    #[must_use]
    pub const fn shape(&self) -> (usize, usize) {
        (self.nx, self.ny)
    }

    /// Normal at cell `(i, j)`.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> Option<Vector3<f64>> {
        if i < self.nx && j < self.ny {
            self.normals.get(flat_index(i, j, self.ny)).copied()
        } else {
            None
        }
    }

    /// Normals in flattened order.
    #[must_use]
    pub fn normals(&self) -> &[Vector3<f64>] {
        &self.normals
    }

    /// Number of samples that received [`DEFAULT_NORMAL`].
    #[must_use]
    pub const fn substituted(&self) -> usize {
        self.substituted
    }

    /// Consume the field, returning the normals in flattened order.
    #[must_use]
    pub fn into_normals(self) -> Vec<Vector3<f64>> {
        self.normals
    }
}
