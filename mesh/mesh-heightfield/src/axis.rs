//! Sample axes and the height grid they index.

use nalgebra::DMatrix;

use crate::error::{HeightfieldError, HeightfieldResult};

/// Gridded height samples, shape `(Nx, Ny)`.
///
/// Entry `(i, j)` is the height measured at `(x[i], y[j])`. Gap samples are
/// `f64::NAN`.
pub type HeightGrid = DMatrix<f64>;

/// Strictly increasing sample positions along one scan direction.
///
/// Construction validates the axis once, so every consumer can rely on at
/// least two finite, strictly increasing samples.
///
/// # Example
///
/// ```
/// use mesh_heightfield::Axis;
///
/// let x = Axis::new("x", vec![0.0, 0.5, 1.5]).unwrap();
/// assert_eq!(x.len(), 3);
/// assert_eq!(x.search_sorted_left(0.5), 1);
/// assert_eq!(x.search_sorted_left(0.6), 2);
///
/// assert!(Axis::new("x", vec![0.0, 0.0]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    name: &'static str,
    values: Vec<f64>,
}

impl Axis {
    /// Validate and wrap a sequence of sample positions.
    ///
    /// # Errors
    ///
    /// - [`HeightfieldError::InvalidDimension`] if fewer than two samples
    /// - [`HeightfieldError::NonMonotonicAxis`] if a sample is non-finite or
    ///   not greater than its predecessor
    pub fn new(name: &'static str, values: Vec<f64>) -> HeightfieldResult<Self> {
        if values.len() < 2 {
            return Err(HeightfieldError::invalid_dimension(format!(
                "axis {name} needs at least 2 samples, got {}",
                values.len()
            )));
        }

        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(HeightfieldError::NonMonotonicAxis { axis: name, index });
        }

        if let Some(index) = values.windows(2).position(|w| w[1] <= w[0]) {
            return Err(HeightfieldError::NonMonotonicAxis {
                axis: name,
                index: index + 1,
            });
        }

        Ok(Self { name, values })
    }

    /// Build the x axis.
    ///
    /// # Errors
    ///
    /// See [`Axis::new`].
    pub fn x(values: Vec<f64>) -> HeightfieldResult<Self> {
        Self::new("x", values)
    }

    /// Build the y axis.
    ///
    /// # Errors
    ///
    /// See [`Axis::new`].
    pub fn y(values: Vec<f64>) -> HeightfieldResult<Self> {
        Self::new("y", values)
    }

    /// Evenly spaced axis `start, start + step, ...` with `len` samples.
    ///
    /// # Errors
    ///
    /// Fails like [`Axis::new`] when `len < 2` or `step` is not positive.
    #[allow(clippy::cast_precision_loss)]
    pub fn linspace(
        name: &'static str,
        start: f64,
        step: f64,
        len: usize,
    ) -> HeightfieldResult<Self> {
        Self::new(name, (0..len).map(|i| step.mul_add(i as f64, start)).collect())
    }

    /// Axis name used in error messages.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`; a valid axis has at least two samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sample positions.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Sample at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Copy of this axis with every sample multiplied by `factor`.
    ///
    /// # Errors
    ///
    /// Fails when `factor` is not positive and finite, since the result would
    /// no longer be strictly increasing.
    pub fn scaled(&self, factor: f64) -> HeightfieldResult<Self> {
        if !(factor.is_finite() && factor > 0.0) {
            return Err(HeightfieldError::invalid_parameter(format!(
                "axis scale must be positive, got {factor}"
            )));
        }
        Self::new(self.name, self.values.iter().map(|v| v * factor).collect())
    }

    /// Left-biased insertion index of `value`: the number of samples strictly
    /// less than `value`.
    ///
    /// A value equal to a sample maps to that sample's index. Values past the
    /// last sample map to `len()`.
    #[must_use]
    pub fn search_sorted_left(&self, value: f64) -> usize {
        self.values.partition_point(|&v| v < value)
    }
}

impl AsRef<[f64]> for Axis {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}

/// Check that `grid` has shape `(x.len(), y.len())`.
///
/// # Errors
///
/// Returns [`HeightfieldError::InvalidDimension`] naming `what` on mismatch.
pub fn check_grid_shape(
    what: &str,
    grid: &DMatrix<f64>,
    x: &Axis,
    y: &Axis,
) -> HeightfieldResult<()> {
    if grid.nrows() != x.len() || grid.ncols() != y.len() {
        return Err(HeightfieldError::invalid_dimension(format!(
            "{what} is {}x{}, expected {}x{} from the axes",
            grid.nrows(),
            grid.ncols(),
            x.len(),
            y.len()
        )));
    }
    Ok(())
}

/// Smallest finite value in `grid`, ignoring gap samples.
///
/// Returns `None` if every sample is a gap.
#[must_use]
pub fn finite_min(grid: &DMatrix<f64>) -> Option<f64> {
    grid.iter().copied().filter(|v| v.is_finite()).reduce(f64::min)
}

/// Largest finite value in `grid`, ignoring gap samples.
#[must_use]
pub fn finite_max(grid: &DMatrix<f64>) -> Option<f64> {
    grid.iter().copied().filter(|v| v.is_finite()).reduce(f64::max)
}
