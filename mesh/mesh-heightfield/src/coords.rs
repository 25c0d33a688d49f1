//! Coordinate grids built from two sample axes.
//!
//! Every grid in this crate uses the same convention: cell `(i, j)` sits at
//! `(x[i], y[j])` and is flattened to index `i * ny + j`. Vertices, normals,
//! colors, faces and resampling all go through [`flat_index`], so the
//! ordering cannot drift between stages.

use crate::axis::Axis;

/// Flattened index of cell `(i, j)` in a grid with `ny` columns.
#[inline]
#[must_use]
pub const fn flat_index(i: usize, j: usize, ny: usize) -> usize {
    i * ny + j
}

/// Inverse of [`flat_index`].
#[inline]
#[must_use]
pub const fn unflatten_index(k: usize, ny: usize) -> (usize, usize) {
    (k / ny, k % ny)
}

/// `(x, y)` position of every grid cell, shape `(Nx, Ny, 2)`.
///
/// A pure function of the two axes; callers rebuild it instead of mutating
/// it.
///
/// # Example
///
/// ```
/// use mesh_heightfield::{Axis, CoordinateGrid};
///
/// let x = Axis::x(vec![0.0, 1.0, 2.0]).unwrap();
/// let y = Axis::y(vec![10.0, 20.0]).unwrap();
/// let grid = CoordinateGrid::build(&x, &y);
///
/// assert_eq!(grid.shape(), (3, 2));
/// assert_eq!(grid.get(2, 1), Some([2.0, 20.0]));
/// assert_eq!(grid.as_slice()[1], [0.0, 20.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateGrid {
    nx: usize,
    ny: usize,
    pairs: Vec<[f64; 2]>,
}

impl CoordinateGrid {
    /// Pair every x sample with every y sample.
    #[must_use]
    pub fn build(x: &Axis, y: &Axis) -> Self {
        let (nx, ny) = (x.len(), y.len());
        let pairs = x
            .values()
            .iter()
            .flat_map(|&xi| y.values().iter().map(move |&yj| [xi, yj]))
            .collect();
        Self { nx, ny, pairs }
    }

    /// Grid shape `(Nx, Ny)`.
    #[must_use]
    pub const fn shape(&self) -> (usize, usize) {
        (self.nx, self.ny)
    }

    /// Number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether the grid has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Position of cell `(i, j)`.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> Option<[f64; 2]> {
        if i < self.nx && j < self.ny {
            self.pairs.get(flat_index(i, j, self.ny)).copied()
        } else {
            None
        }
    }

    /// Positions in flattened order.
    #[must_use]
    pub fn as_slice(&self) -> &[[f64; 2]] {
        &self.pairs
    }

    /// Iterate `((i, j), [x, y])` in flattened order.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), [f64; 2])> + '_ {
        let ny = self.ny;
        self.pairs
            .iter()
            .enumerate()
            .map(move |(k, &p)| (unflatten_index(k, ny), p))
    }
}
