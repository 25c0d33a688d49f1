//! Vertical-ray resampling of a surface onto a rectilinear grid.

use mesh_types::{IndexedMesh, Point3};
use nalgebra::DMatrix;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::bvh::{Bvh, Ray};
use crate::error::{RaycastError, RaycastResult};
use crate::params::ResampleParams;
use crate::result::{ResampleResult, ResampleStats};

/// Index of the first element of `axis` that is not less than `value`.
///
/// `axis` must be sorted ascending. Returns `axis.len()` when every element
/// is smaller, and `0` for a NaN `value`.
///
/// # Example
///
/// ```
/// use mesh_raycast::search_sorted_left;
///
/// let axis = [0.0, 1.0, 2.0];
/// assert_eq!(search_sorted_left(&axis, 1.0), 1);
/// assert_eq!(search_sorted_left(&axis, 1.5), 2);
/// assert_eq!(search_sorted_left(&axis, 9.0), 3);
/// ```
#[must_use]
pub fn search_sorted_left(axis: &[f64], value: f64) -> usize {
    axis.partition_point(|&v| v < value)
}

/// Recover a height grid from `target` by casting one vertical ray per
/// vertex of `source`.
///
/// Every ray starts at the source vertex's `(x, y)`, at
/// `ray_clearance` above the highest finite vertex of `target`, and points
/// straight down. The first hit is mapped back onto the grid with a
/// left-biased sorted search on each axis, and its height is written to
/// that cell. Cells that receive no hit stay `NaN`.
///
/// Writes happen in source-vertex order after all rays are cast, so when
/// two hits map to the same cell the later vertex wins regardless of
/// `params.parallel`. Hits that map past the end of an axis are dropped and
/// counted in [`ResampleStats::out_of_range`].
///
/// # Arguments
///
/// * `source` - Mesh whose vertices define the ray positions
/// * `target` - Surface the rays are cast against
/// * `x`, `y` - Ascending grid axes
/// * `shape` - Output shape, must equal `(x.len(), y.len())`
/// * `params` - Ray and tolerance parameters
///
/// # Errors
///
/// Returns an error if:
/// - `shape` does not match the axes ([`RaycastError::InvalidDimension`])
/// - `target` has no faces ([`RaycastError::EmptyMesh`])
/// - a parameter is out of range ([`RaycastError::InvalidParameter`])
///
/// # Example
///
/// ```
/// use mesh_raycast::{ResampleParams, resample};
/// use mesh_types::{IndexedMesh, Vertex};
///
/// // A plane at z = 2 spanning x, y in [0, 1]
/// let mut plane = IndexedMesh::new();
/// for (x, y) in [(0.0, 0.0), (0.0, 1.0), (1.0, 0.0), (1.0, 1.0)] {
///     plane.vertices.push(Vertex::from_coords(x, y, 2.0));
/// }
/// plane.faces = vec![[0, 2, 1], [2, 3, 1]];
///
/// let axis = [0.0, 1.0];
/// let result = resample(&plane, &plane, &axis, &axis, (2, 2), &ResampleParams::default()).unwrap();
/// assert!(result.grid.iter().all(|&z| (z - 2.0).abs() < 1e-12));
/// assert_eq!(result.stats.gaps, 0);
/// ```
pub fn resample(
    source: &IndexedMesh,
    target: &IndexedMesh,
    x: &[f64],
    y: &[f64],
    shape: (usize, usize),
    params: &ResampleParams,
) -> RaycastResult<ResampleResult> {
    let (nx, ny) = shape;
    if shape != (x.len(), y.len()) {
        return Err(RaycastError::invalid_dimension(format!(
            "output shape ({nx}, {ny}) does not match axes ({}, {})",
            x.len(),
            y.len()
        )));
    }
    if target.faces.is_empty() {
        return Err(RaycastError::empty_mesh());
    }
    params.validate()?;

    info!(
        rays = source.vertices.len(),
        faces = target.faces.len(),
        nx,
        ny,
        parallel = params.parallel,
        "Starting ray resample"
    );

    let mut grid = DMatrix::from_element(nx, ny, f64::NAN);
    let mut stats = ResampleStats {
        rays_cast: source.vertices.len(),
        ..ResampleStats::default()
    };

    let Some(top) = target.max_z() else {
        warn!("Target mesh has no finite vertex; every cell is a gap");
        stats.gaps = nx * ny;
        return Ok(ResampleResult { grid, stats });
    };
    let origin_z = top + params.ray_clearance;
    debug!(origin_z, "Ray origin plane");

    let bvh = Bvh::build(target, params.epsilon).with_tolerance(params.barycentric_tolerance);

    let cast = |position: &Point3<f64>| {
        let ray = Ray::down(Point3::new(position.x, position.y, origin_z));
        bvh.cast(&ray, f64::INFINITY).map(|hit| hit.point)
    };
    let hits: Vec<Option<Point3<f64>>> = if params.parallel {
        source.vertices.par_iter().map(|v| cast(&v.position)).collect()
    } else {
        source.vertices.iter().map(|v| cast(&v.position)).collect()
    };

    // Scatter sequentially in vertex order
    let mut written = DMatrix::from_element(nx, ny, false);
    for point in hits.into_iter().flatten() {
        stats.rays_hit += 1;
        let i = search_sorted_left(x, point.x);
        let j = search_sorted_left(y, point.y);
        if i >= nx || j >= ny {
            stats.out_of_range += 1;
            continue;
        }
        if written[(i, j)] {
            stats.collisions += 1;
        }
        written[(i, j)] = true;
        grid[(i, j)] = point.z;
    }
    stats.gaps = written.iter().filter(|&&w| !w).count();

    if stats.gaps > 0 || stats.collisions > 0 || stats.out_of_range > 0 {
        warn!(
            gaps = stats.gaps,
            collisions = stats.collisions,
            out_of_range = stats.out_of_range,
            "Resampled grid is incomplete"
        );
    }
    info!(
        rays = stats.rays_cast,
        hits = stats.rays_hit,
        gaps = stats.gaps,
        "Ray resample complete"
    );

    Ok(ResampleResult { grid, stats })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mesh_types::Vertex;

    /// Flat grid mesh at height `z` over `x` by `y`, flattened `i * ny + j`.
    #[allow(clippy::cast_possible_truncation)]
    fn grid_mesh(x: &[f64], y: &[f64], z: impl Fn(usize, usize) -> f64) -> IndexedMesh {
        let ny = y.len();
        let mut mesh = IndexedMesh::new();
        for (i, &xi) in x.iter().enumerate() {
            for (j, &yj) in y.iter().enumerate() {
                mesh.vertices.push(Vertex::from_coords(xi, yj, z(i, j)));
            }
        }
        let k = |i: usize, j: usize| (i * ny + j) as u32;
        for i in 0..x.len() - 1 {
            for j in 0..ny - 1 {
                mesh.faces.push([k(i, j), k(i + 1, j), k(i, j + 1)]);
                mesh.faces.push([k(i + 1, j), k(i + 1, j + 1), k(i, j + 1)]);
            }
        }
        mesh
    }

    #[test]
    fn test_flat_plane_resamples_exactly() {
        let axis = [0.0, 0.5, 1.0, 1.5];
        let base = grid_mesh(&axis, &axis, |_, _| 0.0);
        let raised = grid_mesh(&axis, &axis, |_, _| 1.0);

        let result = resample(&base, &raised, &axis, &axis, (4, 4), &ResampleParams::default())
            .unwrap();
        assert_eq!(result.stats.rays_hit, 16);
        assert_eq!(result.stats.gaps, 0);
        assert_eq!(result.stats.collisions, 0);
        for z in result.grid.iter() {
            assert_relative_eq!(*z, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_serial_and_parallel_agree() {
        let x = [0.0, 1.0, 2.0, 3.0, 4.0];
        let y = [0.0, 0.5, 1.0];
        let base = grid_mesh(&x, &y, |i, j| (i * j) as f64 * 0.1);

        let serial = resample(&base, &base, &x, &y, (5, 3), &ResampleParams::serial()).unwrap();
        let parallel = resample(&base, &base, &x, &y, (5, 3), &ResampleParams::default()).unwrap();
        assert_eq!(serial, parallel);
        for i in 0..5 {
            for j in 0..3 {
                assert_relative_eq!(serial.grid[(i, j)], (i * j) as f64 * 0.1, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_miss_leaves_gap() {
        let axis = [0.0, 1.0, 2.0];
        let base = grid_mesh(&axis, &axis, |_, _| 0.0);
        // Target covers only x in [0, 1].
        let target = grid_mesh(&[0.0, 1.0], &axis, |_, _| 0.5);

        let result = resample(&base, &target, &axis, &axis, (3, 3), &ResampleParams::default())
            .unwrap();
        assert_eq!(result.stats.rays_hit, 6);
        assert_eq!(result.stats.gaps, 3);
        assert_eq!(result.gap_cells(), vec![(2, 0), (2, 1), (2, 2)]);
        assert_relative_eq!(result.grid[(1, 1)], 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_last_write_wins() {
        // Two source rays at x = 0.25 and x = 0.5 both map to cell i = 1.
        let x = [0.0, 1.0];
        let y = [0.0, 1.0];
        let mut source = IndexedMesh::new();
        source.vertices.push(Vertex::from_coords(0.25, 0.0, 0.0));
        source.vertices.push(Vertex::from_coords(0.5, 0.0, 0.0));
        // Target slopes in x so the two hits differ: z = 2x.
        let target = grid_mesh(&x, &y, |i, _| 2.0 * x[i]);

        let result = resample(&source, &target, &x, &y, (2, 2), &ResampleParams::default())
            .unwrap();
        assert_eq!(result.stats.rays_hit, 2);
        assert_eq!(result.stats.collisions, 1);
        assert_relative_eq!(result.grid[(1, 0)], 1.0, epsilon = 1e-12);
        assert_eq!(result.stats.gaps, 3);
    }

    #[test]
    fn test_out_of_range_hits_are_dropped() {
        let x = [0.0, 1.0];
        let y = [0.0, 1.0];
        let wide = [0.0, 1.0, 2.0];
        let source = grid_mesh(&wide, &y, |_, _| 0.0);
        let target = grid_mesh(&wide, &y, |_, _| 0.0);

        let result = resample(&source, &target, &x, &y, (2, 2), &ResampleParams::default())
            .unwrap();
        assert_eq!(result.stats.out_of_range, 2);
        assert_eq!(result.stats.gaps, 0);
    }

    #[test]
    fn test_shape_mismatch() {
        let axis = [0.0, 1.0];
        let mesh = grid_mesh(&axis, &axis, |_, _| 0.0);
        let err = resample(&mesh, &mesh, &axis, &axis, (2, 3), &ResampleParams::default())
            .unwrap_err();
        assert!(matches!(err, RaycastError::InvalidDimension(_)));
    }

    #[test]
    fn test_empty_target() {
        let axis = [0.0, 1.0];
        let mesh = grid_mesh(&axis, &axis, |_, _| 0.0);
        let err = resample(&mesh, &IndexedMesh::new(), &axis, &axis, (2, 2), &ResampleParams::default())
            .unwrap_err();
        assert_eq!(err, RaycastError::EmptyMesh);
    }

    #[test]
    fn test_invalid_clearance() {
        let axis = [0.0, 1.0];
        let mesh = grid_mesh(&axis, &axis, |_, _| 0.0);
        let params = ResampleParams::default().ray_clearance(0.0);
        let err = resample(&mesh, &mesh, &axis, &axis, (2, 2), &params).unwrap_err();
        assert!(matches!(err, RaycastError::InvalidParameter(_)));
    }

    #[test]
    fn test_all_nan_target_is_all_gaps() {
        let axis = [0.0, 1.0];
        let base = grid_mesh(&axis, &axis, |_, _| 0.0);
        let target = grid_mesh(&axis, &axis, |_, _| f64::NAN);
        let result = resample(&base, &target, &axis, &axis, (2, 2), &ResampleParams::default())
            .unwrap();
        assert_eq!(result.stats.gaps, 4);
        assert!(result.grid.iter().all(|z| z.is_nan()));
    }

    #[test]
    fn test_search_sorted_left() {
        let axis = [-1.0, 0.0, 2.5];
        assert_eq!(search_sorted_left(&axis, -5.0), 0);
        assert_eq!(search_sorted_left(&axis, -1.0), 0);
        assert_eq!(search_sorted_left(&axis, -0.5), 1);
        assert_eq!(search_sorted_left(&axis, 2.5), 2);
        assert_eq!(search_sorted_left(&axis, 3.0), 3);
        assert_eq!(search_sorted_left(&axis, f64::NAN), 0);
    }
}
