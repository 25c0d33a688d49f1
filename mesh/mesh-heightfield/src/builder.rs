//! Triangulated meshes from height grids.

use mesh_types::{IndexedMesh, Point3, Vertex, VertexAttributes};
use nalgebra::DMatrix;
use tracing::{debug, info};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::axis::{Axis, HeightGrid, check_grid_shape, finite_min};
use crate::colormap::Colormap;
use crate::coords::{CoordinateGrid, flat_index};
use crate::error::{HeightfieldError, HeightfieldResult};
use crate::normals::NormalField;

/// Parameters for [`build_mesh_with`].
///
/// # Example
///
/// ```
/// use mesh_heightfield::{Colormap, MeshBuildParams};
///
/// let params = MeshBuildParams::default().colormap(Colormap::Plasma);
/// assert_eq!(params.colormap, Colormap::Plasma);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MeshBuildParams {
    /// Colormap applied to the optional color channel.
    pub colormap: Colormap,
}

impl MeshBuildParams {
    /// Set the colormap.
    #[must_use]
    pub const fn colormap(mut self, colormap: Colormap) -> Self {
        self.colormap = colormap;
        self
    }
}

/// Triangle faces for an `nx` by `ny` grid, two per cell.
///
/// Cell `(i, j)` is split along its `(i + 1, j)`-`(i, j + 1)` diagonal into
/// `[(i, j), (i + 1, j), (i, j + 1)]` and
/// `[(i + 1, j), (i + 1, j + 1), (i, j + 1)]`, both counter-clockwise seen
/// from +Z. Indices follow [`flat_index`].
///
/// # Example
///
/// ```
/// use mesh_heightfield::grid_faces;
///
/// let faces = grid_faces(2, 3);
/// assert_eq!(faces.len(), 4);
/// assert_eq!(faces[0], [0, 3, 1]);
/// assert_eq!(faces[1], [3, 4, 1]);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation)]
// Truncation: callers check nx * ny fits in u32 before building faces
pub fn grid_faces(nx: usize, ny: usize) -> Vec<[u32; 3]> {
    let cells = nx.saturating_sub(1) * ny.saturating_sub(1);
    let mut faces = Vec::with_capacity(2 * cells);
    for i in 0..nx.saturating_sub(1) {
        for j in 0..ny.saturating_sub(1) {
            let k00 = flat_index(i, j, ny) as u32;
            let k10 = flat_index(i + 1, j, ny) as u32;
            let k01 = flat_index(i, j + 1, ny) as u32;
            let k11 = flat_index(i + 1, j + 1, ny) as u32;
            faces.push([k00, k10, k01]);
            faces.push([k10, k11, k01]);
        }
    }
    faces
}

/// Build a mesh with the default colormap.
///
/// # Errors
///
/// See [`build_mesh_with`].
pub fn build_mesh(
    x: &Axis,
    y: &Axis,
    height: &HeightGrid,
    colors: Option<&DMatrix<f64>>,
) -> HeightfieldResult<IndexedMesh> {
    build_mesh_with(x, y, height, colors, &MeshBuildParams::default())
}

/// Build a triangulated surface from a height grid.
///
/// - one vertex per sample at `(x[i], y[j], height[(i, j)] - min(height))`,
///   so the lowest finite sample sits at `z = 0`
/// - one unit normal per vertex from [`NormalField::estimate`]
/// - two faces per grid cell from [`grid_faces`]
/// - when `colors` is given, one RGBA color per vertex through the colormap
///
/// Gap samples produce vertices with a NaN `z`.
///
/// # Errors
///
/// Returns [`HeightfieldError::InvalidDimension`] if `height` or `colors`
/// does not have shape `(x.len(), y.len())`, or if the grid has more
/// vertices than `u32` face indices can address.
///
/// # Example
///
/// ```
/// use mesh_heightfield::{Axis, build_mesh};
/// use mesh_types::MeshTopology;
/// use nalgebra::DMatrix;
///
/// let x = Axis::linspace("x", 0.0, 1.0, 4).unwrap();
/// let y = Axis::linspace("y", 0.0, 1.0, 3).unwrap();
/// let height = DMatrix::from_fn(4, 3, |i, j| (i + j) as f64 + 10.0);
///
/// let mesh = build_mesh(&x, &y, &height, None).unwrap();
/// assert_eq!(mesh.vertex_count(), 12);
/// assert_eq!(mesh.face_count(), 12);
/// assert_eq!(mesh.min_z(), Some(0.0));
/// ```
pub fn build_mesh_with(
    x: &Axis,
    y: &Axis,
    height: &HeightGrid,
    colors: Option<&DMatrix<f64>>,
    params: &MeshBuildParams,
) -> HeightfieldResult<IndexedMesh> {
    check_grid_shape("height", height, x, y)?;
    if let Some(colors) = colors {
        check_grid_shape("colors", colors, x, y)?;
    }

    let (nx, ny) = (x.len(), y.len());
    let vertex_count = nx * ny;
    if u32::try_from(vertex_count).is_err() {
        return Err(HeightfieldError::invalid_dimension(format!(
            "{nx}x{ny} grid exceeds the u32 vertex index range"
        )));
    }

    let coords = CoordinateGrid::build(x, y);
    let field = NormalField::estimate(x, y, height)?;
    let vertex_colors = colors.map(|c| params.colormap.map_grid(c));
    let base = finite_min(height).unwrap_or(0.0);

    debug!(base, nx, ny, "Normalizing heights to a zero minimum");

    let mut mesh = IndexedMesh::with_capacity(vertex_count, 2 * (nx - 1) * (ny - 1));
    for ((i, j), [xi, yj]) in coords.iter() {
        let k = flat_index(i, j, ny);
        let position = Point3::new(xi, yj, height[(i, j)] - base);
        let attributes = VertexAttributes {
            normal: Some(field.normals()[k]),
            color: vertex_colors.as_ref().map(|c| c[k]),
        };
        mesh.vertices.push(Vertex {
            position,
            attributes,
        });
    }
    mesh.faces = grid_faces(nx, ny);

    info!(
        nx,
        ny,
        vertices = mesh.vertices.len(),
        faces = mesh.faces.len(),
        colored = colors.is_some(),
        degenerate_normals = field.substituted(),
        "Built height-field mesh"
    );

    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mesh_types::{MeshTopology, VertexColor};

    fn axes(nx: usize, ny: usize) -> (Axis, Axis) {
        (
            Axis::linspace("x", 0.0, 1.0, nx).unwrap(),
            Axis::linspace("y", 0.0, 1.0, ny).unwrap(),
        )
    }

    #[test]
    fn non_square_topology() {
        let (x, y) = axes(3, 5);
        let height = DMatrix::zeros(3, 5);
        let mesh = build_mesh(&x, &y, &height, None).unwrap();

        assert_eq!(mesh.vertex_count(), 15);
        assert_eq!(mesh.face_count(), 2 * 2 * 4);
        assert!(mesh.has_valid_indices());
        assert!(mesh.has_normals());

        // Every face keeps the upward winding on a flat grid.
        for tri in mesh.triangles() {
            let n = tri.normal().unwrap();
            assert_relative_eq!(n.z, 1.0, epsilon = 1e-12);
        }

        // Total area equals the grid footprint.
        assert_relative_eq!(mesh.surface_area(), 2.0 * 4.0, epsilon = 1e-12);
    }

    #[test]
    fn vertices_follow_flattening() {
        let x = Axis::x(vec![0.0, 2.0]).unwrap();
        let y = Axis::y(vec![1.0, 3.0, 5.0]).unwrap();
        let height = DMatrix::from_row_slice(2, 3, &[5.0, 6.0, 7.0, 8.0, 9.0, 10.0]);
        let mesh = build_mesh(&x, &y, &height, None).unwrap();

        let v = &mesh.vertices[flat_index(1, 2, 3)].position;
        assert_eq!((v.x, v.y, v.z), (2.0, 5.0, 5.0));
        let v = &mesh.vertices[1].position;
        assert_eq!((v.x, v.y, v.z), (0.0, 3.0, 1.0));
    }

    #[test]
    fn colors_are_attached_per_vertex() {
        let (x, y) = axes(2, 2);
        let height = DMatrix::zeros(2, 2);
        let colors = DMatrix::from_row_slice(2, 2, &[0.0, 1.0, 2.0, 3.0]);
        let params = MeshBuildParams::default().colormap(Colormap::Gray);
        let mesh = build_mesh_with(&x, &y, &height, Some(&colors), &params).unwrap();

        assert!(mesh.has_colors());
        assert_eq!(mesh.vertices[0].color(), Some(VertexColor::BLACK));
        assert_eq!(mesh.vertices[3].color(), Some(VertexColor::WHITE));
    }

    #[test]
    fn mismatched_colors_fail() {
        let (x, y) = axes(2, 3);
        let height = DMatrix::zeros(2, 3);
        let colors = DMatrix::zeros(3, 2);
        let err = build_mesh(&x, &y, &height, Some(&colors)).unwrap_err();
        assert!(matches!(err, HeightfieldError::InvalidDimension(_)));
    }

    #[test]
    fn gap_samples_keep_finite_minimum() {
        let (x, y) = axes(2, 2);
        let height = DMatrix::from_row_slice(2, 2, &[f64::NAN, 4.0, 3.0, 6.0]);
        let mesh = build_mesh(&x, &y, &height, None).unwrap();
        assert!(mesh.vertices[0].position.z.is_nan());
        assert_eq!(mesh.min_z(), Some(0.0));
        assert_eq!(mesh.max_z(), Some(3.0));
    }

    #[test]
    fn input_grid_is_not_aliased() {
        let (x, y) = axes(2, 2);
        let mut height = DMatrix::from_element(2, 2, 1.0);
        let mesh = build_mesh(&x, &y, &height, None).unwrap();
        height[(0, 0)] = 100.0;
        assert_eq!(mesh.vertices[0].position.z, 0.0);
    }
}
