//! Indexed triangle mesh.

use crate::{Aabb, MeshBounds, MeshTopology, Triangle, Vertex};
use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Triangle mesh storing shared vertices and faces as index triples.
///
/// A height-field mesh holds one vertex per grid sample, so `vertices`
/// lines up with the flattened height array and per-vertex normals and
/// colors travel with their sample.
///
/// Faces are wound counter-clockwise seen from the side their normal
/// points to.
///
/// # Example
///
/// ```
/// use mesh_types::{IndexedMesh, MeshTopology, Vertex};
///
/// let mesh = IndexedMesh::from_parts(
///     vec![
///         Vertex::from_coords(0.0, 0.0, 1.0),
///         Vertex::from_coords(1.0, 0.0, 1.0),
///         Vertex::from_coords(0.0, 1.0, f64::NAN),
///     ],
///     vec![[0, 1, 2]],
/// );
///
/// assert_eq!(mesh.face_count(), 1);
/// assert_eq!(mesh.max_z(), Some(1.0));
/// assert!(!mesh.triangles().all(|t| t.is_finite()));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IndexedMesh {
    /// Vertices, indexed by the face triples.
    pub vertices: Vec<Vertex>,

    /// Counter-clockwise vertex index triples.
    pub faces: Vec<[u32; 3]>,
}

impl IndexedMesh {
    /// Mesh with no vertices or faces.
    #[must_use]
    pub const fn new() -> Self {
        Self::from_parts(Vec::new(), Vec::new())
    }

    /// Empty mesh with room reserved for the given counts.
    #[must_use]
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self::from_parts(
            Vec::with_capacity(vertex_count),
            Vec::with_capacity(face_count),
        )
    }

    /// Mesh assembled from existing buffers.
    #[must_use]
    pub const fn from_parts(vertices: Vec<Vertex>, faces: Vec<[u32; 3]>) -> Self {
        Self { vertices, faces }
    }

    /// Whether every face index points at an existing vertex.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{IndexedMesh, Vertex};
    ///
    /// let dangling = IndexedMesh::from_parts(
    ///     vec![Vertex::from_coords(0.0, 0.0, 0.0)],
    ///     vec![[0, 0, 1]],
    /// );
    /// assert!(!dangling.has_valid_indices());
    /// ```
    #[must_use]
    pub fn has_valid_indices(&self) -> bool {
        let len = self.vertices.len();
        self.faces.iter().flatten().all(|&i| (i as usize) < len)
    }

    /// Whether every vertex has a normal.
    #[must_use]
    pub fn has_normals(&self) -> bool {
        self.vertices.iter().all(|v| v.normal().is_some())
    }

    /// Whether the mesh has vertices and each one has a color.
    #[must_use]
    pub fn has_colors(&self) -> bool {
        !self.vertices.is_empty() && self.vertices.iter().all(|v| v.color().is_some())
    }

    /// Normals in vertex order.
    #[must_use]
    pub fn vertex_normals(&self) -> Vec<Option<Vector3<f64>>> {
        self.vertices.iter().map(Vertex::normal).collect()
    }

    /// Sum of triangle areas. NaN if any face touches a gap.
    #[must_use]
    pub fn surface_area(&self) -> f64 {
        self.triangles().map(|tri| tri.area()).sum()
    }

    /// Highest finite vertex height.
    #[must_use]
    pub fn max_z(&self) -> Option<f64> {
        self.finite_heights().reduce(f64::max)
    }

    /// Lowest finite vertex height.
    #[must_use]
    pub fn min_z(&self) -> Option<f64> {
        self.finite_heights().reduce(f64::min)
    }

    fn finite_heights(&self) -> impl Iterator<Item = f64> + '_ {
        self.vertices
            .iter()
            .filter(|v| !v.is_gap())
            .map(|v| v.position.z)
    }
}

impl MeshTopology for IndexedMesh {
    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn face_count(&self) -> usize {
        self.faces.len()
    }

    fn triangle(&self, face_index: usize) -> Option<Triangle> {
        let corner = |i: u32| self.vertices.get(i as usize).map(|v| v.position);
        let [a, b, c] = *self.faces.get(face_index)?;
        Some(Triangle::new(corner(a)?, corner(b)?, corner(c)?))
    }
}

impl MeshBounds for IndexedMesh {
    fn bounds(&self) -> Aabb {
        Aabb::from_points(self.vertices.iter().map(|v| &v.position))
    }
}
