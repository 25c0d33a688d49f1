//! Read-only views over a triangle mesh.

use crate::{Aabb, Triangle};

/// Counting and triangle lookup, independent of storage layout.
pub trait MeshTopology {
    /// Number of vertices.
    fn vertex_count(&self) -> usize;

    /// Number of triangular faces.
    fn face_count(&self) -> usize;

    /// Whether there is nothing to render or intersect.
    ///
    /// A mesh with vertices but no faces counts as empty.
    fn is_empty(&self) -> bool {
        self.face_count() == 0 || self.vertex_count() == 0
    }

    /// Corner positions of face `face_index`.
    ///
    /// `None` when the face does not exist or references a missing vertex.
    fn triangle(&self, face_index: usize) -> Option<Triangle>;

    /// Every resolvable face, in face order.
    ///
    /// Faces with dangling indices are skipped.
    fn triangles(&self) -> impl Iterator<Item = Triangle> {
        (0..self.face_count()).filter_map(|face| self.triangle(face))
    }
}

/// Spatial extent of a mesh.
pub trait MeshBounds {
    /// Box around every vertex with a finite coordinate.
    ///
    /// Empty when there are no vertices.
    fn bounds(&self) -> Aabb;
}
