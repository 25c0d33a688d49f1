//! Normal-displacement offset of a mesh.

use mesh_types::{IndexedMesh, Vertex, VertexAttributes};
use tracing::{debug, info, warn};

use crate::error::{OffsetError, OffsetResult};

/// Offset every vertex along its normal by `thickness`.
///
/// The result keeps the input's faces and vertex normals and drops vertex
/// colors. A zero thickness reproduces the input positions exactly.
///
/// # Arguments
///
/// * `mesh` - Mesh whose vertices all carry a normal
/// * `thickness` - Displacement distance, `>= 0`
///
/// # Errors
///
/// Returns an error if:
/// - `thickness` is negative or not finite ([`OffsetError::InvalidParameter`])
/// - the mesh has no faces ([`OffsetError::EmptyMesh`])
/// - a vertex has no normal ([`OffsetError::MissingNormal`])
///
/// # Example
///
/// ```
/// use mesh_types::{IndexedMesh, Vertex};
/// use mesh_offset::{OffsetError, offset_mesh};
/// use nalgebra::{Point3, Vector3};
///
/// let n = Vector3::new(0.0, 0.0, 1.0);
/// let mesh = IndexedMesh::from_parts(
///     vec![
///         Vertex::with_normal(Point3::new(0.0, 0.0, 1.0), n),
///         Vertex::with_normal(Point3::new(1.0, 0.0, 1.0), n),
///         Vertex::with_normal(Point3::new(0.0, 1.0, 1.0), n),
///     ],
///     vec![[0, 1, 2]],
/// );
///
/// let same = offset_mesh(&mesh, 0.0).unwrap();
/// assert_eq!(same.vertices, mesh.vertices);
///
/// let err = offset_mesh(&mesh, -0.1).unwrap_err();
/// assert!(matches!(err, OffsetError::InvalidParameter(_)));
/// ```
pub fn offset_mesh(mesh: &IndexedMesh, thickness: f64) -> OffsetResult<IndexedMesh> {
    if !thickness.is_finite() || thickness < 0.0 {
        return Err(OffsetError::invalid_parameter(format!(
            "thickness must be finite and >= 0, got {thickness}"
        )));
    }
    if mesh.faces.is_empty() {
        return Err(OffsetError::EmptyMesh);
    }

    let mut vertices = Vec::with_capacity(mesh.vertices.len());
    for (index, vertex) in mesh.vertices.iter().enumerate() {
        let normal = vertex
            .normal()
            .ok_or(OffsetError::MissingNormal { vertex: index })?;
        vertices.push(Vertex {
            position: vertex.position + normal * thickness,
            attributes: VertexAttributes::with_normal(normal),
        });
    }

    if let Some(edge) = min_edge_length(mesh) {
        debug!(thickness, min_edge = edge, "Offset relative to mesh spacing");
        if thickness > edge {
            warn!(
                thickness,
                min_edge = edge,
                "Offset exceeds the shortest mesh edge; the surface may fold"
            );
        }
    }

    info!(
        vertices = vertices.len(),
        faces = mesh.faces.len(),
        thickness,
        "Built offset surface"
    );

    Ok(IndexedMesh::from_parts(vertices, mesh.faces.clone()))
}

/// Length of the shortest finite, non-zero edge in the mesh.
///
/// Faces with out-of-range indices are skipped. Returns `None` when no edge
/// qualifies.
#[must_use]
pub fn min_edge_length(mesh: &IndexedMesh) -> Option<f64> {
    let position = |i: u32| mesh.vertices.get(i as usize).map(|v| v.position);

    mesh.faces
        .iter()
        .filter_map(|&[a, b, c]| Some([position(a)?, position(b)?, position(c)?]))
        .flat_map(|[p0, p1, p2]| [(p1 - p0).norm(), (p2 - p1).norm(), (p0 - p2).norm()])
        .filter(|len| len.is_finite() && *len > 0.0)
        .fold(None, |shortest: Option<f64>, len| {
            Some(shortest.map_or(len, |s| s.min(len)))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mesh_types::{MeshTopology, VertexColor};
    use nalgebra::{Point3, Vector3};

    /// Unit square in the z = 0 plane with tilted normals.
    fn tilted_square() -> IndexedMesh {
        let n = Vector3::new(1.0, 0.0, 1.0).normalize();
        let mut mesh = IndexedMesh::new();
        for (x, y) in [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)] {
            let mut v = Vertex::with_normal(Point3::new(x, y, 0.0), n);
            v.attributes.color = Some(VertexColor::WHITE);
            mesh.vertices.push(v);
        }
        mesh.faces.push([0, 1, 2]);
        mesh.faces.push([1, 3, 2]);
        mesh
    }

    #[test]
    fn offset_moves_along_normals() {
        let mesh = tilted_square();
        let offset = offset_mesh(&mesh, 2.0).unwrap();

        let s = std::f64::consts::SQRT_2;
        let p = offset.vertices[3].position;
        assert_relative_eq!(p.x, 1.0 + s, epsilon = 1e-12);
        assert_relative_eq!(p.y, 1.0, epsilon = 1e-12);
        assert_relative_eq!(p.z, s, epsilon = 1e-12);
    }

    #[test]
    fn offset_keeps_topology_and_normals() {
        let mesh = tilted_square();
        let offset = offset_mesh(&mesh, 0.25).unwrap();

        assert_eq!(offset.faces, mesh.faces);
        assert_eq!(offset.vertex_count(), mesh.vertex_count());
        assert_eq!(offset.vertex_normals(), mesh.vertex_normals());
    }

    #[test]
    fn offset_drops_colors() {
        let offset = offset_mesh(&tilted_square(), 0.25).unwrap();
        assert!(!offset.has_colors());
    }

    #[test]
    fn offset_zero_is_identity() {
        let mesh = tilted_square();
        let offset = offset_mesh(&mesh, 0.0).unwrap();
        for (a, b) in offset.vertices.iter().zip(&mesh.vertices) {
            assert_eq!(a.position, b.position);
        }
    }

    #[test]
    fn offset_negative_fails() {
        let err = offset_mesh(&tilted_square(), -1.0).unwrap_err();
        assert!(matches!(err, OffsetError::InvalidParameter(_)));
    }

    #[test]
    fn offset_non_finite_fails() {
        assert!(offset_mesh(&tilted_square(), f64::NAN).is_err());
        assert!(offset_mesh(&tilted_square(), f64::INFINITY).is_err());
    }

    #[test]
    fn offset_empty_mesh_fails() {
        let err = offset_mesh(&IndexedMesh::new(), 0.1).unwrap_err();
        assert_eq!(err, OffsetError::EmptyMesh);
    }

    #[test]
    fn offset_missing_normal_fails() {
        let mut mesh = tilted_square();
        mesh.vertices[2].attributes.normal = None;
        let err = offset_mesh(&mesh, 0.1).unwrap_err();
        assert_eq!(err, OffsetError::MissingNormal { vertex: 2 });
    }

    #[test]
    fn offset_does_not_alias_input() {
        let mesh = tilted_square();
        let mut offset = offset_mesh(&mesh, 1.0).unwrap();
        offset.vertices[0].position.z = 100.0;
        assert_eq!(mesh.vertices[0].position.z, 0.0);
    }

    #[test]
    fn min_edge_of_square() {
        let mesh = tilted_square();
        assert_relative_eq!(min_edge_length(&mesh).unwrap(), 1.0);
        assert_eq!(min_edge_length(&IndexedMesh::new()), None);
    }

    #[test]
    fn min_edge_skips_gap_vertices() {
        let mut mesh = tilted_square();
        mesh.vertices[0].position.z = f64::NAN;
        // Only the second face has finite edges.
        assert_relative_eq!(min_edge_length(&mesh).unwrap(), 1.0);
    }
}
