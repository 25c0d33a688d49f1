//! Height-grid meshing and conformal-layer simulation for scanning-probe
//! microscopy data.
//!
//! Everything from a raw height grid to a coated surface is reachable from
//! here: each member crate is re-exported under a short module name, and
//! [`prelude`] collects the handful of items most callers need. Nothing
//! here pulls in a renderer.
//!
//! # Quick Start
//!
//! ```
//! use mesh::prelude::*;
//! use nalgebra::DMatrix;
//!
//! // A 32 x 32 scan on a 1 nm pitch, heights in meters
//! let x = Axis::linspace("x", 0.0, 31e-9, 32).unwrap();
//! let y = Axis::linspace("y", 0.0, 31e-9, 32).unwrap();
//! let height = DMatrix::from_fn(32, 32, |i, j| 1e-9 * ((i + j) as f64 * 0.2).sin());
//!
//! // Triangulate for display
//! let surface = build_mesh(&x, &y, &height, None).unwrap();
//! assert_eq!(surface.vertex_count(), 32 * 32);
//!
//! // Simulate a 2 nm coating (thickness is in the scaled, nanometer frame)
//! let coated = add_conformal_layer(&x, &y, &height, 2.0, 1e9).unwrap();
//! assert_eq!(coated.shape(), height.shape());
//! ```
//!
//! # Crates
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`types`] | `IndexedMesh`, `Vertex`, `Triangle`, `Aabb` |
//! | [`heightfield`] | axes, coordinate grids, gradient normals, `build_mesh` |
//! | [`offset`] | displacement along vertex normals |
//! | [`raycast`] | BVH, vertical ray casting, grid resampling |
//! | [`conformal`] | conformal layer, leveling, channels, images |
//!
//! # Feature Flags
//!
//! - `serde` - Serialization for parameters, stats, colors and operation
//!   histories

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![doc(html_root_url = "https://docs.rs/mesh/0.3.0")]

// =============================================================================
// Re-exports
// =============================================================================

/// Vertices, indexed meshes, triangles and boxes.
pub use mesh_types as types;

/// Axes, coordinate grids, gradient normals and mesh building.
pub use mesh_heightfield as heightfield;

/// Per-vertex offset along normals.
pub use mesh_offset as offset;

/// BVH ray casting and grid resampling.
pub use mesh_raycast as raycast;

/// Conformal layer, leveling, channels and images.
pub use mesh_conformal as conformal;

// =============================================================================
// Prelude
// =============================================================================

/// Glob-import this for the usual height-grid workflow.
///
/// ```
/// use mesh::prelude::*;
///
/// let x = Axis::new("x", vec![0.0, 1.0]).unwrap();
/// assert_eq!(x.len(), 2);
/// ```
pub mod prelude {
    // Core types
    pub use mesh_types::{Aabb, IndexedMesh, MeshBounds, MeshTopology, Triangle, Vertex};

    // Meshing
    pub use mesh_heightfield::{Axis, CoordinateGrid, HeightGrid, NormalField, build_mesh};

    // Offset and resampling
    pub use mesh_offset::offset_mesh;
    pub use mesh_raycast::{ResampleParams, resample};

    // Pipeline (main use case)
    pub use mesh_conformal::{
        Channel, ConformalError, ConformalParams, Image, Operation, add_conformal_layer,
        add_conformal_layer_with,
    };
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prelude_covers_the_pipeline() {
        use prelude::*;

        let empty = IndexedMesh::new();
        assert!(empty.is_empty());
        assert!(ConformalParams::new(1.0).validate().is_ok());
    }

    #[test]
    fn crates_are_reachable_by_module() {
        let _ = types::Aabb::empty();
        let _ = heightfield::Colormap::default();
        let _ = raycast::ResampleParams::default();
        let _ = conformal::ConformalParams::default();
    }
}
