//! Mesh primitives shared by the height-field crates.
//!
//! - [`Vertex`] with an optional upward normal and display color
//! - [`IndexedMesh`], vertices plus index-triple faces
//! - [`Triangle`], a face with its corners resolved
//! - [`Aabb`], the box type used by the ray-casting BVH
//!
//! # Frames
//!
//! Coordinates are plain `f64` with no unit attached. Scan axes map to X
//! and Y, height to Z, in a right-handed frame. Height-field faces wind
//! counter-clockwise seen from +Z, so their normals point away from the
//! sample.
//!
//! Missing measurements propagate as NaN heights. Such vertices report
//! [`Vertex::is_gap`], and every face touching one fails
//! [`Triangle::is_finite`].
//!
//! # Example
//!
//! ```
//! use mesh_types::{IndexedMesh, MeshBounds, MeshTopology, Point3, Vertex};
//!
//! let mut mesh = IndexedMesh::new();
//! for (x, y) in [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)] {
//!     mesh.vertices.push(Vertex::new(Point3::new(x, y, 0.5)));
//! }
//! mesh.faces.push([0, 1, 2]);
//!
//! assert!(!mesh.is_empty());
//! assert_eq!(mesh.bounds().max, Point3::new(1.0, 1.0, 0.5));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod bounds;
mod mesh;
mod traits;
mod triangle;
mod vertex;

pub use bounds::Aabb;
pub use mesh::IndexedMesh;
pub use traits::{MeshBounds, MeshTopology};
pub use triangle::Triangle;
pub use vertex::{Vertex, VertexAttributes, VertexColor};

pub use nalgebra::{Point3, Vector3};
