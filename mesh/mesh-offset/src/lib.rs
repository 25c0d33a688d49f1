//! Offset surfaces for conformal-layer simulation.
//!
//! A conformal coating of uniform thickness is approximated by moving every
//! vertex of a surface along its own unit normal:
//!
//! ```text
//! vertex'[k] = vertex[k] + thickness * normal[k]
//! ```
//!
//! The offset mesh shares the input's faces and normals. It is not
//! re-triangulated, re-normalized or checked for self-intersection, so it is
//! a first-order approximation that holds while the thickness is small next
//! to the local radius of curvature. Large offsets over concave regions fold
//! the surface; [`offset_mesh`] logs a warning when the thickness exceeds the
//! shortest edge of the mesh, but folding is not an error.
//!
//! # Example
//!
//! ```
//! use mesh_types::{IndexedMesh, Vertex};
//! use mesh_offset::offset_mesh;
//! use nalgebra::{Point3, Vector3};
//!
//! let up = Vector3::new(0.0, 0.0, 1.0);
//! let mut mesh = IndexedMesh::new();
//! mesh.vertices.push(Vertex::with_normal(Point3::new(0.0, 0.0, 0.0), up));
//! mesh.vertices.push(Vertex::with_normal(Point3::new(1.0, 0.0, 0.0), up));
//! mesh.vertices.push(Vertex::with_normal(Point3::new(0.0, 1.0, 0.0), up));
//! mesh.faces.push([0, 1, 2]);
//!
//! let raised = offset_mesh(&mesh, 0.5).unwrap();
//! assert!(raised.vertices.iter().all(|v| v.position.z == 0.5));
//! assert_eq!(raised.faces, mesh.faces);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod offset;

pub use error::{OffsetError, OffsetResult};
pub use offset::{min_edge_length, offset_mesh};
