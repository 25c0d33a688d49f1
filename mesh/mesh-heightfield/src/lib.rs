//! Triangulated surfaces from gridded height measurements.
//!
//! Atomic-force-microscopy images arrive as a regular grid of heights
//! indexed by two strictly increasing axes. This crate turns such a grid
//! into geometry:
//!
//! - [`CoordinateGrid`] pairs every `x[i]` with every `y[j]`
//! - [`NormalField`] estimates a unit normal per sample from the height
//!   gradient
//! - [`build_mesh`] / [`build_mesh_with`] assemble an [`IndexedMesh`] with one
//!   vertex per sample, two triangles per grid cell, per-vertex normals and
//!   optional colormapped vertex colors
//!
//! # Flattening
//!
//! Sample `(i, j)` maps to vertex `i * ny + j` ([`flat_index`]). Normals,
//! colors and face indices all use this rule.
//!
//! # Degenerate Normals
//!
//! Where the gradient cannot be normalized (gap samples make it NaN), the
//! sample receives [`DEFAULT_NORMAL`], straight up `(0, 0, 1)`.
//!
//! # Example
//!
//! ```
//! use mesh_heightfield::{Axis, build_mesh};
//! use mesh_types::MeshTopology;
//! use nalgebra::DMatrix;
//!
//! let x = Axis::linspace("x", 0.0, 1.0, 5).unwrap();
//! let y = Axis::linspace("y", 0.0, 1.0, 5).unwrap();
//! let height = DMatrix::from_fn(5, 5, |i, j| 0.1 * (i * j) as f64);
//!
//! let mesh = build_mesh(&x, &y, &height, None).unwrap();
//! assert_eq!(mesh.vertex_count(), 25);
//! assert_eq!(mesh.face_count(), 32);
//! ```
//!
//! [`IndexedMesh`]: mesh_types::IndexedMesh

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod axis;
mod builder;
mod colormap;
mod coords;
mod error;
mod normals;

pub use axis::{Axis, HeightGrid, check_grid_shape, finite_max, finite_min};
pub use builder::{MeshBuildParams, build_mesh, build_mesh_with, grid_faces};
pub use colormap::Colormap;
pub use coords::{CoordinateGrid, flat_index, unflatten_index};
pub use error::{HeightfieldError, HeightfieldResult};
pub use normals::{DEFAULT_NORMAL, NormalField, gradient, normal_from_gradient};
