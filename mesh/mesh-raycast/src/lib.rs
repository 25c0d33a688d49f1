//! Ray casting against triangle meshes and vertical-ray grid resampling.
//!
//! The resampler recovers a height grid from an arbitrary surface (for
//! example an offset "coating" of a height-field mesh) by dropping one
//! vertical ray per source vertex onto it.
//!
//! # Algorithm
//!
//! 1. Build a bounding volume hierarchy over the target's finite triangles
//!    (median split on the longest axis)
//! 2. From `ray_clearance` above the target's highest vertex, cast a ray
//!    straight down at every source vertex's `(x, y)` and keep the nearest
//!    Möller–Trumbore hit
//! 3. Map each hit back to a grid cell with a left-biased sorted search on
//!    the axes, and write its height there in source-vertex order
//!
//! Rays that miss leave `NaN` in their cell. This is how the resampler
//! reports regions shadowed by an overhang of the target, and it is not an
//! error.
//!
//! Rays are independent and run on the rayon thread pool when
//! [`ResampleParams::parallel`] is set; the scatter always runs
//! sequentially, so results do not depend on thread scheduling.
//!
//! # Example
//!
//! ```
//! use mesh_raycast::{ResampleParams, resample};
//! use mesh_types::{IndexedMesh, Vertex};
//!
//! let mut surface = IndexedMesh::new();
//! for (x, y) in [(0.0, 0.0), (0.0, 1.0), (1.0, 0.0), (1.0, 1.0)] {
//!     surface.vertices.push(Vertex::from_coords(x, y, 0.5));
//! }
//! surface.faces = vec![[0, 2, 1], [2, 3, 1]];
//!
//! let axis = [0.0, 1.0];
//! let result = resample(&surface, &surface, &axis, &axis, (2, 2), &ResampleParams::default())
//!     .unwrap();
//! println!("{}", result.stats);
//! assert!(!result.has_gaps());
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod bvh;
mod error;
mod params;
mod resample;
mod result;

pub use bvh::{Bvh, Ray, RayHit, ray_triangle_intersect};
pub use error::{RaycastError, RaycastResult};
pub use params::ResampleParams;
pub use resample::{resample, search_sorted_left};
pub use result::{ResampleResult, ResampleStats};
