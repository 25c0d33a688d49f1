//! Conformal-layer simulation for atomic-force-microscopy height grids.
//!
//! [`add_conformal_layer`] estimates what a scan would look like after a
//! coating of uniform thickness has been deposited on the sample:
//!
//! ```text
//! height grid ──▶ mesh + normals ──▶ offset surface ──▶ vertical rays ──▶ height grid
//!             mesh-heightfield      mesh-offset         mesh-raycast
//! ```
//!
//! Measurement coordinates are often around `1e-9`, where the geometry is
//! poorly conditioned, so the pipeline multiplies `x`, `y` and heights by a
//! `scale` before meshing and divides the result by it afterwards.
//!
//! Cells whose downward ray misses the coating come back as `NaN`. They mark
//! places shadowed by the coating's own overhang, such as the walls of deep
//! narrow pits or a scan border the coating has leaned away from.
//!
//! The crate also carries the bookkeeping around a scan:
//!
//! - [`ops`]: [`ops::min_to_zero`] and [`ops::plane_level`] leveling
//! - [`Operation`]: a tagged record of one transform with its arguments
//! - [`Channel`]: height data plus an append-only [`ChannelHistory`]
//! - [`Image`]: channels looked up by label
//!
//! # Example
//!
//! ```
//! use mesh_conformal::{Channel, Operation};
//! use mesh_heightfield::Axis;
//! use nalgebra::DMatrix;
//!
//! let x = Axis::linspace("x", 0.0, 1e-9, 6).unwrap();
//! let y = Axis::linspace("y", 0.0, 1e-9, 6).unwrap();
//! let height = DMatrix::from_fn(6, 6, |i, j| 1e-10 * (i + j) as f64 + 5e-9);
//!
//! let mut channel = Channel::new(0, x, y, height).unwrap();
//! channel.apply(Operation::PlaneLevel).unwrap();
//! channel
//!     .apply(Operation::ConformalLayer { thickness: 0.5, scale: 1e9 })
//!     .unwrap();
//! assert_eq!(channel.history().len(), 2);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod channel;
mod error;
mod image;
mod layer;
pub mod ops;
mod params;

pub use channel::{Channel, ChannelHistory, Operation};
pub use error::{ConformalError, ConformalResult};
pub use image::Image;
pub use layer::{add_conformal_layer, add_conformal_layer_with};
pub use params::ConformalParams;
