//! Measurement channels with an append-only record of applied operations.

use std::fmt;

use mesh_heightfield::{Axis, HeightGrid, check_grid_shape};
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ConformalResult;
use crate::layer::add_conformal_layer;
use crate::ops::{min_to_zero, plane_level};

/// A transform that can be applied to a channel's height data.
///
/// Each variant carries its own arguments, so a history of operations can
/// be inspected, serialized and replayed.
///
/// # Example
///
/// ```
/// use mesh_conformal::Operation;
///
/// let op = Operation::ConformalLayer { thickness: 2.0, scale: 1e9 };
/// assert_eq!(op.name(), "conformal_layer");
/// assert_eq!(op.to_string(), "conformal_layer(thickness=2, scale=1000000000)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "op", rename_all = "snake_case"))]
pub enum Operation {
    /// Shift so the lowest finite sample is zero.
    MinToZero,
    /// Subtract the least-squares plane.
    PlaneLevel,
    /// Simulate a uniform coating.
    ConformalLayer {
        /// Layer thickness in scaled units.
        thickness: f64,
        /// Coordinate scale applied before meshing.
        scale: f64,
    },
}

impl Operation {
    /// Snake-case operation name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::MinToZero => "min_to_zero",
            Self::PlaneLevel => "plane_level",
            Self::ConformalLayer { .. } => "conformal_layer",
        }
    }

    /// Apply the operation, returning new height data.
    ///
    /// # Errors
    ///
    /// Propagates the error of the underlying operation.
    pub fn apply(&self, x: &Axis, y: &Axis, height: &HeightGrid) -> ConformalResult<HeightGrid> {
        match *self {
            Self::MinToZero => {
                check_grid_shape("height", height, x, y)?;
                Ok(min_to_zero(height))
            }
            Self::PlaneLevel => plane_level(x, y, height),
            Self::ConformalLayer { thickness, scale } => {
                add_conformal_layer(x, y, height, thickness, scale)
            }
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MinToZero | Self::PlaneLevel => f.write_str(self.name()),
            Self::ConformalLayer { thickness, scale } => {
                write!(f, "{}(thickness={thickness}, scale={scale})", self.name())
            }
        }
    }
}

/// Ordered, append-only log of operations applied to a channel.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChannelHistory {
    operations: Vec<Operation>,
}

impl ChannelHistory {
    /// Empty history.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            operations: Vec::new(),
        }
    }

    fn push(&mut self, op: Operation) {
        self.operations.push(op);
    }

    /// Number of recorded operations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Whether nothing has been applied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Most recent operation.
    #[must_use]
    pub fn last(&self) -> Option<&Operation> {
        self.operations.last()
    }

    /// Operations in application order.
    #[must_use]
    pub fn as_slice(&self) -> &[Operation] {
        &self.operations
    }

    /// Iterate in application order.
    pub fn iter(&self) -> std::slice::Iter<'_, Operation> {
        self.operations.iter()
    }
}

impl<'a> IntoIterator for &'a ChannelHistory {
    type Item = &'a Operation;
    type IntoIter = std::slice::Iter<'a, Operation>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// One measured quantity over the scan grid.
///
/// Accessors hand out copies, so callers can never modify the stored data
/// except through [`Channel::apply`], which also records the operation.
///
/// # Example
///
/// ```
/// use mesh_conformal::{Channel, Operation};
/// use mesh_heightfield::Axis;
/// use nalgebra::DMatrix;
///
/// let x = Axis::linspace("x", 0.0, 1.0, 3).unwrap();
/// let y = Axis::linspace("y", 0.0, 1.0, 3).unwrap();
/// let mut channel = Channel::new(0, x, y, DMatrix::from_element(3, 3, 5.0)).unwrap();
///
/// channel.apply(Operation::MinToZero).unwrap();
/// assert!(channel.data().iter().all(|&z| z == 0.0));
/// assert_eq!(channel.history().as_slice(), &[Operation::MinToZero]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Channel {
    index: usize,
    x: Axis,
    y: Axis,
    data: HeightGrid,
    history: ChannelHistory,
}

impl Channel {
    /// Create a channel with an empty history.
    ///
    /// # Errors
    ///
    /// Returns an invalid dimension error if `data` does not match the axes.
    pub fn new(index: usize, x: Axis, y: Axis, data: HeightGrid) -> ConformalResult<Self> {
        check_grid_shape("channel data", &data, &x, &y)?;
        Ok(Self {
            index,
            x,
            y,
            data,
            history: ChannelHistory::new(),
        })
    }

    /// Position of the channel in its source file.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Copy of the x axis.
    #[must_use]
    pub fn x(&self) -> Axis {
        self.x.clone()
    }

    /// Copy of the y axis.
    #[must_use]
    pub fn y(&self) -> Axis {
        self.y.clone()
    }

    /// Copy of the height data.
    #[must_use]
    pub fn data(&self) -> HeightGrid {
        self.data.clone()
    }

    /// Grid shape `(Nx, Ny)`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        self.data.shape()
    }

    /// Operations applied so far.
    #[must_use]
    pub const fn history(&self) -> &ChannelHistory {
        &self.history
    }

    /// Replace the data with `op` applied to it, and record `op`.
    ///
    /// # Errors
    ///
    /// Propagates the operation's error; the channel is left unchanged.
    pub fn apply(&mut self, op: Operation) -> ConformalResult<()> {
        let data = op.apply(&self.x, &self.y, &self.data)?;
        self.data = data;
        self.history.push(op);
        debug!(channel = self.index, op = %op, steps = self.history.len(), "Applied operation");
        Ok(())
    }
}
