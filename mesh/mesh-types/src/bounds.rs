//! Axis-aligned bounding boxes for bounding-volume hierarchies.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box.
///
/// The empty box has `min = +inf` and `max = -inf`, so growing it by any
/// finite point yields that point.
///
/// # Example
///
/// ```
/// use mesh_types::{Aabb, Point3};
///
/// let corners = [Point3::new(0.0, 0.0, 0.0), Point3::new(4.0, 1.0, 2.0)];
/// let aabb = Aabb::from_points(corners.iter());
///
/// assert_eq!(aabb.longest_axis(), 0);
/// assert!(aabb.contains(&Point3::new(2.0, 0.5, 1.0)));
/// assert_eq!(aabb.expanded(1.0).min, Point3::new(-1.0, -1.0, -1.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aabb {
    /// Lower corner.
    pub min: Point3<f64>,
    /// Upper corner.
    pub max: Point3<f64>,
}

impl Aabb {
    /// Box spanning two corners given in any order.
    #[must_use]
    pub fn new(a: Point3<f64>, b: Point3<f64>) -> Self {
        let mut aabb = Self::empty();
        aabb.grow(&a);
        aabb.grow(&b);
        aabb
    }

    /// Box containing nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            min: Point3::from(Vector3::repeat(f64::INFINITY)),
            max: Point3::from(Vector3::repeat(f64::NEG_INFINITY)),
        }
    }

    /// Smallest box containing every point.
    ///
    /// NaN coordinates are skipped, so a gap vertex never widens the box.
    #[must_use]
    pub fn from_points<'a>(points: impl Iterator<Item = &'a Point3<f64>>) -> Self {
        points.fold(Self::empty(), |mut aabb, p| {
            aabb.grow(p);
            aabb
        })
    }

    /// Whether the box contains no point.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        (0..3).any(|axis| self.min[axis] > self.max[axis])
    }

    /// Edge lengths along x, y and z.
    #[must_use]
    pub fn extent(&self) -> Vector3<f64> {
        self.max - self.min
    }

    /// Axis of largest extent: 0 for x, 1 for y, 2 for z.
    ///
    /// Ties resolve to the lower axis.
    #[must_use]
    pub fn longest_axis(&self) -> usize {
        let extent = self.extent();
        (1..3).fold(0, |best, axis| {
            if extent[axis] > extent[best] {
                axis
            } else {
                best
            }
        })
    }

    /// Whether `point` lies inside or on the boundary.
    #[must_use]
    pub fn contains(&self, point: &Point3<f64>) -> bool {
        (0..3).all(|axis| self.min[axis] <= point[axis] && point[axis] <= self.max[axis])
    }

    /// Smallest box containing both.
    ///
    /// An empty operand leaves the other unchanged.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        if other.is_empty() {
            return *self;
        }
        if self.is_empty() {
            return *other;
        }
        let mut merged = *self;
        merged.grow(&other.min);
        merged.grow(&other.max);
        merged
    }

    /// Grow the box to include `point`.
    pub fn grow(&mut self, point: &Point3<f64>) {
        for axis in 0..3 {
            // f64::min/max ignore a NaN operand
            self.min[axis] = self.min[axis].min(point[axis]);
            self.max[axis] = self.max[axis].max(point[axis]);
        }
    }

    /// Box padded by `margin` on every side.
    #[must_use]
    pub fn expanded(&self, margin: f64) -> Self {
        let pad = Vector3::repeat(margin);
        Self {
            min: self.min - pad,
            max: self.max + pad,
        }
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}
