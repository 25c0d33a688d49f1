//! Resolved triangle corners.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A mesh face with its corner positions looked up.
///
/// Ray casting and bounding-volume construction work on these rather than
/// on index triples.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Triangle {
    /// First corner.
    pub v0: Point3<f64>,
    /// Second corner.
    pub v1: Point3<f64>,
    /// Third corner.
    pub v2: Point3<f64>,
}

impl Triangle {
    /// Triangle from three corners in winding order.
    #[must_use]
    pub const fn new(v0: Point3<f64>, v1: Point3<f64>, v2: Point3<f64>) -> Self {
        Self { v0, v1, v2 }
    }

    /// Corners as an array.
    #[must_use]
    pub const fn vertices(&self) -> [Point3<f64>; 3] {
        [self.v0, self.v1, self.v2]
    }

    /// The two edges leaving `v0`: `(v1 - v0, v2 - v0)`.
    #[must_use]
    pub fn edges(&self) -> (Vector3<f64>, Vector3<f64>) {
        (self.v1 - self.v0, self.v2 - self.v0)
    }

    /// Unit normal by the right-hand rule, `None` for a sliver.
    ///
    /// A grid cell triangle wound counter-clockwise seen from +Z has a
    /// normal with positive z.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{Point3, Triangle};
    ///
    /// let up = Triangle::new(
    ///     Point3::new(0.0, 0.0, 0.0),
    ///     Point3::new(1.0, 0.0, 0.0),
    ///     Point3::new(0.0, 1.0, 0.0),
    /// );
    /// assert_eq!(up.normal().map(|n| n.z), Some(1.0));
    ///
    /// let sliver = Triangle::new(up.v0, up.v1, Point3::new(2.0, 0.0, 0.0));
    /// assert!(sliver.normal().is_none());
    /// ```
    #[must_use]
    pub fn normal(&self) -> Option<Vector3<f64>> {
        let (e1, e2) = self.edges();
        e1.cross(&e2).try_normalize(f64::EPSILON)
    }

    /// Area of the triangle.
    #[must_use]
    pub fn area(&self) -> f64 {
        let (e1, e2) = self.edges();
        0.5 * e1.cross(&e2).norm()
    }

    /// Mean of the three corners.
    #[must_use]
    pub fn centroid(&self) -> Point3<f64> {
        Point3::from((self.v0.coords + self.v1.coords + self.v2.coords) / 3.0)
    }

    /// Whether no corner has a NaN or infinite coordinate.
    ///
    /// Faces touching a gap sample fail this check.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.vertices()
            .iter()
            .all(|p| p.coords.iter().all(|c| c.is_finite()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell_half(z: f64) -> Triangle {
        Triangle::new(
            Point3::new(0.0, 0.0, z),
            Point3::new(2.0, 0.0, z),
            Point3::new(0.0, 2.0, z),
        )
    }

    #[test]
    fn area_and_centroid() {
        let tri = cell_half(1.0);
        assert!((tri.area() - 2.0).abs() < 1e-12);
        let c = tri.centroid();
        assert!((c.x - 2.0 / 3.0).abs() < 1e-12);
        assert!((c.z - 1.0).abs() < 1e-12);
    }

    #[test]
    fn reversed_winding_points_down() {
        let tri = cell_half(0.0);
        let flipped = Triangle::new(tri.v0, tri.v2, tri.v1);
        assert_eq!(flipped.normal().map(|n| n.z), Some(-1.0));
    }

    #[test]
    fn gap_corner_is_not_finite() {
        let mut tri = cell_half(0.0);
        assert!(tri.is_finite());
        tri.v2.z = f64::NAN;
        assert!(!tri.is_finite());
    }
}
