//! Surface samples: position, estimated normal and display color.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 8-bit RGBA display color of a vertex.
///
/// Colors produced by a colormap are opaque. A transparent color marks a
/// sample whose color channel had a gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VertexColor {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha, 255 is opaque.
    pub a: u8,
}

impl VertexColor {
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Transparent black, used for gap samples.
    pub const TRANSPARENT: Self = Self { a: 0, ..Self::BLACK };

    /// Opaque color from 8-bit channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Opaque color from unit-range channels.
    ///
    /// Each channel is clamped to `[0, 1]` and rounded to the nearest level.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::VertexColor;
    ///
    /// let c = VertexColor::from_float(1.0, 0.5, -3.0);
    /// assert_eq!((c.r, c.g, c.b, c.a), (255, 128, 0, 255));
    /// ```
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_float(r: f64, g: f64, b: f64) -> Self {
        // clamped to [0, 255] before the cast
        let level = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::new(level(r), level(g), level(b))
    }

    /// Whether alpha is 255.
    #[must_use]
    pub const fn is_opaque(self) -> bool {
        self.a == u8::MAX
    }
}

/// Per-vertex data carried alongside the position.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VertexAttributes {
    /// Upward unit normal estimated from the height gradient.
    pub normal: Option<Vector3<f64>>,

    /// Colormapped value of a secondary channel.
    pub color: Option<VertexColor>,
}

impl VertexAttributes {
    /// Attributes holding only a normal.
    #[must_use]
    pub const fn with_normal(normal: Vector3<f64>) -> Self {
        Self {
            normal: Some(normal),
            color: None,
        }
    }
}

/// One surface sample.
///
/// For a height-field mesh `position` is `(x[i], y[j], h[i, j])`. A gap in
/// the measurement leaves `position.z` as NaN.
///
/// # Example
///
/// ```
/// use mesh_types::{Point3, Vector3, Vertex};
///
/// let v = Vertex::with_normal(Point3::new(1.0, 2.0, 0.5), Vector3::z());
/// assert_eq!(v.normal(), Some(Vector3::z()));
/// assert!(v.color().is_none());
/// assert!(Vertex::from_coords(0.0, 0.0, f64::NAN).is_gap());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vertex {
    /// Position in the mesh frame.
    pub position: Point3<f64>,

    /// Normal and color.
    pub attributes: VertexAttributes,
}

impl Vertex {
    /// Vertex without attributes.
    #[must_use]
    pub fn new(position: Point3<f64>) -> Self {
        Self {
            position,
            attributes: VertexAttributes::default(),
        }
    }

    /// Vertex without attributes at `(x, y, z)`.
    #[must_use]
    pub fn from_coords(x: f64, y: f64, z: f64) -> Self {
        Self::new(Point3::new(x, y, z))
    }

    /// Vertex with a normal.
    #[must_use]
    pub const fn with_normal(position: Point3<f64>, normal: Vector3<f64>) -> Self {
        Self {
            position,
            attributes: VertexAttributes::with_normal(normal),
        }
    }

    /// The normal, if estimated.
    #[must_use]
    pub const fn normal(&self) -> Option<Vector3<f64>> {
        self.attributes.normal
    }

    /// The color, if mapped.
    #[must_use]
    pub const fn color(&self) -> Option<VertexColor> {
        self.attributes.color
    }

    /// Whether the sample has no finite height.
    #[must_use]
    pub fn is_gap(&self) -> bool {
        !self.position.z.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_levels_round_and_clamp() {
        assert_eq!(VertexColor::from_float(0.0, 1.0, 2.0), VertexColor::new(0, 255, 255));
        assert_eq!(VertexColor::from_float(0.2, 0.2, 0.2).r, 51);
        assert!(VertexColor::WHITE.is_opaque());
        assert!(!VertexColor::TRANSPARENT.is_opaque());
        assert_eq!(VertexColor::TRANSPARENT.r, 0);
    }

    #[test]
    fn attributes_default_to_none() {
        let v = Vertex::from_coords(1.0, 2.0, 3.0);
        assert_eq!(v.attributes, VertexAttributes::default());
        assert!(!v.is_gap());
    }

    #[test]
    fn normal_only_attributes() {
        let attributes = VertexAttributes::with_normal(-Vector3::z());
        assert_eq!(attributes.normal, Some(Vector3::new(0.0, 0.0, -1.0)));
        assert!(attributes.color.is_none());
    }
}
