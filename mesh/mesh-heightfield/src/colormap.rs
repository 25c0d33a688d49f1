//! Named colormaps for per-vertex coloring.
//!
//! Each map is a piecewise-linear approximation of the matplotlib map of the
//! same name, sampled at evenly spaced control points.

use std::fmt;
use std::str::FromStr;

use mesh_types::VertexColor;
use nalgebra::DMatrix;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::HeightfieldError;

const VIRIDIS: &[[f64; 3]] = &[
    [0.267_004, 0.004_874, 0.329_415],
    [0.282_623, 0.140_926, 0.457_517],
    [0.229_739, 0.322_361, 0.545_706],
    [0.172_719, 0.448_791, 0.557_885],
    [0.127_568, 0.566_949, 0.550_556],
    [0.157_851, 0.683_765, 0.501_686],
    [0.369_214, 0.788_888, 0.382_914],
    [0.678_489, 0.863_742, 0.189_503],
    [0.993_248, 0.906_157, 0.143_936],
];

const PLASMA: &[[f64; 3]] = &[
    [0.050_383, 0.029_803, 0.527_975],
    [0.274_191, 0.012_109, 0.622_722],
    [0.494_877, 0.011_990, 0.657_865],
    [0.665_129, 0.138_566, 0.585_582],
    [0.798_216, 0.280_197, 0.469_538],
    [0.902_323, 0.412_952, 0.351_413],
    [0.973_381, 0.558_148, 0.244_862],
    [0.995_131, 0.733_040, 0.155_902],
    [0.940_015, 0.975_158, 0.131_326],
];

const INFERNO: &[[f64; 3]] = &[
    [0.001_462, 0.000_466, 0.013_866],
    [0.087_411, 0.044_556, 0.224_813],
    [0.258_234, 0.038_571, 0.406_485],
    [0.416_331, 0.090_203, 0.432_943],
    [0.578_304, 0.148_039, 0.404_411],
    [0.735_683, 0.215_906, 0.330_245],
    [0.865_006, 0.316_822, 0.226_055],
    [0.954_506, 0.468_744, 0.099_874],
    [0.988_362, 0.998_364, 0.644_924],
];

const MAGMA: &[[f64; 3]] = &[
    [0.001_462, 0.000_466, 0.013_866],
    [0.078_815, 0.054_184, 0.211_667],
    [0.232_077, 0.059_889, 0.437_695],
    [0.390_384, 0.100_379, 0.501_864],
    [0.550_287, 0.161_158, 0.505_719],
    [0.716_387, 0.214_982, 0.475_290],
    [0.868_793, 0.287_728, 0.409_303],
    [0.967_671, 0.439_703, 0.359_810],
    [0.987_053, 0.991_438, 0.749_504],
];

const CIVIDIS: &[[f64; 3]] = &[
    [0.000_000, 0.135_112, 0.304_751],
    [0.263_663, 0.298_819, 0.425_409],
    [0.487_026, 0.482_970, 0.471_780],
    [0.737_331, 0.683_040, 0.446_799],
    [0.995_737, 0.909_344, 0.217_772],
];

const GRAY: &[[f64; 3]] = &[[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]];

/// A named colormap.
///
/// # Example
///
/// ```
/// use mesh_heightfield::Colormap;
/// use mesh_types::VertexColor;
///
/// let map: Colormap = "Gray".parse().unwrap();
/// assert_eq!(map.sample(0.0), VertexColor::BLACK);
/// assert_eq!(map.sample(1.0), VertexColor::WHITE);
/// assert!("rainbow".parse::<Colormap>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Colormap {
    /// Perceptually uniform blue-green-yellow map.
    #[default]
    Viridis,
    /// Perceptually uniform blue-red-yellow map.
    Plasma,
    /// Perceptually uniform black-red-yellow map.
    Inferno,
    /// Perceptually uniform black-purple-cream map.
    Magma,
    /// Color-vision-deficiency friendly blue-yellow map.
    Cividis,
    /// Linear black to white.
    Gray,
}

impl Colormap {
    /// All supported maps.
    pub const ALL: [Self; 6] = [
        Self::Viridis,
        Self::Plasma,
        Self::Inferno,
        Self::Magma,
        Self::Cividis,
        Self::Gray,
    ];

    /// Canonical lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Viridis => "viridis",
            Self::Plasma => "plasma",
            Self::Inferno => "inferno",
            Self::Magma => "magma",
            Self::Cividis => "cividis",
            Self::Gray => "gray",
        }
    }

    const fn control_points(self) -> &'static [[f64; 3]] {
        match self {
            Self::Viridis => VIRIDIS,
            Self::Plasma => PLASMA,
            Self::Inferno => INFERNO,
            Self::Magma => MAGMA,
            Self::Cividis => CIVIDIS,
            Self::Gray => GRAY,
        }
    }

    /// Opaque color at position `t` in `[0, 1]`; `t` is clamped.
    ///
    /// A non-finite `t` yields [`VertexColor::TRANSPARENT`].
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn sample(self, t: f64) -> VertexColor {
        if !t.is_finite() {
            return VertexColor::TRANSPARENT;
        }

        let points = self.control_points();
        let segments = points.len() - 1;
        let scaled = t.clamp(0.0, 1.0) * segments as f64;
        let lower = (scaled.floor() as usize).min(segments - 1);
        let frac = scaled - lower as f64;

        let [r0, g0, b0] = points[lower];
        let [r1, g1, b1] = points[lower + 1];
        VertexColor::from_float(
            (r1 - r0).mul_add(frac, r0),
            (g1 - g0).mul_add(frac, g0),
            (b1 - b0).mul_add(frac, b0),
        )
    }

    /// Map every sample of `values` to a color, in flattened `(i, j)` order.
    ///
    /// Values are normalized over their finite range; a constant field maps
    /// to the start of the colormap and gap samples become transparent.
    #[must_use]
    pub fn map_grid(self, values: &DMatrix<f64>) -> Vec<VertexColor> {
        let (lo, hi) = values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        let span = hi - lo;

        let (nx, ny) = values.shape();
        let mut colors = Vec::with_capacity(nx * ny);
        for i in 0..nx {
            for j in 0..ny {
                let v = values[(i, j)];
                let t = if !v.is_finite() {
                    f64::NAN
                } else if span > 0.0 {
                    (v - lo) / span
                } else {
                    0.0
                };
                colors.push(self.sample(t));
            }
        }
        colors
    }
}

impl fmt::Display for Colormap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Colormap {
    type Err = HeightfieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "viridis" => Ok(Self::Viridis),
            "plasma" => Ok(Self::Plasma),
            "inferno" => Ok(Self::Inferno),
            "magma" => Ok(Self::Magma),
            "cividis" => Ok(Self::Cividis),
            "gray" | "grey" => Ok(Self::Gray),
            other => Err(HeightfieldError::invalid_parameter(format!(
                "unknown colormap `{other}`"
            ))),
        }
    }
}
