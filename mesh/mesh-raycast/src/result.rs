//! Result types for ray resampling.

use nalgebra::DMatrix;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Counters collected during a resample.
///
/// # Example
///
/// ```
/// use mesh_raycast::ResampleStats;
///
/// let stats = ResampleStats::default();
/// assert_eq!(stats.rays_cast, 0);
/// assert!((stats.coverage_percent() - 0.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ResampleStats {
    /// One ray per source vertex.
    pub rays_cast: usize,
    /// Rays that struck the target surface.
    pub rays_hit: usize,
    /// Output cells that never received a sample.
    pub gaps: usize,
    /// Hits written to a cell that already held an earlier hit.
    pub collisions: usize,
    /// Hits whose position maps past the end of an axis.
    pub out_of_range: usize,
}

impl ResampleStats {
    /// Rays that found no surface.
    #[must_use]
    pub const fn rays_missed(&self) -> usize {
        self.rays_cast.saturating_sub(self.rays_hit)
    }

    /// Percentage of rays that hit the surface.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn coverage_percent(&self) -> f64 {
        if self.rays_cast == 0 {
            0.0
        } else {
            100.0 * (self.rays_hit as f64) / (self.rays_cast as f64)
        }
    }
}

/// Resampled height grid and its statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct ResampleResult {
    /// Heights on the source grid; `NaN` marks a gap.
    pub grid: DMatrix<f64>,
    /// Ray and scatter counters.
    pub stats: ResampleStats,
}

impl ResampleResult {
    /// Whether any output cell is a gap.
    #[must_use]
    pub const fn has_gaps(&self) -> bool {
        self.stats.gaps > 0
    }

    /// Grid indices `(i, j)` of every gap cell.
    #[must_use]
    pub fn gap_cells(&self) -> Vec<(usize, usize)> {
        let (nx, ny) = self.grid.shape();
        (0..nx)
            .flat_map(|i| (0..ny).map(move |j| (i, j)))
            .filter(|&(i, j)| self.grid[(i, j)].is_nan())
            .collect()
    }

    /// Consume the result, returning the grid.
    #[must_use]
    pub fn into_grid(self) -> DMatrix<f64> {
        self.grid
    }
}

impl std::fmt::Display for ResampleStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Ray Resampling:")?;
        writeln!(f, "  Rays cast: {}", self.rays_cast)?;
        writeln!(f, "  Rays hit: {}", self.rays_hit)?;
        writeln!(f, "  Coverage: {:.1}%", self.coverage_percent())?;
        writeln!(f, "  Gap cells: {}", self.gaps)?;
        writeln!(f, "  Collisions: {}", self.collisions)?;
        if self.out_of_range > 0 {
            writeln!(f, "  Out of range: {}", self.out_of_range)?;
        }
        Ok(())
    }
}
