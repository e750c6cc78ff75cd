use std::f64::consts::TAU;

use crate::{
    foundation::core::Grid,
    foundation::error::{MaskError, MaskResult},
};

/// Parameters of the spiral cell order.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpiralParams {
    /// How many times slower the gap between windings fills than the arm sweeps (1-10).
    pub fill_delay: f64,
    /// Number of windings from the center to the grid's half extent (>= 0.25).
    pub spiral_count: f64,
    /// Rotationally symmetric arms (>= 1).
    pub arm_count: u32,
    /// Start angle in turns (0-1).
    pub angle: f64,
    /// Fraction of the gap at which the outward and inward fill fronts meet.
    /// `None` picks the fraction where both fronts arrive at the same step.
    pub fill_meet: Option<f64>,
}

impl Default for SpiralParams {
    fn default() -> Self {
        Self {
            fill_delay: 2.0,
            spiral_count: 1.0,
            arm_count: 1,
            angle: 0.0,
            fill_meet: None,
        }
    }
}

impl SpiralParams {
    pub fn validate(&self) -> MaskResult<()> {
        if !self.fill_delay.is_finite() || !(1.0..=10.0).contains(&self.fill_delay) {
            return Err(MaskError::config("spiral 'fill_delay' must be within [1, 10]"));
        }
        if !self.spiral_count.is_finite() || self.spiral_count < 0.25 {
            return Err(MaskError::config("spiral 'spiral_count' must be >= 0.25"));
        }
        if self.arm_count == 0 {
            return Err(MaskError::config("spiral 'arm_count' must be >= 1"));
        }
        if !self.angle.is_finite() || !(0.0..=1.0).contains(&self.angle) {
            return Err(MaskError::config("spiral 'angle' must be within [0, 1]"));
        }
        if let Some(m) = self.fill_meet
            && (!m.is_finite() || m <= 0.0 || m > 1.0)
        {
            return Err(MaskError::config("spiral 'fill_meet' must be within (0, 1]"));
        }
        Ok(())
    }

    /// Meeting fraction actually used by the fill fronts.
    pub fn effective_fill_meet(&self) -> f64 {
        self.fill_meet
            .unwrap_or_else(|| ((1.0 + self.fill_delay) / (2.0 * self.fill_delay)).min(1.0))
    }
}

#[derive(Clone, Debug)]
pub(crate) struct SpiralOrder {
    grid: Grid,
    center_x: f64,
    center_y: f64,
    spiral_width: f64,
    arms: f64,
    angle: f64,
    fill_delay: f64,
    fill_meet: f64,
}

impl SpiralOrder {
    pub(crate) fn new(grid: Grid, params: SpiralParams) -> Self {
        let rows = f64::from(grid.rows());
        let cols = f64::from(grid.cols());
        Self {
            grid,
            center_x: (cols - 1.0) / 2.0,
            center_y: (rows - 1.0) / 2.0,
            spiral_width: rows.max(cols) / 2.0 / params.spiral_count,
            arms: f64::from(params.arm_count),
            angle: params.angle,
            fill_delay: params.fill_delay,
            fill_meet: params.effective_fill_meet(),
        }
    }

    /// Step of a cell.
    ///
    /// In "arm units" (one unit = the radial gap between neighbouring arm
    /// windings) the arms sit where `radius - phase` is an integer. `n` counts
    /// the windings inside the cell and `f` is its position across the gap.
    /// The inner winding passes at `n + phase` and fills outward; the outer one
    /// passes a unit later and fills inward. Inside the first winding
    /// (`n < 0`) the step is the radius itself, so the center lights first and
    /// the step never drops below the distance from the center. Scaled back to
    /// cells at the end.
    pub(crate) fn step(&self, row: i64, col: i64) -> f64 {
        let dx = col as f64 - self.center_x;
        let dy = row as f64 - self.center_y;

        let turns = (dy.atan2(dx) / TAU - self.angle).rem_euclid(1.0);
        let phase = (turns * self.arms).rem_euclid(1.0);
        let radius = dx.hypot(dy) / self.spiral_width * self.arms;

        let u = radius - phase;
        let n = u.floor();
        let f = u - n;

        let units = if n < 0.0 {
            radius
        } else if f > self.fill_meet {
            n + 1.0 + phase + self.fill_delay * (1.0 - f)
        } else {
            n + phase + self.fill_delay * f
        };

        units * self.spiral_width / self.arms
    }

    /// Largest step over the in-grid cells.
    ///
    /// The fill fronts make the step non-monotonic in the radius, so the
    /// corners alone do not bound it.
    pub(crate) fn grid_max(&self) -> f64 {
        let rows = i64::from(self.grid.rows());
        let cols = i64::from(self.grid.cols());
        (0..rows)
            .flat_map(|r| (0..cols).map(move |c| (r, c)))
            .map(|(r, c)| self.step(r, c))
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pattern/spiral.rs"]
mod tests;
