use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    foundation::core::Grid,
    foundation::error::{MaskError, MaskResult},
    foundation::math::{reflect, reflect_max},
    pattern::{
        CellOrder, debug_check_ring,
        scatter::{InfectTable, RandomTable},
        spiral::{SpiralOrder, SpiralParams},
    },
};

/// Axis a linear, curtain or shutter pattern runs along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Row,
    Column,
    Diagonal,
}

/// Generator selection: a variant tag plus its parameters.
#[derive(Clone, Debug, PartialEq)]
pub enum PatternSpec {
    /// Straight wipe. `droop` in `[0, 1]` adds a fixed random per-line offset
    /// (row/column directions only).
    Linear { direction: Direction, droop: f64 },
    /// Linear along one axis, reflected across the other.
    Curtain { direction: Direction },
    /// Reflected along one axis (or along `r + c` for the diagonal).
    Shutter { direction: Direction },
    Diamond,
    Box,
    Spiral(SpiralParams),
    Random { range: u32 },
    Infect { density: f64 },
}

impl PatternSpec {
    pub const DEFAULT_RANDOM_RANGE: u32 = 10;

    pub fn validate(&self) -> MaskResult<()> {
        match self {
            Self::Linear { direction, droop } => {
                if !droop.is_finite() || !(0.0..=1.0).contains(droop) {
                    return Err(MaskError::config("linear 'droop' must be within [0, 1]"));
                }
                if *direction == Direction::Diagonal && *droop > 0.0 {
                    return Err(MaskError::config(
                        "linear 'droop' is only supported for row/column directions",
                    ));
                }
                Ok(())
            }
            Self::Curtain { .. } | Self::Shutter { .. } | Self::Diamond | Self::Box => Ok(()),
            Self::Spiral(params) => params.validate(),
            Self::Random { range } => {
                if *range == 0 {
                    return Err(MaskError::config("random 'range' must be >= 1"));
                }
                Ok(())
            }
            Self::Infect { density } => {
                if !density.is_finite() || *density <= 0.0 || *density > 1.0 {
                    return Err(MaskError::config("infect 'density' must be within (0, 1]"));
                }
                Ok(())
            }
        }
    }
}

#[derive(Clone, Debug)]
enum PatternKind {
    /// Per-column offsets over the ringed column range.
    Row { droop: Vec<i64> },
    /// Per-row offsets over the ringed row range.
    Column { droop: Vec<i64> },
    Diagonal,
    RowCurtain,
    ColumnCurtain,
    DiagonalCurtain,
    RowShutter,
    ColumnShutter,
    DiagonalShutter,
    Diamond,
    Box,
    Spiral(SpiralOrder),
    Random(RandomTable),
    Infect(InfectTable),
}

/// A concrete base cell order. Randomized variants draw everything they need
/// from `seed` at construction and are pure afterwards.
#[derive(Clone, Debug)]
pub struct Pattern {
    grid: Grid,
    kind: PatternKind,
    max_step: f64,
}

impl Pattern {
    pub fn build(grid: Grid, spec: &PatternSpec, seed: u64) -> MaskResult<Self> {
        spec.validate()?;

        let rows = i64::from(grid.rows());
        let cols = i64::from(grid.cols());
        let mut rng = StdRng::seed_from_u64(seed);

        let (kind, max_step) = match *spec {
            PatternSpec::Linear {
                direction: Direction::Row,
                droop,
            } => {
                let (offsets, range) = droop_offsets(&mut rng, droop, rows, cols + 2);
                (PatternKind::Row { droop: offsets }, (rows - 1 + range) as f64)
            }
            PatternSpec::Linear {
                direction: Direction::Column,
                droop,
            } => {
                let (offsets, range) = droop_offsets(&mut rng, droop, cols, rows + 2);
                (PatternKind::Column { droop: offsets }, (cols - 1 + range) as f64)
            }
            PatternSpec::Linear {
                direction: Direction::Diagonal,
                ..
            } => (PatternKind::Diagonal, ((rows - 1) + (cols - 1)) as f64),
            PatternSpec::Curtain {
                direction: Direction::Row,
            } => (PatternKind::RowCurtain, (rows - 1 + reflect_max(cols)) as f64),
            PatternSpec::Curtain {
                direction: Direction::Column,
            } => (PatternKind::ColumnCurtain, (cols - 1 + reflect_max(rows)) as f64),
            PatternSpec::Curtain {
                direction: Direction::Diagonal,
            } => (PatternKind::DiagonalCurtain, (rows.min(cols) - 1) as f64),
            PatternSpec::Shutter {
                direction: Direction::Row,
            } => (PatternKind::RowShutter, reflect_max(rows) as f64),
            PatternSpec::Shutter {
                direction: Direction::Column,
            } => (PatternKind::ColumnShutter, reflect_max(cols) as f64),
            PatternSpec::Shutter {
                direction: Direction::Diagonal,
            } => (
                PatternKind::DiagonalShutter,
                reflect_max(rows + cols - 1) as f64,
            ),
            PatternSpec::Diamond => (
                PatternKind::Diamond,
                (reflect_max(rows) + reflect_max(cols)) as f64,
            ),
            PatternSpec::Box => (
                PatternKind::Box,
                reflect_max(rows).min(reflect_max(cols)) as f64,
            ),
            PatternSpec::Spiral(params) => {
                let spiral = SpiralOrder::new(grid, params);
                let max = spiral.grid_max();
                (PatternKind::Spiral(spiral), max)
            }
            PatternSpec::Random { range } => {
                let table = RandomTable::new(grid, range, &mut rng);
                (PatternKind::Random(table), f64::from(range) - 1.0)
            }
            PatternSpec::Infect { density } => {
                let table = InfectTable::new(grid, density, &mut rng);
                let max = f64::from(table.max_wavefront());
                (PatternKind::Infect(table), max)
            }
        };

        let pattern = Self {
            grid,
            kind,
            max_step,
        };
        tracing::debug!(
            rows = grid.rows(),
            cols = grid.cols(),
            max_step = pattern.max_step,
            "built cell order"
        );
        Ok(pattern)
    }
}

/// Draws `len` offsets in `[0, ceil(droop * count))`; returns them with the range.
fn droop_offsets(rng: &mut StdRng, droop: f64, count: i64, len: i64) -> (Vec<i64>, i64) {
    let range = (droop * count as f64).ceil() as i64;
    let offsets = (0..len)
        .map(|_| if range > 0 { rng.random_range(0..range) } else { 0 })
        .collect();
    (offsets, range)
}

impl CellOrder for Pattern {
    fn grid(&self) -> Grid {
        self.grid
    }

    fn max_step(&self) -> f64 {
        self.max_step
    }

    fn whole_steps(&self) -> bool {
        !matches!(self.kind, PatternKind::Spiral(_))
    }

    fn cell(&self, row: i64, col: i64) -> f64 {
        debug_check_ring(self.grid, row, col);
        let rows = i64::from(self.grid.rows());
        let cols = i64::from(self.grid.cols());

        let step = match &self.kind {
            PatternKind::Row { droop } => row + ring_lookup(droop, col),
            PatternKind::Column { droop } => col + ring_lookup(droop, row),
            PatternKind::Diagonal => row + col,
            PatternKind::RowCurtain => row + reflect(col, cols),
            PatternKind::ColumnCurtain => col + reflect(row, rows),
            PatternKind::DiagonalCurtain => row.min(col),
            PatternKind::RowShutter => reflect(row, rows),
            PatternKind::ColumnShutter => reflect(col, cols),
            PatternKind::DiagonalShutter => reflect(row + col, rows + cols - 1),
            PatternKind::Diamond => reflect(row, rows) + reflect(col, cols),
            PatternKind::Box => reflect(row, rows).min(reflect(col, cols)),
            PatternKind::Spiral(spiral) => return spiral.step(row, col),
            PatternKind::Random(table) => return table.get(self.grid, row, col),
            PatternKind::Infect(table) => return table.get(self.grid, row, col),
        };
        step as f64
    }
}

fn ring_lookup(offsets: &[i64], n: i64) -> i64 {
    usize::try_from(n + 1)
        .ok()
        .and_then(|i| offsets.get(i))
        .copied()
        .unwrap_or(0)
}

#[cfg(test)]
#[path = "../../tests/unit/pattern/generators.rs"]
mod tests;
