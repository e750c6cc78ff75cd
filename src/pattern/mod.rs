//! Cell-order generators and the wrappers that reorder them.
//!
//! A cell order assigns every grid cell a *step*: when a transition plays from
//! step `0` to [`CellOrder::max_step`], cells light up in step order.

pub mod generators;
pub mod parse;
pub mod scatter;
pub mod spiral;
pub mod wrappers;

use crate::foundation::core::Grid;

/// Reveal order over a grid.
///
/// `cell` is defined for every in-grid cell plus exactly one ring of cells
/// around the grid. Queries further out are out of contract.
pub trait CellOrder: Send + Sync + std::fmt::Debug {
    fn grid(&self) -> Grid;

    /// Largest step reachable by an in-grid cell.
    fn max_step(&self) -> f64;

    /// Whether every step is a whole number.
    fn whole_steps(&self) -> bool {
        true
    }

    fn cell(&self, row: i64, col: i64) -> f64;
}

impl<T: CellOrder + ?Sized> CellOrder for Box<T> {
    fn grid(&self) -> Grid {
        (**self).grid()
    }

    fn max_step(&self) -> f64 {
        (**self).max_step()
    }

    fn whole_steps(&self) -> bool {
        (**self).whole_steps()
    }

    fn cell(&self, row: i64, col: i64) -> f64 {
        (**self).cell(row, col)
    }
}

/// Row-major table of `cell` values for the in-grid cells.
pub fn step_table(order: &dyn CellOrder) -> Vec<Vec<f64>> {
    let grid = order.grid();
    (0..i64::from(grid.rows()))
        .map(|r| {
            (0..i64::from(grid.cols()))
                .map(|c| order.cell(r, c))
                .collect()
        })
        .collect()
}

#[inline]
pub(crate) fn debug_check_ring(grid: Grid, row: i64, col: i64) {
    debug_assert!(
        grid.contains_with_ring(row, col),
        "cell ({row}, {col}) queried outside the border ring of a {}x{} grid",
        grid.rows(),
        grid.cols()
    );
}
