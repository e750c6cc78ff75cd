use crate::foundation::error::{MaskError, MaskResult};

pub use kurbo::{Point, Vec2};

/// Immutable cell grid shared by every order generator and the compositor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Grid {
    rows: u32,
    cols: u32,
}

impl Grid {
    pub fn new(rows: u32, cols: u32) -> MaskResult<Self> {
        if rows == 0 || cols == 0 {
            return Err(MaskError::validation("grid rows/cols must be > 0"));
        }
        Ok(Self { rows, cols })
    }

    pub fn rows(self) -> u32 {
        self.rows
    }

    pub fn cols(self) -> u32 {
        self.cols
    }

    pub fn cell_count(self) -> usize {
        (self.rows as usize) * (self.cols as usize)
    }

    /// `true` when `(row, col)` is a valid in-grid cell.
    pub fn contains(self, row: i64, col: i64) -> bool {
        row >= 0 && col >= 0 && row < i64::from(self.rows) && col < i64::from(self.cols)
    }

    /// `true` for in-grid cells and the single ring of cells around them.
    pub fn contains_with_ring(self, row: i64, col: i64) -> bool {
        row >= -1 && col >= -1 && row <= i64::from(self.rows) && col <= i64::from(self.cols)
    }

    /// Dimensions of the grid plus one border ring, as `(rows, cols)`.
    pub(crate) fn ringed_dims(self) -> (usize, usize) {
        (self.rows as usize + 2, self.cols as usize + 2)
    }

    /// Row-major index into a ringed table, `None` outside the ring.
    pub(crate) fn ringed_index(self, row: i64, col: i64) -> Option<usize> {
        if !self.contains_with_ring(row, col) {
            return None;
        }
        let (_, w) = self.ringed_dims();
        Some(((row + 1) as usize) * w + (col + 1) as usize)
    }
}

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> MaskResult<Self> {
        if width == 0 || height == 0 {
            return Err(MaskError::validation("canvas width/height must be > 0"));
        }
        Ok(Self { width, height })
    }

    /// Pixel size of one grid cell as `(cell_w, cell_h)`.
    pub fn cell_size(self, grid: Grid) -> (f64, f64) {
        (
            f64::from(self.width) / f64::from(grid.cols()),
            f64::from(self.height) / f64::from(grid.rows()),
        )
    }
}
