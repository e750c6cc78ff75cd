use crate::foundation::core::Point;

/// One integer cell visited by a [`GridLine`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineCell {
    pub x: i64,
    pub y: i64,
    /// Segment parameter in `[0, 1]` at which the segment enters this cell.
    pub t: f64,
}

/// Lazy traversal of every integer cell a line segment passes through, in order.
///
/// Works for all slopes and directions. Each axis steps by its own sign, so the
/// eight octants reduce to the same loop. A zero-length segment yields only the
/// cell containing `start`. When the segment crosses a lattice point exactly, the
/// x step is taken first.
///
/// The iterator is finite (it yields exactly
/// `|Δcol| + |Δrow| + 1` cells) and cloning it restarts from the clone point.
#[derive(Clone, Debug)]
pub struct GridLine {
    x: i64,
    y: i64,
    end_x: i64,
    end_y: i64,
    step_x: i64,
    step_y: i64,
    t_max_x: f64,
    t_max_y: f64,
    t_delta_x: f64,
    t_delta_y: f64,
    t: f64,
    remaining: u64,
}

impl GridLine {
    pub fn new(start: Point, end: Point) -> Self {
        let x = start.x.floor() as i64;
        let y = start.y.floor() as i64;
        let end_x = end.x.floor() as i64;
        let end_y = end.y.floor() as i64;

        let (step_x, t_delta_x, t_max_x) = axis_setup(start.x, end.x - start.x);
        let (step_y, t_delta_y, t_max_y) = axis_setup(start.y, end.y - start.y);

        let remaining = (end_x - x).unsigned_abs() + (end_y - y).unsigned_abs() + 1;

        Self {
            x,
            y,
            end_x,
            end_y,
            step_x,
            step_y,
            t_max_x,
            t_max_y,
            t_delta_x,
            t_delta_y,
            t: 0.0,
            remaining,
        }
    }
}

fn axis_setup(origin: f64, delta: f64) -> (i64, f64, f64) {
    if delta > 0.0 {
        (1, 1.0 / delta, (origin.floor() + 1.0 - origin) / delta)
    } else if delta < 0.0 {
        (-1, -1.0 / delta, (origin - origin.floor()) / -delta)
    } else {
        (0, f64::INFINITY, f64::INFINITY)
    }
}

impl Iterator for GridLine {
    type Item = LineCell;

    fn next(&mut self) -> Option<LineCell> {
        if self.remaining == 0 {
            return None;
        }
        let out = LineCell {
            x: self.x,
            y: self.y,
            t: self.t.clamp(0.0, 1.0),
        };
        self.remaining -= 1;

        if self.remaining > 0 {
            // Per-axis cell counts are fixed up front; once an axis has reached its
            // end cell only the other axis may move, whatever rounding says.
            let advance_x = if self.x == self.end_x {
                false
            } else if self.y == self.end_y {
                true
            } else {
                self.t_max_x <= self.t_max_y
            };

            if advance_x {
                self.x += self.step_x;
                self.t = self.t_max_x;
                self.t_max_x += self.t_delta_x;
            } else {
                self.y += self.step_y;
                self.t = self.t_max_y;
                self.t_max_y += self.t_delta_y;
            }
        }

        Some(out)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = usize::try_from(self.remaining).unwrap_or(usize::MAX);
        (n, Some(n))
    }
}

impl ExactSizeIterator for GridLine {}

impl std::iter::FusedIterator for GridLine {}

#[cfg(test)]
#[path = "../../tests/unit/geometry/grid_line.rs"]
mod tests;
