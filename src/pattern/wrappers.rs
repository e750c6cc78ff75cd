use crate::{
    foundation::core::Grid,
    foundation::error::{MaskError, MaskResult},
    foundation::math::{is_integral, reflect_f64, reflect_max_f64},
    pattern::CellOrder,
};

/// Order-transforming decorator applied on top of another cell order.
///
/// Wrappers compose by nesting and the nesting order matters: apply
/// [`OrderWrapper::Reflect`] before [`OrderWrapper::Reverse`] to keep an
/// asymmetric pattern asymmetric.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OrderWrapper {
    /// Groups steps by `step mod stride` so that each residue class plays as one run.
    Interlace { stride: u32 },
    /// Folds the step range in half, making any linear order symmetric.
    Reflect,
    Reverse,
    /// Swaps columns left to right.
    Mirror,
    /// Swaps rows top to bottom.
    Flip,
}

impl OrderWrapper {
    pub fn validate(&self) -> MaskResult<()> {
        if let Self::Interlace { stride: 0 } = self {
            return Err(MaskError::config("interlace 'stride' must be >= 1"));
        }
        Ok(())
    }
}

/// A cell order seen through one [`OrderWrapper`].
#[derive(Debug)]
pub struct Wrapped {
    inner: Box<dyn CellOrder>,
    wrapper: OrderWrapper,
    max_step: f64,
}

impl Wrapped {
    pub fn new(inner: Box<dyn CellOrder>, wrapper: OrderWrapper) -> MaskResult<Self> {
        wrapper.validate()?;
        let inner_max = inner.max_step();
        let max_step = match wrapper {
            OrderWrapper::Interlace { .. } => {
                if is_integral(inner_max) {
                    inner_max
                } else {
                    inner_max.floor() + 1.0
                }
            }
            OrderWrapper::Reflect => reflect_max_f64(inner_max, inner.whole_steps()),
            OrderWrapper::Reverse | OrderWrapper::Mirror | OrderWrapper::Flip => inner_max,
        };
        Ok(Self {
            inner,
            wrapper,
            max_step,
        })
    }

    pub fn wrapper(&self) -> OrderWrapper {
        self.wrapper
    }
}

impl CellOrder for Wrapped {
    fn grid(&self) -> Grid {
        self.inner.grid()
    }

    fn max_step(&self) -> f64 {
        self.max_step
    }

    fn whole_steps(&self) -> bool {
        self.inner.whole_steps()
    }

    fn cell(&self, row: i64, col: i64) -> f64 {
        let grid = self.inner.grid();
        match self.wrapper {
            OrderWrapper::Interlace { stride } => interlace(
                self.inner.cell(row, col),
                self.inner.max_step(),
                f64::from(stride),
            ),
            OrderWrapper::Reflect => {
                reflect_f64(self.inner.cell(row, col), self.inner.max_step() + 1.0)
            }
            OrderWrapper::Reverse => self.max_step - self.inner.cell(row, col),
            OrderWrapper::Mirror => self.inner.cell(row, i64::from(grid.cols()) - 1 - col),
            OrderWrapper::Flip => self.inner.cell(i64::from(grid.rows()) - 1 - row, col),
        }
    }
}

/// Re-ranks `step` so that all steps sharing a residue mod `stride` play
/// consecutively. Residue `k` starts after the `k` earlier clusters; when
/// `max + 1` does not divide evenly only the trailing clusters are one shorter.
/// The fractional part of a real-valued step is carried through unchanged.
///
/// The long-cluster count is `(max mod stride) + 1`, not `(max + 1) mod stride`:
/// the latter is `0` whenever `stride` divides `max + 1`, which would start
/// residues `0` and `1` at the same step.
pub(crate) fn interlace(step: f64, max: f64, stride: f64) -> f64 {
    let whole = step.floor();
    let frac = step - whole;
    let max = max.floor();

    let k = whole.rem_euclid(stride);
    let long_clusters = max.rem_euclid(stride) + 1.0;

    (whole / stride).floor() + (max / stride).floor() * k + k.min(long_clusters) + frac
}

/// Applies `wrappers` in order, the first one innermost.
pub fn wrap_all(
    base: Box<dyn CellOrder>,
    wrappers: &[OrderWrapper],
) -> MaskResult<Box<dyn CellOrder>> {
    let mut order = base;
    for &w in wrappers {
        order = Box::new(Wrapped::new(order, w)?);
    }
    Ok(order)
}

#[cfg(test)]
#[path = "../../tests/unit/pattern/wrappers.rs"]
mod tests;
