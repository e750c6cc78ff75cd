use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    foundation::core::{Canvas, Grid},
    foundation::error::{MaskError, MaskResult},
    growth::profile::GrowthProfile,
    mask::encode::{decode_value, encode_value},
    pattern::CellOrder,
};

/// Encoded reveal mask, RGBA8, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaskImage {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl MaskImage {
    /// Raw RGBA of the pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        self.data.get(i..i + 4)?.try_into().ok()
    }

    /// Decoded reveal time of the pixel at `(x, y)` in `[0, 1]`.
    pub fn value_at(&self, x: u32, y: u32) -> Option<f64> {
        self.pixel(x, y).map(decode_value)
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MaskThreading {
    pub parallel: bool,
    pub threads: Option<usize>,
}

/// Renders the reveal mask for `order` on `canvas`.
///
/// `profile` must have been built for the canvas' cell size. `delay` in
/// `[0, 1]` is how far apart consecutive steps start, in units of one
/// particle's full growth time.
#[tracing::instrument(
    skip(order, profile, threading),
    fields(
        rows = order.grid().rows(),
        cols = order.grid().cols(),
        parallel = threading.parallel
    )
)]
pub fn compose_mask(
    canvas: Canvas,
    order: &dyn CellOrder,
    profile: &GrowthProfile,
    delay: f64,
    threading: &MaskThreading,
) -> MaskResult<MaskImage> {
    if !delay.is_finite() || !(0.0..=1.0).contains(&delay) {
        return Err(MaskError::validation("mask 'delay' must be within [0, 1]"));
    }

    let grid = order.grid();
    let (cell_w, cell_h) = canvas.cell_size(grid);
    let expected = ((3.0 * cell_w).ceil() as usize, (3.0 * cell_h).ceil() as usize);
    if profile.tile_size() != expected {
        return Err(MaskError::validation(format!(
            "growth profile tile {:?} does not match cell size {cell_w}x{cell_h}",
            profile.tile_size()
        )));
    }

    let sampler = Sampler {
        grid,
        cell_w,
        cell_h,
        order,
        profile,
        delay,
        max_scale: profile.max_scale(),
        total_time: order.max_step() * delay + 1.0,
    };
    tracing::debug!(
        max_step = order.max_step(),
        total_time = sampler.total_time,
        "compositing mask"
    );

    let width = canvas.width as usize;
    let stride = width * 4;
    let mut data = vec![0u8; stride * canvas.height as usize];

    if threading.parallel {
        let pool = build_thread_pool(threading.threads)?;
        pool.install(|| {
            data.par_chunks_mut(stride)
                .enumerate()
                .for_each(|(y, row)| sampler.fill_row(y as u32, row));
        });
    } else {
        for (y, row) in data.chunks_mut(stride).enumerate() {
            sampler.fill_row(y as u32, row);
        }
    }

    Ok(MaskImage {
        width: canvas.width,
        height: canvas.height,
        data,
    })
}

struct Sampler<'a> {
    grid: Grid,
    cell_w: f64,
    cell_h: f64,
    order: &'a dyn CellOrder,
    profile: &'a GrowthProfile,
    delay: f64,
    max_scale: f64,
    total_time: f64,
}

impl Sampler<'_> {
    fn fill_row(&self, y: u32, row: &mut [u8]) {
        for (x, px) in row.chunks_exact_mut(4).enumerate() {
            px.copy_from_slice(&encode_value(self.value(x as u32, y)));
        }
    }

    fn value(&self, x: u32, y: u32) -> f64 {
        let col = owning_cell(x, self.cell_w, self.grid.cols());
        let row = owning_cell(y, self.cell_h, self.grid.rows());
        let step = self.order.cell(row, col);

        let mut scale = f64::INFINITY;
        for nr in row - 1..=row + 1 {
            for nc in col - 1..=col + 1 {
                if !self.grid.contains(nr, nc) {
                    continue;
                }
                let dx = i64::from(x) - cell_center(nc, self.cell_w);
                let dy = i64::from(y) - cell_center(nr, self.cell_h);
                let Some(v) = self.profile.value(dx, dy) else {
                    continue;
                };
                let lag = (self.order.cell(nr, nc) - step) * self.delay * self.max_scale;
                scale = scale.min(v + lag);
            }
        }

        let growth = if self.max_scale > 0.0 && scale.is_finite() {
            scale / self.max_scale
        } else {
            0.0
        };
        (step * self.delay + growth) / self.total_time
    }
}

fn owning_cell(p: u32, cell: f64, count: u32) -> i64 {
    ((f64::from(p) / cell).floor() as i64).min(i64::from(count) - 1)
}

fn cell_center(index: i64, cell: f64) -> i64 {
    ((index as f64 + 0.5) * cell).floor() as i64
}

fn build_thread_pool(threads: Option<usize>) -> MaskResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(MaskError::validation(
            "mask threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| MaskError::evaluation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/mask/compositor.rs"]
mod tests;
