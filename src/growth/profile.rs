use crate::{
    foundation::core::{Point, Vec2},
    foundation::error::{MaskError, MaskResult},
    foundation::math::dist_sq,
    geometry::grid_line::GridLine,
    particle::field::ParticleField,
};

/// Hit points closer than this to the particle center are clamped to it.
const MIN_HIT_DIST: f64 = 0.5;

/// Upper bound on the number of samples in a profile tile (9 cells' worth of
/// pixels). A 1x1 grid on a 1920x1080 canvas needs about 18.7M.
pub const MAX_PROFILE_SAMPLES: usize = 1 << 25;

/// Particle "stamp": for each pixel of a 3x3-cell tile centered on one cell,
/// the smallest uniform enlargement of the particle (centered on the cell
/// center) at which its silhouette covers that pixel.
///
/// Values are addressed by integer offset from the tile's center pixel.
#[derive(Clone, Debug)]
pub struct GrowthProfile {
    width: usize,
    height: usize,
    center_x: i64,
    center_y: i64,
    values: Vec<f64>,
    max_scale: f64,
}

impl GrowthProfile {
    /// Builds the profile for cells of `cell_w` x `cell_h` pixels.
    #[tracing::instrument(
        skip(particle),
        fields(particle_w = particle.width(), particle_h = particle.height())
    )]
    pub fn build(particle: &ParticleField, cell_w: f64, cell_h: f64) -> MaskResult<Self> {
        if !cell_w.is_finite() || !cell_h.is_finite() || cell_w <= 0.0 || cell_h <= 0.0 {
            return Err(MaskError::validation("cell width/height must be finite and > 0"));
        }

        let (tile_w, tile_h) = ((3.0 * cell_w).ceil(), (3.0 * cell_h).ceil());
        if tile_w * tile_h > MAX_PROFILE_SAMPLES as f64 {
            return Err(MaskError::validation(format!(
                "growth profile tile {tile_w}x{tile_h} exceeds {MAX_PROFILE_SAMPLES} samples; \
                 use more grid cells or a smaller canvas"
            )));
        }
        let width = tile_w as usize;
        let height = tile_h as usize;
        let center_x = (1.5 * cell_w).floor() as i64;
        let center_y = (1.5 * cell_h).floor() as i64;

        let mut values = Vec::with_capacity(width * height);
        let mut max_scale = 0.0f64;
        for py in 0..height {
            let dy = py as i64 - center_y;
            let in_center_row = (dy as f64).abs() <= cell_h / 2.0;
            for px in 0..width {
                let dx = px as i64 - center_x;
                let v = cover_scale(particle, dx, dy);
                if in_center_row && (dx as f64).abs() <= cell_w / 2.0 {
                    max_scale = max_scale.max(v);
                }
                values.push(v);
            }
        }

        if particle.opaque_count() == 0 {
            tracing::warn!("particle has no opaque samples; mask growth is instantaneous");
        }
        tracing::debug!(width, height, max_scale, "built growth profile");

        Ok(Self {
            width,
            height,
            center_x,
            center_y,
            values,
            max_scale,
        })
    }

    /// Scale at integer offset `(dx, dy)` from the center pixel, `None` off the tile.
    pub fn value(&self, dx: i64, dy: i64) -> Option<f64> {
        let px = self.center_x + dx;
        let py = self.center_y + dy;
        if px < 0 || py < 0 || px as usize >= self.width || py as usize >= self.height {
            return None;
        }
        self.values.get(py as usize * self.width + px as usize).copied()
    }

    /// Largest scale needed to cover the center cell. Zero for degenerate
    /// profiles (single-pixel cells or particles without opaque samples).
    pub fn max_scale(&self) -> f64 {
        self.max_scale
    }

    /// Tile size as `(width, height)`.
    pub fn tile_size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Center pixel of the tile as `(x, y)`.
    pub fn center(&self) -> (i64, i64) {
        (self.center_x, self.center_y)
    }
}

/// Enlargement at which the particle first covers the pixel at `(dx, dy)`.
///
/// The particle's bounding box reaches the pixel at `scale`. The pixel is then
/// projected back onto the box edge (`entry`) and a line is marched inward to
/// the particle center; the first opaque sample tells how much further the
/// silhouette has to grow along that ray.
fn cover_scale(particle: &ParticleField, dx: i64, dy: i64) -> f64 {
    let pw = f64::from(particle.width());
    let ph = f64::from(particle.height());
    let (dx, dy) = (dx as f64, dy as f64);

    let scale = (2.0 * dx.abs() / pw).max(2.0 * dy.abs() / ph);
    if scale == 0.0 {
        return 0.0;
    }

    let center = Point::new(pw / 2.0, ph / 2.0);
    let entry = center + Vec2::new(dx / scale, dy / scale);
    let entry_d2 = dist_sq(entry, center);

    GridLine::new(entry, center)
        .find(|cell| particle.is_opaque(cell.x, cell.y))
        .map_or(0.0, |cell| {
            let hit = entry.lerp(center, cell.t);
            let hit_d2 = dist_sq(hit, center).max(MIN_HIT_DIST * MIN_HIT_DIST);
            scale * (entry_d2 / hit_d2).sqrt()
        })
}

#[cfg(test)]
#[path = "../../tests/unit/growth/profile.rs"]
mod tests;
