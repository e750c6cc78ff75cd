use crate::foundation::error::{MaskError, MaskResult};

/// Opacity at or above which a particle sample counts as covered.
pub const OPAQUE_THRESHOLD: f32 = 0.5;

/// Read-only particle silhouette: one opacity sample per pixel, in `[0, 1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleField {
    width: u32,
    height: u32,
    opacity: Vec<f32>,
}

impl ParticleField {
    pub fn new(width: u32, height: u32, opacity: Vec<f32>) -> MaskResult<Self> {
        if width == 0 || height == 0 {
            return Err(MaskError::validation("particle width/height must be > 0"));
        }
        let expected = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(|| MaskError::validation("particle size overflow"))?;
        if opacity.len() != expected {
            return Err(MaskError::validation(format!(
                "particle expects {expected} samples, got {}",
                opacity.len()
            )));
        }
        if opacity.iter().any(|v| !v.is_finite()) {
            return Err(MaskError::validation("particle samples must be finite"));
        }
        let opacity = opacity.into_iter().map(|v| v.clamp(0.0, 1.0)).collect();
        Ok(Self {
            width,
            height,
            opacity,
        })
    }

    /// Builds a field from 0-255 samples.
    pub fn from_u8(width: u32, height: u32, samples: &[u8]) -> MaskResult<Self> {
        Self::new(
            width,
            height,
            samples.iter().map(|&v| f32::from(v) / 255.0).collect(),
        )
    }

    /// Builds a field from the alpha channel of straight or premultiplied RGBA8 pixels.
    pub fn from_rgba8_alpha(width: u32, height: u32, rgba: &[u8]) -> MaskResult<Self> {
        if !rgba.len().is_multiple_of(4) {
            return Err(MaskError::validation("rgba8 buffer length must be a multiple of 4"));
        }
        let alpha: Vec<u8> = rgba.chunks_exact(4).map(|px| px[3]).collect();
        Self::from_u8(width, height, &alpha)
    }

    /// Builds a field by evaluating `f(x, y)` at every pixel center.
    pub fn from_fn(width: u32, height: u32, f: impl Fn(f64, f64) -> f32) -> MaskResult<Self> {
        let mut opacity = Vec::with_capacity((width as usize) * (height as usize));
        for y in 0..height {
            for x in 0..width {
                opacity.push(f(f64::from(x) + 0.5, f64::from(y) + 0.5));
            }
        }
        Self::new(width, height, opacity)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Opacity at `(x, y)`, `None` outside the field.
    pub fn opacity(&self, x: i64, y: i64) -> Option<f32> {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return None;
        }
        self.opacity
            .get((y as usize) * (self.width as usize) + x as usize)
            .copied()
    }

    pub fn is_opaque(&self, x: i64, y: i64) -> bool {
        self.opacity(x, y).is_some_and(|v| v >= OPAQUE_THRESHOLD)
    }

    pub fn opaque_count(&self) -> usize {
        self.opacity
            .iter()
            .filter(|&&v| v >= OPAQUE_THRESHOLD)
            .count()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/particle/field.rs"]
mod tests;
