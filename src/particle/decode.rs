use anyhow::Context;

use crate::{
    foundation::error::{MaskError, MaskResult},
    particle::field::ParticleField,
};

/// Largest particle raster side accepted from image or SVG sources.
pub const MAX_PARTICLE_DIM: u32 = 4096;

/// Decodes any `image`-supported format and keeps its alpha channel.
///
/// Images without alpha decode as fully opaque.
pub fn decode_particle_image(bytes: &[u8]) -> MaskResult<ParticleField> {
    let dyn_img = image::load_from_memory(bytes).context("decode particle image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    check_dims(width, height)?;
    ParticleField::from_rgba8_alpha(width, height, rgba.as_raw())
}

/// Parses an SVG and rasterizes it so that its longer side is `max_side` pixels.
pub fn decode_particle_svg(bytes: &[u8], max_side: u32) -> MaskResult<ParticleField> {
    if max_side == 0 {
        return Err(MaskError::validation("svg particle size must be > 0"));
    }
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts).context("parse particle svg tree")?;

    let (width, height) = svg_raster_size(&tree, max_side)?;
    let alpha = rasterize_svg_alpha(&tree, width, height)?;
    ParticleField::from_u8(width, height, &alpha)
}

fn svg_raster_size(tree: &usvg::Tree, max_side: u32) -> MaskResult<(u32, u32)> {
    let size = tree.size();
    let (w, h) = (size.width(), size.height());
    if !w.is_finite() || !h.is_finite() || w <= 0.0 || h <= 0.0 {
        return Err(MaskError::validation("svg particle has invalid width/height"));
    }
    let scale = max_side as f32 / w.max(h);
    let width = ((w * scale).round() as u32).max(1);
    let height = ((h * scale).round() as u32).max(1);
    check_dims(width, height)?;
    Ok((width, height))
}

fn rasterize_svg_alpha(tree: &usvg::Tree, width: u32, height: u32) -> MaskResult<Vec<u8>> {
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| MaskError::evaluation("failed to allocate svg pixmap"))?;

    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(tree, xform, &mut pixmap.as_mut());
    Ok(pixmap.data().chunks_exact(4).map(|px| px[3]).collect())
}

fn check_dims(width: u32, height: u32) -> MaskResult<()> {
    if width > MAX_PARTICLE_DIM || height > MAX_PARTICLE_DIM {
        return Err(MaskError::validation(format!(
            "particle raster too large: {width}x{height} (max {MAX_PARTICLE_DIM}x{MAX_PARTICLE_DIM})"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/particle/decode.rs"]
mod tests;
