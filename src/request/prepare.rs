use std::path::Path;

use anyhow::Context;

use crate::{
    foundation::error::MaskResult,
    growth::profile::GrowthProfile,
    mask::compositor::{MaskImage, MaskThreading, compose_mask},
    particle::{
        decode::{decode_particle_image, decode_particle_svg},
        field::ParticleField,
    },
    pattern::{CellOrder, generators::Pattern, wrappers::wrap_all},
    request::model::{MaskRequest, ParticleSource},
};

/// Loads the request's particle, reading files relative to `root`.
pub fn load_particle(request: &MaskRequest, root: &Path) -> MaskResult<ParticleField> {
    match request.particle.source()? {
        ParticleSource::Shape { shape, size } => shape.rasterize(size),
        ParticleSource::Raster { path } => decode_particle_image(&read_bytes(root, &path)?),
        ParticleSource::Svg { path, max_side } => {
            decode_particle_svg(&read_bytes(root, &path)?, max_side)
        }
    }
}

/// Builds the generator and applies the request's wrappers, first one innermost.
pub fn build_order(request: &MaskRequest) -> MaskResult<Box<dyn CellOrder>> {
    let grid = request.grid()?;
    let base = Pattern::build(grid, &request.pattern_spec()?, request.seed)?;
    wrap_all(Box::new(base), &request.wrapper_list()?)
}

/// Validates `request`, then builds the order, the growth profile and the mask.
///
/// `threading` replaces the request's own threading settings.
pub fn generate_mask(
    request: &MaskRequest,
    particle: &ParticleField,
    threading: &MaskThreading,
) -> MaskResult<MaskImage> {
    request.validate()?;
    let canvas = request.canvas()?;
    let order = build_order(request)?;
    let (cell_w, cell_h) = canvas.cell_size(order.grid());
    let profile = GrowthProfile::build(particle, cell_w, cell_h)?;
    compose_mask(canvas, order.as_ref(), &profile, request.delay, threading)
}

fn read_bytes(root: &Path, norm_path: &str) -> MaskResult<Vec<u8>> {
    let path = root.join(Path::new(norm_path));
    let bytes = std::fs::read(&path)
        .with_context(|| format!("read particle bytes from '{}'", path.display()))?;
    Ok(bytes)
}

#[cfg(test)]
#[path = "../../tests/unit/request/prepare.rs"]
mod tests;
