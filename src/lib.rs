//! revealmask generates reveal-order masks for shaped-particle image transitions.
//!
//! A mask is an RGBA8 image in which every pixel stores the normalized time at
//! which it becomes visible. A consumer plays the transition by comparing the
//! decoded value against its progress `t` (see [`reveal_alpha`]).
//!
//! # Pipeline overview
//!
//! 1. **Order**: a [`Pattern`] assigns each grid cell a step, optionally
//!    reordered by a stack of [`OrderWrapper`]s.
//! 2. **Profile**: a [`GrowthProfile`] records how far a [`ParticleField`]
//!    silhouette has to grow, centered on one cell, before it covers each pixel
//!    of a 3x3-cell tile.
//! 3. **Composite**: [`compose_mask`] combines the order and the profile into
//!    per-pixel reveal times and encodes them with [`encode_value`].
//!
//! Everything is deterministic for a given request and seed. File IO is
//! limited to [`load_particle`]; the rest of the pipeline is pure.
#![forbid(unsafe_code)]

mod foundation;
mod geometry;
mod growth;
mod mask;
mod particle;
mod pattern;
mod request;

pub use foundation::core::{Canvas, Grid, Point, Vec2};
pub use foundation::error::{MaskError, MaskResult};
pub use foundation::math::{reflect, reflect_max};
pub use geometry::grid_line::{GridLine, LineCell};
pub use growth::profile::{GrowthProfile, MAX_PROFILE_SAMPLES};
pub use mask::compositor::{MaskImage, MaskThreading, compose_mask};
pub use mask::encode::{decode_value, encode_value, reveal_alpha};
pub use particle::decode::{MAX_PARTICLE_DIM, decode_particle_image, decode_particle_svg};
pub use particle::field::{OPAQUE_THRESHOLD, ParticleField};
pub use particle::shapes::ParticleShape;
pub use pattern::generators::{Direction, Pattern, PatternSpec};
pub use pattern::parse::{parse_direction, parse_pattern, parse_wrapper};
pub use pattern::spiral::SpiralParams;
pub use pattern::wrappers::{OrderWrapper, Wrapped, wrap_all};
pub use pattern::{CellOrder, step_table};
pub use request::model::{
    MaskRequest, OrderConfig, ParticleConfig, ParticleSource, normalize_rel_path,
};
pub use request::prepare::{build_order, generate_mask, load_particle};
