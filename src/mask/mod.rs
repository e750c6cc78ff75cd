//! Mask compositing and the RGBA encoding of reveal times.

pub mod compositor;
pub mod encode;
