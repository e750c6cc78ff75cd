//! Particle silhouettes: opacity fields and the sources they are built from.

pub mod decode;
pub mod field;
pub mod shapes;
