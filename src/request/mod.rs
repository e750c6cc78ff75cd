//! JSON request model and the end-to-end mask pipeline.

pub mod model;
pub mod prepare;
