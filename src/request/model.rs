use serde::{Deserialize, Serialize};

use crate::{
    foundation::core::{Canvas, Grid},
    foundation::error::{MaskError, MaskResult},
    mask::compositor::MaskThreading,
    particle::shapes::ParticleShape,
    pattern::{
        generators::PatternSpec,
        parse::{parse_pattern, parse_wrapper},
        wrappers::OrderWrapper,
    },
};

/// One mask generation job, usually read from a JSON file.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MaskRequest {
    pub width: u32,
    pub height: u32,
    pub rows: u32,
    pub cols: u32,
    pub delay: f64,
    #[serde(default)]
    pub seed: u64,
    pub pattern: OrderConfig,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub wrappers: Vec<OrderConfig>,
    pub particle: ParticleConfig,
    #[serde(default)]
    pub threading: MaskThreading,
}

/// A generator or wrapper selection: `kind` plus free-form `params`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OrderConfig {
    pub kind: String,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub params: serde_json::Value,
}

/// Where the particle silhouette comes from: a built-in `shape` or a file `path`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParticleConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
}

/// Resolved particle source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParticleSource {
    Shape { shape: ParticleShape, size: u32 },
    Raster { path: String },
    Svg { path: String, max_side: u32 },
}

impl ParticleConfig {
    pub const DEFAULT_SHAPE_SIZE: u32 = 64;
    pub const DEFAULT_SVG_SIZE: u32 = 256;

    pub fn source(&self) -> MaskResult<ParticleSource> {
        match (&self.shape, &self.path) {
            (Some(_), Some(_)) => Err(MaskError::config(
                "particle must set exactly one of 'shape' or 'path'",
            )),
            (None, None) => Err(MaskError::config(
                "particle requires either 'shape' or 'path'",
            )),
            (Some(name), None) => {
                let shape = ParticleShape::parse(name, self.points)?;
                Ok(ParticleSource::Shape {
                    shape,
                    size: self.size.unwrap_or(Self::DEFAULT_SHAPE_SIZE),
                })
            }
            (None, Some(path)) => {
                if self.points.is_some() {
                    return Err(MaskError::config(
                        "particle 'points' only applies to built-in star shapes",
                    ));
                }
                let path = normalize_rel_path(path)?;
                if has_extension(&path, "svg") {
                    Ok(ParticleSource::Svg {
                        path,
                        max_side: self.size.unwrap_or(Self::DEFAULT_SVG_SIZE),
                    })
                } else if self.size.is_some() {
                    Err(MaskError::config(
                        "particle 'size' only applies to shapes and svg files",
                    ))
                } else {
                    Ok(ParticleSource::Raster { path })
                }
            }
        }
    }
}

impl MaskRequest {
    pub fn canvas(&self) -> MaskResult<Canvas> {
        Canvas::new(self.width, self.height)
    }

    pub fn grid(&self) -> MaskResult<Grid> {
        Grid::new(self.rows, self.cols)
    }

    pub fn pattern_spec(&self) -> MaskResult<PatternSpec> {
        parse_pattern(&self.pattern.kind, &self.pattern.params)
    }

    pub fn wrapper_list(&self) -> MaskResult<Vec<OrderWrapper>> {
        self.wrappers
            .iter()
            .map(|w| parse_wrapper(&w.kind, &w.params))
            .collect()
    }

    /// Checks every field up front so that nothing is generated from a bad request.
    pub fn validate(&self) -> MaskResult<()> {
        self.canvas()?;
        self.grid()?;
        if !self.delay.is_finite() || !(0.0..=1.0).contains(&self.delay) {
            return Err(MaskError::config("request 'delay' must be within [0, 1]"));
        }
        self.pattern_spec()?;
        self.wrapper_list()?;
        self.particle.source()?;
        if let Some(0) = self.threading.threads {
            return Err(MaskError::config("request 'threading.threads' must be >= 1"));
        }
        Ok(())
    }
}

/// Normalizes a relative particle path to `/`-separated components.
pub fn normalize_rel_path(source: &str) -> MaskResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(MaskError::validation("particle paths must be relative"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(MaskError::validation("particle paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(MaskError::validation("particle path must contain a file name"));
    }
    Ok(out.join("/"))
}

fn has_extension(path: &str, ext: &str) -> bool {
    std::path::Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

#[cfg(test)]
#[path = "../../tests/unit/request/model.rs"]
mod tests;
