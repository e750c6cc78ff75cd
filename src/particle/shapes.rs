use std::f64::consts::{FRAC_PI_2, TAU};

use kurbo::{BezPath, Circle, Rect, Shape};

use crate::{
    foundation::core::Point,
    foundation::error::{MaskError, MaskResult},
    particle::{decode::MAX_PARTICLE_DIM, field::ParticleField},
};

/// Built-in particle silhouettes, rasterized into a square field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleShape {
    Square,
    Circle,
    Diamond,
    Star { points: u32 },
}

impl ParticleShape {
    pub const DEFAULT_STAR_POINTS: u32 = 5;

    /// Looks up a shape by name; `points` only applies to stars.
    pub fn parse(name: &str, points: Option<u32>) -> MaskResult<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "square" => Ok(Self::Square),
            "circle" | "disc" => Ok(Self::Circle),
            "diamond" => Ok(Self::Diamond),
            "star" => Ok(Self::Star {
                points: points.unwrap_or(Self::DEFAULT_STAR_POINTS),
            }),
            other => Err(MaskError::config(format!(
                "unknown particle shape '{other}'"
            ))),
        }
    }

    /// Rasterizes the shape into a `size` x `size` field with binary opacity.
    pub fn rasterize(self, size: u32) -> MaskResult<ParticleField> {
        if size == 0 || size > MAX_PARTICLE_DIM {
            return Err(MaskError::validation(format!(
                "particle shape size must be within 1..={MAX_PARTICLE_DIM}"
            )));
        }
        let s = f64::from(size);
        let center = Point::new(s / 2.0, s / 2.0);

        match self {
            Self::Square => filled(size, &Rect::new(0.0, 0.0, s, s)),
            Self::Circle => filled(size, &Circle::new(center, s / 2.0)),
            Self::Diamond => filled(size, &regular_polygon(center, s / 2.0, 4, FRAC_PI_2)),
            Self::Star { points } => {
                if points < 3 {
                    return Err(MaskError::config("star 'points' must be >= 3"));
                }
                filled(size, &star(center, s / 2.0, s / 5.0, points))
            }
        }
    }
}

fn filled(size: u32, shape: &impl Shape) -> MaskResult<ParticleField> {
    ParticleField::from_fn(size, size, |x, y| {
        if shape.contains(Point::new(x, y)) {
            1.0
        } else {
            0.0
        }
    })
}

fn regular_polygon(center: Point, radius: f64, sides: u32, start: f64) -> BezPath {
    let corners = (0..sides).map(|i| {
        let a = start + TAU * f64::from(i) / f64::from(sides);
        center + kurbo::Vec2::from_angle(a) * radius
    });
    closed_path(corners)
}

fn star(center: Point, outer: f64, inner: f64, points: u32) -> BezPath {
    let corners = (0..points * 2).map(|i| {
        let r = if i % 2 == 0 { outer } else { inner };
        let a = -FRAC_PI_2 + TAU * f64::from(i) / f64::from(points * 2);
        center + kurbo::Vec2::from_angle(a) * r
    });
    closed_path(corners)
}

fn closed_path(mut corners: impl Iterator<Item = Point>) -> BezPath {
    let mut path = BezPath::new();
    if let Some(first) = corners.next() {
        path.move_to(first);
        for p in corners {
            path.line_to(p);
        }
        path.close_path();
    }
    path
}

#[cfg(test)]
#[path = "../../tests/unit/particle/shapes.rs"]
mod tests;
