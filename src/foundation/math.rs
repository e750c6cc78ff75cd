use crate::foundation::core::Point;

/// Distance from `n` to the nearest edge of `0..count`.
///
/// Symmetric: `reflect(n, count) == reflect(count - 1 - n, count)`.
pub fn reflect(n: i64, count: i64) -> i64 {
    n.min(count - 1 - n)
}

/// Largest value [`reflect`] takes for `n` in `0..count`.
pub fn reflect_max(count: i64) -> i64 {
    (count as f64 / 2.0 - 0.5).floor() as i64
}

/// [`reflect`] over real-valued steps.
pub(crate) fn reflect_f64(n: f64, count: f64) -> f64 {
    n.min(count - 1.0 - n)
}

/// [`reflect_max`] over a step range `0..=max`. Only whole-number steps get
/// the integer bound; real-valued steps can land on `max / 2` itself.
pub(crate) fn reflect_max_f64(max: f64, whole_steps: bool) -> f64 {
    if whole_steps && max.fract() == 0.0 {
        reflect_max(max as i64 + 1) as f64
    } else {
        max / 2.0
    }
}

pub(crate) fn dist_sq(a: Point, b: Point) -> f64 {
    (a - b).hypot2()
}

pub(crate) fn is_integral(v: f64) -> bool {
    v.is_finite() && v.fract() == 0.0
}
