/// Packs a normalized reveal time into RGBA8.
///
/// The value is clamped to `[0, 1]` and spread across the color channels in
/// base 256: channel 0 holds the coarse order, channels 1 and 2 the finer
/// fractions. Alpha is always opaque. `1.0` encodes as all-255.
pub fn encode_value(value: f64) -> [u8; 4] {
    if value.is_nan() || value <= 0.0 {
        return [0, 0, 0, 255];
    }
    if value >= 1.0 {
        return [255, 255, 255, 255];
    }

    let mut out = [0u8, 0, 0, 255];
    let mut v = value;
    for c in out.iter_mut().take(3) {
        v *= 256.0;
        let whole = v.floor();
        *c = whole as u8;
        v -= whole;
    }
    out
}

/// Inverse of [`encode_value`], up to 24-bit precision.
pub fn decode_value(rgba: [u8; 4]) -> f64 {
    f64::from(rgba[0]) / 256.0
        + f64::from(rgba[1]) / 65_536.0
        + f64::from(rgba[2]) / 16_777_216.0
}

/// Opacity of a pixel at transition progress `t` in `[0, 1]`.
///
/// `discriminator` is the decoded mask value. `ramp` widens the fade band
/// around the reveal front; a non-positive ramp gives a hard edge.
pub fn reveal_alpha(discriminator: f64, t: f64, ramp: f64) -> f64 {
    if ramp <= 0.0 {
        return if t >= discriminator && t > 0.0 { 1.0 } else { 0.0 };
    }
    let front = t * (1.0 + 2.0 * ramp) - ramp;
    ((front - discriminator) / ramp + 0.5).clamp(0.0, 1.0)
}
