use crate::constants::MAX_SAMPLE_DENSITY;
use glam::Vec3;

/// Replace NaN with zero and clamp the result into `[lo, hi]`.
/// Infinities saturate to the nearest bound.
pub fn sanitize(value: f32, lo: f32, hi: f32) -> f32 {
    if value.is_nan() {
        lo.max(0.0).min(hi)
    } else {
        value.clamp(lo, hi)
    }
}

/// Clamp a raw density sample into `[0, MAX_SAMPLE_DENSITY]`, mapping NaN to zero.
pub fn sanitize_density(density: f32) -> f32 {
    sanitize(density, 0.0, MAX_SAMPLE_DENSITY)
}

/// Clamp a light attenuation factor into `[0, 1]`, mapping NaN to zero.
pub fn sanitize_unit(value: f32) -> f32 {
    sanitize(value, 0.0, 1.0)
}

/// Per-channel color sanitize: NaN becomes 0, infinities become `f32::MAX`-bounded.
pub fn sanitize_color(color: Vec3) -> Vec3 {
    Vec3::new(
        sanitize(color.x, 0.0, f32::MAX),
        sanitize(color.y, 0.0, f32::MAX),
        sanitize(color.z, 0.0, f32::MAX),
    )
}

/// Beer–Lambert transmittance for an optical depth of `density * absorption * distance`.
pub fn beer_lambert(density: f32, absorption: f32, distance: f32) -> f32 {
    (-(density * absorption * distance)).exp()
}

/// True when every component is finite.
pub fn is_finite3(v: Vec3) -> bool {
    v.x.is_finite() && v.y.is_finite() && v.z.is_finite()
}
