use std::f32::consts::PI;

use nimbus_core::constants::PHASE_DENOM_EPSILON;

/// Henyey-Greenstein phase function.
///
/// `cos_theta` is the cosine between the view direction and the direction
/// toward the light; `g > 0` biases scattering forward. The denominator base
/// is floored so `|g| = 1` at the singular angle stays finite.
pub fn henyey_greenstein(cos_theta: f32, g: f32) -> f32 {
    let cos_theta = cos_theta.clamp(-1.0, 1.0);
    let g2 = g * g;
    let base = (1.0 + g2 - 2.0 * g * cos_theta).max(PHASE_DENOM_EPSILON);
    (1.0 - g2) / (4.0 * PI * base.powf(1.5))
}
