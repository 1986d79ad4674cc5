use crate::constants::{
    MAX_LIGHT_SAMPLE_COUNT, MAX_SAMPLE_COUNT, MIN_DIRECTION_LENGTH, MIN_LIGHT_SAMPLE_COUNT,
    MIN_SAMPLE_COUNT,
};
use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// Per-frame cloud parameter snapshot.
///
/// Populated by the host (inspector values, RON files, wind driver) and read
/// by the render kernel without mutation. Ranges are checked by
/// `nimbus_config::validator`; missing fields in RON fall back to `Default`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CloudParams {
    /// Shape noise translation in noise space. Advanced by wind each frame.
    pub clouds_offset: Vec3,
    /// World-to-shape-noise scale. Must be > 0.
    pub clouds_scale: f32,
    /// Per-channel weights dotted with the 4-channel shape sample.
    pub shape_noise_weights: Vec4,

    /// Detail noise translation in noise space.
    pub detail_offset: Vec3,
    /// World-to-detail-noise scale. Must be > 0.
    pub detail_scale: f32,
    /// Per-channel weights dotted with the 3-channel detail sample.
    pub detail_channel_weights: Vec3,
    /// Erosion strength of the detail noise, 0..=3.
    pub detail_weight: f32,

    /// Primary steps per pixel, 1..=200.
    pub sample_count: u32,
    /// Light steps per primary step, 1..=10.
    pub light_sample_count: u32,
    /// Start-offset jitter, in primary steps, 0..=15.
    pub blue_noise_strength: f32,
    /// Densities at or below this are empty space, 0..=10.
    pub empty_space_threshold: f32,

    pub density_multiplier: f32,
    /// Absorption along the view ray.
    pub absorption_primary: f32,
    /// Absorption along the secondary rays toward the light.
    pub absorption_secondary: f32,
    /// Minimum light attenuation, 0..=1.
    pub darkness_threshold: f32,
    /// Henyey-Greenstein `g`, -1..=1.
    pub scattering_anisotropy: f32,
    pub scattering_coefficient: f32,

    pub light_color: Vec3,
    /// Direction from the scene toward the light.
    pub light_direction: Vec3,
}

impl Default for CloudParams {
    fn default() -> Self {
        Self {
            clouds_offset: Vec3::ZERO,
            clouds_scale: 1.0,
            shape_noise_weights: Vec4::new(1.0, 0.0, 0.0, 0.0),
            detail_offset: Vec3::ZERO,
            detail_scale: 1.0,
            detail_channel_weights: Vec3::new(1.0, 0.0, 0.0),
            detail_weight: 1.0,
            sample_count: 6,
            light_sample_count: 5,
            blue_noise_strength: 5.0,
            empty_space_threshold: 0.2,
            density_multiplier: 1.0,
            absorption_primary: 1.0,
            absorption_secondary: 1.0,
            darkness_threshold: 0.5,
            scattering_anisotropy: 0.5,
            scattering_coefficient: 0.2,
            light_color: Vec3::ONE,
            light_direction: Vec3::Y,
        }
    }
}

impl CloudParams {
    /// Primary step count clamped to the supported range.
    pub fn primary_steps(&self) -> u32 {
        self.sample_count.clamp(MIN_SAMPLE_COUNT, MAX_SAMPLE_COUNT)
    }

    /// Light step count clamped to the supported range.
    pub fn light_steps(&self) -> u32 {
        self.light_sample_count
            .clamp(MIN_LIGHT_SAMPLE_COUNT, MAX_LIGHT_SAMPLE_COUNT)
    }

    /// Unit direction toward the light. Degenerate input falls back to straight up.
    pub fn light_dir(&self) -> Vec3 {
        let len = self.light_direction.length();
        if len.is_finite() && len > MIN_DIRECTION_LENGTH {
            self.light_direction / len
        } else {
            Vec3::Y
        }
    }
}
