//! Per-frame parameter drivers: wind scrolls the noise offsets, the sun
//! path swings the light direction. Both mutate the host's `CloudParams`
//! between frames, never during one.

use glam::{Quat, Vec3};
use nimbus_core::CloudParams;

/// Advances shape and detail offsets by a velocity each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindDriver {
    /// Shape noise drift, noise-space units per second.
    pub wind_velocity: Vec3,
    /// Detail noise drift, noise-space units per second.
    pub wind_turbulence: Vec3,
}

impl Default for WindDriver {
    fn default() -> Self {
        Self {
            wind_velocity: Vec3::new(1.0, 0.0, 1.0),
            wind_turbulence: Vec3::new(1.0, -1.0, -1.0),
        }
    }
}

impl WindDriver {
    pub fn advance(&self, params: &mut CloudParams, dt: f32) {
        if !(dt.is_finite() && dt > 0.0) {
            return;
        }
        params.clouds_offset += self.wind_velocity * dt;
        params.detail_offset += self.wind_turbulence * dt;
    }
}

/// Rotates the light direction about the world X axis (a setting sun).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunPath {
    /// Degrees per second.
    pub speed: f32,
}

impl SunPath {
    pub fn advance(&self, params: &mut CloudParams, dt: f32) {
        if !(dt.is_finite() && dt > 0.0 && self.speed.is_finite()) {
            return;
        }
        let rotation = Quat::from_rotation_x(-(self.speed * dt).to_radians());
        params.light_direction = (rotation * params.light_dir()).normalize();
    }
}
