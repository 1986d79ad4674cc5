use nimbus_core::CloudParams;

use crate::bounds::VolumeBounds;

/// Cloud pass uniform block: 160 bytes in ten 16-byte rows.
///
/// Every vec3 is packed with a scalar in its fourth lane so a shader-side
/// struct declared in the same field order reads it identically under std140
/// and std430. Step counts are clamped before upload.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CloudUniforms {
    pub box_min: [f32; 3],
    pub clouds_scale: f32,
    pub box_max: [f32; 3],
    pub detail_scale: f32,
    pub clouds_offset: [f32; 3],
    pub detail_weight: f32,
    pub detail_offset: [f32; 3],
    pub blue_noise_strength: f32,
    pub shape_noise_weights: [f32; 4],
    pub detail_channel_weights: [f32; 3],
    pub empty_space_threshold: f32,
    pub light_color: [f32; 3],
    pub density_multiplier: f32,
    /// Normalized, pointing toward the light.
    pub light_direction: [f32; 3],
    pub absorption_primary: f32,
    pub absorption_secondary: f32,
    pub darkness_threshold: f32,
    pub scattering_anisotropy: f32,
    pub scattering_coefficient: f32,
    pub sample_count: u32,
    pub light_sample_count: u32,
    pub _padding: [u32; 2],
}

impl CloudUniforms {
    pub fn new(bounds: &VolumeBounds, params: &CloudParams) -> Self {
        Self {
            box_min: bounds.min().to_array(),
            clouds_scale: params.clouds_scale,
            box_max: bounds.max().to_array(),
            detail_scale: params.detail_scale,
            clouds_offset: params.clouds_offset.to_array(),
            detail_weight: params.detail_weight,
            detail_offset: params.detail_offset.to_array(),
            blue_noise_strength: params.blue_noise_strength,
            shape_noise_weights: params.shape_noise_weights.to_array(),
            detail_channel_weights: params.detail_channel_weights.to_array(),
            empty_space_threshold: params.empty_space_threshold,
            light_color: params.light_color.to_array(),
            density_multiplier: params.density_multiplier,
            light_direction: params.light_dir().to_array(),
            absorption_primary: params.absorption_primary,
            absorption_secondary: params.absorption_secondary,
            darkness_threshold: params.darkness_threshold,
            scattering_anisotropy: params.scattering_anisotropy,
            scattering_coefficient: params.scattering_coefficient,
            sample_count: params.primary_steps(),
            light_sample_count: params.light_steps(),
            _padding: [0; 2],
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}
