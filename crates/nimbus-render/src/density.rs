use glam::Vec3;
use nimbus_core::math::sanitize_density;
use nimbus_core::CloudParams;
use nimbus_noise::{DetailField, ShapeField};

/// Maps world positions to cloud density.
///
/// Base shape comes from the weighted 4-channel shape noise; the weighted
/// 3-channel detail noise is subtracted from it (erosion), then the empty
/// space threshold is removed and the remainder scaled. Holds only shared
/// references, so it is `Copy` and stateless between calls.
#[derive(Clone, Copy)]
pub struct DensitySampler<'a> {
    shape: &'a ShapeField,
    detail: &'a DetailField,
    params: &'a CloudParams,
}

impl<'a> DensitySampler<'a> {
    pub fn new(shape: &'a ShapeField, detail: &'a DetailField, params: &'a CloudParams) -> Self {
        Self {
            shape,
            detail,
            params,
        }
    }

    pub fn params(&self) -> &'a CloudParams {
        self.params
    }

    /// Density at `world_pos`. Always finite and >= 0.
    pub fn sample(&self, world_pos: Vec3) -> f32 {
        let p = self.params;

        let shape_uv = world_pos * p.clouds_scale + p.clouds_offset;
        let base_density = self.shape.sample(shape_uv).dot(p.shape_noise_weights);

        let detail_uv = world_pos * p.detail_scale + p.detail_offset;
        let detail_sample = self.detail.sample(detail_uv).dot(p.detail_channel_weights);

        let eroded = base_density - detail_sample * p.detail_weight;
        let above_threshold = (eroded - p.empty_space_threshold).max(0.0);
        if above_threshold <= 0.0 {
            return 0.0;
        }
        sanitize_density(above_threshold * p.density_multiplier)
    }
}
