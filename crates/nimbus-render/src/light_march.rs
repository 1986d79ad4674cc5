use glam::Vec3;
use nimbus_core::math::{sanitize_density, sanitize_unit};
use nimbus_core::Ray;

use crate::bounds::VolumeBounds;
use crate::density::DensitySampler;

/// Result of one secondary march.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightSample {
    /// Darkness-floored light attenuation in `[darkness_threshold, 1]`.
    pub attenuation: f32,
    /// Density samples taken (never more than the light step count).
    pub steps: u32,
}

/// Secondary raymarch from a sample point toward the light.
#[derive(Clone, Copy)]
pub struct LightMarcher<'a> {
    sampler: DensitySampler<'a>,
    bounds: &'a VolumeBounds,
    light_dir: Vec3,
    steps: u32,
    absorption: f32,
    darkness_threshold: f32,
}

impl<'a> LightMarcher<'a> {
    pub fn new(sampler: DensitySampler<'a>, bounds: &'a VolumeBounds) -> Self {
        let params = sampler.params();
        Self {
            sampler,
            bounds,
            light_dir: params.light_dir(),
            steps: params.light_steps(),
            absorption: params.absorption_secondary.max(0.0),
            darkness_threshold: sanitize_unit(params.darkness_threshold),
        }
    }

    /// Attenuation of light reaching `point` through the volume.
    pub fn march_to_light(&self, point: Vec3) -> LightSample {
        let (density_sum, steps) = self.optical_depth(point);
        LightSample {
            attenuation: darkened_attenuation(density_sum, self.absorption, self.darkness_threshold),
            steps,
        }
    }

    /// Integrated density between `point` and the volume exit toward the light.
    /// Midpoint rule over exactly `light_sample_count` equal segments.
    pub fn optical_depth(&self, point: Vec3) -> (f32, u32) {
        let ray = Ray::new(point, self.light_dir);
        let Some(hit) = self.bounds.intersect(&ray) else {
            return (0.0, 0);
        };
        let step_size = hit.length() / self.steps as f32;
        if !(step_size > 0.0 && step_size.is_finite()) {
            return (0.0, 0);
        }

        let mut density_sum = 0.0f32;
        for i in 0..self.steps {
            let t = hit.t_near + (i as f32 + 0.5) * step_size;
            density_sum += sanitize_density(self.sampler.sample(ray.at(t))) * step_size;
        }
        (density_sum, self.steps)
    }
}

/// Beer–Lambert attenuation lifted by the darkness floor:
/// `floor + exp(-sum * absorption) * (1 - floor)`.
pub fn darkened_attenuation(density_sum: f32, absorption: f32, darkness_threshold: f32) -> f32 {
    let transmittance = sanitize_unit((-(density_sum.max(0.0) * absorption)).exp());
    darkness_threshold + transmittance * (1.0 - darkness_threshold)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;
    use nimbus_core::CloudParams;
    use nimbus_noise::UniformNoise;

    fn unit_box() -> VolumeBounds {
        VolumeBounds::new(Vec3::splat(-1.0), Vec3::splat(1.0))
    }

    fn solid_params() -> CloudParams {
        CloudParams {
            empty_space_threshold: 0.0,
            detail_weight: 0.0,
            light_direction: Vec3::Y,
            absorption_secondary: 1.0,
            darkness_threshold: 0.0,
            light_sample_count: 4,
            ..Default::default()
        }
    }

    #[test]
    fn test_optical_depth_uniform_medium() {
        let shape = UniformNoise(Vec4::new(0.5, 0.0, 0.0, 0.0));
        let detail = UniformNoise(Vec3::ZERO);
        let params = solid_params();
        let bounds = unit_box();
        let marcher = LightMarcher::new(DensitySampler::new(&shape, &detail, &params), &bounds);

        // From the centre, 1 unit to the top face at density 0.5.
        let (sum, steps) = marcher.optical_depth(Vec3::ZERO);
        assert_eq!(steps, 4);
        assert!((sum - 0.5).abs() < 1e-5, "sum {sum}");

        let sample = marcher.march_to_light(Vec3::ZERO);
        assert!((sample.attenuation - (-0.5f32).exp()).abs() < 1e-5);
    }

    #[test]
    fn test_empty_volume_full_light() {
        let shape = UniformNoise(Vec4::ZERO);
        let detail = UniformNoise(Vec3::ZERO);
        let params = solid_params();
        let bounds = unit_box();
        let marcher = LightMarcher::new(DensitySampler::new(&shape, &detail, &params), &bounds);
        assert_eq!(marcher.march_to_light(Vec3::new(0.2, -0.7, 0.1)).attenuation, 1.0);
    }

    #[test]
    fn test_darkness_floor_holds() {
        for floor in [0.0, 0.25, 0.5, 1.0] {
            for sum in [0.0, 0.1, 1.0, 10.0, 1.0e6, f32::INFINITY] {
                let a = darkened_attenuation(sum, 2.0, floor);
                assert!(a >= floor - 1e-7, "floor {floor} sum {sum}: {a}");
                assert!(a <= 1.0 + 1e-7);
            }
        }
    }

    #[test]
    fn test_darkness_floor_formula() {
        let a = darkened_attenuation(1.0, 1.0, 0.5);
        let expected = 0.5 + (-1.0f32).exp() * 0.5;
        assert!((a - expected).abs() < 1e-6);
    }

    #[test]
    fn test_nan_sum_is_bounded() {
        let a = darkened_attenuation(f32::NAN, 1.0, 0.3);
        assert!(a.is_finite() && a >= 0.3);
    }

    #[test]
    fn test_step_count_bounded() {
        let shape = UniformNoise(Vec4::ONE);
        let detail = UniformNoise(Vec3::ZERO);
        for count in [1, 3, 10, 50] {
            let params = CloudParams {
                light_sample_count: count,
                ..solid_params()
            };
            let bounds = unit_box();
            let marcher =
                LightMarcher::new(DensitySampler::new(&shape, &detail, &params), &bounds);
            let sample = marcher.march_to_light(Vec3::new(0.0, -0.9, 0.0));
            assert!(sample.steps <= count.min(10));
            assert!(sample.steps >= 1);
        }
    }

    #[test]
    fn test_point_on_exit_face_is_unshadowed() {
        let shape = UniformNoise(Vec4::ONE);
        let detail = UniformNoise(Vec3::ZERO);
        let params = solid_params();
        let bounds = unit_box();
        let marcher = LightMarcher::new(DensitySampler::new(&shape, &detail, &params), &bounds);
        let sample = marcher.march_to_light(Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(sample.attenuation, 1.0);
    }
}
