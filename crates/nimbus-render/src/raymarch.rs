use glam::Vec3;
use nimbus_core::constants::TRANSMITTANCE_EPSILON;
use nimbus_core::math::{beer_lambert, is_finite3, sanitize_color, sanitize_density, sanitize_unit};
use nimbus_core::{CloudParams, Ray, Rgb};
use nimbus_noise::{DetailField, ShapeField};

use crate::bounds::VolumeBounds;
use crate::density::DensitySampler;
use crate::light_march::LightMarcher;
use crate::phase::henyey_greenstein;

/// Primary march state. `Miss`, `Saturated` and `Complete` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarchState {
    /// The ray never entered the volume.
    Miss,
    Marching,
    /// Transmittance dropped below the saturation epsilon.
    Saturated,
    /// The march reached the far side of the volume.
    Complete,
}

/// Running accumulators for a single ray evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
struct SampleState {
    transmittance: f32,
    accumulated_light: Rgb,
}

impl SampleState {
    fn new() -> Self {
        Self {
            transmittance: 1.0,
            accumulated_light: Vec3::ZERO,
        }
    }
}

/// One primary step, reported to `march_with` observers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepRecord {
    pub t: f32,
    pub density: f32,
    /// Transmittance after this step's absorption.
    pub transmittance: f32,
    pub light_steps: u32,
}

/// Result of marching one pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarchOutcome {
    /// `background * transmittance + accumulated light`.
    pub color: Rgb,
    pub transmittance: f32,
    pub accumulated_light: Rgb,
    pub state: MarchState,
    pub primary_steps: u32,
    pub light_steps: u32,
}

impl MarchOutcome {
    fn miss(background: Rgb) -> Self {
        Self {
            color: background,
            transmittance: 1.0,
            accumulated_light: Vec3::ZERO,
            state: MarchState::Miss,
            primary_steps: 0,
            light_steps: 0,
        }
    }
}

/// Walks view rays through the cloud volume.
///
/// Built once per frame from shared read-only inputs; `march` is a pure
/// function of its arguments and may be called from any thread.
#[derive(Clone, Copy)]
pub struct PrimaryRaymarcher<'a> {
    bounds: &'a VolumeBounds,
    params: &'a CloudParams,
    sampler: DensitySampler<'a>,
    light: LightMarcher<'a>,
    light_dir: Vec3,
}

impl<'a> PrimaryRaymarcher<'a> {
    pub fn new(
        bounds: &'a VolumeBounds,
        shape: &'a ShapeField,
        detail: &'a DetailField,
        params: &'a CloudParams,
    ) -> Self {
        let sampler = DensitySampler::new(shape, detail, params);
        Self {
            bounds,
            params,
            sampler,
            light: LightMarcher::new(sampler, bounds),
            light_dir: params.light_dir(),
        }
    }

    /// March one ray. `jitter` is the pixel's tiling-noise value in [0, 1].
    ///
    /// The start is pushed forward by `jitter * blue_noise_strength` steps and
    /// the skipped front segment is never integrated, so per-pixel opacity
    /// varies with the dither value. Keep `blue_noise_strength` well below
    /// `sample_count`; at 1 or less it only dithers within the first step.
    pub fn march(&self, ray: &Ray, jitter: f32, background: Rgb) -> MarchOutcome {
        self.march_with(ray, jitter, background, |_| {})
    }

    /// March one ray, reporting every primary step to `on_step`.
    pub fn march_with<F>(
        &self,
        ray: &Ray,
        jitter: f32,
        background: Rgb,
        mut on_step: F,
    ) -> MarchOutcome
    where
        F: FnMut(&StepRecord),
    {
        let Some(hit) = self.bounds.intersect(ray) else {
            return MarchOutcome::miss(background);
        };

        let p = self.params;
        let max_steps = p.primary_steps();
        let step_size = hit.length() / max_steps as f32;

        let mut acc = SampleState::new();
        let mut state = MarchState::Marching;
        let mut primary_steps = 0u32;
        let mut light_steps = 0u32;

        if !(step_size > 0.0 && step_size.is_finite()) {
            state = MarchState::Complete;
        }

        let jitter = sanitize_unit(jitter);
        let mut t = hit.t_near + jitter * p.blue_noise_strength.max(0.0) * step_size;

        // Both directions are fixed for the whole ray, so the phase is too.
        let phase = henyey_greenstein(ray.direction.dot(self.light_dir), p.scattering_anisotropy);
        let scatter = p.light_color * phase * p.scattering_coefficient;

        while state == MarchState::Marching {
            if primary_steps >= max_steps || t >= hit.t_far {
                state = MarchState::Complete;
                break;
            }
            primary_steps += 1;

            let position = ray.at(t);
            let density = sanitize_density(self.sampler.sample(position));
            let mut step_light_steps = 0;

            if density > 0.0 {
                let light = self.light.march_to_light(position);
                step_light_steps = light.steps;
                light_steps += light.steps;

                let contribution =
                    scatter * light.attenuation * density * step_size * acc.transmittance;
                if is_finite3(contribution) {
                    acc.accumulated_light += contribution;
                } else {
                    acc.accumulated_light += sanitize_color(contribution);
                }
                acc.transmittance = sanitize_unit(
                    acc.transmittance * beer_lambert(density, p.absorption_primary, step_size),
                );
            }

            on_step(&StepRecord {
                t,
                density,
                transmittance: acc.transmittance,
                light_steps: step_light_steps,
            });

            t += step_size;
            if acc.transmittance < TRANSMITTANCE_EPSILON {
                state = MarchState::Saturated;
            }
        }

        let mut color = background * acc.transmittance + acc.accumulated_light;
        if !is_finite3(color) {
            color = sanitize_color(color);
        }

        MarchOutcome {
            color,
            transmittance: acc.transmittance,
            accumulated_light: acc.accumulated_light,
            state,
            primary_steps,
            light_steps,
        }
    }
}
