use glam::{Vec3, Vec4};
use nimbus_core::{CloudParams, NimbusError};
use nimbus_noise::{JitterTile, NoiseField};
use rayon::prelude::*;

use crate::bounds::VolumeBounds;
use crate::camera::CameraRays;
use crate::image::Image;
use crate::raymarch::{MarchState, PrimaryRaymarcher};

/// Per-frame counters summed over all pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub pixels: u64,
    /// Pixels whose view ray entered the volume.
    pub hit_pixels: u64,
    pub saturated_pixels: u64,
    pub primary_steps: u64,
    pub light_steps: u64,
}

impl FrameStats {
    fn merge(self, other: Self) -> Self {
        Self {
            pixels: self.pixels + other.pixels,
            hit_pixels: self.hit_pixels + other.hit_pixels,
            saturated_pixels: self.saturated_pixels + other.saturated_pixels,
            primary_steps: self.primary_steps + other.primary_steps,
            light_steps: self.light_steps + other.light_steps,
        }
    }
}

/// Full-screen cloud pass.
///
/// Constructed once with the read-only noise sources before the first frame.
/// Each call to `render_frame` takes that frame's parameter snapshot and
/// evaluates every pixel independently on the rayon pool.
pub struct CloudPipeline {
    shape: Box<dyn NoiseField<Value = Vec4>>,
    detail: Box<dyn NoiseField<Value = Vec3>>,
    jitter: Option<JitterTile>,
}

impl CloudPipeline {
    pub fn new<S, D>(shape: S, detail: D, jitter: Option<JitterTile>) -> Self
    where
        S: NoiseField<Value = Vec4> + 'static,
        D: NoiseField<Value = Vec3> + 'static,
    {
        Self {
            shape: Box::new(shape),
            detail: Box::new(detail),
            jitter,
        }
    }

    pub fn jitter(&self) -> Option<&JitterTile> {
        self.jitter.as_ref()
    }

    /// Composite clouds over `background` into a new image of the same size.
    pub fn render_frame(
        &self,
        background: &Image,
        bounds: &VolumeBounds,
        params: &CloudParams,
        camera: &CameraRays,
    ) -> Image {
        let mut dest = Image::new(background.width(), background.height(), Vec3::ZERO);
        self.render_rows(background, bounds, params, camera, &mut dest);
        dest
    }

    /// Like `render_frame`, but writes into a caller-owned buffer so hosts can
    /// reuse it across frames.
    pub fn render_into(
        &self,
        background: &Image,
        bounds: &VolumeBounds,
        params: &CloudParams,
        camera: &CameraRays,
        dest: &mut Image,
    ) -> Result<FrameStats, NimbusError> {
        if dest.width() != background.width() || dest.height() != background.height() {
            return Err(NimbusError::DimensionMismatch {
                width: background.width(),
                height: background.height(),
                dest_width: dest.width(),
                dest_height: dest.height(),
            });
        }
        Ok(self.render_rows(background, bounds, params, camera, dest))
    }

    fn render_rows(
        &self,
        background: &Image,
        bounds: &VolumeBounds,
        params: &CloudParams,
        camera: &CameraRays,
        dest: &mut Image,
    ) -> FrameStats {
        let width = background.width();
        let height = background.height();
        if width == 0 || height == 0 {
            return FrameStats::default();
        }
        log::debug!(
            "rendering {}x{} clouds: {} primary x {} light steps",
            width,
            height,
            params.primary_steps(),
            params.light_steps()
        );

        let marcher = PrimaryRaymarcher::new(bounds, &*self.shape, &*self.detail, params);
        let jitter = self.jitter.as_ref();

        let stats = dest
            .pixels_mut()
            .par_chunks_mut(width as usize)
            .zip(background.pixels().par_chunks(width as usize))
            .enumerate()
            .map(|(y, (row, bg_row))| {
                let y = y as u32;
                let mut stats = FrameStats::default();
                for (x, (out, &bg)) in row.iter_mut().zip(bg_row).enumerate() {
                    let x = x as u32;
                    stats.pixels += 1;
                    let Some(ray) = camera.ray(x, y, width, height) else {
                        *out = bg;
                        continue;
                    };
                    let dither = jitter.map_or(0.0, |tile| tile.sample(x, y));
                    let outcome = marcher.march(&ray, dither, bg);
                    *out = outcome.color;
                    if outcome.state != MarchState::Miss {
                        stats.hit_pixels += 1;
                    }
                    if outcome.state == MarchState::Saturated {
                        stats.saturated_pixels += 1;
                    }
                    stats.primary_steps += outcome.primary_steps as u64;
                    stats.light_steps += outcome.light_steps as u64;
                }
                stats
            })
            .reduce(FrameStats::default, FrameStats::merge);

        log::debug!(
            "frame done: {} of {} pixels hit the volume, {} saturated",
            stats.hit_pixels,
            stats.pixels,
            stats.saturated_pixels
        );
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nimbus_noise::UniformNoise;

    fn camera() -> CameraRays {
        CameraRays::look_at(
            Vec3::new(0.0, 0.0, -5.0),
            Vec3::ZERO,
            Vec3::Y,
            std::f32::consts::FRAC_PI_3,
            1.0,
        )
    }

    #[test]
    fn test_render_into_rejects_size_mismatch() {
        let pipeline = CloudPipeline::new(UniformNoise(Vec4::ONE), UniformNoise(Vec3::ZERO), None);
        let bg = Image::new(4, 4, Vec3::ONE);
        let mut dest = Image::new(4, 3, Vec3::ZERO);
        let bounds = VolumeBounds::new(Vec3::splat(-1.0), Vec3::splat(1.0));
        let err = pipeline
            .render_into(&bg, &bounds, &CloudParams::default(), &camera(), &mut dest)
            .unwrap_err();
        assert_eq!(
            err,
            NimbusError::DimensionMismatch {
                width: 4,
                height: 4,
                dest_width: 4,
                dest_height: 3
            }
        );
    }

    #[test]
    fn test_empty_image() {
        let pipeline = CloudPipeline::new(UniformNoise(Vec4::ONE), UniformNoise(Vec3::ZERO), None);
        let bg = Image::new(0, 0, Vec3::ZERO);
        let bounds = VolumeBounds::new(Vec3::splat(-1.0), Vec3::splat(1.0));
        let out = pipeline.render_frame(&bg, &bounds, &CloudParams::default(), &camera());
        assert_eq!(out.pixels().len(), 0);
    }

    #[test]
    fn test_stats_count_every_pixel() {
        let pipeline = CloudPipeline::new(UniformNoise(Vec4::ONE), UniformNoise(Vec3::ZERO), None);
        let bg = Image::new(8, 6, Vec3::splat(0.5));
        let mut dest = Image::new(8, 6, Vec3::ZERO);
        let bounds = VolumeBounds::new(Vec3::splat(-1.0), Vec3::splat(1.0));
        let stats = pipeline
            .render_into(&bg, &bounds, &CloudParams::default(), &camera(), &mut dest)
            .expect("sizes match");
        assert_eq!(stats.pixels, 48);
        assert!(stats.hit_pixels > 0 && stats.hit_pixels < 48);
    }
}
