//! Whole-frame scenarios: camera, bounds, noise and parameters together,
//! checked through the public pipeline only.

use glam::{Vec3, Vec4};
use nimbus_core::CloudParams;
use nimbus_noise::{JitterTile, UniformNoise, WorleyDetail, WorleyShape};

use crate::bounds::VolumeBounds;
use crate::camera::CameraRays;
use crate::image::Image;
use crate::pipeline::CloudPipeline;
use crate::sky::default_sky;

const W: u32 = 24;
const H: u32 = 16;

fn scene_camera() -> CameraRays {
    CameraRays::look_at(
        Vec3::new(0.0, 0.5, -6.0),
        Vec3::ZERO,
        Vec3::Y,
        std::f32::consts::FRAC_PI_3,
        W as f32 / H as f32,
    )
}

fn scene_bounds() -> VolumeBounds {
    VolumeBounds::from_container(Vec3::ZERO, Vec3::new(4.0, 2.0, 4.0))
}

fn worley_pipeline(jitter: Option<JitterTile>) -> CloudPipeline {
    CloudPipeline::new(WorleyShape::default(), WorleyDetail::default(), jitter)
}

#[test]
fn test_zero_density_is_identity() {
    let params = CloudParams {
        density_multiplier: 0.0,
        sample_count: 1,
        light_sample_count: 1,
        ..CloudParams::default()
    };
    let bg = default_sky(W, H);
    let out = worley_pipeline(Some(JitterTile::bayer(2))).render_frame(
        &bg,
        &scene_bounds(),
        &params,
        &scene_camera(),
    );
    assert_eq!(out, bg);
}

#[test]
fn test_empty_volume_leaves_background() {
    // Threshold above any reachable density.
    let pipeline = CloudPipeline::new(UniformNoise(Vec4::splat(0.5)), UniformNoise(Vec3::ZERO), None);
    let params = CloudParams {
        shape_noise_weights: Vec4::new(1.0, 0.0, 0.0, 0.0),
        empty_space_threshold: 1.0,
        ..CloudParams::default()
    };
    let bg = default_sky(W, H);
    let out = pipeline.render_frame(&bg, &scene_bounds(), &params, &scene_camera());
    assert_eq!(out, bg);
}

#[test]
fn test_camera_facing_away_sees_background() {
    let camera = CameraRays::look_at(
        Vec3::new(0.0, 0.5, -6.0),
        Vec3::new(0.0, 0.5, -12.0),
        Vec3::Y,
        std::f32::consts::FRAC_PI_3,
        W as f32 / H as f32,
    );
    let bg = default_sky(W, H);
    let mut dest = Image::new(W, H, Vec3::ZERO);
    let stats = worley_pipeline(None)
        .render_into(&bg, &scene_bounds(), &CloudParams::default(), &camera, &mut dest)
        .expect("sizes match");
    assert_eq!(stats.hit_pixels, 0);
    assert_eq!(stats.primary_steps, 0);
    assert_eq!(dest, bg);
}

#[test]
fn test_render_is_deterministic() {
    let pipeline = worley_pipeline(Some(JitterTile::bayer(3)));
    let bg = default_sky(W, H);
    let params = CloudParams {
        density_multiplier: 3.0,
        empty_space_threshold: 0.1,
        ..CloudParams::default()
    };
    let a = pipeline.render_frame(&bg, &scene_bounds(), &params, &scene_camera());
    let b = pipeline.render_frame(&bg, &scene_bounds(), &params, &scene_camera());
    assert_eq!(a, b);
}

#[test]
fn test_step_budget_per_frame() {
    let pipeline = CloudPipeline::new(UniformNoise(Vec4::ONE), UniformNoise(Vec3::ZERO), None);
    let params = CloudParams {
        sample_count: 12,
        light_sample_count: 4,
        ..CloudParams::default()
    };
    let bg = default_sky(W, H);
    let mut dest = Image::new(W, H, Vec3::ZERO);
    let stats = pipeline
        .render_into(&bg, &scene_bounds(), &params, &scene_camera(), &mut dest)
        .expect("sizes match");
    assert_eq!(stats.pixels, (W * H) as u64);
    assert!(stats.hit_pixels > 0);
    assert!(stats.primary_steps <= stats.hit_pixels * 12);
    assert!(stats.light_steps <= stats.primary_steps * 4);
}

#[test]
fn test_dense_clouds_darken_and_stay_finite() {
    let pipeline = worley_pipeline(Some(JitterTile::white(8, 7)));
    let params = CloudParams {
        density_multiplier: 50.0,
        empty_space_threshold: 0.0,
        detail_weight: 0.2,
        sample_count: 32,
        ..CloudParams::default()
    };
    let bg = Image::new(W, H, Vec3::ONE);
    let mut dest = Image::new(W, H, Vec3::ZERO);
    let stats = pipeline
        .render_into(&bg, &scene_bounds(), &params, &scene_camera(), &mut dest)
        .expect("sizes match");
    assert!(dest.pixels().iter().all(|p| p.is_finite()));
    assert!(stats.hit_pixels > 0);
    let centre = dest.get(W / 2, H / 2).expect("in range");
    assert!(centre.x < 1.0, "centre pixel should be occluded: {centre}");
}

#[test]
fn test_nonfinite_params_stay_finite() {
    let pipeline = CloudPipeline::new(UniformNoise(Vec4::ONE), UniformNoise(Vec3::ZERO), None);
    let params = CloudParams {
        density_multiplier: f32::INFINITY,
        light_color: Vec3::splat(f32::MAX),
        ..CloudParams::default()
    };
    let bg = default_sky(W, H);
    let out = pipeline.render_frame(&bg, &scene_bounds(), &params, &scene_camera());
    assert!(out.pixels().iter().all(|p| p.is_finite()));
}
