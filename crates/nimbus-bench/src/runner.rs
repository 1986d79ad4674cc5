use std::path::PathBuf;
use std::time::Instant;

use glam::{UVec3, Vec3};
use nimbus_config::{LoadError, SunPath, WindDriver};
use nimbus_core::{CloudParams, NimbusError};
use nimbus_noise::{JitterTile, NoiseError, NoiseVolume, WorleyDetail, WorleyShape};
use nimbus_render::sky::default_sky;
use nimbus_render::{CloudPipeline, FrameStats, Image};

use crate::scenes::SceneConfig;

/// Resolution of the baked shape volume (per axis).
pub const SHAPE_VOLUME_SIZE: u32 = 32;
/// Resolution of the baked detail volume (per axis).
pub const DETAIL_VOLUME_SIZE: u32 = 16;
/// Simulated frame interval used to advance the wind and sun.
pub const FRAME_DT: f32 = 1.0 / 60.0;
/// Sun sweep during a scene, degrees per second.
pub const SUN_SPEED_DEG_PER_S: f32 = 3.0;

#[derive(Debug, thiserror::Error)]
pub enum BenchError {
    #[error("noise bake failed: {0}")]
    Noise(#[from] NoiseError),
    #[error("unknown preset '{0}'")]
    UnknownPreset(String),
    #[error(transparent)]
    Params(#[from] LoadError),
    #[error(transparent)]
    Render(#[from] NimbusError),
    #[error("PNG export to {path} failed: {message}")]
    Png { path: PathBuf, message: String },
}

/// Timing data for a single benchmark run.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TimingSeries {
    pub mean_ms: f64,
    pub median_ms: f64,
    pub p95_ms: f64,
    pub p99_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
}

/// Result of a single scene benchmark.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BenchmarkResult {
    pub scene_name: String,
    pub width: u32,
    pub height: u32,
    pub frame_count: u32,
    /// Fraction of pixels whose ray entered the volume, last frame.
    pub coverage: f64,
    pub primary_steps_per_frame: u64,
    pub light_steps_per_frame: u64,
    pub timings: TimingSeries,
}

/// Renders each scene for a fixed number of frames on the CPU kernel.
pub struct BenchmarkRunner {
    pipeline: CloudPipeline,
    wind: WindDriver,
    sun: SunPath,
    frame_count: u32,
    width: u32,
    height: u32,
    params_override: Option<CloudParams>,
    png_dir: Option<PathBuf>,
}

impl BenchmarkRunner {
    /// Bake the noise volumes once; every scene shares them.
    pub fn new(frame_count: u32, width: u32, height: u32) -> Result<Self, BenchError> {
        let started = Instant::now();
        let shape =
            NoiseVolume::<4>::bake(&WorleyShape::default(), UVec3::splat(SHAPE_VOLUME_SIZE))?;
        let detail =
            NoiseVolume::<3>::bake(&WorleyDetail::default(), UVec3::splat(DETAIL_VOLUME_SIZE))?;
        log::info!(
            "Baked noise volumes ({}^3 shape, {}^3 detail) in {:.1}ms",
            SHAPE_VOLUME_SIZE,
            DETAIL_VOLUME_SIZE,
            started.elapsed().as_secs_f64() * 1000.0
        );

        Ok(Self {
            pipeline: CloudPipeline::new(shape, detail, Some(JitterTile::bayer(3))),
            wind: WindDriver::default(),
            sun: SunPath {
                speed: SUN_SPEED_DEG_PER_S,
            },
            frame_count,
            width,
            height,
            params_override: None,
            png_dir: None,
        })
    }

    /// Use these parameters for every scene instead of the scene presets.
    pub fn with_params(mut self, params: CloudParams) -> Self {
        self.params_override = Some(params);
        self
    }

    /// Write the last frame of each scene to `<dir>/<scene>.png`.
    pub fn with_png_dir(mut self, dir: PathBuf) -> Self {
        self.png_dir = Some(dir);
        self
    }

    /// Per-frame parameter animation: wind scrolls the noise, the sun sets.
    pub fn advance_params(&self, params: &mut CloudParams, dt: f32) {
        self.wind.advance(params, dt);
        self.sun.advance(params, dt);
    }

    fn scene_params(&self, config: &SceneConfig) -> Result<CloudParams, BenchError> {
        if let Some(params) = &self.params_override {
            return Ok(params.clone());
        }
        match nimbus_config::preset(config.preset) {
            Some(params) => Ok(params?),
            None => Err(BenchError::UnknownPreset(config.preset.to_string())),
        }
    }

    /// Run a single benchmark scene and return timing results.
    pub fn run_scene(&self, config: &SceneConfig) -> Result<BenchmarkResult, BenchError> {
        log::info!(
            "Running scene '{}' ({}x{}, {} frames)...",
            config.name,
            self.width,
            self.height,
            self.frame_count
        );

        let mut params = self.scene_params(config)?;
        let bounds = config.bounds();
        let camera = config.camera(self.width, self.height);
        let background = default_sky(self.width, self.height);
        let mut frame = Image::new(self.width, self.height, Vec3::ZERO);

        let mut frame_times = Vec::with_capacity(self.frame_count as usize);
        let mut last_stats = FrameStats::default();

        for _ in 0..self.frame_count {
            self.advance_params(&mut params, FRAME_DT);

            let frame_start = Instant::now();
            last_stats = self
                .pipeline
                .render_into(&background, &bounds, &params, &camera, &mut frame)?;
            frame_times.push(frame_start.elapsed().as_secs_f64() * 1000.0);
        }

        let timings = compute_timings(&frame_times);
        log::info!(
            "  Done: mean={:.2}ms, p95={:.2}ms, p99={:.2}ms",
            timings.mean_ms,
            timings.p95_ms,
            timings.p99_ms
        );

        if let Some(dir) = &self.png_dir {
            let path = dir.join(format!("{}.png", config.name));
            save_png(&frame, &path)?;
            log::info!("  Wrote {}", path.display());
        }

        let coverage = if last_stats.pixels == 0 {
            0.0
        } else {
            last_stats.hit_pixels as f64 / last_stats.pixels as f64
        };

        Ok(BenchmarkResult {
            scene_name: config.name.to_string(),
            width: self.width,
            height: self.height,
            frame_count: self.frame_count,
            coverage,
            primary_steps_per_frame: last_stats.primary_steps,
            light_steps_per_frame: last_stats.light_steps,
            timings,
        })
    }
}

/// Encode `frame` as an 8-bit RGBA PNG.
pub fn save_png(frame: &Image, path: &std::path::Path) -> Result<(), BenchError> {
    let png_err = |message: String| BenchError::Png {
        path: path.to_path_buf(),
        message,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| png_err(e.to_string()))?;
    }
    let img: image::RgbaImage =
        image::ImageBuffer::from_raw(frame.width(), frame.height(), frame.to_rgba8())
            .ok_or_else(|| png_err("pixel buffer does not match dimensions".to_string()))?;
    img.save(path).map_err(|e| png_err(e.to_string()))
}

/// Compute timing statistics from a list of frame times in milliseconds.
fn compute_timings(times: &[f64]) -> TimingSeries {
    if times.is_empty() {
        return TimingSeries {
            mean_ms: 0.0,
            median_ms: 0.0,
            p95_ms: 0.0,
            p99_ms: 0.0,
            min_ms: 0.0,
            max_ms: 0.0,
        };
    }

    let mut sorted = times.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let n = sorted.len();
    let mean = sorted.iter().sum::<f64>() / n as f64;
    let median = if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    };
    let p95_idx = ((n as f64) * 0.95).ceil() as usize;
    let p99_idx = ((n as f64) * 0.99).ceil() as usize;

    TimingSeries {
        mean_ms: mean,
        median_ms: median,
        p95_ms: sorted[p95_idx.min(n - 1)],
        p99_ms: sorted[p99_idx.min(n - 1)],
        min_ms: sorted[0],
        max_ms: sorted[n - 1],
    }
}
