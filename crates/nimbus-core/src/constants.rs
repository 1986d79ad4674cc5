//! Single source of truth for shared constants.
//! Parameter ranges are enforced by the config validator; the render kernel
//! re-clamps the iteration bounds so a bad snapshot can never loop unbounded.

/// Minimum primary raymarch steps per pixel.
pub const MIN_SAMPLE_COUNT: u32 = 1;

/// Maximum primary raymarch steps per pixel.
pub const MAX_SAMPLE_COUNT: u32 = 200;

/// Minimum secondary (light) steps per primary step.
pub const MIN_LIGHT_SAMPLE_COUNT: u32 = 1;

/// Maximum secondary (light) steps per primary step.
pub const MAX_LIGHT_SAMPLE_COUNT: u32 = 10;

/// Upper bound of the detail erosion weight.
pub const MAX_DETAIL_WEIGHT: f32 = 3.0;

/// Upper bound of the jitter strength (in primary steps).
pub const MAX_BLUE_NOISE_STRENGTH: f32 = 15.0;

/// Upper bound of the empty-space threshold.
pub const MAX_EMPTY_SPACE_THRESHOLD: f32 = 10.0;

/// Transmittance below which a ray is considered saturated and stops marching.
pub const TRANSMITTANCE_EPSILON: f32 = 1.0e-3;

/// Ceiling applied to a single density sample before accumulation.
pub const MAX_SAMPLE_DENSITY: f32 = 1.0e4;

/// Direction components with a smaller magnitude are treated as parallel to the slab.
pub const RAY_PARALLEL_EPSILON: f32 = 1.0e-8;

/// Floor of the Henyey-Greenstein denominator base (before the 1.5 power).
pub const PHASE_DENOM_EPSILON: f32 = 1.0e-6;

/// Light directions shorter than this are rejected as degenerate.
pub const MIN_DIRECTION_LENGTH: f32 = 1.0e-6;
