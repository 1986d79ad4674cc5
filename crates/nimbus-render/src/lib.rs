pub mod bounds;
pub mod camera;
pub mod density;
pub mod image;
pub mod light_march;
pub mod phase;
pub mod pipeline;
pub mod raymarch;
pub mod sky;
pub mod uniforms;

#[cfg(test)]
mod scenarios;

pub use bounds::{RayHit, VolumeBounds};
pub use camera::CameraRays;
pub use density::DensitySampler;
pub use image::Image;
pub use light_march::{LightMarcher, LightSample};
pub use phase::henyey_greenstein;
pub use pipeline::{CloudPipeline, FrameStats};
pub use raymarch::{MarchOutcome, MarchState, PrimaryRaymarcher, StepRecord};
pub use uniforms::CloudUniforms;
