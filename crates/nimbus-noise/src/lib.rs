//! Read-only noise sources sampled by the cloud kernel.
//!
//! Shape fields return 4 channels, detail fields 3, and the jitter tile a
//! single scalar per screen pixel. All of them are immutable after
//! construction and safe to share across pixel tasks.

pub mod error;
pub mod field;
pub mod hash;
pub mod jitter;
pub mod volume;
pub mod worley;

pub use error::NoiseError;
pub use field::{DetailField, NoiseField, ShapeField, UniformNoise};
pub use jitter::JitterTile;
pub use volume::NoiseVolume;
pub use worley::{WorleyDetail, WorleyShape};
