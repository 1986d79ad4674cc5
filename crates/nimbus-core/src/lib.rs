pub mod constants;
pub mod error;
pub mod math;
pub mod params;
pub mod types;

pub use error::NimbusError;
pub use params::CloudParams;
pub use types::{Ray, Rgb};
