pub mod loader;
pub mod presets;
pub mod validator;
pub mod wind;

pub use loader::{load_params_from_path, load_params_from_str, params_to_ron, LoadError};
pub use presets::{preset, PRESET_NAMES};
pub use validator::{validate_params, ValidationError};
pub use wind::{SunPath, WindDriver};
