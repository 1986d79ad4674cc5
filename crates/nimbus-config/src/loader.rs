use std::path::Path;

use nimbus_core::CloudParams;
use thiserror::Error;

use crate::validator::{validate_params, ValidationError};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read parameter file {path}: {message}")]
    Io { path: String, message: String },
    #[error("Failed to parse parameters RON: {0}")]
    ParamParseError(String),
    #[error("Invalid parameters: {}", format_errors(.0))]
    Invalid(Vec<ValidationError>),
    #[error("Failed to serialize parameters: {0}")]
    SerializeError(String),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Parse and validate a parameter set from a RON string.
pub fn load_params_from_str(ron_str: &str) -> Result<CloudParams, LoadError> {
    let options = ron::Options::default();
    let params: CloudParams = options
        .from_str(ron_str)
        .map_err(|e| LoadError::ParamParseError(e.to_string()))?;
    validate_params(&params).map_err(LoadError::Invalid)?;
    let len = params.light_direction.length();
    if (len - 1.0).abs() > 1e-3 {
        log::warn!("light_direction has length {len}, it will be renormalised");
    }
    Ok(params)
}

/// Read, parse and validate a parameter file.
pub fn load_params_from_path(path: &Path) -> Result<CloudParams, LoadError> {
    let contents = std::fs::read_to_string(path).map_err(|e| LoadError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    let params = load_params_from_str(&contents)?;
    log::info!("Loaded cloud parameters from {}", path.display());
    Ok(params)
}

/// Pretty-print a parameter set as RON.
pub fn params_to_ron(params: &CloudParams) -> Result<String, LoadError> {
    ron::ser::to_string_pretty(params, ron::ser::PrettyConfig::default())
        .map_err(|e| LoadError::SerializeError(e.to_string()))
}
