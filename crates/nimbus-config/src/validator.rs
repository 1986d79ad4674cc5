use nimbus_core::constants::{
    MAX_BLUE_NOISE_STRENGTH, MAX_DETAIL_WEIGHT, MAX_EMPTY_SPACE_THRESHOLD,
    MAX_LIGHT_SAMPLE_COUNT, MAX_SAMPLE_COUNT, MIN_DIRECTION_LENGTH, MIN_LIGHT_SAMPLE_COUNT,
    MIN_SAMPLE_COUNT,
};
use nimbus_core::math::is_finite3;
use nimbus_core::CloudParams;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("{field} must be strictly positive, got {value}")]
    NonPositiveScale { field: &'static str, value: f32 },
    #[error("{field} {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
    #[error("{field} {value} is outside [{min}, {max}]")]
    CountOutOfRange {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },
    #[error("{field} must be >= 0, got {value}")]
    Negative { field: &'static str, value: f32 },
    #[error("{field} contains a non-finite component")]
    NonFinite { field: &'static str },
    #[error("light_direction has near-zero length {length}")]
    DegenerateLightDirection { length: f32 },
}

/// Validate a parameter snapshot. Collects every violation rather than
/// stopping at the first one.
pub fn validate_params(params: &CloudParams) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    // Vector fields must be finite before any range check makes sense.
    for (field, ok) in [
        ("clouds_offset", is_finite3(params.clouds_offset)),
        ("shape_noise_weights", params.shape_noise_weights.is_finite()),
        ("detail_offset", is_finite3(params.detail_offset)),
        ("detail_channel_weights", is_finite3(params.detail_channel_weights)),
        ("light_color", is_finite3(params.light_color)),
        ("light_direction", is_finite3(params.light_direction)),
        ("density_multiplier", params.density_multiplier.is_finite()),
    ] {
        if !ok {
            errors.push(ValidationError::NonFinite { field });
        }
    }

    // Zero scale would collapse the whole volume onto one noise texel.
    for (field, value) in [
        ("clouds_scale", params.clouds_scale),
        ("detail_scale", params.detail_scale),
    ] {
        if !(value > 0.0 && value.is_finite()) {
            errors.push(ValidationError::NonPositiveScale { field, value });
        }
    }

    for (field, value, min, max) in [
        ("detail_weight", params.detail_weight, 0.0, MAX_DETAIL_WEIGHT),
        (
            "blue_noise_strength",
            params.blue_noise_strength,
            0.0,
            MAX_BLUE_NOISE_STRENGTH,
        ),
        (
            "empty_space_threshold",
            params.empty_space_threshold,
            0.0,
            MAX_EMPTY_SPACE_THRESHOLD,
        ),
        ("darkness_threshold", params.darkness_threshold, 0.0, 1.0),
        ("scattering_anisotropy", params.scattering_anisotropy, -1.0, 1.0),
        ("scattering_coefficient", params.scattering_coefficient, 0.0, 1.0),
    ] {
        // NaN fails the range test too.
        if !(value >= min && value <= max) {
            errors.push(ValidationError::OutOfRange {
                field,
                value,
                min,
                max,
            });
        }
    }

    for (field, value) in [
        ("absorption_primary", params.absorption_primary),
        ("absorption_secondary", params.absorption_secondary),
    ] {
        if !(value >= 0.0 && value.is_finite()) {
            errors.push(ValidationError::Negative { field, value });
        }
    }

    for (field, value, min, max) in [
        (
            "sample_count",
            params.sample_count,
            MIN_SAMPLE_COUNT,
            MAX_SAMPLE_COUNT,
        ),
        (
            "light_sample_count",
            params.light_sample_count,
            MIN_LIGHT_SAMPLE_COUNT,
            MAX_LIGHT_SAMPLE_COUNT,
        ),
    ] {
        if !(min..=max).contains(&value) {
            errors.push(ValidationError::CountOutOfRange {
                field,
                value,
                min,
                max,
            });
        }
    }

    let length = params.light_direction.length();
    if length.is_finite() && length <= MIN_DIRECTION_LENGTH {
        errors.push(ValidationError::DegenerateLightDirection { length });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
