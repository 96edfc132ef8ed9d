//! Preset and effect settings validation.
//!
//! The processors clamp every control on their own, so an out-of-range value
//! in a preset would silently become a different sound. Validation rejects
//! such presets up front. Ranges come from the processors'
//! [`ParameterInfo`] descriptors, so they cannot drift from what the
//! processors actually accept.
//!
//! # Example
//!
//! ```rust
//! use grit_config::{EffectSettings, SaturationSettings, ValidationError, validate_effect};
//!
//! let settings = EffectSettings::Saturation(SaturationSettings {
//!     mix: 120.0,
//!     ..SaturationSettings::default()
//! });
//! assert!(matches!(
//!     validate_effect(&settings),
//!     Err(ValidationError::OutOfRange { .. })
//! ));
//! ```

use grit_core::ParameterInfo;
use grit_effects::{Gain, Saturation};
use thiserror::Error;

use crate::Preset;
use crate::settings::{EffectSettings, GainSettings, SaturationSettings};

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Unknown saturation algorithm name.
    #[error("unknown saturation algorithm: {0}")]
    UnknownAlgorithm(String),

    /// Parameter value out of range.
    #[error("{effect} parameter '{param}' value {value} out of range [{min}, {max}]")]
    OutOfRange {
        /// Effect type the parameter belongs to.
        effect: String,
        /// Name of the parameter.
        param: String,
        /// The value that was out of range.
        value: f32,
        /// Minimum allowed value.
        min: f32,
        /// Maximum allowed value.
        max: f32,
    },

    /// Smoothing time that is not a positive, finite number of milliseconds.
    #[error("invalid smoothing time: {0} ms")]
    InvalidSmoothing(f32),

    /// Sample rate of zero.
    #[error("invalid sample rate: {0} Hz")]
    InvalidSampleRate(u32),

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Fold collected errors into a result: none is `Ok`, one is returned as
/// is, more become [`ValidationError::Multiple`].
fn collect(mut errors: Vec<ValidationError>) -> ValidationResult<()> {
    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}

/// Check each `(string_id, value)` pair against the descriptor `effect`
/// reports for it.
fn check_ranges(
    effect_type: &str,
    effect: &impl ParameterInfo,
    values: &[(&str, f32)],
    errors: &mut Vec<ValidationError>,
) {
    for &(id, value) in values {
        let Some(desc) = effect
            .find_param_by_name(id)
            .and_then(|index| effect.param_info(index))
        else {
            continue;
        };
        if !desc.contains(value) {
            errors.push(ValidationError::OutOfRange {
                effect: effect_type.to_string(),
                param: id.to_string(),
                value,
                min: desc.min,
                max: desc.max,
            });
        }
    }
}

fn saturation_errors(settings: &SaturationSettings, errors: &mut Vec<ValidationError>) {
    if let Err(e) = settings.parsed_algorithm() {
        errors.push(e);
    }
    let reference = Saturation::new(48000.0);
    check_ranges(
        "saturation",
        &reference,
        &[
            ("gain", settings.gain),
            ("bias", settings.bias),
            ("mix", settings.mix),
            ("out_level_db", settings.out_level_db),
        ],
        errors,
    );
}

fn gain_errors(settings: &GainSettings, errors: &mut Vec<ValidationError>) {
    let reference = Gain::new(48000.0);
    check_ranges("gain", &reference, &[("gain", settings.gain)], errors);
}

fn effect_errors(settings: &EffectSettings, errors: &mut Vec<ValidationError>) {
    match settings {
        EffectSettings::Saturation(s) => saturation_errors(s, errors),
        EffectSettings::Gain(g) => gain_errors(g, errors),
    }
}

/// Validate one effect entry.
pub fn validate_effect(settings: &EffectSettings) -> ValidationResult<()> {
    let mut errors = Vec::new();
    effect_errors(settings, &mut errors);
    collect(errors)
}

/// Validate a smoothing time in milliseconds.
pub fn validate_smoothing(smoothing_ms: f32) -> ValidationResult<()> {
    if smoothing_ms.is_finite() && smoothing_ms > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidSmoothing(smoothing_ms))
    }
}

/// Validate a whole preset, reporting every problem found.
pub fn validate_preset(preset: &Preset) -> ValidationResult<()> {
    let mut errors = Vec::new();
    if preset.sample_rate == 0 {
        errors.push(ValidationError::InvalidSampleRate(preset.sample_rate));
    }
    if let Err(e) = validate_smoothing(preset.smoothing_ms) {
        errors.push(e);
    }
    for settings in &preset.effects {
        effect_errors(settings, &mut errors);
    }
    collect(errors)
}
