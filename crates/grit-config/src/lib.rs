//! Configuration and preset management for grit processors.
//!
//! - **Settings**: serde-backed [`SaturationSettings`] and [`GainSettings`]
//!   that apply themselves to processors
//! - **Presets**: effect chains stored as TOML ([`Preset`])
//! - **Validation**: range checks against the processors' own parameter
//!   descriptors
//! - **Factory presets**: built-in chains that are always available
//! - **Paths**: the user presets directory
//!
//! # Example
//!
//! ```rust,no_run
//! use grit_config::{GainSettings, Preset, SaturationSettings, user_presets_dir};
//! use grit_effects::SaturationAlgorithm;
//!
//! let preset = Preset::new("Edge")
//!     .with_effect(SaturationSettings {
//!         gain: 35.0,
//!         ..SaturationSettings::with_algorithm(SaturationAlgorithm::Metal)
//!     })
//!     .with_effect(GainSettings { gain: 0.8 });
//!
//! preset.save(user_presets_dir().join("edge.toml")).unwrap();
//! let chain = preset.build_chain(44100.0).unwrap();
//! assert_eq!(chain.len(), 2);
//! ```

mod error;
mod preset;
mod settings;

/// Platform-specific paths for presets.
pub mod paths;

/// Preset and settings validation.
pub mod validation;

/// Factory presets bundled with the library.
pub mod factory_presets;

pub use error::ConfigError;
pub use factory_presets::{
    FACTORY_PRESET_NAMES, factory_preset_names, factory_presets, get_factory_preset,
    is_factory_preset,
};
pub use paths::{
    ensure_user_presets_dir, find_preset, list_user_presets, preset_name_from_path,
    user_config_dir, user_presets_dir,
};
pub use preset::Preset;
pub use settings::{EffectSettings, GainSettings, SaturationSettings};
pub use validation::{
    ValidationError, ValidationResult, validate_effect, validate_preset, validate_smoothing,
};
