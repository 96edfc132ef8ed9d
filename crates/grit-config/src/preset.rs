//! Preset file format and operations.

use grit_core::{DEFAULT_SMOOTHING_MS, Effect};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::factory_presets::get_factory_preset;
use crate::paths::find_preset;
use crate::settings::EffectSettings;
use crate::validation::validate_preset;

/// An effect chain with its settings, stored as TOML.
///
/// # TOML Format
///
/// ```toml
/// name = "Warm Tape"
/// description = "Gentle tape saturation"
/// sample_rate = 48000
/// smoothing_ms = 21.33
///
/// [[effects]]
/// type = "saturation"
/// algorithm = "tape"
/// gain = 60.0
/// bias = 0.0
/// mix = 100.0
/// out_level_db = -3.0
///
/// [[effects]]
/// type = "gain"
/// gain = 0.9
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Preset {
    /// Name of the preset.
    pub name: String,

    /// Optional description of the preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Sample rate hint (defaults to 48000). Renderers use the sample rate
    /// of the audio being processed.
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// Smoothing time for every control, in milliseconds.
    #[serde(default = "default_smoothing_ms")]
    pub smoothing_ms: f32,

    /// Effects in processing order.
    #[serde(default)]
    pub effects: Vec<EffectSettings>,
}

fn default_sample_rate() -> u32 {
    48000
}

fn default_smoothing_ms() -> f32 {
    DEFAULT_SMOOTHING_MS
}

impl Preset {
    /// Create a new empty preset.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            sample_rate: default_sample_rate(),
            smoothing_ms: DEFAULT_SMOOTHING_MS,
            effects: Vec::new(),
        }
    }

    /// Create a preset with a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the smoothing time.
    pub fn with_smoothing_ms(mut self, smoothing_ms: f32) -> Self {
        self.smoothing_ms = smoothing_ms;
        self
    }

    /// Append an effect to the chain.
    pub fn with_effect(mut self, effect: impl Into<EffectSettings>) -> Self {
        self.effects.push(effect.into());
        self
    }

    /// Load a preset from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading preset");
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Find a preset by name: factory presets first, then a path or a file in
    /// the user presets directory.
    pub fn find(name: &str) -> Result<Self, ConfigError> {
        if let Some(preset) = get_factory_preset(name) {
            return Ok(preset);
        }
        let path =
            find_preset(name).ok_or_else(|| ConfigError::PresetNotFound(name.to_string()))?;
        Self::load(path)
    }

    /// Load a preset from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the preset to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        tracing::info!(path = %path.display(), name = %self.name, "saved preset");
        Ok(())
    }

    /// Convert the preset to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Number of effects in the chain.
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// `true` when the chain has no effects.
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Effect type names in chain order.
    pub fn effect_types(&self) -> Vec<&'static str> {
        self.effects.iter().map(EffectSettings::type_name).collect()
    }

    /// Validate the preset and build its processors for `sample_rate`.
    ///
    /// The preset's own `sample_rate` is only a hint; callers pass the rate
    /// of the audio actually being processed.
    pub fn build_chain(&self, sample_rate: f32) -> Result<Vec<Box<dyn Effect + Send>>, ConfigError> {
        validate_preset(self)?;
        let chain = self
            .effects
            .iter()
            .map(|settings| settings.build(sample_rate, self.smoothing_ms))
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(
            name = %self.name,
            effects = chain.len(),
            sample_rate,
            smoothing_ms = self.smoothing_ms,
            "built effect chain"
        );
        Ok(chain)
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::new("Untitled")
    }
}
