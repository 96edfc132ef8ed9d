//! Per-effect settings as stored in presets.
//!
//! Each entry of a preset's `[[effects]]` array is one [`EffectSettings`],
//! tagged by `type`. Missing fields take the defaults of a freshly added
//! effect: a saturation at full drive with the Tape curve, fully wet, at
//! unity level; a gain stage at unity.

use grit_core::{DEFAULT_SMOOTHING_MS, Effect};
use grit_effects::{Gain, Saturation, SaturationAlgorithm};
use serde::{Deserialize, Serialize};

use crate::validation::{ValidationError, ValidationResult};

/// Settings for a [`Saturation`] processor, in host units.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SaturationSettings {
    /// Algorithm name, parsed with [`SaturationAlgorithm::from_str`](std::str::FromStr).
    pub algorithm: String,
    /// Drive amount, 0–100.
    pub gain: f32,
    /// DC offset before shaping, −1..1.
    pub bias: f32,
    /// Wet proportion in percent, 0–100.
    pub mix: f32,
    /// Output level in dB, −96..24.
    pub out_level_db: f32,
}

impl Default for SaturationSettings {
    fn default() -> Self {
        Self {
            algorithm: SaturationAlgorithm::default().name().to_string(),
            gain: 100.0,
            bias: 0.0,
            mix: 100.0,
            out_level_db: 0.0,
        }
    }
}

impl SaturationSettings {
    /// Settings for `algorithm` with every other field at its default.
    pub fn with_algorithm(algorithm: SaturationAlgorithm) -> Self {
        Self {
            algorithm: algorithm.name().to_string(),
            ..Self::default()
        }
    }

    /// Parse the algorithm name.
    pub fn parsed_algorithm(&self) -> ValidationResult<SaturationAlgorithm> {
        self.algorithm
            .parse()
            .map_err(|_| ValidationError::UnknownAlgorithm(self.algorithm.clone()))
    }

    /// Write these settings into a processor.
    ///
    /// The algorithm is set before the gain so the drive is mapped onto the
    /// right range.
    pub fn apply(&self, sat: &mut Saturation) -> ValidationResult<()> {
        sat.set_algorithm(self.parsed_algorithm()?);
        sat.set_gain(self.gain);
        sat.set_bias(self.bias);
        sat.set_mix(self.mix);
        sat.set_out_level_db(self.out_level_db);
        Ok(())
    }
}

/// Settings for a [`Gain`] processor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GainSettings {
    /// Linear gain, −4..4.
    pub gain: f32,
}

impl Default for GainSettings {
    fn default() -> Self {
        Self { gain: 1.0 }
    }
}

impl GainSettings {
    /// Write these settings into a processor.
    pub fn apply(&self, gain: &mut Gain) {
        gain.set_gain(self.gain);
    }
}

/// One effect in a preset chain.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EffectSettings {
    /// Saturation stage.
    Saturation(SaturationSettings),
    /// Linear gain stage.
    Gain(GainSettings),
}

impl EffectSettings {
    /// Effect type names accepted in the `type` field.
    pub const TYPES: [&'static str; 2] = ["saturation", "gain"];

    /// The `type` tag of this entry.
    pub fn type_name(&self) -> &'static str {
        match self {
            EffectSettings::Saturation(_) => "saturation",
            EffectSettings::Gain(_) => "gain",
        }
    }

    /// Create the processor these settings describe.
    ///
    /// Every smoother is initialised with `smoothing_ms` at `sample_rate`
    /// before the settings are applied, so the first write snaps.
    pub fn build(
        &self,
        sample_rate: f32,
        smoothing_ms: f32,
    ) -> ValidationResult<Box<dyn Effect + Send>> {
        match self {
            EffectSettings::Saturation(settings) => {
                let mut sat = Saturation::new(sample_rate);
                sat.init_gain_param(smoothing_ms, sample_rate);
                sat.init_bias_param(smoothing_ms, sample_rate);
                sat.init_mix_param(smoothing_ms, sample_rate);
                sat.init_out_level_param(smoothing_ms, sample_rate);
                settings.apply(&mut sat)?;
                Ok(Box::new(sat))
            }
            EffectSettings::Gain(settings) => {
                let mut gain = Gain::new(sample_rate);
                gain.init_gain_param(smoothing_ms, sample_rate);
                settings.apply(&mut gain);
                Ok(Box::new(gain))
            }
        }
    }

    /// [`build`](Self::build) with the default smoothing time.
    pub fn build_default(&self, sample_rate: f32) -> ValidationResult<Box<dyn Effect + Send>> {
        self.build(sample_rate, DEFAULT_SMOOTHING_MS)
    }
}

impl From<SaturationSettings> for EffectSettings {
    fn from(settings: SaturationSettings) -> Self {
        EffectSettings::Saturation(settings)
    }
}

impl From<GainSettings> for EffectSettings {
    fn from(settings: GainSettings) -> Self {
        EffectSettings::Gain(settings)
    }
}
