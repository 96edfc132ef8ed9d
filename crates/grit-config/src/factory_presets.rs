//! Factory presets bundled with grit.
//!
//! These presets are compiled into the library and always available without
//! external files. They double as examples of the preset format.

use crate::Preset;

/// Identifiers of the factory presets, in listing order.
pub static FACTORY_PRESET_NAMES: &[&str] = &[
    "init",
    "warm_tape",
    "crunch",
    "tube_push",
    "fuzz_box",
    "octave_up",
    "foldback_synth",
    "brickwall",
];

static FACTORY_PRESETS_TOML: &[(&str, &str)] = &[
    ("init", INIT_PRESET),
    ("warm_tape", WARM_TAPE_PRESET),
    ("crunch", CRUNCH_PRESET),
    ("tube_push", TUBE_PUSH_PRESET),
    ("fuzz_box", FUZZ_BOX_PRESET),
    ("octave_up", OCTAVE_UP_PRESET),
    ("foldback_synth", FOLDBACK_SYNTH_PRESET),
    ("brickwall", BRICKWALL_PRESET),
];

const INIT_PRESET: &str = r#"
name = "Init"
description = "Unity gain, no coloration"
sample_rate = 48000

[[effects]]
type = "gain"
gain = 1.0
"#;

const WARM_TAPE_PRESET: &str = r#"
name = "Warm Tape"
description = "Gentle tape saturation, slightly under unity"
sample_rate = 48000

[[effects]]
type = "saturation"
algorithm = "tape"
gain = 60.0
bias = 0.0
mix = 100.0
out_level_db = -3.0
"#;

const CRUNCH_PRESET: &str = r#"
name = "Crunch"
description = "Overdrive blended with the dry signal"
sample_rate = 48000

[[effects]]
type = "saturation"
algorithm = "overdrive"
gain = 45.0
bias = 0.0
mix = 70.0
out_level_db = -4.0
"#;

const TUBE_PUSH_PRESET: &str = r#"
name = "Tube Push"
description = "Asymmetric power curve with a small bias for even harmonics"
sample_rate = 48000

[[effects]]
type = "saturation"
algorithm = "tube2"
gain = 20.0
bias = 0.05
mix = 100.0
out_level_db = -6.0
"#;

const FUZZ_BOX_PRESET: &str = r#"
name = "Fuzz Box"
description = "Exponential fuzz into a trim stage"
sample_rate = 48000

[[effects]]
type = "saturation"
algorithm = "fuzz"
gain = 80.0
bias = 0.1
mix = 100.0
out_level_db = -8.0

[[effects]]
type = "gain"
gain = 0.8
"#;

const OCTAVE_UP_PRESET: &str = r#"
name = "Octave Up"
description = "Full-wave rectification doubles the fundamental"
sample_rate = 48000

[[effects]]
type = "saturation"
algorithm = "full_wave_rectifier"
gain = 0.0
bias = 0.0
mix = 60.0
out_level_db = -3.0
"#;

const FOLDBACK_SYNTH_PRESET: &str = r#"
name = "Foldback Synth"
description = "Wavefolding at half scale for bright synth tones"
sample_rate = 48000
smoothing_ms = 10.0

[[effects]]
type = "gain"
gain = 2.0

[[effects]]
type = "saturation"
algorithm = "foldback"
gain = 50.0
bias = 0.0
mix = 100.0
out_level_db = -6.0
"#;

const BRICKWALL_PRESET: &str = r#"
name = "Brickwall"
description = "Hard clip at maximum drive"
sample_rate = 48000

[[effects]]
type = "saturation"
algorithm = "hard_clip"
gain = 100.0
bias = 0.0
mix = 100.0
out_level_db = -1.0
"#;

/// All factory presets, in listing order.
pub fn factory_presets() -> Vec<Preset> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(_, toml)| Preset::from_toml(toml).ok())
        .collect()
}

/// Get a factory preset by identifier or display name (case-insensitive).
///
/// # Example
///
/// ```rust
/// use grit_config::get_factory_preset;
///
/// let preset = get_factory_preset("warm_tape").unwrap();
/// assert_eq!(preset.name, "Warm Tape");
/// assert!(get_factory_preset("Warm Tape").is_some());
/// ```
pub fn get_factory_preset(name: &str) -> Option<Preset> {
    if let Some((_, toml)) = FACTORY_PRESETS_TOML
        .iter()
        .find(|(id, _)| id.eq_ignore_ascii_case(name))
    {
        return Preset::from_toml(toml).ok();
    }

    factory_presets()
        .into_iter()
        .find(|preset| preset.name.eq_ignore_ascii_case(name))
}

/// Identifiers of all factory presets.
pub fn factory_preset_names() -> Vec<&'static str> {
    FACTORY_PRESETS_TOML.iter().map(|(name, _)| *name).collect()
}

/// `true` when `name` matches a factory preset identifier or display name.
///
/// ```rust
/// use grit_config::is_factory_preset;
///
/// assert!(is_factory_preset("crunch"));
/// assert!(is_factory_preset("Fuzz Box"));
/// assert!(!is_factory_preset("my_custom_preset"));
/// ```
pub fn is_factory_preset(name: &str) -> bool {
    get_factory_preset(name).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_preset;

    #[test]
    fn every_factory_preset_parses() {
        let presets = factory_presets();
        assert_eq!(presets.len(), FACTORY_PRESET_NAMES.len());
        assert_eq!(factory_preset_names(), FACTORY_PRESET_NAMES);
    }

    #[test]
    fn every_factory_preset_validates() {
        for preset in factory_presets() {
            validate_preset(&preset)
                .unwrap_or_else(|e| panic!("factory preset '{}' invalid: {e}", preset.name));
        }
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(get_factory_preset("CRUNCH").unwrap().name, "Crunch");
        assert_eq!(get_factory_preset("octave up").unwrap().name, "Octave Up");
        assert!(get_factory_preset("nope").is_none());
    }

    #[test]
    fn smoothing_override_is_read() {
        let preset = get_factory_preset("foldback_synth").unwrap();
        assert_eq!(preset.smoothing_ms, 10.0);
        assert_eq!(preset.effect_types(), vec!["gain", "saturation"]);
    }
}
