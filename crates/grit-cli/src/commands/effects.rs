//! Effect listing and information command.

use clap::Args;
use grit_core::{ParamDescriptor, ParamUnit, ParameterInfo};
use grit_effects::{Gain, Saturation, SaturationAlgorithm};

#[derive(Args)]
pub struct EffectsArgs {
    /// Show details for a specific effect
    #[arg(value_name = "EFFECT")]
    effect: Option<String>,
}

/// An effect the CLI can build, with a reference instance for its
/// parameter descriptors.
struct EffectEntry {
    name: &'static str,
    description: &'static str,
    params: Box<dyn ParameterInfo>,
}

fn available_effects() -> Vec<EffectEntry> {
    vec![
        EffectEntry {
            name: "saturation",
            description: "Waveshaping saturation with twelve transfer curves",
            params: Box::new(Saturation::new(48000.0)),
        },
        EffectEntry {
            name: "gain",
            description: "Smoothed linear gain",
            params: Box::new(Gain::new(48000.0)),
        },
    ]
}

/// Human-readable value for a descriptor, naming algorithms for choices.
fn format_value(desc: &ParamDescriptor, value: f32) -> String {
    if desc.unit == ParamUnit::Choice {
        return SaturationAlgorithm::from_index(value as usize)
            .map_or_else(|| format!("{value}"), |alg| alg.name().to_string());
    }
    format!("{value}{}", desc.unit.suffix())
}

fn format_range(desc: &ParamDescriptor) -> String {
    if desc.unit == ParamUnit::Choice {
        return format!("0..{} (see algorithms)", desc.max);
    }
    format!("{}..{}{}", desc.min, desc.max, desc.unit.suffix())
}

pub fn run(args: EffectsArgs) -> anyhow::Result<()> {
    let effects = available_effects();

    let Some(effect_name) = &args.effect else {
        println!("Available Effects");
        println!("=================");
        println!();
        for effect in &effects {
            println!("  {:12} - {}", effect.name, effect.description);
        }
        println!();
        println!("Use 'grit effects <name>' for detailed parameter info.");
        return Ok(());
    };

    let effect = effects
        .iter()
        .find(|e| e.name.eq_ignore_ascii_case(effect_name))
        .ok_or_else(|| anyhow::anyhow!("Unknown effect: {effect_name}"))?;

    println!("{}", effect.name);
    println!("{}", "=".repeat(effect.name.len()));
    println!();
    println!("{}", effect.description);
    println!();
    println!("Parameters:");
    println!();
    println!("  {:14}  {:10}  {:12}  Range", "Key", "Name", "Default");
    println!("  {:14}  {:10}  {:12}  -----", "---", "----", "-------");

    for desc in (0..effect.params.param_count()).filter_map(|i| effect.params.param_info(i)) {
        println!(
            "  {:14}  {:10}  {:12}  {}",
            desc.string_id,
            desc.name,
            format_value(&desc, desc.default),
            format_range(&desc)
        );
    }

    if effect.name == "saturation" {
        println!();
        println!("Algorithms:");
        println!();
        for alg in SaturationAlgorithm::ALL {
            let drive = alg.gain_range().map_or_else(
                || "gain/100".to_string(),
                |(min, max)| format!("{min}..{max}"),
            );
            println!("  {:2}  {:20}  drive {}", alg.index(), alg.name(), drive);
        }
    }

    println!();
    println!("Example usage:");
    println!();
    println!(
        "  grit process input.wav output.wav --effect {}{}",
        effect.name,
        if effect.name == "saturation" {
            " --algorithm tube2 --gain 30 --out-level-db -6"
        } else {
            " --gain 0.5"
        }
    );

    Ok(())
}
