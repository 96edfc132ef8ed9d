//! File-based effect processing command.

use anyhow::Context;
use clap::{Args, ValueEnum};
use grit_config::{GainSettings, Preset, SaturationSettings, get_factory_preset};
use grit_core::{DEFAULT_SMOOTHING_MS, linear_to_db};
use grit_effects::SaturationAlgorithm;
use grit_io::{ProcessingEngine, WavSpec, read_wav, write_wav};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

/// Effect built from command-line flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum EffectKind {
    /// Saturation with a selectable algorithm
    #[default]
    Saturation,
    /// Linear gain
    Gain,
}

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Effect to apply when no preset is given
    #[arg(short, long, value_enum, default_value_t = EffectKind::Saturation)]
    effect: EffectKind,

    /// Saturation algorithm (e.g. tape, tube2, hard_clip)
    #[arg(short, long)]
    algorithm: Option<SaturationAlgorithm>,

    /// Saturation drive in percent, or the linear factor for --effect gain
    #[arg(short, long, allow_negative_numbers = true)]
    gain: Option<f32>,

    /// DC offset added before shaping (-1 to 1)
    #[arg(long, allow_negative_numbers = true)]
    bias: Option<f32>,

    /// Wet proportion in percent
    #[arg(long)]
    mix: Option<f32>,

    /// Output level in dB
    #[arg(long, allow_negative_numbers = true)]
    out_level_db: Option<f32>,

    /// Parameter smoothing time in milliseconds
    #[arg(long, default_value_t = DEFAULT_SMOOTHING_MS)]
    smoothing_ms: f32,

    /// Preset file (TOML)
    #[arg(short, long, conflicts_with = "factory")]
    preset: Option<PathBuf>,

    /// Factory preset name (see `grit presets`)
    #[arg(short, long)]
    factory: Option<String>,

    /// Processing block size (a multiple of 4)
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32", value_parser = parse_bit_depth)]
    bit_depth: u16,
}

fn parse_bit_depth(s: &str) -> Result<u16, String> {
    match s.parse::<u16>() {
        Ok(bits @ (16 | 24 | 32)) => Ok(bits),
        _ => Err(format!("Invalid bit depth: '{s}' (expected 16, 24 or 32)")),
    }
}

impl ProcessArgs {
    /// Resolve the preset to render: a preset file, a factory preset, or a
    /// one-effect chain built from the flags.
    fn preset(&self) -> anyhow::Result<Preset> {
        if let Some(path) = &self.preset {
            return Preset::load(path)
                .with_context(|| format!("failed to load preset {}", path.display()));
        }

        if let Some(name) = &self.factory {
            return get_factory_preset(name)
                .ok_or_else(|| anyhow::anyhow!("Unknown factory preset: {name}"));
        }

        let preset = Preset::new("command line").with_smoothing_ms(self.smoothing_ms);
        let preset = match self.effect {
            EffectKind::Saturation => {
                let defaults = SaturationSettings::with_algorithm(self.algorithm.unwrap_or_default());
                preset.with_effect(SaturationSettings {
                    gain: self.gain.unwrap_or(defaults.gain),
                    bias: self.bias.unwrap_or(defaults.bias),
                    mix: self.mix.unwrap_or(defaults.mix),
                    out_level_db: self.out_level_db.unwrap_or(defaults.out_level_db),
                    ..defaults
                })
            }
            EffectKind::Gain => {
                let defaults = GainSettings::default();
                preset.with_effect(GainSettings {
                    gain: self.gain.unwrap_or(defaults.gain),
                })
            }
        };
        Ok(preset)
    }
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    println!("Reading {}...", args.input.display());
    let (samples, spec) = read_wav(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let sample_rate = spec.sample_rate as f32;
    let frames = samples.len() / usize::from(spec.channels.max(1));

    println!(
        "  {} frames, {} channel(s), {} Hz, {:.2}s",
        frames,
        spec.channels,
        spec.sample_rate,
        frames as f32 / sample_rate
    );

    let preset = args.preset()?;
    let chain = preset.build_chain(sample_rate)?;
    tracing::info!(preset = %preset.name, effects = ?preset.effect_types(), "chain ready");

    let mut engine = ProcessingEngine::with_effects(sample_rate, chain);
    if engine.is_empty() {
        anyhow::bail!("Preset '{}' has no effects", preset.name);
    }

    println!("Processing with {} effect(s)...", engine.len());

    let pb = ProgressBar::new(samples.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );

    let output = engine.process_file_with_progress(&samples, args.block_size, |done| {
        pb.set_position(done as u64);
    })?;

    pb.finish_with_message("done");

    println!("\nStats:");
    println!(
        "  Input:  RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(rms(&samples)),
        linear_to_db(peak(&samples))
    );
    println!(
        "  Output: RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(rms(&output)),
        linear_to_db(peak(&output))
    );

    let out_spec = WavSpec {
        bits_per_sample: args.bit_depth,
        ..spec
    };

    println!("\nWriting {}...", args.output.display());
    write_wav(&args.output, &output, out_spec)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    println!("Done!");

    Ok(())
}

fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: f32 = samples.iter().map(|s| s * s).sum();
    (sum / samples.len() as f32).sqrt()
}

fn peak(samples: &[f32]) -> f32 {
    samples.iter().map(|s| s.abs()).fold(0.0, f32::max)
}
