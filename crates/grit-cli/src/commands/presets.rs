//! Preset listing command.

use anyhow::Context;
use clap::Args;
use grit_config::{
    Preset, factory_preset_names, get_factory_preset, list_user_presets, preset_name_from_path,
    user_presets_dir,
};

#[derive(Args)]
pub struct PresetsArgs {
    /// Print a preset as TOML (factory name, user preset name, or path)
    #[arg(short, long, value_name = "NAME")]
    show: Option<String>,
}

pub fn run(args: PresetsArgs) -> anyhow::Result<()> {
    match args.show {
        Some(name) => show_preset(&name),
        None => {
            list_presets();
            Ok(())
        }
    }
}

fn resolve_preset(name: &str) -> anyhow::Result<Preset> {
    Preset::find(name).with_context(|| format!("could not show preset '{name}'"))
}

fn show_preset(name: &str) -> anyhow::Result<()> {
    let preset = resolve_preset(name)?;
    print!("{}", preset.to_toml()?);
    Ok(())
}

fn list_presets() {
    println!("Factory Presets:");
    println!("================");
    for (id, preset) in factory_preset_names()
        .into_iter()
        .filter_map(|id| get_factory_preset(id).map(|preset| (id, preset)))
    {
        let desc = preset.description.as_deref().unwrap_or("");
        println!("  {id:16} - {desc}");
    }
    println!();

    println!("User Presets ({}):", user_presets_dir().display());
    println!("=============");
    let user_presets = list_user_presets();
    if user_presets.is_empty() {
        println!("  (none)");
    }
    for path in user_presets {
        let name = preset_name_from_path(&path).unwrap_or_else(|| "unknown".to_string());
        match Preset::load(&path) {
            Ok(preset) => {
                let desc = preset.description.as_deref().unwrap_or("");
                println!("  {name:16} - {desc}");
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "unreadable preset");
                println!("  {name:16} - (error loading)");
            }
        }
    }
    println!();
    println!("Use 'grit presets --show <name>' to print a preset as TOML.");
}
