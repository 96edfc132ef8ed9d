//! CLI subcommands.

pub mod curve;
pub mod effects;
pub mod presets;
pub mod process;
