//! Grit Effects - gain and saturation processors
//!
//! This crate provides the two block processors built on grit-core:
//!
//! - [`Gain`] - Smoothed linear gain with zero and unity shortcuts
//! - [`Saturation`] - Twelve waveshaping algorithms with bias, mix and
//!   output level
//!
//! Both implement [`Effect`](grit_core::Effect) and
//! [`ParameterInfo`](grit_core::ParameterInfo).
//!
//! ## Example
//!
//! ```rust
//! use grit_core::Effect;
//! use grit_effects::{Saturation, SaturationAlgorithm};
//!
//! let mut sat = Saturation::new(48000.0);
//! sat.set_algorithm(SaturationAlgorithm::Tape);
//! sat.set_gain(60.0);
//! sat.set_mix(100.0);
//! sat.set_out_level_db(-3.0);
//!
//! let input = [0.25f32; 64];
//! let mut output = [0.0f32; 64];
//! sat.process_block(&input, &mut output);
//! assert!(output.iter().all(|y| y.abs() <= 1.0));
//! ```
//!
//! ## Features
//!
//! - `std` (default) - forwards to `grit-core/std`
//! - `tracing` - debug events on algorithm changes and smoother setup

#![cfg_attr(not(feature = "std"), no_std)]

pub mod algorithm;
pub mod gain;
pub mod saturation;
pub mod shapers;

pub use algorithm::{ParseAlgorithmError, SaturationAlgorithm};
pub use gain::Gain;
pub use saturation::{OUT_LEVEL_CEILING_DB, OUT_LEVEL_FLOOR_DB, Saturation};
