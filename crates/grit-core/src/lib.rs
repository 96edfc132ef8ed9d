//! Grit Core - DSP primitives for real-time saturation and gain
//!
//! This crate provides the building blocks the grit processors are made of,
//! designed for the audio thread: no allocation, no locking, bounded time per
//! block.
//!
//! # Core Abstractions
//!
//! ## Parameter Smoothing
//!
//! - [`ParamSmoother`] - One-pole ramp with a −96 dB snap threshold
//!
//! ## Block Math
//!
//! - [`F32x4`] - Four-lane vector with clamp, crossfade and sign helpers
//! - [`fast_tanh`] - Rational tanh approximation for waveshaping
//! - Level conversions: [`db_to_linear`], [`linear_to_db`]
//!
//! ## Processor Interface
//!
//! - [`Effect`] - Object-safe block processing trait
//! - [`ParameterInfo`] - Index-based parameter introspection
//!
//! # no_std Support
//!
//! Disable the default `std` feature to build for embedded targets:
//!
//! ```toml
//! [dependencies]
//! grit-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: no allocations in processing paths
//! - **Group granularity**: one smoothed value per [`LANES`] samples
//! - **No dependencies on std**: `libm` supplies the math

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod effect;
pub mod fast_math;
pub mod math;
pub mod param_info;
pub mod simd;
pub mod smoother;

pub use effect::Effect;
pub use fast_math::fast_tanh;
pub use math::{clamp_param, db_to_linear, linear_to_db, map_from_normalized, wet_dry_mix};
pub use param_info::{ParamDescriptor, ParamId, ParamUnit, ParameterInfo};
pub use simd::{F32x4, LANES, SIGN_EPSILON};
pub use smoother::{DEFAULT_SMOOTHING_MS, ParamSmoother, SMOOTHING_EPSILON};
