//! Scalar DSP math shared by the processors.
//!
//! # Level Conversions
//!
//! - [`db_to_linear`] / [`linear_to_db`] - Convert between dB and linear gain
//!
//! # Ranges
//!
//! - [`clamp_param`] - Clamp a control value, sending NaN to the upper bound
//! - [`map_from_normalized`] - Map a `[0, 1]` control onto a parameter range
//! - [`wet_dry_mix`] - Scalar counterpart of [`F32x4::mix`](crate::F32x4::mix)

use libm::{expf, logf};

/// Convert decibels to linear gain.
///
/// # Example
/// ```rust
/// use grit_core::db_to_linear;
///
/// assert!((db_to_linear(0.0) - 1.0).abs() < 0.001);
/// assert!((db_to_linear(-6.02) - 0.5).abs() < 0.01);
/// ```
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    // 10^(dB/20) = e^(dB * ln(10)/20)
    const FACTOR: f32 = core::f32::consts::LN_10 / 20.0;
    expf(db * FACTOR)
}

/// Convert linear gain to decibels.
///
/// Inputs at or below `1e-10` are floored there (−200 dB).
///
/// # Example
/// ```rust
/// use grit_core::linear_to_db;
///
/// assert!((linear_to_db(1.0) - 0.0).abs() < 0.001);
/// assert!((linear_to_db(0.5) - (-6.02)).abs() < 0.01);
/// ```
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    const FACTOR: f32 = 20.0 / core::f32::consts::LN_10;
    logf(linear.max(1e-10)) * FACTOR
}

/// Clamp a control value to `[min, max]`.
///
/// Unlike [`f32::clamp`], NaN does not pass through: it lands on `max`, so a
/// bad write can never reach a smoother.
///
/// ```rust
/// use grit_core::clamp_param;
///
/// assert_eq!(clamp_param(150.0, 0.0, 100.0), 100.0);
/// assert_eq!(clamp_param(-5.0, -1.0, 1.0), -1.0);
/// assert_eq!(clamp_param(f32::NAN, -96.0, 24.0), 24.0);
/// ```
#[inline]
pub fn clamp_param(value: f32, min: f32, max: f32) -> f32 {
    if value < min {
        min
    } else if value < max {
        value
    } else {
        max
    }
}

/// Map a normalized control value onto `[min, max]`.
///
/// `value` is not clamped; callers clamp before mapping.
///
/// ```rust
/// use grit_core::map_from_normalized;
///
/// assert_eq!(map_from_normalized(0.0, 1.0, 20.0), 1.0);
/// assert_eq!(map_from_normalized(1.0, 1.0, 20.0), 20.0);
/// ```
#[inline]
pub fn map_from_normalized(value: f32, min: f32, max: f32) -> f32 {
    min + value * (max - min)
}

/// Crossfade between dry and wet signals: `wet * mix + dry * (1 - mix)`.
#[inline]
pub fn wet_dry_mix(dry: f32, wet: f32, mix: f32) -> f32 {
    wet * mix + dry * (1.0 - mix)
}
