//! One-pole parameter smoothing for click-free control changes.
//!
//! Control values (gain, bias, mix, output level) arrive once per block from a
//! host or UI. Applying them as-is steps the signal and produces audible
//! clicks. [`ParamSmoother`] turns those discrete writes into a geometric ramp
//! that costs one multiply-add per read while transitioning and nothing once
//! settled.
//!
//! ## Bypass
//!
//! A smoother starts out bypassed. The first target ever written is applied
//! instantly, and so is any target within [`SMOOTHING_EPSILON`] (−96 dB) of
//! the current value. Only a materially different target switches the filter
//! into smoothing mode, where every [`value`](ParamSmoother::value) call
//! advances the ramp by one step.
//!
//! ## Usage
//!
//! ```rust
//! use grit_core::ParamSmoother;
//!
//! let mut gain = ParamSmoother::new();
//! gain.init(21.33, 48000.0);
//!
//! gain.set_target(1.0); // first write snaps
//! assert_eq!(gain.value(), 1.0);
//!
//! gain.set_target(0.5); // ramps from here on
//! let first = gain.value();
//! assert!(first < 1.0 && first > 0.5);
//! ```

use core::f32::consts::TAU;

use libm::expf;

/// Difference below which a new target snaps instead of ramping (−96 dB).
pub const SMOOTHING_EPSILON: f32 = 1.58489e-5;

/// Transition time used by every processor unless reconfigured.
pub const DEFAULT_SMOOTHING_MS: f32 = 21.33;

/// A smoothed scalar control value.
///
/// The filter is `current += step * (target - current)`, with
/// `step = 1 - exp(-2π / (time_ms · sample_rate · 0.001))`. Because
/// `0 < step <= 1` the value converges monotonically and never overshoots.
///
/// Callers read the value once per processing group (see
/// [`LANES`](crate::simd::LANES)), so the ramp advances once per group rather
/// than once per sample.
#[derive(Debug, Clone)]
pub struct ParamSmoother {
    step: f32,
    current: f32,
    target: f32,
    bypassed: bool,
    first: bool,
}

impl ParamSmoother {
    /// Create an uninitialised smoother.
    ///
    /// Until [`init`](Self::init) is called the step is `1.0`, i.e. every
    /// transition completes on the first read.
    pub const fn new() -> Self {
        Self {
            step: 1.0,
            current: 0.0,
            target: 0.0,
            bypassed: true,
            first: true,
        }
    }

    /// Create a smoother already initialised with a transition time.
    pub fn with_time(transition_time_ms: f32, sample_rate: f32) -> Self {
        let mut smoother = Self::new();
        smoother.init(transition_time_ms, sample_rate);
        smoother
    }

    /// Compute the per-read step from a transition time and sample rate.
    ///
    /// Non-positive or non-finite inputs are caller bugs; they leave the
    /// smoother with `step = 1.0` so it degrades to instant changes instead of
    /// producing NaN.
    pub fn init(&mut self, transition_time_ms: f32, sample_rate: f32) {
        let transition_samples = transition_time_ms * sample_rate * 0.001;
        let step = 1.0 - expf(-TAU / transition_samples);

        let valid = transition_samples.is_finite() && transition_samples > 0.0;
        self.step = if valid && step.is_finite() {
            step
        } else {
            1.0
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            transition_time_ms,
            sample_rate,
            step = self.step,
            "smoother init"
        );
    }

    /// Set a new target value.
    ///
    /// The very first call, and any call within [`SMOOTHING_EPSILON`] of the
    /// current value, snaps `current` and `target` to `value` and bypasses the
    /// filter. Anything else starts a ramp toward `value`. NaN is ignored.
    #[inline]
    pub fn set_target(&mut self, value: f32) {
        if value.is_nan() {
            return;
        }

        if self.first || (value - self.current).abs() < SMOOTHING_EPSILON {
            self.first = false;
            self.current = value;
            self.target = value;
            self.bypassed = true;
            return;
        }

        self.target = value;
        self.bypassed = false;
    }

    /// Read the value for the next processing group.
    ///
    /// Advances the ramp by one step when smoothing; returns the stored value
    /// untouched when bypassed.
    #[inline]
    pub fn value(&mut self) -> f32 {
        if !self.bypassed {
            self.current += self.step * (self.target - self.current);
        }
        self.current
    }

    /// Current value without advancing the ramp.
    #[inline]
    pub fn current(&self) -> f32 {
        self.current
    }

    /// The value being ramped toward.
    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Per-read interpolation coefficient.
    #[inline]
    pub fn step(&self) -> f32 {
        self.step
    }

    /// `true` while reads return the stored value without filtering.
    #[inline]
    pub fn is_bypassed(&self) -> bool {
        self.bypassed
    }

    /// Jump to the target and stop smoothing.
    pub fn snap_to_target(&mut self) {
        self.current = self.target;
        self.bypassed = true;
    }
}

impl Default for ParamSmoother {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn smoother() -> ParamSmoother {
        ParamSmoother::with_time(DEFAULT_SMOOTHING_MS, 48000.0)
    }

    #[test]
    fn step_matches_formula() {
        let s = smoother();
        let expected = 1.0 - expf(-TAU / (21.33 * 48000.0 * 0.001));
        assert!((s.step() - expected).abs() < 1e-9);
        assert!(s.step() > 0.0 && s.step() < 1.0);
    }

    #[test]
    fn first_target_snaps() {
        let mut s = smoother();
        s.set_target(0.75);
        assert!(s.is_bypassed());
        assert_eq!(s.value(), 0.75);
        assert_eq!(s.value(), 0.75);
    }

    #[test]
    fn equal_target_snaps_without_ramp() {
        let mut s = smoother();
        s.set_target(1.0);
        s.set_target(1.0);
        assert_eq!(s.value(), 1.0);
        assert!(s.is_bypassed());
    }

    #[test]
    fn near_target_snaps_exactly() {
        let mut s = smoother();
        s.set_target(0.5);
        s.set_target(0.5 + 1e-5);
        assert!(s.is_bypassed());
        assert_eq!(s.value(), 0.5 + 1e-5);
    }

    #[test]
    fn different_target_ramps() {
        let mut s = smoother();
        s.set_target(0.0);
        s.set_target(1.0);
        assert!(!s.is_bypassed());

        let v1 = s.value();
        let v2 = s.value();
        assert!(v1 > 0.0 && v1 < 1.0);
        assert!(v2 > v1 && v2 < 1.0);
        assert!((v1 - s.step()).abs() < 1e-7);
    }

    #[test]
    fn current_does_not_advance() {
        let mut s = smoother();
        s.set_target(0.0);
        s.set_target(1.0);
        assert_eq!(s.current(), 0.0);
        assert_eq!(s.current(), 0.0);
        assert_eq!(s.target(), 1.0);
    }

    #[test]
    fn ramp_converges_and_resnaps() {
        let mut s = smoother();
        s.set_target(0.0);
        s.set_target(1.0);
        for _ in 0..10_000 {
            s.value();
        }
        assert!((s.current() - 1.0).abs() < SMOOTHING_EPSILON);

        // The host re-sends the same value next block; that ends the ramp.
        s.set_target(1.0);
        assert!(s.is_bypassed());
        assert_eq!(s.value(), 1.0);
    }

    #[test]
    fn snap_to_target_stops_ramp() {
        let mut s = smoother();
        s.set_target(0.0);
        s.set_target(-1.0);
        s.snap_to_target();
        assert!(s.is_bypassed());
        assert_eq!(s.value(), -1.0);
    }

    #[test]
    fn degenerate_init_is_instant() {
        let mut s = ParamSmoother::with_time(21.33, 0.0);
        assert_eq!(s.step(), 1.0);
        s.set_target(0.0);
        s.set_target(1.0);
        assert_eq!(s.value(), 1.0);

        let s = ParamSmoother::with_time(f32::INFINITY, 48000.0);
        assert_eq!(s.step(), 1.0);
    }

    #[test]
    fn nan_target_is_ignored() {
        let mut s = smoother();
        s.set_target(f32::NAN);
        assert!(s.is_bypassed());
        s.set_target(0.5);
        assert_eq!(s.value(), 0.5);

        s.set_target(1.0);
        s.set_target(f32::NAN);
        assert_eq!(s.target(), 1.0);
        for _ in 0..10_000 {
            assert!(s.value().is_finite());
        }
        assert!((s.current() - 1.0).abs() < SMOOTHING_EPSILON);
    }
}
