//! Saturation algorithm selection and drive mapping.

use core::fmt;
use core::str::FromStr;

use grit_core::{F32x4, map_from_normalized};

use crate::shapers::with_shaper;

/// Transfer curve used by [`Saturation`](crate::Saturation).
///
/// The variant also decides how the raw 0–100 gain control maps onto the
/// curve's drive, see [`map_gain`](Self::map_gain).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SaturationAlgorithm {
    /// Algebraic soft clip `x / sqrt(x² + 1)`, drive 1–20.
    #[default]
    Tape,
    /// Normalized arctangent, drive 1e-6–35.
    Tape2,
    /// Cubic-style knee over a hard clip, drive 1–20.
    Overdrive,
    /// Hard clamp with a wider drive range, 1–40.
    Tube,
    /// Power curve `(x + 1)^g − 1`, asymmetric, drive 1–45.
    Tube2,
    /// Normalized tanh, drive 1e-6–80.
    Distortion,
    /// Parabolic soft clip following the input sign, drive 1–100.
    Metal,
    /// Exponential fuzz, drive 0.5–35.
    Fuzz,
    /// Hard clamp, drive 1–300.
    HardClip,
    /// Reflects the signal back at the threshold.
    Foldback,
    /// Passes the positive half only.
    HalfWaveRectifier,
    /// Absolute value.
    FullWaveRectifier,
}

impl SaturationAlgorithm {
    /// Number of algorithms.
    pub const COUNT: usize = 12;

    /// Every algorithm, in index order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Tape,
        Self::Tape2,
        Self::Overdrive,
        Self::Tube,
        Self::Tube2,
        Self::Distortion,
        Self::Metal,
        Self::Fuzz,
        Self::HardClip,
        Self::Foldback,
        Self::HalfWaveRectifier,
        Self::FullWaveRectifier,
    ];

    /// Stable lowercase name, as used in presets and on the command line.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Tape => "tape",
            Self::Tape2 => "tape2",
            Self::Overdrive => "overdrive",
            Self::Tube => "tube",
            Self::Tube2 => "tube2",
            Self::Distortion => "distortion",
            Self::Metal => "metal",
            Self::Fuzz => "fuzz",
            Self::HardClip => "hard_clip",
            Self::Foldback => "foldback",
            Self::HalfWaveRectifier => "half_wave_rectifier",
            Self::FullWaveRectifier => "full_wave_rectifier",
        }
    }

    /// Position in [`ALL`](Self::ALL).
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Algorithm at `index`, or `None` past the end.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Drive range the normalized gain is mapped onto, or `None` when the
    /// normalized value is used directly (Foldback and the rectifiers).
    pub const fn gain_range(self) -> Option<(f32, f32)> {
        match self {
            Self::Tape | Self::Overdrive => Some((1.0, 20.0)),
            Self::Tape2 => Some((1.0e-6, 35.0)),
            Self::Tube => Some((1.0, 40.0)),
            Self::Tube2 => Some((1.0, 45.0)),
            Self::Distortion => Some((1.0e-6, 80.0)),
            Self::Metal => Some((1.0, 100.0)),
            Self::Fuzz => Some((0.5, 35.0)),
            Self::HardClip => Some((1.0, 300.0)),
            Self::Foldback | Self::HalfWaveRectifier | Self::FullWaveRectifier => None,
        }
    }

    /// Map a normalized gain in `[0, 1]` to this algorithm's drive.
    ///
    /// ```rust
    /// use grit_effects::SaturationAlgorithm;
    ///
    /// assert_eq!(SaturationAlgorithm::HardClip.map_gain(1.0), 300.0);
    /// assert_eq!(SaturationAlgorithm::Foldback.map_gain(0.25), 0.25);
    /// ```
    pub fn map_gain(self, normalized: f32) -> f32 {
        match self.gain_range() {
            Some((min, max)) => map_from_normalized(normalized, min, max),
            None => normalized,
        }
    }

    /// Clamped wet output of the transfer curve for one biased sample `xb`
    /// at drive `gain`.
    ///
    /// This is the curve [`Saturation`](crate::Saturation) applies before
    /// the dry/wet mix and output level, evaluated for a single sample.
    pub fn shape(self, xb: f32, gain: f32) -> f32 {
        let wet = with_shaper!(self, shape => shape(F32x4::splat(xb), gain));
        wet.clamp_unit().to_array()[0]
    }
}

impl fmt::Display for SaturationAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown algorithm name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAlgorithmError;

impl fmt::Display for ParseAlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown saturation algorithm")
    }
}

impl core::error::Error for ParseAlgorithmError {}

impl FromStr for SaturationAlgorithm {
    type Err = ParseAlgorithmError;

    /// Parse a name case-insensitively, ignoring `-`, `_` and spaces, so
    /// `hard_clip`, `HardClip` and `hard-clip` all select [`Self::HardClip`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.bytes().filter(|&b| !matches!(b, b'-' | b'_' | b' '));
        Self::ALL
            .into_iter()
            .find(|algorithm| {
                let name = algorithm.name().bytes().filter(|&b| b != b'_');
                name.map(|b| b.to_ascii_lowercase())
                    .eq(wanted.clone().map(|b| b.to_ascii_lowercase()))
            })
            .ok_or(ParseAlgorithmError)
    }
}
