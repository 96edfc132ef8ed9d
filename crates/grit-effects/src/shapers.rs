//! Per-group transfer functions for [`Saturation`](crate::Saturation).
//!
//! Each shaper maps `xb = input + bias` and the mapped drive `g` to the wet
//! signal for one group of four samples. The caller clamps the result to
//! `[-1, 1]` afterwards, so shapers whose curve already stays inside that
//! range (Tape, Metal) and those that rely on the clamp (Tube2, Fuzz,
//! Foldback) share one pipeline.
//!
//! Curve plots: <https://www.desmos.com/calculator/12d0ysis1g>

use grit_core::{F32x4, fast_tanh};
use libm::{atanf, expf, powf};

/// `gx / sqrt(gx² + 1)`.
#[inline]
pub fn tape(xb: F32x4, g: f32) -> F32x4 {
    let gx = xb * g;
    gx / gx.mul_add(gx, F32x4::ONES).sqrt()
}

/// `atan(gx) / atan(g)`.
#[inline]
pub fn tape2(xb: F32x4, g: f32) -> F32x4 {
    let norm = atanf(g).max(f32::MIN_POSITIVE);
    (xb * g).map(atanf) / norm
}

/// `0.5 · clamp(gx) · (3 − clamp(g · clamp(xb))²)`.
#[inline]
pub fn overdrive(xb: F32x4, g: f32) -> F32x4 {
    let hard = (xb * g).clamp_unit();
    let knee = (xb.clamp_unit() * g).clamp_unit();
    F32x4::HALVES * hard * (F32x4::THREES - knee * knee)
}

/// Hard clamp of `gx`.
///
/// The asymmetric variant (`gx` for positive `xb`, `gx / sqrt(gx² + 1)`
/// otherwise) was overwritten by this clamp in the last revision of the
/// algorithm; that overwrite is kept so Tube sounds as it always has.
#[inline]
pub fn tube(xb: F32x4, g: f32) -> F32x4 {
    (xb * g).clamp_unit()
}

/// `(clamp(xb) + 1)^g − 1`.
#[inline]
pub fn tube2(xb: F32x4, g: f32) -> F32x4 {
    (xb.clamp_unit() + F32x4::ONES).map(|base| powf(base, g)) - F32x4::ONES
}

/// `tanh(gx) / tanh(g)` using [`fast_tanh`].
#[inline]
pub fn distortion(xb: F32x4, g: f32) -> F32x4 {
    let norm = fast_tanh(g).max(f32::MIN_POSITIVE);
    (xb * g).fast_tanh() / norm
}

/// `sign(xb) · |clamp(gx)| · (2 − |clamp(gx)|)`.
#[inline]
pub fn metal(xb: F32x4, g: f32) -> F32x4 {
    let c = (xb * g).clamp_unit().abs();
    let sign = xb.select_gt(F32x4::ZEROS, F32x4::ONES, F32x4::MINUS_ONES);
    sign * c * (F32x4::TWOS - c)
}

/// `−sign(gx) · (1 − exp(gx · sign(gx)))`.
#[inline]
pub fn fuzz(xb: F32x4, g: f32) -> F32x4 {
    let gx = xb * g;
    let sign = gx.signum_eps();
    -sign * (F32x4::ONES - (gx * sign).map(expf))
}

/// Hard clamp of `gx`.
#[inline]
pub fn hard_clip(xb: F32x4, g: f32) -> F32x4 {
    (xb * g).clamp_unit()
}

/// Reflect `xb` about `±g` when it leaves `[-g, g]`.
#[inline]
pub fn foldback(xb: F32x4, g: f32) -> F32x4 {
    let threshold = F32x4::splat(g);
    let upper = threshold * 2.0 - xb;
    let lower = -threshold * 2.0 - xb;
    let folded = xb.select_gt(threshold, upper, xb);
    (-xb).select_gt(threshold, lower, folded)
}

/// Positive half of `xb`; the drive is unused.
#[inline]
pub fn half_wave_rectifier(xb: F32x4, _g: f32) -> F32x4 {
    xb.max(F32x4::ZEROS)
}

/// `|xb|`; the drive is unused.
#[inline]
pub fn full_wave_rectifier(xb: F32x4, _g: f32) -> F32x4 {
    xb.abs()
}

/// Bind the shaper for an algorithm to `$shape` and evaluate `$body` with it.
///
/// Every arm sees a distinct function item, so the body is monomorphised per
/// algorithm and the block loop carries no indirect call.
macro_rules! with_shaper {
    ($algorithm:expr, $shape:ident => $body:expr) => {
        match $algorithm {
            $crate::SaturationAlgorithm::Tape => {
                let $shape = $crate::shapers::tape;
                $body
            }
            $crate::SaturationAlgorithm::Tape2 => {
                let $shape = $crate::shapers::tape2;
                $body
            }
            $crate::SaturationAlgorithm::Overdrive => {
                let $shape = $crate::shapers::overdrive;
                $body
            }
            $crate::SaturationAlgorithm::Tube => {
                let $shape = $crate::shapers::tube;
                $body
            }
            $crate::SaturationAlgorithm::Tube2 => {
                let $shape = $crate::shapers::tube2;
                $body
            }
            $crate::SaturationAlgorithm::Distortion => {
                let $shape = $crate::shapers::distortion;
                $body
            }
            $crate::SaturationAlgorithm::Metal => {
                let $shape = $crate::shapers::metal;
                $body
            }
            $crate::SaturationAlgorithm::Fuzz => {
                let $shape = $crate::shapers::fuzz;
                $body
            }
            $crate::SaturationAlgorithm::HardClip => {
                let $shape = $crate::shapers::hard_clip;
                $body
            }
            $crate::SaturationAlgorithm::Foldback => {
                let $shape = $crate::shapers::foldback;
                $body
            }
            $crate::SaturationAlgorithm::HalfWaveRectifier => {
                let $shape = $crate::shapers::half_wave_rectifier;
                $body
            }
            $crate::SaturationAlgorithm::FullWaveRectifier => {
                let $shape = $crate::shapers::full_wave_rectifier;
                $body
            }
        }
    };
}

pub(crate) use with_shaper;
