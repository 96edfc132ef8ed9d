//! Four-lane vector math for block processing.
//!
//! Every processor in grit walks its block in groups of [`LANES`] samples,
//! reading one smoothed parameter value per group and broadcasting it across
//! the lanes. [`F32x4`] is a plain `[f32; 4]` newtype whose lane-wise
//! operators the compiler lowers to SSE/NEON on its own, so the crate stays
//! portable and `no_std` without target-specific intrinsics.
//!
//! Constant vectors ([`F32x4::ONES`], [`F32x4::HALVES`], ...) are associated
//! constants rather than shared globals.
//!
//! # Example
//!
//! ```rust
//! use grit_core::F32x4;
//!
//! let x = F32x4::new([-2.0, -0.5, 0.5, 2.0]);
//! assert_eq!(x.clamp_unit().to_array(), [-1.0, -0.5, 0.5, 1.0]);
//!
//! let dry = F32x4::splat(1.0);
//! let wet = F32x4::ZEROS;
//! assert_eq!(wet.mix(dry, 0.25).to_array(), [0.75; 4]);
//! ```

use core::ops::{Add, Div, Mul, Neg, Sub};

use libm::{fabsf, sqrtf};

use crate::fast_math::fast_tanh;

/// Number of samples processed per group.
pub const LANES: usize = 4;

/// Guard added to magnitudes before dividing, keeping `x / |x|` finite at 0.
pub const SIGN_EPSILON: f32 = 1.0e-8;

/// Four `f32` lanes operated on element-wise.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[repr(C, align(16))]
pub struct F32x4(pub [f32; LANES]);

impl F32x4 {
    /// All lanes `0.0`.
    pub const ZEROS: Self = Self([0.0; LANES]);
    /// All lanes `1.0`.
    pub const ONES: Self = Self([1.0; LANES]);
    /// All lanes `-1.0`.
    pub const MINUS_ONES: Self = Self([-1.0; LANES]);
    /// All lanes `0.5`.
    pub const HALVES: Self = Self([0.5; LANES]);
    /// All lanes `2.0`.
    pub const TWOS: Self = Self([2.0; LANES]);
    /// All lanes `3.0`.
    pub const THREES: Self = Self([3.0; LANES]);
    /// All lanes [`SIGN_EPSILON`].
    pub const EPS: Self = Self([SIGN_EPSILON; LANES]);

    /// Build from an array.
    #[inline]
    pub const fn new(lanes: [f32; LANES]) -> Self {
        Self(lanes)
    }

    /// Broadcast one value to every lane.
    #[inline]
    pub const fn splat(value: f32) -> Self {
        Self([value; LANES])
    }

    /// Load up to four samples; missing lanes are zero.
    #[inline]
    pub fn from_slice(samples: &[f32]) -> Self {
        let mut lanes = [0.0; LANES];
        let n = samples.len().min(LANES);
        lanes[..n].copy_from_slice(&samples[..n]);
        Self(lanes)
    }

    /// Store up to four lanes into `out`, ignoring lanes past its end.
    #[inline]
    pub fn write_to(self, out: &mut [f32]) {
        let n = out.len().min(LANES);
        out[..n].copy_from_slice(&self.0[..n]);
    }

    /// Lanes as an array.
    #[inline]
    pub const fn to_array(self) -> [f32; LANES] {
        self.0
    }

    /// Apply a scalar function to each lane.
    #[inline]
    pub fn map(self, f: impl Fn(f32) -> f32) -> Self {
        Self([f(self.0[0]), f(self.0[1]), f(self.0[2]), f(self.0[3])])
    }

    #[inline]
    fn zip(self, other: Self, f: impl Fn(f32, f32) -> f32) -> Self {
        Self([
            f(self.0[0], other.0[0]),
            f(self.0[1], other.0[1]),
            f(self.0[2], other.0[2]),
            f(self.0[3], other.0[3]),
        ])
    }

    /// Lane-wise minimum.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        self.zip(other, f32::min)
    }

    /// Lane-wise maximum.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        self.zip(other, f32::max)
    }

    /// Lane-wise absolute value.
    #[inline]
    pub fn abs(self) -> Self {
        self.map(fabsf)
    }

    /// Lane-wise square root.
    #[inline]
    pub fn sqrt(self) -> Self {
        self.map(sqrtf)
    }

    /// `self * a + b`.
    #[inline]
    pub fn mul_add(self, a: Self, b: Self) -> Self {
        self * a + b
    }

    /// Clamp every lane to `[-1, 1]`.
    #[inline]
    pub fn clamp_unit(self) -> Self {
        self.min(Self::ONES).max(Self::MINUS_ONES)
    }

    /// Crossfade: `self * amount + dry * (1 - amount)`.
    ///
    /// `self` is the wet signal.
    #[inline]
    pub fn mix(self, dry: Self, amount: f32) -> Self {
        let amount = Self::splat(amount);
        let dry_part = (Self::ONES - amount) * dry;
        self.mul_add(amount, dry_part)
    }

    /// Branch-free sign: `x / (|x| + ε)`.
    ///
    /// Close to ±1 away from zero and exactly 0 at zero.
    #[inline]
    pub fn signum_eps(self) -> Self {
        self / (self.abs() + Self::EPS)
    }

    /// Per lane, pick `if_true` where `self > rhs`, else `if_false`.
    #[inline]
    pub fn select_gt(self, rhs: Self, if_true: Self, if_false: Self) -> Self {
        let mut out = if_false;
        for i in 0..LANES {
            if self.0[i] > rhs.0[i] {
                out.0[i] = if_true.0[i];
            }
        }
        out
    }

    /// Lane-wise [`fast_tanh`].
    #[inline]
    pub fn fast_tanh(self) -> Self {
        self.map(fast_tanh)
    }
}

impl From<[f32; LANES]> for F32x4 {
    fn from(lanes: [f32; LANES]) -> Self {
        Self(lanes)
    }
}

macro_rules! impl_lane_op {
    ($trait:ident, $method:ident, $op:tt) => {
        impl $trait for F32x4 {
            type Output = Self;

            #[inline]
            fn $method(self, rhs: Self) -> Self {
                Self([
                    self.0[0] $op rhs.0[0],
                    self.0[1] $op rhs.0[1],
                    self.0[2] $op rhs.0[2],
                    self.0[3] $op rhs.0[3],
                ])
            }
        }

        impl $trait<f32> for F32x4 {
            type Output = Self;

            #[inline]
            fn $method(self, rhs: f32) -> Self {
                self $op Self::splat(rhs)
            }
        }
    };
}

impl_lane_op!(Add, add, +);
impl_lane_op!(Sub, sub, -);
impl_lane_op!(Mul, mul, *);
impl_lane_op!(Div, div, /);

impl Neg for F32x4 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        self.map(|x| -x)
    }
}
