//! Parameter introspection for discoverable processor controls.
//!
//! [`ParameterInfo`] gives hosts index-based access to a processor's
//! controls together with a [`ParamDescriptor`] describing each one. The
//! renderer uses it to apply `name=value` overrides, the CLI to list
//! controls, and the config layer to validate presets.
//!
//! Values exchanged through this trait are the *raw* host-facing values
//! (gain percent, output level in dB); processors apply their own clamping
//! and mapping before the values reach a smoother.
//!
//! # Example
//!
//! ```rust
//! use grit_core::{ParamDescriptor, ParamId, ParameterInfo};
//!
//! struct Trim {
//!     db: f32,
//! }
//!
//! impl ParameterInfo for Trim {
//!     fn param_count(&self) -> usize { 1 }
//!
//!     fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
//!         match index {
//!             0 => Some(ParamDescriptor::gain_db("Trim", "Trim", -12.0, 12.0, 0.0)
//!                 .with_id(ParamId(1), "trim_db")),
//!             _ => None,
//!         }
//!     }
//!
//!     fn get_param(&self, index: usize) -> f32 {
//!         if index == 0 { self.db } else { 0.0 }
//!     }
//!
//!     fn set_param(&mut self, index: usize, value: f32) {
//!         if index == 0 {
//!             self.db = value.clamp(-12.0, 12.0);
//!         }
//!     }
//! }
//!
//! let mut trim = Trim { db: 0.0 };
//! trim.set_param(trim.find_param_by_name("trim").unwrap(), 40.0);
//! assert_eq!(trim.get_param(0), 12.0);
//! ```

use crate::math::clamp_param;

/// Stable parameter identifier that survives reordering.
///
/// Each processor gets a base ID and numbers its parameters from there:
/// Gain uses 100, Saturation 200..=204.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamId(pub u32);

/// Unit used when displaying a parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamUnit {
    /// Decibels, for level parameters.
    Decibels,
    /// Percentage, for gain amount and mix.
    Percent,
    /// Discrete choice (an enum index).
    Choice,
    /// Dimensionless.
    None,
}

impl ParamUnit {
    /// Unit suffix for display.
    ///
    /// ```rust
    /// use grit_core::ParamUnit;
    ///
    /// assert_eq!(ParamUnit::Decibels.suffix(), " dB");
    /// assert_eq!(ParamUnit::Percent.suffix(), "%");
    /// assert_eq!(ParamUnit::None.suffix(), "");
    /// ```
    pub const fn suffix(&self) -> &'static str {
        match self {
            ParamUnit::Decibels => " dB",
            ParamUnit::Percent => "%",
            ParamUnit::Choice | ParamUnit::None => "",
        }
    }
}

/// Metadata for one parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full display name (e.g. "Output Level").
    pub name: &'static str,
    /// Short name, at most 8 characters.
    pub short_name: &'static str,
    /// Display unit.
    pub unit: ParamUnit,
    /// Minimum accepted value.
    pub min: f32,
    /// Maximum accepted value.
    pub max: f32,
    /// Value a freshly configured processor starts from.
    pub default: f32,
    /// Recommended increment for encoders; `1.0` for choices.
    pub step: f32,
    /// Stable numeric ID.
    pub id: ParamId,
    /// Stable string ID, used as the key in preset files.
    pub string_id: &'static str,
}

impl ParamDescriptor {
    /// Generic parameter with no unit.
    pub const fn custom(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::None,
            min,
            max,
            default,
            step: 0.01,
            id: ParamId(0),
            string_id: "",
        }
    }

    /// Wet/dry mix, 0–100 %, default 100 %.
    pub const fn mix() -> Self {
        Self {
            name: "Mix",
            short_name: "Mix",
            unit: ParamUnit::Percent,
            min: 0.0,
            max: 100.0,
            default: 100.0,
            step: 1.0,
            id: ParamId(0),
            string_id: "",
        }
    }

    /// Level parameter in decibels.
    pub const fn gain_db(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::Decibels,
            min,
            max,
            default,
            step: 0.5,
            id: ParamId(0),
            string_id: "",
        }
    }

    /// Discrete choice among `count` options, indexed from 0.
    pub const fn choice(name: &'static str, short_name: &'static str, count: usize) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::Choice,
            min: 0.0,
            max: (count - 1) as f32,
            default: 0.0,
            step: 1.0,
            id: ParamId(0),
            string_id: "",
        }
    }

    /// Set the stable IDs (builder style).
    pub const fn with_id(mut self, id: ParamId, string_id: &'static str) -> Self {
        self.id = id;
        self.string_id = string_id;
        self
    }

    /// Set the display unit (builder style).
    pub const fn with_unit(mut self, unit: ParamUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Set the default value (builder style).
    pub const fn with_default(mut self, default: f32) -> Self {
        self.default = default;
        self
    }

    /// Clamp `value` to `[min, max]`; NaN becomes `max`.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        clamp_param(value, self.min, self.max)
    }

    /// `true` when `value` lies inside `[min, max]`.
    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Index-based access to a processor's parameters.
pub trait ParameterInfo {
    /// Number of parameters; valid indices are `0..param_count()`.
    fn param_count(&self) -> usize;

    /// Descriptor for `index`, or `None` when out of range.
    fn param_info(&self, index: usize) -> Option<ParamDescriptor>;

    /// Raw value last set for `index`; `0.0` when out of range.
    fn get_param(&self, index: usize) -> f32;

    /// Set the raw value for `index`. Out-of-range indices are ignored.
    fn set_param(&mut self, index: usize, value: f32);

    /// Find a parameter by name, short name or string ID (case-insensitive).
    fn find_param_by_name(&self, name: &str) -> Option<usize> {
        (0..self.param_count()).find(|&i| {
            self.param_info(i).is_some_and(|desc| {
                desc.name.eq_ignore_ascii_case(name)
                    || desc.short_name.eq_ignore_ascii_case(name)
                    || desc.string_id.eq_ignore_ascii_case(name)
            })
        })
    }

    /// Find a parameter by its stable [`ParamId`].
    fn param_index_by_id(&self, id: ParamId) -> Option<usize> {
        (0..self.param_count()).find(|&i| self.param_info(i).is_some_and(|d| d.id == id))
    }
}
