//! Core Effect trait.
//!
//! The [`Effect`] trait is the seam between the DSP processors and whatever
//! hosts them (an offline renderer, a plugin wrapper, a node in a graph).
//!
//! ## Design Decisions
//!
//! - **Block processing only**: processors read one smoothed parameter value
//!   per group of [`LANES`](crate::LANES) samples, so there is no meaningful
//!   single-sample entry point.
//!
//! - **Interleaved channels**: a block is a flat run of samples. Multichannel
//!   hosts pass interleaved frames and the processor treats them as one
//!   stream.
//!
//! - **Object-safe**: hosts may store `Box<dyn Effect + Send>` and swap
//!   processors at runtime.
//!
//! - **No allocations**: all methods are safe to call from the audio thread.

#[cfg(not(feature = "std"))]
use alloc::boxed::Box;

/// Core trait for block-based audio processors.
///
/// # Example
///
/// ```rust
/// use grit_core::Effect;
///
/// struct Invert;
///
/// impl Effect for Invert {
///     fn process_block(&mut self, input: &[f32], output: &mut [f32]) {
///         for (x, y) in input.iter().zip(output.iter_mut()) {
///             *y = -*x;
///         }
///     }
///
///     fn set_sample_rate(&mut self, _sample_rate: f32) {}
///
///     fn reset(&mut self) {}
/// }
///
/// let mut fx = Invert;
/// let mut out = [0.0; 4];
/// fx.process_block(&[1.0, -1.0, 0.5, 0.0], &mut out);
/// assert_eq!(out, [-1.0, 1.0, -0.5, 0.0]);
/// ```
pub trait Effect {
    /// Process `input` into `output`.
    ///
    /// Both slices must have the same length. Lengths that are a multiple of
    /// [`LANES`](crate::LANES) match the smoothing granularity exactly.
    fn process_block(&mut self, input: &[f32], output: &mut [f32]);

    /// Process a buffer in place.
    ///
    /// The default copies each group out before processing it, so it is
    /// correct for any processor whose output group depends only on the same
    /// input group.
    fn process_block_inplace(&mut self, buffer: &mut [f32]) {
        for group in buffer.chunks_mut(crate::LANES) {
            let mut input = [0.0; crate::LANES];
            let n = group.len();
            input[..n].copy_from_slice(group);
            self.process_block(&input[..n], group);
        }
    }

    /// Re-derive sample-rate dependent state (smoothing steps).
    fn set_sample_rate(&mut self, sample_rate: f32);

    /// Finish any running parameter ramps.
    ///
    /// Processors in grit hold no signal history, so reset only snaps the
    /// smoothers to their targets.
    fn reset(&mut self);
}

impl<E: Effect + ?Sized> Effect for Box<E> {
    fn process_block(&mut self, input: &[f32], output: &mut [f32]) {
        (**self).process_block(input, output);
    }

    fn process_block_inplace(&mut self, buffer: &mut [f32]) {
        (**self).process_block_inplace(buffer);
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        (**self).set_sample_rate(sample_rate);
    }

    fn reset(&mut self) {
        (**self).reset();
    }
}
