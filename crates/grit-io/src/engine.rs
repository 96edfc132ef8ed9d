//! Offline effect chain renderer.

use grit_core::{Effect, LANES};

use crate::{Error, Result};

/// Runs a chain of effects over audio buffers, block by block.
///
/// This is the host side of the processors' contract: blocks are handed
/// over in order, and controls written between blocks take effect at the
/// next block boundary. The engine uses `Send` bounds so a chain can be
/// moved to a worker thread.
pub struct ProcessingEngine {
    effects: Vec<Box<dyn Effect + Send>>,
    sample_rate: f32,
}

impl ProcessingEngine {
    /// Create an empty engine.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            effects: Vec::new(),
            sample_rate,
        }
    }

    /// Create an engine around an existing chain.
    ///
    /// The effects are assumed to be configured for `sample_rate` already.
    pub fn with_effects(sample_rate: f32, effects: Vec<Box<dyn Effect + Send>>) -> Self {
        Self {
            effects,
            sample_rate,
        }
    }

    /// Sample rate the chain runs at.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Change the sample rate of every effect.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        for effect in &mut self.effects {
            effect.set_sample_rate(sample_rate);
        }
    }

    /// Append an effect, re-deriving its smoothing for the engine's rate.
    pub fn add_effect(&mut self, mut effect: Box<dyn Effect + Send>) {
        effect.set_sample_rate(self.sample_rate);
        self.effects.push(effect);
    }

    /// Number of effects in the chain.
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// `true` when the chain has no effects.
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Finish every running parameter ramp.
    pub fn reset(&mut self) {
        for effect in &mut self.effects {
            effect.reset();
        }
    }

    /// Process one block through the chain.
    ///
    /// The first effect reads `input`; every later one works in place on
    /// `output`. An empty chain copies.
    pub fn process_block(&mut self, input: &[f32], output: &mut [f32]) {
        debug_assert!(output.len() >= input.len());
        let output = &mut output[..input.len()];

        let Some((first, rest)) = self.effects.split_first_mut() else {
            output.copy_from_slice(input);
            return;
        };

        first.process_block(input, output);
        for effect in rest {
            effect.process_block_inplace(output);
        }
    }

    /// Process one block in place through the chain.
    pub fn process_block_inplace(&mut self, buffer: &mut [f32]) {
        for effect in &mut self.effects {
            effect.process_block_inplace(buffer);
        }
    }

    /// Render a whole buffer in blocks of `block_size` samples.
    ///
    /// `block_size` must be a non-zero multiple of [`LANES`] so block
    /// boundaries coincide with smoothing groups. The last block may be
    /// shorter.
    pub fn process_file(&mut self, input: &[f32], block_size: usize) -> Result<Vec<f32>> {
        self.process_file_with_progress(input, block_size, |_| {})
    }

    /// [`process_file`](Self::process_file), calling `on_block` with the
    /// number of samples done after every block.
    pub fn process_file_with_progress(
        &mut self,
        input: &[f32],
        block_size: usize,
        mut on_block: impl FnMut(usize),
    ) -> Result<Vec<f32>> {
        if block_size == 0 || block_size % LANES != 0 {
            return Err(Error::BlockSize(block_size));
        }

        tracing::debug!(
            samples = input.len(),
            block_size,
            effects = self.effects.len(),
            sample_rate = self.sample_rate,
            "rendering"
        );

        let mut output = vec![0.0; input.len()];
        let mut done = 0;
        for (in_chunk, out_chunk) in input.chunks(block_size).zip(output.chunks_mut(block_size)) {
            self.process_block(in_chunk, out_chunk);
            done += in_chunk.len();
            on_block(done);
        }

        Ok(output)
    }
}
