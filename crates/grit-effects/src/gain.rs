//! Smoothed linear gain stage.

use grit_core::{
    DEFAULT_SMOOTHING_MS, Effect, F32x4, LANES, ParamDescriptor, ParamId, ParamSmoother,
    ParameterInfo,
};

/// Linear gain with a smoothed multiplier.
///
/// The multiplier is read once per group of four samples. When the current
/// gain is exactly `0.0` or `1.0` at the start of a block, the block is
/// zero-filled or copied without touching the smoother.
///
/// A new `Gain` outputs silence until the first [`set_gain`](Self::set_gain).
///
/// # Example
///
/// ```rust
/// use grit_core::Effect;
/// use grit_effects::Gain;
///
/// let mut gain = Gain::new(48000.0);
/// gain.set_gain(0.5);
///
/// let input = [1.0; 8];
/// let mut output = [0.0; 8];
/// gain.process_block(&input, &mut output);
/// assert_eq!(output, [0.5; 8]);
/// ```
#[derive(Debug, Clone)]
pub struct Gain {
    gain: ParamSmoother,
    smoothing_ms: f32,
    raw_gain: f32,
}

impl Gain {
    /// Create a gain stage with the default 21.33 ms smoothing.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            gain: ParamSmoother::with_time(DEFAULT_SMOOTHING_MS, sample_rate),
            smoothing_ms: DEFAULT_SMOOTHING_MS,
            raw_gain: 0.0,
        }
    }

    /// Reconfigure the gain smoothing time.
    pub fn init_gain_param(&mut self, transition_time_ms: f32, sample_rate: f32) {
        self.smoothing_ms = transition_time_ms;
        self.gain.init(transition_time_ms, sample_rate);
    }

    /// Set the target linear gain. Any value is accepted, including negative
    /// values, which invert polarity. NaN leaves the target unchanged.
    pub fn set_gain(&mut self, gain: f32) {
        self.raw_gain = gain;
        self.gain.set_target(gain);
    }

    /// Current smoothed gain, without advancing the ramp.
    pub fn gain(&self) -> f32 {
        self.gain.current()
    }

    #[inline]
    fn next_group(&mut self, x: F32x4) -> F32x4 {
        x * self.gain.value()
    }
}

impl Effect for Gain {
    fn process_block(&mut self, input: &[f32], output: &mut [f32]) {
        debug_assert_eq!(input.len(), output.len());
        let n = input.len().min(output.len());
        let (input, output) = (&input[..n], &mut output[..n]);

        let current = self.gain.current();
        if current == 0.0 {
            output.fill(0.0);
            return;
        }
        if current == 1.0 {
            output.copy_from_slice(input);
            return;
        }

        for (x, y) in input.chunks(LANES).zip(output.chunks_mut(LANES)) {
            self.next_group(F32x4::from_slice(x)).write_to(y);
        }
    }

    fn process_block_inplace(&mut self, buffer: &mut [f32]) {
        let current = self.gain.current();
        if current == 0.0 {
            buffer.fill(0.0);
            return;
        }
        if current == 1.0 {
            return;
        }

        for group in buffer.chunks_mut(LANES) {
            let y = self.next_group(F32x4::from_slice(group));
            y.write_to(group);
        }
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.gain.init(self.smoothing_ms, sample_rate);
    }

    fn reset(&mut self) {
        self.gain.snap_to_target();
    }
}

impl ParameterInfo for Gain {
    fn param_count(&self) -> usize {
        1
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        match index {
            0 => Some(
                ParamDescriptor::custom("Gain", "Gain", -4.0, 4.0, 1.0)
                    .with_id(ParamId(100), "gain"),
            ),
            _ => None,
        }
    }

    fn get_param(&self, index: usize) -> f32 {
        match index {
            0 => self.raw_gain,
            _ => 0.0,
        }
    }

    fn set_param(&mut self, index: usize, value: f32) {
        if let Some(desc) = self.param_info(index) {
            self.set_gain(desc.clamp(value));
        }
    }
}
