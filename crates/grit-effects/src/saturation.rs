//! Multi-algorithm saturation with bias, dry/wet mix and output level.
//!
//! Per group of four samples the processor reads one smoothed value for
//! each control and computes
//!
//! ```text
//! xb  = x + bias
//! wet = clamp(shape(xb, drive), -1, 1)
//! y   = (wet * mix + x * (1 - mix)) * out_level
//! ```
//!
//! where `shape` is the transfer curve of the selected
//! [`SaturationAlgorithm`] and `drive` is the raw gain mapped onto that
//! algorithm's range.

use grit_core::{
    DEFAULT_SMOOTHING_MS, Effect, F32x4, LANES, ParamDescriptor, ParamId, ParamSmoother,
    ParamUnit, ParameterInfo, clamp_param, db_to_linear,
};

use crate::SaturationAlgorithm;
use crate::shapers::with_shaper;

/// Lowest output level in dB; writing it mutes the processor.
pub const OUT_LEVEL_FLOOR_DB: f32 = -96.0;

/// Highest output level in dB.
pub const OUT_LEVEL_CEILING_DB: f32 = 24.0;

#[derive(Debug, Clone, Copy)]
enum Shortcut {
    Silence,
    Dry,
}

#[derive(Debug, Clone, Copy)]
struct SmoothingTimes {
    gain: f32,
    bias: f32,
    mix: f32,
    out_level: f32,
}

impl Default for SmoothingTimes {
    fn default() -> Self {
        Self {
            gain: DEFAULT_SMOOTHING_MS,
            bias: DEFAULT_SMOOTHING_MS,
            mix: DEFAULT_SMOOTHING_MS,
            out_level: DEFAULT_SMOOTHING_MS,
        }
    }
}

/// Host-facing values as last written, after clamping.
#[derive(Debug, Clone, Copy)]
struct RawParams {
    /// `None` until the first gain write, so a fresh processor's first
    /// [`Saturation::set_gain`] still snaps.
    gain: Option<f32>,
    bias: f32,
    mix: f32,
    out_level_db: f32,
}

/// Saturation processor.
///
/// Controls are written once per block (typically from a host's parameter
/// state) and smoothed over [`DEFAULT_SMOOTHING_MS`]. A new processor has
/// every smoother at zero and therefore outputs silence until an output
/// level is written.
///
/// # Example
///
/// ```rust
/// use grit_core::Effect;
/// use grit_effects::{Saturation, SaturationAlgorithm};
///
/// let mut sat = Saturation::new(48000.0);
/// sat.set_algorithm(SaturationAlgorithm::HardClip);
/// sat.set_gain(100.0);
/// sat.set_bias(0.0);
/// sat.set_mix(100.0);
/// sat.set_out_level_db(0.0);
///
/// let mut output = [0.0; 8];
/// sat.process_block(&[0.5; 8], &mut output);
/// assert_eq!(output, [1.0; 8]);
/// ```
#[derive(Debug, Clone)]
pub struct Saturation {
    algorithm: SaturationAlgorithm,
    gain: ParamSmoother,
    bias: ParamSmoother,
    mix: ParamSmoother,
    out_level: ParamSmoother,
    smoothing: SmoothingTimes,
    raw: RawParams,
}

impl Saturation {
    /// Create a processor with all four smoothers at 21.33 ms.
    pub fn new(sample_rate: f32) -> Self {
        let mut sat = Self {
            algorithm: SaturationAlgorithm::default(),
            gain: ParamSmoother::new(),
            bias: ParamSmoother::new(),
            mix: ParamSmoother::new(),
            out_level: ParamSmoother::new(),
            smoothing: SmoothingTimes::default(),
            raw: RawParams {
                gain: None,
                bias: 0.0,
                mix: 0.0,
                out_level_db: OUT_LEVEL_FLOOR_DB,
            },
        };
        sat.init(sample_rate);
        sat
    }

    /// Reset every smoothing time to 21.33 ms at `sample_rate`.
    ///
    /// Current and target values are kept.
    pub fn init(&mut self, sample_rate: f32) {
        self.init_gain_param(DEFAULT_SMOOTHING_MS, sample_rate);
        self.init_bias_param(DEFAULT_SMOOTHING_MS, sample_rate);
        self.init_mix_param(DEFAULT_SMOOTHING_MS, sample_rate);
        self.init_out_level_param(DEFAULT_SMOOTHING_MS, sample_rate);
    }

    /// Reconfigure the gain smoothing time.
    pub fn init_gain_param(&mut self, transition_time_ms: f32, sample_rate: f32) {
        self.smoothing.gain = transition_time_ms;
        self.gain.init(transition_time_ms, sample_rate);
    }

    /// Reconfigure the bias smoothing time.
    pub fn init_bias_param(&mut self, transition_time_ms: f32, sample_rate: f32) {
        self.smoothing.bias = transition_time_ms;
        self.bias.init(transition_time_ms, sample_rate);
    }

    /// Reconfigure the mix smoothing time.
    pub fn init_mix_param(&mut self, transition_time_ms: f32, sample_rate: f32) {
        self.smoothing.mix = transition_time_ms;
        self.mix.init(transition_time_ms, sample_rate);
    }

    /// Reconfigure the output level smoothing time.
    pub fn init_out_level_param(&mut self, transition_time_ms: f32, sample_rate: f32) {
        self.smoothing.out_level = transition_time_ms;
        self.out_level.init(transition_time_ms, sample_rate);
    }

    /// Select the transfer curve.
    ///
    /// The drive range depends on the algorithm, so when the algorithm
    /// actually changes the last gain written is re-mapped onto the new
    /// range. Writing the gain again afterwards (as hosts do every block)
    /// is harmless.
    pub fn set_algorithm(&mut self, algorithm: SaturationAlgorithm) {
        if algorithm == self.algorithm {
            return;
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(from = %self.algorithm, to = %algorithm, "saturation algorithm changed");

        self.algorithm = algorithm;
        if let Some(raw) = self.raw.gain {
            self.gain.set_target(algorithm.map_gain(raw / 100.0));
        }
    }

    /// Set the drive amount, 0–100.
    ///
    /// The value is clamped, normalized and mapped onto the current
    /// algorithm's drive range (see [`SaturationAlgorithm::map_gain`]).
    pub fn set_gain(&mut self, gain: f32) {
        let gain = clamp_param(gain, 0.0, 100.0);
        self.raw.gain = Some(gain);
        self.gain.set_target(self.algorithm.map_gain(gain / 100.0));
    }

    /// Set the DC offset added before shaping, clamped to `[-1, 1]`.
    pub fn set_bias(&mut self, bias: f32) {
        let bias = clamp_param(bias, -1.0, 1.0);
        self.raw.bias = bias;
        self.bias.set_target(bias);
    }

    /// Set the wet proportion in percent, clamped to `[0, 100]`.
    pub fn set_mix(&mut self, mix_percent: f32) {
        let mix_percent = clamp_param(mix_percent, 0.0, 100.0);
        self.raw.mix = mix_percent;
        self.mix.set_target(mix_percent / 100.0);
    }

    /// Set the output level in dB, clamped to `[-96, 24]`.
    ///
    /// The floor maps to exactly zero rather than `10^(-96/20)`, which lets
    /// the block loop skip muted blocks entirely.
    pub fn set_out_level_db(&mut self, db: f32) {
        let db = clamp_param(db, OUT_LEVEL_FLOOR_DB, OUT_LEVEL_CEILING_DB);
        self.raw.out_level_db = db;
        let linear = if db <= OUT_LEVEL_FLOOR_DB {
            0.0
        } else {
            db_to_linear(db)
        };
        self.out_level.set_target(linear);
    }

    /// Selected algorithm.
    pub fn algorithm(&self) -> SaturationAlgorithm {
        self.algorithm
    }

    /// Current smoothed drive, after mapping.
    pub fn gain(&self) -> f32 {
        self.gain.current()
    }

    /// Current smoothed bias.
    pub fn bias(&self) -> f32 {
        self.bias.current()
    }

    /// Current smoothed mix in `[0, 1]`.
    pub fn mix(&self) -> f32 {
        self.mix.current()
    }

    /// Current smoothed linear output level.
    pub fn out_level(&self) -> f32 {
        self.out_level.current()
    }

    /// Checked once per block on the current values; taking a shortcut
    /// leaves every smoother where it is.
    fn shortcut(&self) -> Option<Shortcut> {
        let out_level = self.out_level.current();
        if out_level == 0.0 {
            Some(Shortcut::Silence)
        } else if out_level == 1.0 && self.mix.current() == 0.0 {
            Some(Shortcut::Dry)
        } else {
            None
        }
    }

    #[inline]
    fn next_group<S>(&mut self, x: F32x4, shape: S) -> F32x4
    where
        S: Fn(F32x4, f32) -> F32x4,
    {
        let drive = self.gain.value();
        let bias = self.bias.value();
        let mix = self.mix.value();
        let out_level = self.out_level.value();

        let wet = shape(x + bias, drive).clamp_unit();
        wet.mix(x, mix) * out_level
    }

    fn render<S>(&mut self, input: &[f32], output: &mut [f32], shape: S)
    where
        S: Fn(F32x4, f32) -> F32x4 + Copy,
    {
        for (x, y) in input.chunks(LANES).zip(output.chunks_mut(LANES)) {
            self.next_group(F32x4::from_slice(x), shape).write_to(y);
        }
    }

    fn render_inplace<S>(&mut self, buffer: &mut [f32], shape: S)
    where
        S: Fn(F32x4, f32) -> F32x4 + Copy,
    {
        for group in buffer.chunks_mut(LANES) {
            let y = self.next_group(F32x4::from_slice(group), shape);
            y.write_to(group);
        }
    }
}

impl Effect for Saturation {
    fn process_block(&mut self, input: &[f32], output: &mut [f32]) {
        debug_assert_eq!(input.len(), output.len());
        let n = input.len().min(output.len());
        let (input, output) = (&input[..n], &mut output[..n]);

        match self.shortcut() {
            Some(Shortcut::Silence) => output.fill(0.0),
            Some(Shortcut::Dry) => output.copy_from_slice(input),
            None => with_shaper!(self.algorithm, shape => self.render(input, output, shape)),
        }
    }

    fn process_block_inplace(&mut self, buffer: &mut [f32]) {
        match self.shortcut() {
            Some(Shortcut::Silence) => buffer.fill(0.0),
            Some(Shortcut::Dry) => {}
            None => with_shaper!(self.algorithm, shape => self.render_inplace(buffer, shape)),
        }
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        let SmoothingTimes {
            gain,
            bias,
            mix,
            out_level,
        } = self.smoothing;
        self.gain.init(gain, sample_rate);
        self.bias.init(bias, sample_rate);
        self.mix.init(mix, sample_rate);
        self.out_level.init(out_level, sample_rate);
    }

    fn reset(&mut self) {
        self.gain.snap_to_target();
        self.bias.snap_to_target();
        self.mix.snap_to_target();
        self.out_level.snap_to_target();
    }
}

impl ParameterInfo for Saturation {
    fn param_count(&self) -> usize {
        5
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        match index {
            0 => Some(
                ParamDescriptor::choice("Algorithm", "Algo", SaturationAlgorithm::COUNT)
                    .with_id(ParamId(200), "algorithm"),
            ),
            1 => Some(
                ParamDescriptor::custom("Gain", "Gain", 0.0, 100.0, 100.0)
                    .with_unit(ParamUnit::Percent)
                    .with_id(ParamId(201), "gain"),
            ),
            2 => Some(
                ParamDescriptor::custom("Bias", "Bias", -1.0, 1.0, 0.0)
                    .with_id(ParamId(202), "bias"),
            ),
            3 => Some(ParamDescriptor::mix().with_id(ParamId(203), "mix")),
            4 => Some(
                ParamDescriptor::gain_db(
                    "Output",
                    "Out",
                    OUT_LEVEL_FLOOR_DB,
                    OUT_LEVEL_CEILING_DB,
                    0.0,
                )
                .with_id(ParamId(204), "out_level_db"),
            ),
            _ => None,
        }
    }

    fn get_param(&self, index: usize) -> f32 {
        match index {
            0 => self.algorithm.index() as f32,
            1 => self.raw.gain.unwrap_or(0.0),
            2 => self.raw.bias,
            3 => self.raw.mix,
            4 => self.raw.out_level_db,
            _ => 0.0,
        }
    }

    fn set_param(&mut self, index: usize, value: f32) {
        match index {
            0 => {
                let last = (SaturationAlgorithm::COUNT - 1) as f32;
                let index = clamp_param(value.round(), 0.0, last);
                if let Some(algorithm) = SaturationAlgorithm::from_index(index as usize) {
                    self.set_algorithm(algorithm);
                }
            }
            1 => self.set_gain(value),
            2 => self.set_bias(value),
            3 => self.set_mix(value),
            4 => self.set_out_level_db(value),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grit_core::wet_dry_mix;

    fn configured(algorithm: SaturationAlgorithm, gain: f32, mix: f32, out_db: f32) -> Saturation {
        let mut sat = Saturation::new(48000.0);
        sat.set_algorithm(algorithm);
        sat.set_gain(gain);
        sat.set_bias(0.0);
        sat.set_mix(mix);
        sat.set_out_level_db(out_db);
        sat
    }

    fn sine(len: usize) -> Vec<f32> {
        (0..len)
            .map(|i| libm::sinf(i as f32 * 0.05) * 0.8)
            .collect()
    }

    #[test]
    fn fresh_processor_is_silent() {
        let mut sat = Saturation::new(48000.0);
        let mut output = [1.0; 8];
        sat.process_block(&[0.5; 8], &mut output);
        assert_eq!(output, [0.0; 8]);
        assert_eq!(sat.out_level(), 0.0);
    }

    #[test]
    fn hard_clip_saturates_to_unity() {
        let mut sat = configured(SaturationAlgorithm::HardClip, 100.0, 100.0, 0.0);
        assert_eq!(sat.gain(), 300.0);
        let mut output = [0.0; 16];
        sat.process_block(&[0.5; 16], &mut output);
        assert_eq!(output, [1.0; 16]);
    }

    #[test]
    fn muted_output_is_zero() {
        for algorithm in SaturationAlgorithm::ALL {
            let mut sat = configured(algorithm, 50.0, 100.0, -96.0);
            sat.set_bias(0.3);
            assert_eq!(sat.out_level(), 0.0);
            let mut output = [1.0; 8];
            sat.process_block(&sine(8), &mut output);
            assert_eq!(output, [0.0; 8], "{algorithm}");

            let mut buffer = sine(8);
            sat.process_block_inplace(&mut buffer);
            assert_eq!(buffer, [0.0; 8], "{algorithm} in place");
        }
    }

    #[test]
    fn dry_mix_at_unity_level_passes_through() {
        for algorithm in SaturationAlgorithm::ALL {
            let mut sat = configured(algorithm, 100.0, 0.0, 0.0);
            sat.set_bias(-0.4);
            let input = sine(32);
            let mut output = vec![0.0; 32];
            sat.process_block(&input, &mut output);
            assert_eq!(output, input, "{algorithm}");

            let mut buffer = input.clone();
            sat.process_block_inplace(&mut buffer);
            assert_eq!(buffer, input, "{algorithm} in place");
        }
    }

    #[test]
    fn dry_mix_with_level_scales_input() {
        let mut sat = configured(SaturationAlgorithm::Metal, 100.0, 0.0, -6.0);
        let level = db_to_linear(-6.0);
        let input = sine(16);
        let mut output = vec![0.0; 16];
        sat.process_block(&input, &mut output);
        for (x, y) in input.iter().zip(&output) {
            assert!((y - x * level).abs() < 1e-6);
        }
    }

    #[test]
    fn clamps_inputs() {
        let mut sat = Saturation::new(48000.0);
        sat.set_bias(3.0);
        sat.set_mix(250.0);
        sat.set_out_level_db(60.0);
        sat.set_gain(-20.0);
        assert_eq!(sat.bias(), 1.0);
        assert_eq!(sat.mix(), 1.0);
        assert!((sat.out_level() - db_to_linear(24.0)).abs() < 1e-5);
        assert_eq!(sat.gain(), 1.0);
        assert_eq!(sat.get_param(1), 0.0);

        sat.set_out_level_db(-500.0);
        sat.reset();
        assert_eq!(sat.out_level(), 0.0);
    }

    #[test]
    fn upper_clamps_match_boundary_writes() {
        for algorithm in SaturationAlgorithm::ALL {
            let mut over = configured(algorithm, 150.0, 100.0, 0.0);
            over.set_bias(-5.0);
            over.set_mix(130.0);
            let mut edge = configured(algorithm, 100.0, 100.0, 0.0);
            edge.set_bias(-1.0);
            edge.set_mix(100.0);

            assert_eq!(over.gain(), edge.gain(), "{algorithm}");
            assert_eq!(over.get_param(1), 100.0);
            assert_eq!(over.get_param(2), -1.0);

            let input = sine(16);
            let (mut a, mut b) = (vec![0.0; 16], vec![0.0; 16]);
            over.process_block(&input, &mut a);
            edge.process_block(&input, &mut b);
            assert_eq!(a, b, "{algorithm}");
        }
    }

    #[test]
    fn nan_writes_clamp_to_upper_bound() {
        let mut sat = configured(SaturationAlgorithm::Tape2, 40.0, 60.0, -6.0);
        sat.set_gain(f32::NAN);
        sat.set_bias(f32::NAN);
        sat.set_mix(f32::NAN);
        sat.set_out_level_db(f32::NAN);
        assert_eq!(sat.get_param(1), 100.0);
        assert_eq!(sat.get_param(2), 1.0);
        assert_eq!(sat.get_param(3), 100.0);
        assert_eq!(sat.get_param(4), OUT_LEVEL_CEILING_DB);

        sat.set_param(0, f32::NAN);
        assert_eq!(sat.algorithm(), SaturationAlgorithm::FullWaveRectifier);
    }

    #[test]
    fn recovers_after_nan_write() {
        let mut sat = configured(SaturationAlgorithm::Tape, 50.0, 100.0, 0.0);
        let input = sine(8);
        let mut output = [0.0; 8];

        sat.set_out_level_db(f32::NAN);
        sat.set_param(3, f32::NAN);
        sat.process_block(&input, &mut output);
        assert!(output.iter().all(|y| y.is_finite()));

        sat.set_out_level_db(0.0);
        sat.set_mix(100.0);
        for _ in 0..1000 {
            sat.process_block(&input, &mut output);
        }
        assert!(output.iter().all(|y| y.is_finite()));
        assert!((sat.out_level() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn matches_scalar_reference_when_settled() {
        for algorithm in SaturationAlgorithm::ALL {
            let mut sat = configured(algorithm, 40.0, 60.0, -3.0);
            sat.set_bias(0.1);
            sat.reset();

            let drive = algorithm.map_gain(0.4);
            let level = db_to_linear(-3.0);
            let input = sine(24);
            let mut output = vec![0.0; 24];
            sat.process_block(&input, &mut output);

            for (x, y) in input.iter().zip(&output) {
                let wet = algorithm.shape(x + 0.1, drive);
                let expected = wet_dry_mix(*x, wet, 0.6) * level;
                assert!(
                    (y - expected).abs() < 1e-5,
                    "{algorithm}: x={x} y={y} expected={expected}"
                );
            }
        }
    }

    #[test]
    fn half_wave_rectifier_drops_negative_half() {
        let mut sat = configured(SaturationAlgorithm::HalfWaveRectifier, 50.0, 100.0, 0.0);
        let mut output = [0.0; 4];
        sat.process_block(&[-0.5, -0.1, 0.2, 0.7], &mut output);
        assert_eq!(output, [0.0, 0.0, 0.2, 0.7]);
    }

    #[test]
    fn algorithm_change_remaps_last_gain() {
        let mut sat = configured(SaturationAlgorithm::Tape, 100.0, 100.0, 0.0);
        assert_eq!(sat.gain(), 20.0);
        sat.set_algorithm(SaturationAlgorithm::Foldback);
        sat.reset();
        assert_eq!(sat.gain(), 1.0);
    }

    #[test]
    fn first_gain_after_algorithm_change_snaps() {
        let mut sat = Saturation::new(48000.0);
        sat.set_algorithm(SaturationAlgorithm::Metal);
        sat.set_gain(50.0);
        assert_eq!(sat.gain(), SaturationAlgorithm::Metal.map_gain(0.5));
    }

    #[test]
    fn smoothers_advance_once_per_group() {
        let mut sat = configured(SaturationAlgorithm::HardClip, 0.0, 100.0, 0.0);
        sat.set_out_level_db(-6.0);

        let mut reference = ParamSmoother::with_time(DEFAULT_SMOOTHING_MS, 48000.0);
        reference.set_target(1.0);
        reference.set_target(db_to_linear(-6.0));

        let mut output = [0.0; 8];
        sat.process_block(&[0.25; 8], &mut output);

        let first = reference.value() * 0.25;
        let second = reference.value() * 0.25;
        assert!(output[..4].iter().all(|&y| (y - first).abs() < 1e-7));
        assert!(output[4..].iter().all(|&y| (y - second).abs() < 1e-7));
        assert!(first > second);
    }

    #[test]
    fn tail_group_consumes_one_smoothed_value() {
        let mut a = configured(SaturationAlgorithm::Tape, 30.0, 100.0, 0.0);
        let mut b = a.clone();
        a.set_out_level_db(-12.0);
        b.set_out_level_db(-12.0);

        let input = sine(6);
        let mut out_a = vec![0.0; 6];
        a.process_block(&input, &mut out_a);

        let mut padded = input.clone();
        padded.extend([0.0, 0.0]);
        let mut out_b = vec![0.0; 8];
        b.process_block(&padded, &mut out_b);

        assert_eq!(out_a[..], out_b[..6]);
        assert_eq!(a.out_level(), b.out_level());
    }

    #[test]
    fn inplace_matches_out_of_place() {
        let mut a = configured(SaturationAlgorithm::Tube2, 70.0, 80.0, -1.0);
        let mut b = a.clone();
        a.set_gain(20.0);
        b.set_gain(20.0);

        let input = sine(37);
        let mut out = vec![0.0; 37];
        a.process_block(&input, &mut out);
        let mut buf = input.clone();
        b.process_block_inplace(&mut buf);
        assert_eq!(out, buf);
    }

    #[test]
    fn set_sample_rate_keeps_smoothing_time() {
        let mut sat = Saturation::new(48000.0);
        sat.init_mix_param(5.0, 48000.0);
        sat.set_sample_rate(96000.0);
        let expected = ParamSmoother::with_time(5.0, 96000.0).step();
        assert_eq!(sat.mix.step(), expected);
        assert_eq!(
            sat.gain.step(),
            ParamSmoother::with_time(DEFAULT_SMOOTHING_MS, 96000.0).step()
        );
    }

    #[test]
    fn parameter_info_round_trip() {
        let mut sat = Saturation::new(48000.0);
        assert_eq!(sat.param_count(), 5);
        assert_eq!(sat.find_param_by_name("out_level_db"), Some(4));
        assert_eq!(sat.param_index_by_id(ParamId(200)), Some(0));

        sat.set_param(0, 8.4);
        assert_eq!(sat.algorithm(), SaturationAlgorithm::HardClip);
        sat.set_param(0, 40.0);
        assert_eq!(sat.algorithm(), SaturationAlgorithm::FullWaveRectifier);
        assert_eq!(sat.get_param(0), 11.0);

        sat.set_param(1, 75.0);
        sat.set_param(2, -0.25);
        sat.set_param(3, 50.0);
        sat.set_param(4, -6.0);
        assert_eq!(sat.get_param(1), 75.0);
        assert_eq!(sat.get_param(2), -0.25);
        assert_eq!(sat.get_param(3), 50.0);
        assert_eq!(sat.get_param(4), -6.0);
        assert_eq!(sat.get_param(9), 0.0);
    }
}
