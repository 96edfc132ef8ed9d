//! Extreme parameter tests for the grit processors.
//!
//! Verifies that every processor produces finite output when its parameters
//! sit at their minimum and maximum values, at extreme sample rates (8 kHz
//! and 192 kHz), and when the block length is not a multiple of four.

use grit_core::{Effect, ParamUnit, ParameterInfo};
use grit_effects::{Gain, Saturation, SaturationAlgorithm};

const DEFAULT_SAMPLE_RATE: f32 = 48000.0;
const LOW_SAMPLE_RATE: f32 = 8000.0;
const HIGH_SAMPLE_RATE: f32 = 192000.0;
const NUM_SAMPLES: usize = 1001;
const BLOCK_SIZE: usize = 64;

fn test_signal() -> Vec<f32> {
    (0..NUM_SAMPLES)
        .map(|i| match i % 3 {
            0 => 0.5,
            1 => -0.5,
            _ => 0.0,
        })
        .collect()
}

/// Process the test signal in blocks and assert every output is finite.
fn assert_finite_output(effect: &mut dyn Effect, label: &str) {
    let input = test_signal();
    let mut output = vec![0.0; NUM_SAMPLES];
    for (x, y) in input.chunks(BLOCK_SIZE).zip(output.chunks_mut(BLOCK_SIZE)) {
        effect.process_block(x, y);
    }
    for (i, y) in output.iter().enumerate() {
        assert!(y.is_finite(), "{label}: non-finite output at sample {i}: {y}");
    }
}

/// Set every continuous parameter; choices keep the value `create` gave them.
fn set_all_params(effect: &mut impl ParameterInfo, pick: impl Fn(f32, f32) -> f32) {
    for i in 0..effect.param_count() {
        if let Some(desc) = effect.param_info(i) {
            if desc.unit != ParamUnit::Choice {
                effect.set_param(i, pick(desc.min, desc.max));
            }
        }
    }
}

fn run_extreme_test<E: Effect + ParameterInfo>(name: &str, mut create: impl FnMut(f32) -> E) {
    {
        let mut effect = create(DEFAULT_SAMPLE_RATE);
        set_all_params(&mut effect, |min, _| min);
        assert_finite_output(&mut effect, &format!("{name} (all min)"));
    }
    {
        let mut effect = create(DEFAULT_SAMPLE_RATE);
        set_all_params(&mut effect, |_, max| max);
        assert_finite_output(&mut effect, &format!("{name} (all max)"));
    }
    for sample_rate in [LOW_SAMPLE_RATE, HIGH_SAMPLE_RATE] {
        let mut effect = create(sample_rate);
        set_all_params(&mut effect, |min, max| (min + max) * 0.5);
        assert_finite_output(&mut effect, &format!("{name} ({sample_rate} Hz)"));
    }
}

#[test]
fn gain_extreme_params() {
    run_extreme_test("Gain", Gain::new);
}

#[test]
fn saturation_extreme_params_every_algorithm() {
    for algorithm in SaturationAlgorithm::ALL {
        run_extreme_test(algorithm.name(), |sample_rate| {
            let mut sat = Saturation::new(sample_rate);
            sat.set_algorithm(algorithm);
            sat
        });
    }
}

#[test]
fn saturation_extreme_drive_and_bias() {
    for algorithm in SaturationAlgorithm::ALL {
        for bias in [-1.0, 1.0] {
            let mut sat = Saturation::new(DEFAULT_SAMPLE_RATE);
            sat.set_algorithm(algorithm);
            sat.set_gain(100.0);
            sat.set_bias(bias);
            sat.set_mix(100.0);
            sat.set_out_level_db(24.0);
            assert_finite_output(&mut sat, &format!("{algorithm} (bias {bias})"));
        }
    }
}
