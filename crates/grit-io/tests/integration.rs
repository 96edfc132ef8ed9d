//! Integration tests for grit-io WAV I/O and the offline renderer.

use grit_core::Effect;
use grit_effects::{Gain, Saturation, SaturationAlgorithm};
use grit_io::{Error, ProcessingEngine, WavFormat, WavSpec, read_wav, read_wav_info, write_wav};
use tempfile::NamedTempFile;

fn sine_wave(sample_rate: u32, freq_hz: f32, num_samples: usize) -> Vec<f32> {
    (0..num_samples)
        .map(|i| (2.0 * std::f32::consts::PI * freq_hz * i as f32 / sample_rate as f32).sin())
        .collect()
}

#[test]
fn wav_roundtrip_mono_f32() {
    let sr = 48000;
    let samples = sine_wave(sr, 440.0, sr as usize / 10);
    let spec = WavSpec {
        channels: 1,
        sample_rate: sr,
        bits_per_sample: 32,
    };

    let file = NamedTempFile::new().unwrap();
    write_wav(file.path(), &samples, spec).unwrap();

    let (loaded, loaded_spec) = read_wav(file.path()).unwrap();
    assert_eq!(loaded_spec, spec);
    assert_eq!(loaded, samples);
}

#[test]
fn wav_roundtrip_stereo_stays_interleaved() {
    let frames = 256;
    let samples: Vec<f32> = (0..frames)
        .flat_map(|i| {
            let t = i as f32 / frames as f32;
            [t, -t]
        })
        .collect();
    let spec = WavSpec {
        channels: 2,
        sample_rate: 44100,
        bits_per_sample: 32,
    };

    let file = NamedTempFile::new().unwrap();
    write_wav(file.path(), &samples, spec).unwrap();
    let (loaded, loaded_spec) = read_wav(file.path()).unwrap();

    assert_eq!(loaded_spec.channels, 2);
    assert_eq!(loaded.len(), frames * 2);
    assert_eq!(loaded, samples);
}

#[test]
fn wav_roundtrip_pcm_within_quantization() {
    for bits in [16u16, 24] {
        let samples = sine_wave(48000, 1000.0, 4800);
        let spec = WavSpec::default().with_bits_per_sample(bits);
        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &samples, spec).unwrap();

        let (loaded, _) = read_wav(file.path()).unwrap();
        let step = 1.0 / (1u32 << (bits - 1)) as f32;
        for (a, b) in samples.iter().zip(&loaded) {
            assert!((a - b).abs() <= step * 1.01, "{bits}-bit: {a} vs {b}");
        }
    }
}

#[test]
fn wav_info_reports_frames() {
    let spec = WavSpec {
        channels: 2,
        sample_rate: 48000,
        bits_per_sample: 16,
    };
    let file = NamedTempFile::new().unwrap();
    write_wav(file.path(), &vec![0.0; 9600], spec).unwrap();

    let info = read_wav_info(file.path()).unwrap();
    assert_eq!(info.channels, 2);
    assert_eq!(info.num_frames, 4800);
    assert_eq!(info.format, WavFormat::Pcm);
    assert!((info.duration_secs - 0.1).abs() < 1e-9);
}

#[test]
fn missing_file_is_wav_error() {
    assert!(matches!(
        read_wav("/nonexistent/grit/input.wav"),
        Err(Error::Wav(_))
    ));
}

#[test]
fn render_through_saturation_and_back() {
    let sr = 48000;
    let input = sine_wave(sr, 220.0, 4801);

    let mut sat = Saturation::new(sr as f32);
    sat.set_algorithm(SaturationAlgorithm::HardClip);
    sat.set_gain(100.0);
    sat.set_bias(0.0);
    sat.set_mix(100.0);
    sat.set_out_level_db(0.0);

    let mut engine = ProcessingEngine::new(sr as f32);
    engine.add_effect(Box::new(sat));
    let output = engine.process_file(&input, 512).unwrap();
    assert_eq!(output.len(), input.len());

    // Drive 300 squares the sine off except right at the zero crossings.
    for (x, y) in input.iter().zip(&output) {
        assert_eq!(*y, (x * 300.0).clamp(-1.0, 1.0));
    }

    let file = NamedTempFile::new().unwrap();
    write_wav(file.path(), &output, WavSpec::default()).unwrap();
    let (loaded, _) = read_wav(file.path()).unwrap();
    assert_eq!(loaded, output);
}

#[test]
fn chain_matches_manual_processing() {
    let input = sine_wave(48000, 330.0, 2048);

    let build = || {
        let mut sat = Saturation::new(48000.0);
        sat.set_algorithm(SaturationAlgorithm::Tape);
        sat.set_gain(50.0);
        sat.set_mix(75.0);
        sat.set_out_level_db(-3.0);
        sat.set_out_level_db(-9.0);
        let mut gain = Gain::new(48000.0);
        gain.set_gain(0.5);
        (sat, gain)
    };

    let (sat, gain) = build();
    let chain: Vec<Box<dyn Effect + Send>> = vec![Box::new(sat), Box::new(gain)];
    let mut engine = ProcessingEngine::with_effects(48000.0, chain);
    let rendered = engine.process_file(&input, 256).unwrap();

    let (mut sat, mut gain) = build();
    let mut manual = vec![0.0; input.len()];
    for (x, y) in input.chunks(256).zip(manual.chunks_mut(256)) {
        sat.process_block(x, y);
        gain.process_block_inplace(y);
    }
    assert_eq!(rendered, manual);
}
