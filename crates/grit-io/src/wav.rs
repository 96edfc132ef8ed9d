//! WAV file reading and writing.
//!
//! Samples are exchanged as interleaved `f32` in `[-1, 1]`; channels are
//! never mixed down, since the processors treat interleaved audio as one
//! flat stream.

use crate::{Error, Result};
use hound::{SampleFormat, WavReader, WavWriter};
use std::path::Path;

/// WAV audio encoding format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavFormat {
    /// Linear PCM (integer samples).
    Pcm,
    /// IEEE 754 floating-point samples.
    IeeeFloat,
}

/// WAV file metadata extracted without loading sample data.
#[derive(Debug, Clone)]
pub struct WavInfo {
    /// Number of audio channels.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample.
    pub bits_per_sample: u16,
    /// Total number of sample frames (samples per channel).
    pub num_frames: u64,
    /// Duration in seconds.
    pub duration_secs: f64,
    /// Audio encoding format.
    pub format: WavFormat,
}

/// Read WAV metadata without loading sample data.
pub fn read_wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let total_samples = reader.len() as u64;
    let num_frames = total_samples / spec.channels.max(1) as u64;
    let duration_secs = num_frames as f64 / spec.sample_rate as f64;

    let format = match spec.sample_format {
        SampleFormat::Float => WavFormat::IeeeFloat,
        SampleFormat::Int => WavFormat::Pcm,
    };

    Ok(WavInfo {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        num_frames,
        duration_secs,
        format,
    })
}

/// WAV file specification.
///
/// 32-bit files are written as IEEE float, 16- and 24-bit as PCM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    /// Number of audio channels.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample (16, 24 or 32).
    pub bits_per_sample: u16,
}

impl Default for WavSpec {
    fn default() -> Self {
        Self {
            channels: 1,
            sample_rate: 48000,
            bits_per_sample: 32,
        }
    }
}

impl WavSpec {
    /// Same spec with a different bit depth.
    pub fn with_bits_per_sample(mut self, bits_per_sample: u16) -> Self {
        self.bits_per_sample = bits_per_sample;
        self
    }
}

impl From<hound::WavSpec> for WavSpec {
    fn from(spec: hound::WavSpec) -> Self {
        Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
        }
    }
}

impl From<WavSpec> for hound::WavSpec {
    fn from(spec: WavSpec) -> Self {
        hound::WavSpec {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            sample_format: if spec.bits_per_sample == 32 {
                SampleFormat::Float
            } else {
                SampleFormat::Int
            },
        }
    }
}

/// Read a WAV file as interleaved `f32` samples along with its spec.
///
/// Integer PCM is scaled by `2^(bits-1)`.
///
/// # Example
/// ```ignore
/// let (samples, spec) = read_wav("input.wav")?;
/// let frames = samples.len() / spec.channels as usize;
/// println!("Loaded {frames} frames at {} Hz", spec.sample_rate);
/// ```
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(Vec<f32>, WavSpec)> {
    let path = path.as_ref();
    let reader = WavReader::open(path)?;
    let hound_spec = reader.spec();
    let spec = WavSpec::from(hound_spec);

    let samples: Vec<f32> = match hound_spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = int_scale(spec.bits_per_sample)?;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    tracing::debug!(
        path = %path.display(),
        channels = spec.channels,
        sample_rate = spec.sample_rate,
        bits = spec.bits_per_sample,
        samples = samples.len(),
        "read wav"
    );

    Ok((samples, spec))
}

/// Write interleaved samples to a WAV file.
///
/// Integer output is clamped to the representable range; float output is
/// written as is.
///
/// # Example
/// ```ignore
/// let samples = vec![0.0f32; 48000];
/// let spec = WavSpec { sample_rate: 48000, ..Default::default() };
/// write_wav("output.wav", &samples, spec)?;
/// ```
pub fn write_wav<P: AsRef<Path>>(path: P, samples: &[f32], spec: WavSpec) -> Result<()> {
    let path = path.as_ref();
    if !matches!(spec.bits_per_sample, 16 | 24 | 32) {
        return Err(Error::UnsupportedFormat(format!(
            "{}-bit output (expected 16, 24 or 32)",
            spec.bits_per_sample
        )));
    }
    if spec.channels == 0 {
        return Err(Error::UnsupportedFormat("zero channels".to_string()));
    }

    let mut writer = WavWriter::create(path, hound::WavSpec::from(spec))?;

    if spec.bits_per_sample == 32 {
        for &sample in samples {
            writer.write_sample(sample)?;
        }
    } else {
        let max_val = int_scale(spec.bits_per_sample)?;
        for &sample in samples {
            let int_sample = (sample * max_val).clamp(-max_val, max_val - 1.0) as i32;
            writer.write_sample(int_sample)?;
        }
    }

    writer.finalize()?;
    tracing::debug!(
        path = %path.display(),
        channels = spec.channels,
        bits = spec.bits_per_sample,
        samples = samples.len(),
        "wrote wav"
    );
    Ok(())
}

/// Full-scale value for integer PCM of `bits` bits.
fn int_scale(bits: u16) -> Result<f32> {
    if bits == 0 || bits > 32 {
        return Err(Error::UnsupportedFormat(format!("{bits}-bit PCM")));
    }
    Ok((1i64 << (bits - 1)) as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn int_scale_values() {
        assert_eq!(int_scale(16).unwrap(), 32768.0);
        assert_eq!(int_scale(24).unwrap(), 8_388_608.0);
        assert!(int_scale(0).is_err());
    }

    #[test]
    fn hound_spec_picks_format_from_depth() {
        let float: hound::WavSpec = WavSpec::default().into();
        assert_eq!(float.sample_format, SampleFormat::Float);
        let int: hound::WavSpec = WavSpec::default().with_bits_per_sample(24).into();
        assert_eq!(int.sample_format, SampleFormat::Int);
    }

    #[test]
    fn rejects_unsupported_depth() {
        let file = NamedTempFile::new().unwrap();
        let spec = WavSpec::default().with_bits_per_sample(12);
        assert!(matches!(
            write_wav(file.path(), &[0.0; 4], spec),
            Err(Error::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn int_output_clamps() {
        let file = NamedTempFile::new().unwrap();
        let spec = WavSpec::default().with_bits_per_sample(16);
        write_wav(file.path(), &[2.0, -2.0], spec).unwrap();
        let (loaded, _) = read_wav(file.path()).unwrap();
        assert_eq!(loaded, vec![32767.0 / 32768.0, -1.0]);
    }
}
