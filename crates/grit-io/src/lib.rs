//! Audio I/O layer for grit.
//!
//! This crate provides:
//!
//! - **WAV file I/O**: [`read_wav`] and [`write_wav`] for interleaved
//!   multichannel audio
//! - **Offline rendering**: [`ProcessingEngine`] runs a chain of
//!   [`Effect`](grit_core::Effect)s over a whole buffer in fixed-size blocks
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use grit_io::{ProcessingEngine, read_wav, write_wav};
//! use grit_effects::{Saturation, SaturationAlgorithm};
//!
//! let (samples, spec) = read_wav("input.wav")?;
//!
//! let sample_rate = spec.sample_rate as f32;
//! let mut sat = Saturation::new(sample_rate);
//! sat.set_algorithm(SaturationAlgorithm::Tape);
//! sat.set_gain(60.0);
//! sat.set_mix(100.0);
//! sat.set_out_level_db(-3.0);
//!
//! let mut engine = ProcessingEngine::new(sample_rate);
//! engine.add_effect(Box::new(sat));
//! let processed = engine.process_file(&samples, 512)?;
//!
//! write_wav("output.wav", &processed, spec)?;
//! ```

mod engine;
mod wav;

pub use engine::ProcessingEngine;
pub use wav::{WavFormat, WavInfo, WavSpec, read_wav, read_wav_info, write_wav};

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// The requested sample format is not supported.
    #[error("Unsupported sample format: {0}")]
    UnsupportedFormat(String),

    /// Rendering block size that is zero or not a whole number of groups.
    #[error("Invalid block size {0}: must be a non-zero multiple of {lanes}", lanes = grit_core::LANES)]
    BlockSize(usize),
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
