//! PadPorter Audio
//!
//! Audio decoding and sampler-format conversion for PadPorter.
//!
//! This crate provides:
//! - WAV decoding via Symphonia into interleaved f32 buffers
//! - Offline band-limited resampling via rubato
//! - The conversion policy the sampler requires: nearest supported sample
//!   rate, configurable channel handling, peak normalization to 0.95 of
//!   full scale, 16-bit quantization
//! - RIFF/WAVE encapsulation via hound
//!
//! # Example
//!
//! ```rust,no_run
//! use padporter_audio::{convert, decoder, writer, ConvertConfig};
//! use std::path::Path;
//!
//! # fn example() -> Result<(), padporter_audio::AudioError> {
//! let buffer = decoder::decode_file(Path::new("/samples/kick.wav"))?;
//! let converted = convert::convert(&buffer, &ConvertConfig::default())?;
//! writer::write_wav(Path::new("/import/kick.wav"), &converted)?;
//! # Ok(())
//! # }
//! ```

pub mod convert;
pub mod decoder;
mod error;
pub mod resample;
pub mod writer;

pub use convert::{ChannelPolicy, ConvertConfig, ConvertedAudio, SUPPORTED_RATES};
pub use error::{AudioError, Result};
pub use resample::ResampleQuality;
