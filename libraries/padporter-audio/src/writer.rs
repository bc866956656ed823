//! RIFF/WAVE encapsulation using hound

use crate::convert::ConvertedAudio;
use crate::error::Result;
use hound::{SampleFormat, WavSpec, WavWriter};
use std::path::Path;

/// Write quantized audio as a 16-bit PCM WAV file
pub fn write_wav(path: &Path, audio: &ConvertedAudio) -> Result<()> {
    let spec = WavSpec {
        channels: audio.channels,
        sample_rate: audio.sample_rate.as_hz(),
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec)?;
    for &sample in &audio.samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;
    Ok(())
}
