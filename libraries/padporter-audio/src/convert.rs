//! Sampler-format conversion policy
//!
//! Takes a decoded buffer through the fixed pipeline the sampler
//! requires: nearest supported sample rate, channel policy, peak
//! normalization to 0.95 of full scale, 16-bit quantization.

use crate::error::{AudioError, Result};
use crate::resample::{resample_buffer, ResampleQuality};
use padporter_core::{AudioBuffer, SampleRate};
use serde::{Deserialize, Serialize};

/// Sample rates the sampler accepts, ascending
pub const SUPPORTED_RATES: [u32; 2] = [44_100, 48_000];

/// Peak target leaving headroom before quantization
const PEAK_TARGET: f32 = 0.95;

/// What to do with multi-channel input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelPolicy {
    /// Keep the source channel count (mono stays mono, stereo stays stereo)
    #[default]
    Preserve,

    /// Average all channels into one
    DownmixMono,
}

/// Conversion configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ConvertConfig {
    /// Channel handling
    pub channel_policy: ChannelPolicy,

    /// Resampling quality
    pub quality: ResampleQuality,
}

/// Quantized audio ready for WAV encapsulation
#[derive(Debug, Clone)]
pub struct ConvertedAudio {
    /// Interleaved 16-bit samples
    pub samples: Vec<i16>,

    /// Selected sample rate
    pub sample_rate: SampleRate,

    /// Channel count after the channel policy was applied
    pub channels: u16,
}

/// Choose the supported rate nearest to `input_rate`
///
/// Candidates are tried in ascending order with a strict comparison, so
/// an input exactly halfway between the two resolves to the lower rate.
pub fn select_target_rate(input_rate: u32) -> u32 {
    let mut best = SUPPORTED_RATES[0];
    for rate in SUPPORTED_RATES {
        let candidate = i64::from(rate) - i64::from(input_rate);
        let current = i64::from(best) - i64::from(input_rate);
        if candidate.abs() < current.abs() {
            best = rate;
        }
    }
    best
}

/// Convert a decoded buffer to sampler-compliant 16-bit PCM
pub fn convert(input: &AudioBuffer, config: &ConvertConfig) -> Result<ConvertedAudio> {
    let input_rate = input.format.sample_rate.as_hz();
    if input_rate == 0 {
        return Err(AudioError::InvalidSampleRate(0));
    }
    if input.format.channels == 0 {
        return Err(AudioError::InvalidChannelCount(0));
    }

    let target_rate = select_target_rate(input_rate);
    let resampled = resample_buffer(input, target_rate, config.quality)?;

    let (mut samples, channels) = match config.channel_policy {
        ChannelPolicy::Preserve => (resampled.samples, resampled.format.channels),
        ChannelPolicy::DownmixMono => (
            downmix_mono(&resampled.samples, resampled.format.channels as usize),
            1,
        ),
    };

    normalize_peak(&mut samples);

    Ok(ConvertedAudio {
        samples: samples.iter().map(|&s| quantize(s)).collect(),
        sample_rate: SampleRate::new(target_rate),
        channels,
    })
}

/// Average interleaved channels into a mono signal
fn downmix_mono(interleaved: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return interleaved.to_vec();
    }
    interleaved
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}

/// Scale so the peak hits `PEAK_TARGET`; silence passes through
fn normalize_peak(samples: &mut [f32]) {
    let peak = samples.iter().fold(0.0f32, |acc, s| acc.max(s.abs()));
    if peak > 0.0 {
        let gain = PEAK_TARGET / peak;
        for sample in samples.iter_mut() {
            *sample *= gain;
        }
    }
}

/// Map a float sample in `[-1, 1]` to i16, rounding and clamping
fn quantize(sample: f32) -> i16 {
    (sample * 32_767.0).round().clamp(-32_768.0, 32_767.0) as i16
}
