//! Offline band-limited resampling using rubato
//!
//! Unlike a streaming resampler, the whole buffer is available up front,
//! so the filter delay can be compensated exactly: the output is trimmed
//! to `round(frames_in * rate_out / rate_in)` frames with the delay line
//! skipped, keeping all channels time-aligned.

use crate::error::{AudioError, Result};
use padporter_core::{AudioBuffer, AudioFormat, SampleRate};
use rubato::{
    FastFixedIn, PolynomialDegree, Resampler, SincFixedIn, SincInterpolationParameters,
    SincInterpolationType, WindowFunction,
};
use serde::{Deserialize, Serialize};

const CHUNK_FRAMES: usize = 1024;

/// Resampling quality presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResampleQuality {
    /// Linear interpolation, low CPU
    Fast,

    /// Windowed-sinc interpolation
    #[default]
    High,
}

/// Enum to hold the rubato resampler variants
enum OfflineResampler {
    Fast(FastFixedIn<f32>),
    Sinc(SincFixedIn<f32>),
}

impl OfflineResampler {
    fn new(ratio: f64, channels: usize, quality: ResampleQuality) -> Result<Self> {
        match quality {
            ResampleQuality::Fast => FastFixedIn::new(
                ratio,
                2.0,
                PolynomialDegree::Linear,
                CHUNK_FRAMES,
                channels,
            )
            .map(Self::Fast)
            .map_err(|e| AudioError::Resample(format!("FastFixedIn creation failed: {}", e))),
            ResampleQuality::High => {
                let params = SincInterpolationParameters {
                    sinc_len: 128,
                    f_cutoff: 0.95,
                    interpolation: SincInterpolationType::Cubic,
                    oversampling_factor: 256,
                    window: WindowFunction::BlackmanHarris2,
                };
                SincFixedIn::new(ratio, 2.0, params, CHUNK_FRAMES, channels)
                    .map(Self::Sinc)
                    .map_err(|e| {
                        AudioError::Resample(format!("SincFixedIn creation failed: {}", e))
                    })
            }
        }
    }

    fn input_frames_next(&self) -> usize {
        match self {
            Self::Fast(r) => r.input_frames_next(),
            Self::Sinc(r) => r.input_frames_next(),
        }
    }

    fn output_delay(&self) -> usize {
        match self {
            Self::Fast(r) => r.output_delay(),
            Self::Sinc(r) => r.output_delay(),
        }
    }

    fn process(&mut self, chunk: &[Vec<f32>]) -> Result<Vec<Vec<f32>>> {
        match self {
            Self::Fast(r) => r.process(chunk, None),
            Self::Sinc(r) => r.process(chunk, None),
        }
        .map_err(|e| AudioError::Resample(format!("Resampling failed: {}", e)))
    }

    fn process_partial(&mut self, chunk: Option<&[Vec<f32>]>) -> Result<Vec<Vec<f32>>> {
        match self {
            Self::Fast(r) => r.process_partial(chunk, None),
            Self::Sinc(r) => r.process_partial(chunk, None),
        }
        .map_err(|e| AudioError::Resample(format!("Resampler flush failed: {}", e)))
    }
}

/// Resample an interleaved buffer to `target_rate`
///
/// Channels are processed channel-major and stay time-aligned. The output
/// holds exactly `round(frames_in * target_rate / input_rate)` frames.
/// A buffer already at `target_rate` is returned unchanged.
pub fn resample_buffer(
    input: &AudioBuffer,
    target_rate: u32,
    quality: ResampleQuality,
) -> Result<AudioBuffer> {
    let input_rate = input.format.sample_rate.as_hz();
    if input_rate == 0 {
        return Err(AudioError::InvalidSampleRate(input_rate));
    }
    if target_rate == 0 {
        return Err(AudioError::InvalidSampleRate(target_rate));
    }
    let channels = input.format.channels as usize;
    if channels == 0 {
        return Err(AudioError::InvalidChannelCount(0));
    }

    if input_rate == target_rate {
        return Ok(input.clone());
    }

    let frames_in = input.frames();
    let ratio = f64::from(target_rate) / f64::from(input_rate);
    let frames_out = (frames_in as f64 * ratio).round() as usize;

    let output_format = AudioFormat::new(
        SampleRate::new(target_rate),
        input.format.channels,
        input.format.bits_per_sample,
    );

    if frames_in == 0 {
        return Ok(AudioBuffer::new(Vec::new(), output_format));
    }

    let planar = deinterleave(&input.samples, channels, frames_in);
    let mut resampler = OfflineResampler::new(ratio, channels, quality)?;
    let delay = resampler.output_delay();

    let mut produced: Vec<Vec<f32>> = vec![Vec::new(); channels];
    let mut position = 0;

    // Feed complete chunks of exactly the size the resampler asks for
    loop {
        let needed = resampler.input_frames_next();
        if frames_in - position < needed {
            break;
        }
        let chunk: Vec<Vec<f32>> = planar
            .iter()
            .map(|ch| ch[position..position + needed].to_vec())
            .collect();
        position += needed;
        append_channels(&mut produced, resampler.process(&chunk)?);
    }

    // Flush the remaining partial chunk, then drain the delay line with
    // empty input until the target frame count is covered
    if position < frames_in {
        let tail: Vec<Vec<f32>> = planar.iter().map(|ch| ch[position..].to_vec()).collect();
        append_channels(&mut produced, resampler.process_partial(Some(&tail))?);
    }
    while produced[0].len() < frames_out + delay {
        let drained = resampler.process_partial(None)?;
        if drained[0].is_empty() {
            break;
        }
        append_channels(&mut produced, drained);
    }

    // Skip the delay, then pin the length to the exact expected count
    let mut output = Vec::with_capacity(frames_out * channels);
    for frame in 0..frames_out {
        for ch in &produced {
            output.push(ch.get(delay + frame).copied().unwrap_or(0.0));
        }
    }

    Ok(AudioBuffer::new(output, output_format))
}

/// Deinterleave samples from `[L, R, L, R, ...]` to `[[L, ...], [R, ...]]`
fn deinterleave(interleaved: &[f32], channels: usize, frames: usize) -> Vec<Vec<f32>> {
    let mut planar = vec![Vec::with_capacity(frames); channels];
    for frame in 0..frames {
        for (ch, out) in planar.iter_mut().enumerate() {
            out.push(interleaved[frame * channels + ch]);
        }
    }
    planar
}

fn append_channels(produced: &mut [Vec<f32>], chunk: Vec<Vec<f32>>) {
    for (out, ch) in produced.iter_mut().zip(chunk) {
        out.extend(ch);
    }
}
