/// Audio decoding using Symphonia
use crate::error::{AudioError, Result};
use padporter_core::{AudioBuffer, AudioFormat, SampleRate};
use std::path::Path;
use symphonia::core::audio::{AudioBufferRef, Signal};
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Decode an audio file into an interleaved f32 buffer
///
/// The native channel count is preserved; whether multi-channel audio is
/// reduced is a conversion-policy decision, not a decoding one. Samples
/// are normalized to `[-1.0, 1.0]` with symmetric scaling (signed
/// integers divide by 2^(N-1), not 2^(N-1)-1).
pub fn decode_file(path: &Path) -> Result<AudioBuffer> {
    if !path.exists() {
        return Err(AudioError::FileNotFound(path.display().to_string()));
    }

    let file = std::fs::File::open(path).map_err(AudioError::Io)?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    // A hint helps the format registry guess the container
    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| AudioError::Symphonia(format!("Failed to probe file: {}", e)))?;

    let mut format = probed.format;

    let track = format
        .default_track()
        .ok_or_else(|| AudioError::DecodeError("No audio tracks found".to_string()))?;

    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or_else(|| AudioError::DecodeError("Stream has no sample rate".to_string()))?;
    let channels = track
        .codec_params
        .channels
        .map(|c| c.count())
        .ok_or_else(|| AudioError::DecodeError("Stream has no channel description".to_string()))?;
    if channels == 0 {
        return Err(AudioError::InvalidChannelCount(0));
    }
    let track_id = track.id;

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| AudioError::Symphonia(format!("Failed to create decoder: {}", e)))?;

    let mut samples = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(symphonia::core::errors::Error::IoError(e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => {
                return Err(AudioError::Symphonia(format!("Error reading packet: {}", e)));
            }
        };

        // Skip packets that are not for the default track
        if packet.track_id() != track_id {
            continue;
        }

        let decoded = decoder
            .decode(&packet)
            .map_err(|e| AudioError::DecodeError(format!("Decode error: {}", e)))?;

        append_interleaved(decoded, channels, &mut samples);
    }

    let format = AudioFormat::new(SampleRate::new(sample_rate), channels as u16, 32);
    Ok(AudioBuffer::new(samples, format))
}

/// Append a decoded Symphonia buffer to `out` as interleaved f32
fn append_interleaved(decoded: AudioBufferRef, channels: usize, out: &mut Vec<f32>) {
    match decoded {
        AudioBufferRef::F32(buf) => {
            // F32 audio can carry intersample peaks above 1.0, so clamp
            extend_planar(&buf, channels, out, |s| s.clamp(-1.0, 1.0));
        }
        AudioBufferRef::F64(buf) => {
            extend_planar(&buf, channels, out, |s| (s as f32).clamp(-1.0, 1.0));
        }
        AudioBufferRef::S32(buf) => {
            extend_planar(&buf, channels, out, |s| s as f32 / 2_147_483_648.0);
        }
        AudioBufferRef::S24(buf) => {
            extend_planar(&buf, channels, out, |s| s.inner() as f32 / 8_388_608.0);
        }
        AudioBufferRef::S16(buf) => {
            extend_planar(&buf, channels, out, |s| s as f32 / 32_768.0);
        }
        AudioBufferRef::S8(buf) => {
            extend_planar(&buf, channels, out, |s| s as f32 / 128.0);
        }
        AudioBufferRef::U32(buf) => {
            extend_planar(&buf, channels, out, |s| {
                (s as f32 / u32::MAX as f32) * 2.0 - 1.0
            });
        }
        AudioBufferRef::U24(buf) => {
            extend_planar(&buf, channels, out, |s| {
                (s.inner() as f32 / 16_777_215.0) * 2.0 - 1.0
            });
        }
        AudioBufferRef::U16(buf) => {
            extend_planar(&buf, channels, out, |s| {
                (s as f32 / u16::MAX as f32) * 2.0 - 1.0
            });
        }
        AudioBufferRef::U8(buf) => {
            extend_planar(&buf, channels, out, |s| {
                (s as f32 / u8::MAX as f32) * 2.0 - 1.0
            });
        }
    }
}

/// Interleave a planar Symphonia buffer into `out`, converting each
/// sample with `normalize`
fn extend_planar<T, F>(
    buf: &symphonia::core::audio::AudioBuffer<T>,
    channels: usize,
    out: &mut Vec<f32>,
    normalize: F,
) where
    T: symphonia::core::sample::Sample + Copy,
    F: Fn(T) -> f32,
{
    let frames = buf.frames();
    out.reserve(frames * channels);
    for frame in 0..frames {
        for ch in 0..channels {
            out.push(normalize(buf.chan(ch)[frame]));
        }
    }
}

/// True when `path` carries the qualifying `.wav` extension
/// (case-insensitive)
pub fn is_wav_file(name: &str) -> bool {
    name.rsplit_once('.')
        .map(|(_, ext)| ext.eq_ignore_ascii_case("wav"))
        .unwrap_or(false)
}
