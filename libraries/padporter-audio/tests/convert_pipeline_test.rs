//! End-to-end conversion tests: synthesize a WAV, decode it, run the
//! conversion policy, write the result, and read it back.

use hound::{SampleFormat, WavSpec, WavWriter};
use padporter_audio::{convert, decoder, writer, ChannelPolicy, ConvertConfig};
use std::f32::consts::PI;
use std::path::Path;

/// Write a 16-bit PCM sine fixture
fn write_sine_fixture(
    path: &Path,
    sample_rate: u32,
    channels: u16,
    frames: usize,
    amplitude: f32,
) {
    let spec = WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(path, spec).unwrap();
    for i in 0..frames {
        let t = i as f32 / sample_rate as f32;
        let value = (2.0 * PI * 440.0 * t).sin() * amplitude;
        let sample = (value * 32_767.0).round() as i16;
        for _ in 0..channels {
            writer.write_sample(sample).unwrap();
        }
    }
    writer.finalize().unwrap();
}

fn peak_i16(samples: &[i16]) -> u16 {
    samples.iter().map(|s| s.unsigned_abs()).max().unwrap_or(0)
}

const PEAK_95: u16 = 31_129; // round(0.95 * 32767)

#[test]
fn compliant_mono_file_keeps_rate_and_gets_normalized() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.wav");
    let output = dir.path().join("out.wav");
    write_sine_fixture(&input, 44_100, 1, 4410, 0.5);

    let buffer = decoder::decode_file(&input).unwrap();
    assert_eq!(buffer.format.sample_rate.as_hz(), 44_100);
    assert_eq!(buffer.format.channels, 1);

    let converted = convert::convert(&buffer, &ConvertConfig::default()).unwrap();
    assert_eq!(converted.sample_rate.as_hz(), 44_100);
    assert_eq!(converted.channels, 1);
    assert_eq!(converted.samples.len(), 4410);
    assert_eq!(peak_i16(&converted.samples), PEAK_95);

    writer::write_wav(&output, &converted).unwrap();
    let mut reader = hound::WavReader::open(&output).unwrap();
    assert_eq!(reader.spec().sample_rate, 44_100);
    assert_eq!(reader.spec().channels, 1);
    assert_eq!(reader.spec().bits_per_sample, 16);
    let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
    assert_eq!(samples, converted.samples);
}

#[test]
fn high_rate_stereo_resamples_to_48k_and_stays_stereo() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.wav");
    write_sine_fixture(&input, 96_000, 2, 9600, 0.5);

    let buffer = decoder::decode_file(&input).unwrap();
    assert_eq!(buffer.format.channels, 2);

    let converted = convert::convert(&buffer, &ConvertConfig::default()).unwrap();
    assert_eq!(converted.sample_rate.as_hz(), 48_000);
    assert_eq!(converted.channels, 2);
    // round(9600 * 48000 / 96000) frames, interleaved stereo
    assert_eq!(converted.samples.len(), 4800 * 2);
    assert_eq!(peak_i16(&converted.samples), PEAK_95);
}

#[test]
fn downmix_policy_reduces_stereo_to_mono() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.wav");
    write_sine_fixture(&input, 44_100, 2, 4410, 0.5);

    let buffer = decoder::decode_file(&input).unwrap();
    let config = ConvertConfig {
        channel_policy: ChannelPolicy::DownmixMono,
        ..ConvertConfig::default()
    };
    let converted = convert::convert(&buffer, &config).unwrap();
    assert_eq!(converted.channels, 1);
    assert_eq!(converted.samples.len(), 4410);
}

#[test]
fn silent_file_converts_and_stays_silent() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("silent.wav");
    write_sine_fixture(&input, 48_000, 1, 4800, 0.0);

    let buffer = decoder::decode_file(&input).unwrap();
    let converted = convert::convert(&buffer, &ConvertConfig::default()).unwrap();
    assert_eq!(converted.sample_rate.as_hz(), 48_000);
    assert!(converted.samples.iter().all(|&s| s == 0));
}

#[test]
fn truncated_wav_fails_to_decode() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.wav");
    let bad = dir.path().join("bad.wav");
    write_sine_fixture(&good, 44_100, 1, 4410, 0.5);

    // Keep only the first few header bytes
    let bytes = std::fs::read(&good).unwrap();
    std::fs::write(&bad, &bytes[..16]).unwrap();

    assert!(decoder::decode_file(&bad).is_err());
}
