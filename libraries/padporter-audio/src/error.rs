/// Audio-specific errors
use thiserror::Error;

/// Result type alias using `AudioError`
pub type Result<T> = std::result::Result<T, AudioError>;

/// Audio error types
#[derive(Error, Debug)]
pub enum AudioError {
    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Decoding error
    #[error("Decode error: {0}")]
    DecodeError(String),

    /// Symphonia error
    #[error("Symphonia error: {0}")]
    Symphonia(String),

    /// Invalid sample rate
    #[error("Invalid sample rate: {0} Hz")]
    InvalidSampleRate(u32),

    /// Invalid channel count
    #[error("Invalid channel count: {0}")]
    InvalidChannelCount(u16),

    /// Resampling error
    #[error("Resample error: {0}")]
    Resample(String),

    /// WAV container error
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
