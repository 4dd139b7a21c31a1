//! Audio I/O layer for the tenband equalizer engine.
//!
//! This crate provides:
//! - System loopback capture through the equalizer via [`capture`]
//! - WAV file reading and writing via [`wav`]

mod capture;
mod wav;

pub use capture::{
    default_loopback_device, list_devices, AudioDevice, LoopbackCapture, SharedEqualizer,
};
pub use wav::{read_wav_interleaved, write_wav_interleaved, WavSpec};

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    #[error("audio stream error: {0}")]
    Stream(String),

    #[error("no audio device available")]
    NoDevice,

    #[error("device not found: {0}")]
    DeviceNotFound(String),

    #[error("unsupported sample format: {0}")]
    UnsupportedFormat(String),
}

pub type Result<T> = std::result::Result<T, Error>;
