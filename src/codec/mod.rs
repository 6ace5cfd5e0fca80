//! Audio codec service
//!
//! Decoding is pure Rust via symphonia; encoding hands raw PCM to an
//! ffmpeg subprocess. The converter only sees the `AudioCodec` trait,
//! which keeps the orchestrator testable with a scripted codec.

mod decoder;
mod encoder;

pub use encoder::{get_ffmpeg_path, verify_ffmpeg};

use std::fmt;
use std::path::{Path, PathBuf};

use crate::core::TargetFormat;

/// Fully decoded audio
///
/// Samples are interleaved f32 in [-1.0, 1.0], frame-major.
#[derive(Debug, Clone)]
pub struct AudioBuffer {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
    pub channels: u16,
}

impl AudioBuffer {
    pub fn frames(&self) -> usize {
        if self.channels == 0 {
            0
        } else {
            self.samples.len() / self.channels as usize
        }
    }

    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            0.0
        } else {
            self.frames() as f64 / self.sample_rate as f64
        }
    }
}

/// Errors from the codec service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The container or codec is not one we can handle
    UnsupportedFormat(String),
    /// The file looked like audio but could not be decoded
    CorruptFile(String),
    /// Encoding or writing the output failed
    WriteError(String),
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::UnsupportedFormat(detail) => {
                write!(f, "Unsupported format: {}", detail)
            }
            CodecError::CorruptFile(detail) => write!(f, "Could not decode: {}", detail),
            CodecError::WriteError(detail) => write!(f, "Could not write output: {}", detail),
        }
    }
}

impl std::error::Error for CodecError {}

/// The decode/encode capability the converter delegates to
pub trait AudioCodec: Send + Sync {
    /// Decode a whole file into memory
    fn decode(&self, path: &Path) -> Result<AudioBuffer, CodecError>;

    /// Encode a buffer to `path` in the given format
    fn encode(
        &self,
        buffer: &AudioBuffer,
        path: &Path,
        format: TargetFormat,
    ) -> Result<(), CodecError>;
}

/// Production codec: symphonia in, ffmpeg out
pub struct EngineCodec {
    ffmpeg_path: PathBuf,
}

impl EngineCodec {
    /// Locate and verify ffmpeg; fails when no usable binary exists
    pub fn new() -> Result<Self, String> {
        let ffmpeg_path = verify_ffmpeg()?;
        Ok(Self { ffmpeg_path })
    }
}

impl AudioCodec for EngineCodec {
    fn decode(&self, path: &Path) -> Result<AudioBuffer, CodecError> {
        decoder::decode_file(path)
    }

    fn encode(
        &self,
        buffer: &AudioBuffer,
        path: &Path,
        format: TargetFormat,
    ) -> Result<(), CodecError> {
        encoder::encode_pcm(&self.ffmpeg_path, buffer, path, format)
    }
}
