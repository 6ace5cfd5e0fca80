//! Shared test fixtures
//!
//! Synthesizes small PCM WAV files in pure Rust so tests do not depend
//! on an external encoder binary being installed.

#![cfg(test)]

use std::path::{Path, PathBuf};

const SAMPLE_RATE: u32 = 8000;

/// Write a mono 16-bit PCM WAV containing a 440 Hz tone
pub fn write_test_wav(path: &Path, duration_ms: u32) {
    write_test_wav_rate(path, duration_ms, SAMPLE_RATE);
}

/// Same tone at an explicit sample rate
pub fn write_test_wav_rate(path: &Path, duration_ms: u32, sample_rate: u32) {
    let frames = (sample_rate * duration_ms / 1000) as usize;
    let data_len = (frames * 2) as u32;

    let mut bytes = Vec::with_capacity(44 + data_len as usize);
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");

    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
    bytes.extend_from_slice(&1u16.to_le_bytes()); // mono
    bytes.extend_from_slice(&sample_rate.to_le_bytes());
    bytes.extend_from_slice(&(sample_rate * 2).to_le_bytes()); // byte rate
    bytes.extend_from_slice(&2u16.to_le_bytes()); // block align
    bytes.extend_from_slice(&16u16.to_le_bytes()); // bits per sample

    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&data_len.to_le_bytes());
    for i in 0..frames {
        let t = i as f32 / sample_rate as f32;
        let sample = ((t * 440.0 * std::f32::consts::TAU).sin() * 8000.0) as i16;
        bytes.extend_from_slice(&sample.to_le_bytes());
    }

    std::fs::write(path, bytes).expect("Failed to write test wav");
}

/// Create a 100ms WAV fixture inside `dir` and return its path
pub fn test_wav_in(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    write_test_wav(&path, 100);
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_fixture_has_riff_header() {
        let dir = TempDir::new().unwrap();
        let path = test_wav_in(dir.path(), "fixture.wav");

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WAVE");
        // 100ms of mono 16-bit at 8kHz plus the 44-byte header
        assert_eq!(bytes.len(), 44 + 800 * 2);
    }
}
