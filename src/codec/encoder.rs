//! ffmpeg-based encoding
//!
//! The decoded buffer is streamed to ffmpeg's stdin as raw f32le PCM;
//! ffmpeg handles the target codec and container.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::core::TargetFormat;

use super::{AudioBuffer, CodecError};

/// Get the path to the ffmpeg binary
///
/// Checks the bundled copy first (resources/bin next to the manifest in
/// development, next to the executable in release), then falls back to
/// `ffmpeg` on PATH.
pub fn get_ffmpeg_path() -> PathBuf {
    if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
        let dev_path = PathBuf::from(manifest_dir)
            .join("resources")
            .join("bin")
            .join("ffmpeg");
        if dev_path.exists() {
            return dev_path;
        }
    }

    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        let local_path = exe_dir.join("resources").join("bin").join("ffmpeg");
        if local_path.exists() {
            return local_path;
        }
    }

    PathBuf::from("ffmpeg")
}

/// Verify that ffmpeg exists and runs, returning its path
pub fn verify_ffmpeg() -> Result<PathBuf, String> {
    let path = get_ffmpeg_path();

    let status = Command::new(&path)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|e| format!("ffmpeg not found at {:?}: {}", path, e))?;

    if !status.success() {
        return Err(format!("ffmpeg at {:?} exited with status {}", path, status));
    }

    log::debug!("ffmpeg verified at {:?}", path);
    Ok(path)
}

/// Encoder arguments for each target format
fn codec_args(format: TargetFormat) -> &'static [&'static str] {
    match format {
        TargetFormat::Mp3 => &["-codec:a", "libmp3lame", "-b:a", "192k"],
        TargetFormat::Wav => &["-codec:a", "pcm_s16le"],
        TargetFormat::Flac => &["-codec:a", "flac"],
        TargetFormat::Ogg => &["-codec:a", "libvorbis", "-q:a", "5"],
        TargetFormat::Aac => &["-codec:a", "aac", "-b:a", "192k"],
    }
}

/// Muxer for each target format; raw .aac needs an explicit adts muxer
fn muxer(format: TargetFormat) -> &'static str {
    match format {
        TargetFormat::Mp3 => "mp3",
        TargetFormat::Wav => "wav",
        TargetFormat::Flac => "flac",
        TargetFormat::Ogg => "ogg",
        TargetFormat::Aac => "adts",
    }
}

/// Encode a decoded buffer to `output_path` via ffmpeg
pub fn encode_pcm(
    ffmpeg_path: &Path,
    buffer: &AudioBuffer,
    output_path: &Path,
    format: TargetFormat,
) -> Result<(), CodecError> {
    if buffer.channels == 0 || buffer.samples.is_empty() {
        return Err(CodecError::CorruptFile("Empty audio buffer".to_string()));
    }

    let mut cmd = Command::new(ffmpeg_path);
    cmd.arg("-y")
        .arg("-nostats")
        .arg("-loglevel")
        .arg("error")
        .arg("-f")
        .arg("f32le")
        .arg("-ar")
        .arg(buffer.sample_rate.to_string())
        .arg("-ac")
        .arg(buffer.channels.to_string())
        .arg("-i")
        .arg("-")
        .args(codec_args(format))
        .arg("-f")
        .arg(muxer(format))
        .arg(output_path)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped());

    let mut child = cmd
        .spawn()
        .map_err(|e| CodecError::WriteError(format!("Failed to start ffmpeg: {}", e)))?;

    let stdin = child.stdin.take();
    let mut bytes = Vec::with_capacity(buffer.samples.len() * 4);
    for sample in &buffer.samples {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }

    // Feed stdin from its own thread while wait_with_output drains
    // stderr below. Writing from this thread can deadlock: once ffmpeg
    // fills the stderr pipe it stops reading stdin, and both sides
    // block. A broken pipe means ffmpeg exited early and the exit
    // status carries the real error.
    let writer = std::thread::spawn(move || match stdin {
        Some(mut stdin) => stdin.write_all(&bytes),
        None => Ok(()),
    });

    let output = child
        .wait_with_output()
        .map_err(|e| CodecError::WriteError(format!("Failed to wait for ffmpeg: {}", e)))?;

    let write_result = writer
        .join()
        .unwrap_or_else(|_| Err(std::io::Error::other("sample writer thread panicked")));

    if !output.status.success() {
        // Remove any partial output
        let _ = std::fs::remove_file(output_path);

        let stderr = String::from_utf8_lossy(&output.stderr);
        let detail = stderr
            .lines()
            .rev()
            .find(|l| !l.trim().is_empty())
            .unwrap_or("unknown error")
            .to_string();

        if stderr.contains("Unknown encoder") {
            return Err(CodecError::UnsupportedFormat(detail));
        }
        return Err(CodecError::WriteError(format!(
            "ffmpeg exited with {}: {}",
            output.status, detail
        )));
    }

    if let Err(e) = write_result
        && e.kind() != std::io::ErrorKind::BrokenPipe
    {
        return Err(CodecError::WriteError(format!(
            "Failed to stream samples to ffmpeg: {}",
            e
        )));
    }

    Ok(())
}
