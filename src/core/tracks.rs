//! Scanning of user-selected files
//!
//! Reads duration and size for display in the track list. Files lofty
//! cannot parse still get size-only info; the conversion attempt itself
//! decides whether a file is usable.

use std::fs;
use std::path::{Path, PathBuf};

use lofty::{AudioFile, Probe};

/// Check if a file is an audio file based on its extension
pub fn is_audio_file(path: &Path) -> bool {
    if let Some(ext) = path.extension() {
        let ext = ext.to_string_lossy().to_lowercase();
        matches!(
            ext.as_str(),
            "mp3" | "flac" | "wav" | "ogg" | "m4a" | "aac" | "aiff" | "opus" | "alac"
        )
    } else {
        false
    }
}

/// A file the user selected for conversion
#[derive(Debug, Clone)]
pub struct TrackInfo {
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
    /// Duration in seconds, when the file could be parsed
    pub duration: Option<f64>,
}

impl TrackInfo {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// Secondary line for the track row
    pub fn detail_line(&self) -> String {
        match self.duration {
            Some(d) => format!("{} \u{b7} {}", format_duration(d), format_size(self.size)),
            None => format_size(self.size),
        }
    }
}

/// Read size and duration for a selected file
pub fn scan_selected_file(path: &Path) -> Result<TrackInfo, String> {
    if !path.is_file() {
        return Err(format!("Path is not a file: {}", path.display()));
    }

    let metadata =
        fs::metadata(path).map_err(|e| format!("Failed to get file metadata: {}", e))?;

    let duration = match Probe::open(path).and_then(|p| p.read()) {
        Ok(tagged) => Some(tagged.properties().duration().as_secs_f64()),
        Err(e) => {
            log::debug!("Could not read properties of {}: {}", path.display(), e);
            None
        }
    };

    Ok(TrackInfo {
        path: path.to_path_buf(),
        size: metadata.len(),
        duration,
    })
}

/// Format duration as "Xm Ys"
pub fn format_duration(seconds: f64) -> String {
    let total_secs = seconds.round() as u64;
    let mins = total_secs / 60;
    let secs = total_secs % 60;
    format!("{}m {}s", mins, secs)
}

/// Format size in human-readable form (KB, MB, GB)
/// Uses decimal units to match Finder (1 MB = 1,000,000 bytes)
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1000;
    const MB: u64 = KB * 1000;
    const GB: u64 = MB * 1000;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
