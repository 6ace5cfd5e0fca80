//! Logging configuration for AudioForge
//!
//! Logs are written to both the terminal and a file at:
//! `~/Library/Logs/AudioForge/audioforge.log`
//!
//! Users can find this log file to send for debugging purposes.

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};
use std::fs::{self, OpenOptions};
use std::path::PathBuf;

/// Get the log directory path
/// On macOS: ~/Library/Logs/AudioForge/
pub fn get_log_directory() -> Option<PathBuf> {
    if cfg!(target_os = "macos") {
        dirs::home_dir().map(|h| h.join("Library").join("Logs").join("AudioForge"))
    } else {
        // Fallback for other platforms
        dirs::data_local_dir().map(|d| d.join("AudioForge").join("logs"))
    }
}

/// Get the current log file path
pub fn get_log_file_path() -> Option<PathBuf> {
    get_log_directory().map(|d| d.join("audioforge.log"))
}

/// Initialize the logging system
///
/// Sets up combined logging to:
/// - Terminal (with colors, for development)
/// - File (for user bug reports)
///
/// Returns the path to the log file on success
pub fn init_logging() -> Option<PathBuf> {
    let log_dir = match get_log_directory() {
        Some(d) => d,
        None => {
            eprintln!("Warning: Could not determine log directory");
            return None;
        }
    };

    // Create log directory if it doesn't exist
    if let Err(e) = fs::create_dir_all(&log_dir) {
        eprintln!("Warning: Could not create log directory: {}", e);
        return None;
    }

    let log_path = log_dir.join("audioforge.log");

    // Rotate old log if it's too large (> 10MB)
    if let Ok(metadata) = fs::metadata(&log_path)
        && metadata.len() > 10 * 1024 * 1024
    {
        let backup_path = log_dir.join("audioforge.log.old");
        let _ = fs::rename(&log_path, &backup_path);
    }

    // Open log file (append mode)
    let log_file = match OpenOptions::new().create(true).append(true).open(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not open log file: {}", e);
            // Fall back to terminal-only logging
            init_terminal_only();
            return None;
        }
    };

    // Configure logging format
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_thread_level(LevelFilter::Off) // Don't show thread IDs
        .set_target_level(LevelFilter::Off) // Don't show module targets
        .build();

    // Set up combined logger (terminal + file)
    let loggers: Vec<Box<dyn SharedLogger>> = vec![
        // Terminal logger - show info and above in terminal
        TermLogger::new(
            LevelFilter::Info,
            config.clone(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ),
        // File logger - capture debug and above in file
        WriteLogger::new(LevelFilter::Debug, config, log_file),
    ];

    if CombinedLogger::init(loggers).is_err() {
        eprintln!("Warning: Logger already initialized");
    }

    // Write session start marker
    log::info!("=== AudioForge session started ===");
    log::info!("Log file: {}", log_path.display());

    Some(log_path)
}

/// Initialize terminal-only logging (fallback if file logging fails)
fn init_terminal_only() {
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_thread_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .build();

    let term_logger =
        TermLogger::new(LevelFilter::Info, config, TerminalMode::Mixed, ColorChoice::Auto);
    let _ = CombinedLogger::init(vec![term_logger]);
}
