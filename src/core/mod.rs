//! Core conversion data model
//!
//! Contains the pieces shared by the workflow and the UI:
//! - TargetFormat: the fixed set of output formats
//! - ConversionJob / ConversionResult: one batch run and its outcomes
//! - ProgressState: thread-safe progress shared with the worker
//! - Track scanning for the selected-file list

mod format;
mod job;
mod state;
mod tracks;

pub use format::TargetFormat;
pub use job::{ConversionJob, ConversionResult, FileOutcome, ValidationError};
pub use state::ProgressState;
pub use tracks::{
    TrackInfo, format_duration, format_size, is_audio_file, scan_selected_file,
};
