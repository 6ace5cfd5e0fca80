//! Conversion workflow
//!
//! Validates jobs, runs the sequential per-file loop on a worker thread,
//! and resolves collision-free output paths.

mod orchestrator;
mod output;

pub use orchestrator::{ConverterEvent, start_conversion};
pub use output::resolve_output_path;
