//! Output path resolution
//!
//! Collision avoidance appends "(N)" before the extension, taking the
//! lowest free N. The existence check and the later write are separate
//! steps, so another writer targeting the same directory can still race
//! us; only one job runs at a time, and that window is accepted rather
//! than closed with an exclusive create.

use std::path::{Path, PathBuf};

use crate::core::TargetFormat;

/// Pick a collision-free output path for `input` in `output_dir`
///
/// The extension always follows the target format, never the input.
pub fn resolve_output_path(output_dir: &Path, input: &Path, format: TargetFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let ext = format.extension();

    let mut candidate = output_dir.join(format!("{}.{}", stem, ext));
    let mut counter = 1u32;
    while candidate.exists() {
        candidate = output_dir.join(format!("{}({}).{}", stem, counter, ext));
        counter += 1;
    }
    candidate
}
