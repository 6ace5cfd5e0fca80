//! Conversion job construction and validation

use std::fmt;
use std::path::PathBuf;

use super::TargetFormat;

/// Why a job was rejected before any work started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// The input list was empty
    NoFilesSelected,
    /// The output folder is missing or not a directory
    InvalidOutputFolder,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::NoFilesSelected => write!(f, "Please select audio file(s)."),
            ValidationError::InvalidOutputFolder => {
                write!(f, "Please select a valid output folder.")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// One user-triggered batch conversion
///
/// Constructed fresh for each run and consumed by it. Input order is
/// selection order and is preserved through the results.
#[derive(Debug, Clone)]
pub struct ConversionJob {
    pub inputs: Vec<PathBuf>,
    pub output_dir: PathBuf,
    pub format: TargetFormat,
}

impl ConversionJob {
    /// Check the job can run at all
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.inputs.is_empty() {
            return Err(ValidationError::NoFilesSelected);
        }
        if !self.output_dir.is_dir() {
            return Err(ValidationError::InvalidOutputFolder);
        }
        Ok(())
    }
}

/// What happened to a single input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Converted { output: PathBuf },
    Failed { reason: String },
}

/// Per-file record accumulated over a job run
#[derive(Debug, Clone)]
pub struct ConversionResult {
    pub input: PathBuf,
    pub outcome: FileOutcome,
}

impl ConversionResult {
    pub fn succeeded(&self) -> bool {
        matches!(self.outcome, FileOutcome::Converted { .. })
    }

    /// One-line status for the UI
    pub fn status_line(&self) -> String {
        let input_name = self
            .input
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.input.display().to_string());

        match &self.outcome {
            FileOutcome::Converted { output } => {
                let output_name = output
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| output.display().to_string());
                format!("Saved as: {}", output_name)
            }
            FileOutcome::Failed { reason } => format!("Failed: {}: {}", input_name, reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_validate_rejects_empty_selection() {
        let dir = TempDir::new().unwrap();
        let job = ConversionJob {
            inputs: vec![],
            output_dir: dir.path().to_path_buf(),
            format: TargetFormat::Mp3,
        };
        assert_eq!(job.validate(), Err(ValidationError::NoFilesSelected));
    }

    #[test]
    fn test_validate_rejects_missing_output_dir() {
        let job = ConversionJob {
            inputs: vec![PathBuf::from("/tmp/a.wav")],
            output_dir: PathBuf::from("/nonexistent/output/folder"),
            format: TargetFormat::Mp3,
        };
        assert_eq!(job.validate(), Err(ValidationError::InvalidOutputFolder));
    }

    #[test]
    fn test_validate_rejects_file_as_output_dir() {
        let dir = TempDir::new().unwrap();
        let file_path = dir.path().join("not_a_dir.txt");
        std::fs::write(&file_path, "x").unwrap();

        let job = ConversionJob {
            inputs: vec![PathBuf::from("/tmp/a.wav")],
            output_dir: file_path,
            format: TargetFormat::Mp3,
        };
        assert_eq!(job.validate(), Err(ValidationError::InvalidOutputFolder));
    }

    #[test]
    fn test_validate_empty_selection_wins_over_bad_folder() {
        // Both invalid: the empty selection is reported first
        let job = ConversionJob {
            inputs: vec![],
            output_dir: PathBuf::from("/nonexistent"),
            format: TargetFormat::Mp3,
        };
        assert_eq!(job.validate(), Err(ValidationError::NoFilesSelected));
    }

    #[test]
    fn test_validate_accepts_valid_job() {
        let dir = TempDir::new().unwrap();
        let job = ConversionJob {
            inputs: vec![PathBuf::from("/tmp/a.wav")],
            output_dir: dir.path().to_path_buf(),
            format: TargetFormat::Flac,
        };
        assert!(job.validate().is_ok());
    }

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(
            ValidationError::NoFilesSelected.to_string(),
            "Please select audio file(s)."
        );
        assert_eq!(
            ValidationError::InvalidOutputFolder.to_string(),
            "Please select a valid output folder."
        );
    }

    #[test]
    fn test_status_line_for_converted() {
        let result = ConversionResult {
            input: PathBuf::from("/music/track.wav"),
            outcome: FileOutcome::Converted {
                output: PathBuf::from("/out/track.mp3"),
            },
        };
        assert!(result.succeeded());
        assert_eq!(result.status_line(), "Saved as: track.mp3");
    }

    #[test]
    fn test_status_line_for_failed() {
        let result = ConversionResult {
            input: PathBuf::from("/music/broken.flac"),
            outcome: FileOutcome::Failed {
                reason: "corrupt header".to_string(),
            },
        };
        assert!(!result.succeeded());
        assert_eq!(result.status_line(), "Failed: broken.flac: corrupt header");
    }
}
