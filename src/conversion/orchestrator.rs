//! Conversion orchestrator
//!
//! Owns the per-job worker thread: validates the job synchronously, then
//! processes files sequentially, reporting through `ProgressState` and
//! an event channel. A file that fails is recorded and the loop moves on;
//! the batch never aborts early.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::Path;
use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread;

use uuid::Uuid;

use crate::codec::AudioCodec;
use crate::core::{
    ConversionJob, ConversionResult, FileOutcome, ProgressState, TargetFormat, ValidationError,
};

use super::resolve_output_path;

/// Events emitted by a running conversion job
#[derive(Debug, Clone)]
pub enum ConverterEvent {
    /// A file finished, converted or failed
    FileFinished {
        completed: usize,
        total: usize,
        result: ConversionResult,
    },
    /// The job finished; one result per input, in selection order
    JobFinished { results: Vec<ConversionResult> },
}

/// Validate `job` and, if valid, run it on a fresh worker thread
///
/// A validation error is returned synchronously and nothing is spawned.
/// Completion is observed through the event channel (a `JobFinished` is
/// always sent), never by joining the worker. The caller keeps a second
/// job from starting while `progress.is_converting()` is true; the
/// orchestrator itself does not detect concurrent invocation.
pub fn start_conversion(
    job: ConversionJob,
    codec: Arc<dyn AudioCodec>,
    progress: ProgressState,
    events: Sender<ConverterEvent>,
) -> Result<(), ValidationError> {
    job.validate()?;

    let job_id = Uuid::new_v4();
    let total = job.inputs.len();
    progress.reset(total);
    progress.set_status("Converting...");

    log::info!(
        "Job {}: converting {} file(s) to {} in {}",
        job_id,
        total,
        job.format,
        job.output_dir.display()
    );

    thread::spawn(move || {
        let mut results: Vec<ConversionResult> = Vec::with_capacity(total);

        for (index, input) in job.inputs.iter().enumerate() {
            // A panic inside the codec must not take down the batch
            let outcome = catch_unwind(AssertUnwindSafe(|| {
                convert_one(codec.as_ref(), input, &job.output_dir, job.format)
            }))
            .unwrap_or_else(|_| FileOutcome::Failed {
                reason: "Unexpected internal error".to_string(),
            });

            let result = ConversionResult {
                input: input.clone(),
                outcome,
            };

            match &result.outcome {
                FileOutcome::Converted { output } => {
                    log::info!(
                        "Job {}: [{}/{}] {} -> {}",
                        job_id,
                        index + 1,
                        total,
                        input.display(),
                        output.display()
                    );
                }
                FileOutcome::Failed { reason } => {
                    log::error!(
                        "Job {}: [{}/{}] {} failed: {}",
                        job_id,
                        index + 1,
                        total,
                        input.display(),
                        reason
                    );
                }
            }

            progress.file_done(!result.succeeded());
            progress.set_status(result.status_line());
            results.push(result.clone());

            let _ = events.send(ConverterEvent::FileFinished {
                completed: index + 1,
                total,
                result,
            });
        }

        let succeeded = results.iter().filter(|r| r.succeeded()).count();
        if succeeded == results.len() {
            progress.set_status("Conversion Completed");
        } else {
            progress.set_status(format!(
                "Completed with {} error(s)",
                results.len() - succeeded
            ));
        }
        progress.finish();

        log::info!("Job {}: finished, {}/{} converted", job_id, succeeded, total);

        let _ = events.send(ConverterEvent::JobFinished { results });
    });

    Ok(())
}

/// Convert a single file; every failure becomes a `Failed` outcome
fn convert_one(
    codec: &dyn AudioCodec,
    input: &Path,
    output_dir: &Path,
    format: TargetFormat,
) -> FileOutcome {
    let buffer = match codec.decode(input) {
        Ok(b) => b,
        Err(e) => return FileOutcome::Failed { reason: e.to_string() },
    };

    let output = resolve_output_path(output_dir, input, format);

    match codec.encode(&buffer, &output, format) {
        Ok(()) => FileOutcome::Converted { output },
        Err(e) => FileOutcome::Failed { reason: e.to_string() },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{AudioBuffer, CodecError};
    use std::path::PathBuf;
    use std::sync::mpsc;
    use std::time::Duration;
    use tempfile::TempDir;

    /// Scriptable codec: fails decode for listed paths, panics for
    /// others on request, and writes a marker file on encode so the
    /// collision logic sees real outputs.
    struct MockCodec {
        fail_decode: Vec<PathBuf>,
        panic_on: Vec<PathBuf>,
    }

    impl MockCodec {
        fn new() -> Self {
            Self {
                fail_decode: vec![],
                panic_on: vec![],
            }
        }
    }

    impl AudioCodec for MockCodec {
        fn decode(&self, path: &Path) -> Result<AudioBuffer, CodecError> {
            if self.panic_on.iter().any(|p| p == path) {
                panic!("scripted panic");
            }
            if self.fail_decode.iter().any(|p| p == path) {
                return Err(CodecError::CorruptFile("scripted failure".to_string()));
            }
            Ok(AudioBuffer {
                samples: vec![0.0; 16],
                sample_rate: 44100,
                channels: 1,
            })
        }

        fn encode(
            &self,
            _buffer: &AudioBuffer,
            path: &Path,
            _format: TargetFormat,
        ) -> Result<(), CodecError> {
            std::fs::write(path, b"encoded").map_err(|e| CodecError::WriteError(e.to_string()))
        }
    }

    fn run_job(
        inputs: Vec<PathBuf>,
        output_dir: &Path,
        codec: MockCodec,
    ) -> (Vec<ConverterEvent>, ProgressState) {
        let progress = ProgressState::new();
        let (tx, rx) = mpsc::channel();
        let job = ConversionJob {
            inputs,
            output_dir: output_dir.to_path_buf(),
            format: TargetFormat::Mp3,
        };
        start_conversion(job, Arc::new(codec), progress.clone(), tx).unwrap();

        let mut events = Vec::new();
        loop {
            let event = rx
                .recv_timeout(Duration::from_secs(5))
                .expect("job should finish");
            let done = matches!(event, ConverterEvent::JobFinished { .. });
            events.push(event);
            if done {
                break;
            }
        }
        (events, progress)
    }

    #[test]
    fn test_empty_selection_rejected_without_spawning() {
        let dir = TempDir::new().unwrap();
        let progress = ProgressState::new();
        let (tx, rx) = mpsc::channel();
        let job = ConversionJob {
            inputs: vec![],
            output_dir: dir.path().to_path_buf(),
            format: TargetFormat::Mp3,
        };

        let err = start_conversion(job, Arc::new(MockCodec::new()), progress.clone(), tx)
            .unwrap_err();
        assert_eq!(err, ValidationError::NoFilesSelected);
        assert!(!progress.is_converting());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_missing_output_dir_rejected_synchronously() {
        let progress = ProgressState::new();
        let (tx, _rx) = mpsc::channel();
        let job = ConversionJob {
            inputs: vec![PathBuf::from("/tmp/a.wav")],
            output_dir: PathBuf::from("/nonexistent/output"),
            format: TargetFormat::Mp3,
        };

        let err =
            start_conversion(job, Arc::new(MockCodec::new()), progress.clone(), tx).unwrap_err();
        assert_eq!(err, ValidationError::InvalidOutputFolder);
        assert!(!progress.is_converting());
    }

    #[test]
    fn test_progress_events_increase_monotonically() {
        let dir = TempDir::new().unwrap();
        let inputs: Vec<PathBuf> = (0..4).map(|i| PathBuf::from(format!("/m/t{}.wav", i))).collect();

        let (events, progress) = run_job(inputs, dir.path(), MockCodec::new());

        let file_events: Vec<(usize, usize)> = events
            .iter()
            .filter_map(|e| match e {
                ConverterEvent::FileFinished { completed, total, .. } => Some((*completed, *total)),
                _ => None,
            })
            .collect();

        assert_eq!(file_events.len(), 4);
        for (i, (completed, total)) in file_events.iter().enumerate() {
            assert_eq!(*completed, i + 1);
            assert_eq!(*total, 4);
        }
        assert_eq!(progress.progress(), (4, 0, 4));
        assert!(!progress.is_converting());
    }

    #[test]
    fn test_job_finished_sent_once_with_all_results() {
        let dir = TempDir::new().unwrap();
        let inputs: Vec<PathBuf> = (0..3).map(|i| PathBuf::from(format!("/m/t{}.wav", i))).collect();

        let (events, _) = run_job(inputs.clone(), dir.path(), MockCodec::new());

        let finished: Vec<&Vec<ConversionResult>> = events
            .iter()
            .filter_map(|e| match e {
                ConverterEvent::JobFinished { results } => Some(results),
                _ => None,
            })
            .collect();

        assert_eq!(finished.len(), 1);
        let results = finished[0];
        assert_eq!(results.len(), 3);
        // Selection order preserved
        for (result, input) in results.iter().zip(&inputs) {
            assert_eq!(&result.input, input);
        }
    }

    #[test]
    fn test_mid_batch_failure_does_not_halt() {
        let dir = TempDir::new().unwrap();
        let inputs: Vec<PathBuf> = (0..5).map(|i| PathBuf::from(format!("/m/t{}.wav", i))).collect();
        let codec = MockCodec {
            fail_decode: vec![inputs[1].clone()],
            panic_on: vec![],
        };

        let (events, progress) = run_job(inputs, dir.path(), codec);

        let results = events
            .iter()
            .find_map(|e| match e {
                ConverterEvent::JobFinished { results } => Some(results.clone()),
                _ => None,
            })
            .unwrap();

        assert_eq!(results.len(), 5);
        assert!(!results[1].succeeded());
        for (i, result) in results.iter().enumerate() {
            if i != 1 {
                assert!(result.succeeded(), "file {} should have converted", i);
            }
        }
        assert_eq!(progress.progress(), (5, 1, 5));
    }

    #[test]
    fn test_panic_in_codec_recorded_as_failure() {
        let dir = TempDir::new().unwrap();
        let inputs = vec![PathBuf::from("/m/ok.wav"), PathBuf::from("/m/boom.wav")];
        let codec = MockCodec {
            fail_decode: vec![],
            panic_on: vec![inputs[1].clone()],
        };

        let (events, _) = run_job(inputs, dir.path(), codec);

        let results = events
            .iter()
            .find_map(|e| match e {
                ConverterEvent::JobFinished { results } => Some(results.clone()),
                _ => None,
            })
            .unwrap();

        assert!(results[0].succeeded());
        assert!(matches!(
            &results[1].outcome,
            FileOutcome::Failed { reason } if reason == "Unexpected internal error"
        ));
    }

    #[test]
    fn test_collision_gets_minimal_suffix() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("track.mp3"), b"x").unwrap();
        std::fs::write(dir.path().join("track(1).mp3"), b"x").unwrap();

        let (events, _) = run_job(
            vec![PathBuf::from("/m/track.wav")],
            dir.path(),
            MockCodec::new(),
        );

        let results = events
            .iter()
            .find_map(|e| match e {
                ConverterEvent::JobFinished { results } => Some(results.clone()),
                _ => None,
            })
            .unwrap();

        assert_eq!(
            results[0].outcome,
            FileOutcome::Converted {
                output: dir.path().join("track(2).mp3")
            }
        );
        assert!(dir.path().join("track(2).mp3").exists());
    }

    #[test]
    fn test_same_stem_inputs_do_not_overwrite() {
        let dir = TempDir::new().unwrap();
        let inputs = vec![
            PathBuf::from("/a/song.wav"),
            PathBuf::from("/b/song.flac"),
        ];

        let (events, _) = run_job(inputs, dir.path(), MockCodec::new());

        let results = events
            .iter()
            .find_map(|e| match e {
                ConverterEvent::JobFinished { results } => Some(results.clone()),
                _ => None,
            })
            .unwrap();

        assert_eq!(
            results[0].outcome,
            FileOutcome::Converted {
                output: dir.path().join("song.mp3")
            }
        );
        assert_eq!(
            results[1].outcome,
            FileOutcome::Converted {
                output: dir.path().join("song(1).mp3")
            }
        );
    }

    #[test]
    fn test_status_reflects_last_result() {
        let dir = TempDir::new().unwrap();
        let (_, progress) = run_job(
            vec![PathBuf::from("/m/track.wav")],
            dir.path(),
            MockCodec::new(),
        );
        assert_eq!(progress.status(), "Conversion Completed");
    }
}
