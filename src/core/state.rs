//! Shared progress state
//!
//! The worker thread writes counters and the status line; the UI reads
//! them on its polling ticks. Everything is behind `Arc` so cloning the
//! state shares it.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Thread-safe state for tracking conversion progress
#[derive(Clone)]
pub struct ProgressState {
    /// Whether a job is currently running
    is_converting: Arc<AtomicBool>,
    /// Number of files finished (converted or failed)
    completed: Arc<AtomicUsize>,
    /// Number of files that failed
    failed: Arc<AtomicUsize>,
    /// Total number of files in the current job
    total: Arc<AtomicUsize>,
    /// Most recent status line
    status: Arc<Mutex<String>>,
}

impl ProgressState {
    pub fn new() -> Self {
        Self {
            is_converting: Arc::new(AtomicBool::new(false)),
            completed: Arc::new(AtomicUsize::new(0)),
            failed: Arc::new(AtomicUsize::new(0)),
            total: Arc::new(AtomicUsize::new(0)),
            status: Arc::new(Mutex::new(String::new())),
        }
    }

    /// Arm the state for a new job of `total` files
    pub fn reset(&self, total: usize) {
        self.is_converting.store(true, Ordering::SeqCst);
        self.completed.store(0, Ordering::SeqCst);
        self.failed.store(0, Ordering::SeqCst);
        self.total.store(total, Ordering::SeqCst);
        self.status.lock().unwrap().clear();
    }

    /// Mark the job done; the trigger becomes available again
    pub fn finish(&self) {
        self.is_converting.store(false, Ordering::SeqCst);
    }

    pub fn is_converting(&self) -> bool {
        self.is_converting.load(Ordering::SeqCst)
    }

    /// Record one finished file
    pub fn file_done(&self, failed: bool) {
        self.completed.fetch_add(1, Ordering::SeqCst);
        if failed {
            self.failed.fetch_add(1, Ordering::SeqCst);
        }
    }

    pub fn set_status(&self, status: impl Into<String>) {
        *self.status.lock().unwrap() = status.into();
    }

    pub fn status(&self) -> String {
        self.status.lock().unwrap().clone()
    }

    pub fn progress(&self) -> (usize, usize, usize) {
        (
            self.completed.load(Ordering::SeqCst),
            self.failed.load(Ordering::SeqCst),
            self.total.load(Ordering::SeqCst),
        )
    }
}

impl Default for ProgressState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle() {
        let state = ProgressState::new();
        assert!(!state.is_converting());
        assert_eq!(state.progress(), (0, 0, 0));
        assert_eq!(state.status(), "");
    }

    #[test]
    fn test_reset_arms_the_state() {
        let state = ProgressState::new();
        state.reset(7);
        assert!(state.is_converting());
        assert_eq!(state.progress(), (0, 0, 7));
    }

    #[test]
    fn test_file_done_counts_completed_and_failed() {
        let state = ProgressState::new();
        state.reset(3);
        state.file_done(false);
        state.file_done(true);
        state.file_done(false);
        assert_eq!(state.progress(), (3, 1, 3));
    }

    #[test]
    fn test_finish_clears_converting() {
        let state = ProgressState::new();
        state.reset(1);
        state.finish();
        assert!(!state.is_converting());
    }

    #[test]
    fn test_reset_clears_previous_run() {
        let state = ProgressState::new();
        state.reset(2);
        state.file_done(true);
        state.set_status("Failed: a.wav: bad");
        state.finish();

        state.reset(5);
        assert_eq!(state.progress(), (0, 0, 5));
        assert_eq!(state.status(), "");
    }

    #[test]
    fn test_clones_share_state() {
        let state1 = ProgressState::new();
        let state2 = state1.clone();
        state1.reset(4);
        state1.file_done(false);
        assert!(state2.is_converting());
        assert_eq!(state2.progress(), (1, 0, 4));
    }

    #[test]
    fn test_status_roundtrip() {
        let state = ProgressState::new();
        state.set_status("Saved as: track.mp3");
        assert_eq!(state.status(), "Saved as: track.mp3");
    }
}
