//! ConverterView - the main application view
//!
//! Holds the current selection, output folder, target format, and the
//! progress/event plumbing for a running job.

mod render;
mod run;
mod selection;

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::Receiver;

use gpui::{Context, ScrollHandle};

use crate::codec::{AudioCodec, EngineCodec};
use crate::conversion::ConverterEvent;
use crate::core::{ConversionResult, ProgressState, TargetFormat, TrackInfo};

pub struct ConverterView {
    /// Files selected for conversion, in selection order
    pub(crate) tracks: Vec<TrackInfo>,
    /// Chosen output directory, if any
    pub(crate) output_dir: Option<PathBuf>,
    /// Target format for the next job
    pub(crate) format: TargetFormat,
    /// Progress shared with the worker thread
    pub(crate) progress: ProgressState,
    /// Event receiver for the currently running job
    pub(crate) event_rx: Option<Receiver<ConverterEvent>>,
    /// Results of the last finished job, for the failure list
    pub(crate) last_results: Vec<ConversionResult>,
    /// Codec service; None when ffmpeg could not be found
    pub(crate) codec: Option<Arc<dyn AudioCodec>>,
    /// Startup error shown when the codec is unavailable
    pub(crate) codec_error: Option<String>,
    /// Status line shown when no job is running
    pub(crate) status_text: String,
    /// Scroll state for the track list
    pub(crate) scroll_handle: ScrollHandle,
}

impl ConverterView {
    pub fn new(_cx: &mut Context<Self>) -> Self {
        let (codec, codec_error) = match EngineCodec::new() {
            Ok(engine) => (Some(Arc::new(engine) as Arc<dyn AudioCodec>), None),
            Err(e) => {
                log::error!("Audio engine unavailable: {}", e);
                (None, Some(e))
            }
        };

        Self {
            tracks: Vec::new(),
            output_dir: None,
            format: TargetFormat::default(),
            progress: ProgressState::new(),
            event_rx: None,
            last_results: Vec::new(),
            codec,
            codec_error,
            status_text: "Ready".to_string(),
            scroll_handle: ScrollHandle::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn new_for_test(codec: Option<Arc<dyn AudioCodec>>) -> Self {
        Self {
            tracks: Vec::new(),
            output_dir: None,
            format: TargetFormat::default(),
            progress: ProgressState::new(),
            event_rx: None,
            last_results: Vec::new(),
            codec,
            codec_error: None,
            status_text: "Ready".to_string(),
            scroll_handle: ScrollHandle::new(),
        }
    }
}
