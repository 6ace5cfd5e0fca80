//! Job start, validation modals, and event polling

use std::sync::mpsc;
use std::time::Duration;

use gpui::{AppContext, AsyncApp, Context, PromptLevel, Timer, WeakEntity, Window};

use crate::conversion::{ConverterEvent, start_conversion};
use crate::core::ConversionJob;

use super::ConverterView;

impl ConverterView {
    /// Whether the Convert trigger should respond
    pub fn can_convert(&self) -> bool {
        !self.progress.is_converting() && self.codec.is_some()
    }

    /// Start a conversion job from the current selection
    ///
    /// Validation failures show a modal and leave the trigger enabled; a
    /// valid job disables it until the worker reports completion.
    pub fn start_conversion(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        // One job at a time
        if self.progress.is_converting() {
            return;
        }

        let codec = match &self.codec {
            Some(codec) => codec.clone(),
            None => {
                let detail = self
                    .codec_error
                    .clone()
                    .unwrap_or_else(|| "Audio engine unavailable".to_string());
                let _ = window.prompt(
                    PromptLevel::Critical,
                    "Conversion Error",
                    Some(&detail),
                    &["OK"],
                    cx,
                );
                return;
            }
        };

        let job = ConversionJob {
            inputs: self.tracks.iter().map(|t| t.path.clone()).collect(),
            output_dir: self.output_dir.clone().unwrap_or_default(),
            format: self.format,
        };

        let (tx, rx) = mpsc::channel();
        match start_conversion(job, codec, self.progress.clone(), tx) {
            Ok(()) => {
                self.last_results.clear();
                self.event_rx = Some(rx);
                self.status_text = "Converting...".to_string();
                Self::start_event_polling(window, cx);
            }
            Err(e) => {
                log::info!("Conversion rejected: {}", e);
                let _ = window.prompt(
                    PromptLevel::Critical,
                    "Error",
                    Some(&e.to_string()),
                    &["OK"],
                    cx,
                );
            }
        }
        cx.notify();
    }

    /// Poll the event channel until the job finishes
    ///
    /// The completion modal needs the window, which the async task can
    /// only reach through the handle captured here.
    fn start_event_polling(window: &mut Window, cx: &mut Context<Self>) {
        let window_handle = window.window_handle();

        cx.spawn(move |this: WeakEntity<Self>, cx: &mut AsyncApp| {
            let mut async_cx = cx.clone();
            async move {
                let mut summary: Option<String> = None;

                loop {
                    Timer::after(Duration::from_millis(50)).await;

                    let mut finished = false;
                    let update = this.update(&mut async_cx, |this, cx| {
                        let events: Vec<ConverterEvent> = match &this.event_rx {
                            Some(rx) => rx.try_iter().collect(),
                            None => Vec::new(),
                        };

                        for event in events {
                            match event {
                                ConverterEvent::FileFinished { .. } => {
                                    this.status_text = this.progress.status();
                                }
                                ConverterEvent::JobFinished { results } => {
                                    let succeeded =
                                        results.iter().filter(|r| r.succeeded()).count();
                                    summary = Some(format!(
                                        "{} of {} file(s) converted.",
                                        succeeded,
                                        results.len()
                                    ));
                                    this.status_text = this.progress.status();
                                    this.last_results = results;
                                    this.event_rx = None;
                                    finished = true;
                                }
                            }
                        }
                        cx.notify();
                    });

                    if update.is_err() {
                        // View dropped; stop polling
                        break;
                    }
                    if finished {
                        break;
                    }

                    let _ = async_cx.refresh();
                }

                // Completion summary modal
                if let Some(summary) = summary {
                    let _ = async_cx.update_window(window_handle, |_, window, cx| {
                        let _ = window.prompt(
                            PromptLevel::Info,
                            "Conversion Complete",
                            Some(&summary),
                            &["OK"],
                            cx,
                        );
                    });
                }
            }
        })
        .detach();
    }
}
