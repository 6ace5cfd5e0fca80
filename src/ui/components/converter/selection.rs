//! Selection handling: file picker, output folder picker, format choice

use std::path::PathBuf;

use gpui::{AppContext, AsyncApp, Context, PathPromptOptions, WeakEntity};

use crate::core::{TargetFormat, is_audio_file, scan_selected_file};

use super::ConverterView;

impl ConverterView {
    /// Open the multi-select file picker and append the chosen files
    pub fn browse_files(&mut self, cx: &mut Context<Self>) {
        if self.progress.is_converting() {
            return;
        }

        let options = PathPromptOptions {
            files: true,
            directories: false,
            multiple: true,
            prompt: None,
        };
        let receiver = cx.prompt_for_paths(options);

        cx.spawn(|this: WeakEntity<Self>, cx: &mut AsyncApp| {
            let mut async_cx = cx.clone();
            async move {
                if let Ok(Ok(Some(paths))) = receiver.await {
                    let _ = this.update(&mut async_cx, |this, cx| {
                        this.add_files(&paths);
                        cx.notify();
                    });
                }
            }
        })
        .detach();
    }

    /// Append files to the selection, skipping non-audio paths and duplicates
    pub fn add_files(&mut self, paths: &[PathBuf]) {
        for path in paths {
            if !is_audio_file(path) {
                log::debug!("Skipping non-audio file: {}", path.display());
                continue;
            }
            if self.tracks.iter().any(|t| t.path == *path) {
                continue;
            }
            match scan_selected_file(path) {
                Ok(info) => self.tracks.push(info),
                Err(e) => log::error!("Failed to scan {}: {}", path.display(), e),
            }
        }
        self.status_text = format!("{} file(s) selected.", self.tracks.len());
    }

    /// Open the directory picker for the output folder
    pub fn choose_output_folder(&mut self, cx: &mut Context<Self>) {
        if self.progress.is_converting() {
            return;
        }

        let options = PathPromptOptions {
            files: false,
            directories: true,
            multiple: false,
            prompt: None,
        };
        let receiver = cx.prompt_for_paths(options);

        cx.spawn(|this: WeakEntity<Self>, cx: &mut AsyncApp| {
            let mut async_cx = cx.clone();
            async move {
                if let Ok(Ok(Some(paths))) = receiver.await
                    && let Some(dir) = paths.first()
                {
                    let dir = dir.clone();
                    let _ = this.update(&mut async_cx, |this, cx| {
                        log::info!("Output folder: {}", dir.display());
                        this.output_dir = Some(dir);
                        this.status_text = "Output folder selected.".to_string();
                        cx.notify();
                    });
                }
            }
        })
        .detach();
    }

    /// Remove a track by index
    pub fn remove_track(&mut self, index: usize) {
        if self.progress.is_converting() {
            return;
        }
        if index < self.tracks.len() {
            self.tracks.remove(index);
            self.status_text = format!("{} file(s) selected.", self.tracks.len());
        }
    }

    /// Change the target format for the next job
    pub fn set_format(&mut self, format: TargetFormat) {
        if self.progress.is_converting() {
            return;
        }
        self.format = format;
    }

    /// Total size of the selection in bytes
    pub fn total_size(&self) -> u64 {
        self.tracks.iter().map(|t| t.size).sum()
    }

    /// Total known duration of the selection in seconds
    pub fn total_duration(&self) -> f64 {
        self.tracks.iter().filter_map(|t| t.duration).sum()
    }
}
