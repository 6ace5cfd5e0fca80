//! Rendering for ConverterView

use gpui::{Context, IntoElement, Render, SharedString, Window, div, prelude::*, relative};

use crate::core::{FileOutcome, TargetFormat, format_duration, format_size};
use crate::ui::Theme;
use crate::ui::components::{Header, StatusBarProps, render_status_bar};

use super::ConverterView;

impl ConverterView {
    fn render_track_list(&self, theme: &Theme, cx: &mut Context<Self>) -> impl IntoElement {
        let mut list = div()
            .id("track-list-scroll")
            .flex()
            .flex_col()
            .gap_1()
            .max_h_64()
            .overflow_y_scroll()
            .track_scroll(&self.scroll_handle);

        if self.tracks.is_empty() {
            list = list.child(
                div()
                    .p_3()
                    .text_sm()
                    .text_color(theme.text_muted)
                    .child("No files selected"),
            );
        }

        for (ix, track) in self.tracks.iter().enumerate() {
            let theme = *theme;
            list = list.child(
                div()
                    .flex()
                    .items_center()
                    .justify_between()
                    .px_3()
                    .py_2()
                    .rounded_md()
                    .bg(theme.bg_card)
                    .hover(|s| s.bg(theme.bg_card_hover))
                    .child(
                        div()
                            .flex()
                            .flex_col()
                            .child(
                                div()
                                    .text_sm()
                                    .text_color(theme.text)
                                    .child(track.file_name()),
                            )
                            .child(
                                div()
                                    .text_xs()
                                    .text_color(theme.text_muted)
                                    .child(track.detail_line()),
                            ),
                    )
                    .child(
                        div()
                            .id(SharedString::from(format!("remove-{}", ix)))
                            .px_2()
                            .text_sm()
                            .text_color(theme.text_muted)
                            .cursor_pointer()
                            .hover(|s| s.text_color(theme.danger))
                            .on_click(cx.listener(move |this, _event, _window, cx| {
                                this.remove_track(ix);
                                cx.notify();
                            }))
                            .child("\u{2715}"),
                    ),
            );
        }

        list
    }

    fn render_selection_card(&self, theme: &Theme, cx: &mut Context<Self>) -> impl IntoElement {
        let theme_copy = *theme;
        let selection_summary = if self.tracks.is_empty() {
            None
        } else {
            Some(format!(
                "{} file(s) \u{b7} {} \u{b7} {}",
                self.tracks.len(),
                format_duration(self.total_duration()),
                format_size(self.total_size())
            ))
        };

        div()
            .flex()
            .flex_col()
            .gap_2()
            .p_4()
            .rounded_lg()
            .border_1()
            .border_color(theme.border)
            .child(
                div()
                    .flex()
                    .items_center()
                    .justify_between()
                    .child(
                        div()
                            .text_sm()
                            .font_weight(gpui::FontWeight::SEMIBOLD)
                            .text_color(theme.text)
                            .child("Selected Files"),
                    )
                    .child(
                        div()
                            .id(SharedString::from("browse-files"))
                            .px_3()
                            .py_1()
                            .rounded_md()
                            .bg(theme.accent)
                            .text_sm()
                            .text_color(gpui::white())
                            .cursor_pointer()
                            .hover(move |s| s.bg(theme_copy.accent_hover))
                            .on_click(cx.listener(|this, _event, _window, cx| {
                                this.browse_files(cx);
                            }))
                            .child("Browse Files"),
                    ),
            )
            .child(self.render_track_list(theme, cx))
            .when_some(selection_summary, |el, summary| {
                el.child(div().text_xs().text_color(theme.text_muted).child(summary))
            })
    }

    fn render_output_card(&self, theme: &Theme, cx: &mut Context<Self>) -> impl IntoElement {
        let theme_copy = *theme;
        let folder_text = self
            .output_dir
            .as_ref()
            .map(|d| d.display().to_string())
            .unwrap_or_else(|| "Not selected".to_string());

        div()
            .flex()
            .items_center()
            .justify_between()
            .gap_2()
            .p_4()
            .rounded_lg()
            .border_1()
            .border_color(theme.border)
            .child(
                div()
                    .flex()
                    .flex_col()
                    .min_w_0()
                    .child(
                        div()
                            .text_sm()
                            .font_weight(gpui::FontWeight::SEMIBOLD)
                            .text_color(theme.text)
                            .child("Output Folder"),
                    )
                    .child(
                        div()
                            .text_xs()
                            .text_color(theme.text_muted)
                            .truncate()
                            .child(folder_text),
                    ),
            )
            .child(
                div()
                    .id(SharedString::from("select-folder"))
                    .px_3()
                    .py_1()
                    .flex_none()
                    .rounded_md()
                    .bg(theme.accent)
                    .text_sm()
                    .text_color(gpui::white())
                    .cursor_pointer()
                    .hover(move |s| s.bg(theme_copy.accent_hover))
                    .on_click(cx.listener(|this, _event, _window, cx| {
                        this.choose_output_folder(cx);
                    }))
                    .child("Select Folder"),
            )
    }

    fn render_format_selector(&self, theme: &Theme, cx: &mut Context<Self>) -> impl IntoElement {
        let mut row = div()
            .flex()
            .items_center()
            .gap_2()
            .child(
                div()
                    .text_sm()
                    .text_color(theme.text)
                    .child("Output Format:"),
            );

        for format in TargetFormat::all() {
            let selected = format == self.format;
            let theme = *theme;
            row = row.child(
                div()
                    .id(SharedString::from(format.label()))
                    .px_3()
                    .py_1()
                    .rounded_md()
                    .text_sm()
                    .when(selected, |el| {
                        el.bg(theme.accent).text_color(gpui::white())
                    })
                    .when(!selected, |el| {
                        el.bg(theme.bg_card)
                            .text_color(theme.text_muted)
                            .cursor_pointer()
                            .hover(move |s| s.bg(theme.bg_card_hover))
                    })
                    .on_click(cx.listener(move |this, _event, _window, cx| {
                        this.set_format(format);
                        cx.notify();
                    }))
                    .child(format.label()),
            );
        }

        row
    }

    fn render_convert_button(&self, theme: &Theme, cx: &mut Context<Self>) -> impl IntoElement {
        let enabled = self.can_convert();
        let theme_copy = *theme;
        let label = if self.progress.is_converting() {
            "Converting..."
        } else {
            "Convert Audio"
        };

        div()
            .flex()
            .justify_center()
            .child(
                div()
                    .id(SharedString::from("convert-button"))
                    .px_6()
                    .py_2()
                    .rounded_md()
                    .bg(if enabled { theme.success } else { theme.border })
                    .text_color(gpui::white())
                    .font_weight(gpui::FontWeight::SEMIBOLD)
                    .when(enabled, |el| {
                        el.cursor_pointer()
                            .hover(move |s| s.bg(theme_copy.success_hover))
                    })
                    .on_click(cx.listener(move |this, _event, window, cx| {
                        if this.can_convert() {
                            this.start_conversion(window, cx);
                        }
                    }))
                    .child(label),
            )
    }

    fn render_progress_bar(&self, theme: &Theme) -> impl IntoElement {
        let (completed, _, total) = self.progress.progress();
        let fraction = if total > 0 {
            completed as f32 / total as f32
        } else {
            0.0
        };

        div()
            .w_full()
            .h_2()
            .rounded_full()
            .bg(theme.bg_card)
            .child(
                div()
                    .h_full()
                    .rounded_full()
                    .bg(theme.accent)
                    .w(relative(fraction)),
            )
    }

    fn render_failures(&self, theme: &Theme) -> impl IntoElement {
        let mut list = div().flex().flex_col().gap_1();

        for result in &self.last_results {
            if let FileOutcome::Failed { .. } = result.outcome {
                list = list.child(
                    div()
                        .text_xs()
                        .text_color(theme.danger)
                        .child(result.status_line()),
                );
            }
        }

        list
    }
}

impl Render for ConverterView {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = Theme::from_appearance(window.appearance());
        let (completed, _, total) = self.progress.progress();
        let is_converting = self.progress.is_converting();
        let show_progress = is_converting || total > 0;
        let has_failures = self
            .last_results
            .iter()
            .any(|r| matches!(r.outcome, FileOutcome::Failed { .. }));

        div()
            .flex()
            .flex_col()
            .size_full()
            .bg(theme.bg)
            .child(Header::render("AudioForge"))
            .child(
                div()
                    .flex()
                    .flex_col()
                    .flex_1()
                    .gap_4()
                    .p_6()
                    .child(self.render_selection_card(&theme, cx))
                    .child(self.render_output_card(&theme, cx))
                    .child(self.render_format_selector(&theme, cx))
                    .child(self.render_convert_button(&theme, cx))
                    .when(show_progress, |el| {
                        el.child(self.render_progress_bar(&theme))
                    })
                    .when(has_failures, |el| el.child(self.render_failures(&theme))),
            )
            .child(render_status_bar(
                StatusBarProps {
                    status: self.status_text.clone(),
                    completed,
                    total,
                    is_converting,
                },
                &theme,
            ))
    }
}
