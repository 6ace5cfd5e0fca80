//! StatusBar component - bottom status line with progress counts

use gpui::{IntoElement, div, prelude::*};

use crate::ui::Theme;

/// Properties for the status bar
pub struct StatusBarProps {
    pub status: String,
    pub completed: usize,
    pub total: usize,
    pub is_converting: bool,
}

/// Render the status bar
///
/// Displays the status line on the left and, while a job runs, the
/// completed/total count on the right.
pub fn render_status_bar(props: StatusBarProps, theme: &Theme) -> impl IntoElement {
    let StatusBarProps {
        status,
        completed,
        total,
        is_converting,
    } = props;

    div()
        .w_full()
        .px_6()
        .py_2()
        .flex()
        .items_center()
        .justify_between()
        .bg(theme.bg_card)
        .border_t_1()
        .border_color(theme.border)
        .text_sm()
        .text_color(theme.text_muted)
        .child(status)
        .when(is_converting && total > 0, |el| {
            el.child(format!("{} / {}", completed, total))
        })
}
