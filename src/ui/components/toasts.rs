//! Toast list renderer.

use crate::ui::helpers::{position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ToastInfo;

/// Renders toasts right-aligned, one per line, starting at `row`.
///
/// Each toast reads `[HH:MM:SS] message` in the color of its kind and is drawn
/// over whatever is below it.
pub fn render_toasts(row: usize, toasts: &[ToastInfo], theme: &Theme, cols: usize) {
    for (offset, toast) in toasts.iter().enumerate() {
        let text = truncate(&format!(" [{}] {} ", toast.timestamp, toast.message), cols);
        let len = text.chars().count();

        position_cursor(row + offset, cols.saturating_sub(len) + 1);
        print!("{}", Theme::bold());
        print!("{}", Theme::fg(theme.notification_color(toast.kind)));
        print!("{text}");
        print!("{}", Theme::reset());
    }
}
