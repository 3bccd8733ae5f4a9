//! Fetch status and "load more" rows.

use crate::ui::helpers::{position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{LoadMoreInfo, StatusKind, StatusLine};

/// Renders the loading/error line, or clears the row when there is none.
///
/// # Returns
///
/// The next available row position (row + 1)
pub fn render_status(row: usize, status: Option<&StatusLine>, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    let Some(status) = status else {
        print!("{}", " ".repeat(cols));
        return row + 1;
    };

    let color = match status.kind {
        StatusKind::Loading => &theme.colors.info_fg,
        StatusKind::Error => &theme.colors.error_fg,
    };
    let text = truncate(&format!(" {}", status.text), cols);

    print!("{}", Theme::fg(color));
    print!("{text}");
    print!("{}", " ".repeat(cols.saturating_sub(text.chars().count())));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the centered "load more" button at `row`.
pub fn render_load_more(row: usize, load_more: &LoadMoreInfo, theme: &Theme, cols: usize) {
    let label = truncate(&load_more.label, cols);
    let label_len = label.chars().count();
    let padding = (cols.saturating_sub(label_len)) / 2;

    position_cursor(row, 1);
    print!("{}", " ".repeat(padding));
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.search_bar_border));
    print!("{label}");
    print!("{}", Theme::reset());
    print!("{}", " ".repeat(cols.saturating_sub(padding + label_len)));
}
