//! Composable UI component renderers.
//!
//! Each component is responsible for rendering a specific part of the
//! interface and returns the next free row where that is meaningful.
//!
//! # Components
//!
//! - [`header`]: Title bar with query and counts
//! - [`footer`]: Help text and keybinding hints
//! - [`search`]: Search input box (border, query text)
//! - [`status`]: Loading/error line and the "load more" button
//! - [`grid`]: Result cells in rows
//! - [`empty`]: Empty state message
//! - [`preview`]: Modal describing the selected image
//! - [`toasts`]: Notification toasts

mod empty;
mod footer;
mod grid;
mod header;
mod preview;
mod search;
mod status;
mod toasts;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use empty::render_empty_state;
use footer::render_footer;
use grid::render_grid;
use header::render_header;
use preview::render_preview;
use search::render_search_bar;
use status::{render_load_more, render_status};
use toasts::render_toasts;

/// Renders a horizontal border line at the specified row.
///
/// # Returns
///
/// The next available row position (row + 1)
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the full gallery layout.
///
/// Layout structure:
/// ```text
/// [blank line]
/// [Header]
/// [Border]
/// [Search Bar - 3 lines]
/// [Status line]
/// [Grid rows | Empty state]
/// [Load more]
/// [Border]
/// [Footer]
/// ```
///
/// Toasts are drawn last over the top right of the grid area, and the preview
/// modal over everything else.
pub fn render_layout(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2; // Start at row 2 (skip blank line at row 1)

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    current_row = render_search_bar(current_row, &vm.search_bar, theme, cols);
    current_row = render_status(current_row, vm.status.as_ref(), theme, cols);
    let content_row = current_row;

    if let Some(empty) = &vm.empty_state {
        render_empty_state(current_row, empty, theme, cols);
    } else {
        current_row = render_grid(current_row, &vm.grid, theme, cols);
    }

    let footer_row = rows.saturating_sub(1);
    let border_row = footer_row.saturating_sub(1);

    if let Some(load_more) = &vm.load_more {
        let load_more_row = current_row.min(border_row.saturating_sub(1));
        render_load_more(load_more_row, load_more, theme, cols);
    }

    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);

    render_toasts(content_row, &vm.toasts, theme, cols);

    if let Some(preview) = &vm.preview {
        render_preview(preview, theme, rows, cols);
    }
}
