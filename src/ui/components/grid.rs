//! Image grid component renderer.
//!
//! This module renders the visible window of results as rows of fixed-width
//! cells. Each cell takes two lines: the numbered label and the image
//! dimensions.

use crate::app::state::CELL_WIDTH;
use crate::ui::helpers::{fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::GridRow;

/// Renders all grid rows starting at the specified row.
///
/// # Returns
///
/// The next available row position (row + 2 per grid row)
pub fn render_grid(row: usize, grid: &[GridRow], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for grid_row in grid {
        current_row = render_grid_row(current_row, grid_row, theme, cols);
    }
    current_row
}

/// Renders one row of cells.
///
/// # Layout
///
/// ```text
///  1. mountain               2. lake                   3. forest
///  4000x2250                 1920x1080                 6000x4000
/// ```
///
/// The selected cell is drawn with the selection colors across its full
/// width on both lines. The line is padded to the terminal width so stale
/// output from a previous frame is cleared.
fn render_grid_row(row: usize, grid_row: &GridRow, theme: &Theme, cols: usize) -> usize {
    let used = grid_row.cells.len() * CELL_WIDTH;

    position_cursor(row, 1);
    for cell in &grid_row.cells {
        render_cell_line(&cell.title, cell.is_selected, true, theme);
    }
    print!("{}", " ".repeat(cols.saturating_sub(used)));

    position_cursor(row + 1, 1);
    for cell in &grid_row.cells {
        render_cell_line(&cell.detail, cell.is_selected, false, theme);
    }
    print!("{}", " ".repeat(cols.saturating_sub(used)));

    row + 2
}

/// Prints one line of a cell followed by the one-column gap.
fn render_cell_line(text: &str, is_selected: bool, is_title: bool, theme: &Theme) {
    if is_selected {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
        if is_title {
            print!("{}", Theme::bold());
        }
    } else if is_title {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }

    print!("{}", fit(&format!(" {text}"), CELL_WIDTH - 1));
    print!("{} ", Theme::reset());
}
