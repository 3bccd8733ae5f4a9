//! Shared rendering utilities and helpers.
//!
//! Low-level cursor and text-fitting helpers used across the UI components.
//! Widths are counted in characters, not bytes, so tags with accented letters
//! do not break the layout.

/// Positions the cursor at a specific row and column.
///
/// Uses ANSI escape sequence `\u{1b}[{row};{col}H` to move the cursor.
/// Coordinates are 1-indexed (row 1 = first row, col 1 = first column).
///
/// # Example
///
/// ```rust
/// use zpix::ui::helpers::position_cursor;
///
/// position_cursor(5, 1); // Move to start of row 5
/// print!("Content at row 5");
/// ```
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Cuts `text` to at most `max` characters, marking the cut with "...".
///
/// # Example
///
/// ```rust
/// use zpix::ui::helpers::truncate;
///
/// assert_eq!(truncate("mountain, lake", 10), "mountai...");
/// assert_eq!(truncate("lake", 10), "lake");
/// ```
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// Truncates or right-pads `text` to exactly `width` characters.
#[must_use]
pub fn fit(text: &str, width: usize) -> String {
    let fitted = truncate(text, width);
    let len = fitted.chars().count();
    format!("{fitted}{}", " ".repeat(width.saturating_sub(len)))
}
