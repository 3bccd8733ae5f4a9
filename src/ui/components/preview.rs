//! Preview modal renderer.
//!
//! Draws a framed box over the middle of the screen describing the selected
//! image. Terminals cannot show the picture itself, so the modal lists the
//! URLs and `o` hands the full-size one to an external viewer.

use crate::ui::helpers::{fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::PreviewInfo;

/// Widest the modal grows on large terminals.
const MAX_MODAL_WIDTH: usize = 90;

/// Renders the preview modal centered in a `rows` x `cols` screen.
///
/// # Layout
///
/// ```text
/// ┌─ 3 / 24 ──────────────────────────┐
/// │ mountain, lake, reflection        │
/// │                                   │
/// │ Size:    4000x2250                │
/// │ Preview: https://...              │
/// │ Full:    https://...              │
/// │ Page:    https://...              │
/// │                                   │
/// │ o: open full size  ESC: close     │
/// └───────────────────────────────────┘
/// ```
pub fn render_preview(preview: &PreviewInfo, theme: &Theme, rows: usize, cols: usize) {
    let width = cols.saturating_sub(4).min(MAX_MODAL_WIDTH);
    if width < 10 {
        return;
    }
    let inner = width - 2;

    let mut lines = vec![
        preview.title.clone(),
        String::new(),
        format!(
            "Size:    {}",
            preview.dimensions.as_deref().unwrap_or("unknown")
        ),
        format!("Preview: {}", preview.preview_url),
        format!("Full:    {}", preview.full_size_url),
    ];
    if let Some(page_url) = &preview.page_url {
        lines.push(format!("Page:    {page_url}"));
    }
    lines.push(String::new());
    lines.push("h/l: previous/next  o: open full size  ESC: close".to_string());

    let height = lines.len() + 2;
    let top = rows.saturating_sub(height) / 2 + 1;
    let left = (cols.saturating_sub(width)) / 2 + 1;

    let border = Theme::fg(&theme.colors.modal_border);
    let caption = format!(" {} ", preview.position);
    let caption_len = caption.chars().count();

    position_cursor(top, left);
    print!("{border}┌─");
    print!("{}", Theme::bold());
    print!("{caption}");
    print!("{}", Theme::reset());
    print!(
        "{border}{}┐{}",
        "─".repeat(inner.saturating_sub(caption_len + 1)),
        Theme::reset()
    );

    for (offset, line) in lines.iter().enumerate() {
        position_cursor(top + 1 + offset, left);
        print!("{border}│{}", Theme::reset());
        let color = if offset == 0 {
            Theme::fg(&theme.colors.header_fg)
        } else if offset + 1 == lines.len() {
            Theme::fg(&theme.colors.text_dim)
        } else {
            Theme::fg(&theme.colors.text_normal)
        };
        print!("{color}{}{}", fit(&format!(" {line}"), inner), Theme::reset());
        print!("{border}│{}", Theme::reset());
    }

    position_cursor(top + 1 + lines.len(), left);
    print!("{border}└{}┘{}", "─".repeat(inner), Theme::reset());
}
