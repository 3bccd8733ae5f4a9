//! View model types representing renderable UI state.
//!
//! This module defines immutable view models computed from application state,
//! following the MVVM pattern. View models are optimized for rendering and
//! contain pre-computed display information like the visible grid window,
//! truncated labels and selection state.
//!
//! # Architecture
//!
//! View models are created via `AppState::compute_viewmodel()` and consumed by
//! the renderer. They contain no business logic, only display-ready data.
//!
//! # Example
//!
//! ```rust
//! use zpix::ui::viewmodel::{FooterInfo, GridCell, GridRow, HeaderInfo, SearchBarInfo, UIViewModel};
//!
//! let vm = UIViewModel {
//!     header: HeaderInfo { title: " zpix ".to_string() },
//!     search_bar: SearchBarInfo { query: "cat".to_string(), is_focused: false },
//!     status: None,
//!     grid: vec![GridRow {
//!         cells: vec![GridCell {
//!             title: "1. cat".to_string(),
//!             detail: "640x480".to_string(),
//!             is_selected: true,
//!         }],
//!     }],
//!     load_more: None,
//!     empty_state: None,
//!     preview: None,
//!     toasts: vec![],
//!     footer: FooterInfo { keybindings: "q: quit".to_string() },
//! };
//! assert_eq!(vm.grid.len(), 1);
//! ```

use crate::search::NotificationKind;

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    /// Header information (title, query, counts).
    pub header: HeaderInfo,

    /// Search input box, always shown.
    pub search_bar: SearchBarInfo,

    /// Loading or error line shown under the search bar.
    pub status: Option<StatusLine>,

    /// Visible window of the image grid.
    pub grid: Vec<GridRow>,

    /// "Load more" affordance, present only when more pages can be requested.
    pub load_more: Option<LoadMoreInfo>,

    /// Shown in place of the grid when there is nothing to display.
    pub empty_state: Option<EmptyState>,

    /// Preview modal for the selected image.
    pub preview: Option<PreviewInfo>,

    /// Live toasts, oldest first.
    pub toasts: Vec<ToastInfo>,

    /// Footer information (keybindings, help text).
    pub footer: FooterInfo,
}

/// One line of grid cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridRow {
    pub cells: Vec<GridCell>,
}

/// A single image in the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridCell {
    /// Position and label, truncated to the cell width.
    pub title: String,
    /// Secondary line (dimensions).
    pub detail: String,
    pub is_selected: bool,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Title text to display in the header.
    pub title: String,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding help text (e.g., "/: search  m: load more  q: quit").
    pub keybindings: String,
}

/// Empty state message display information.
///
/// Shown before the first search and when a query returned nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message (e.g., "No results").
    pub message: String,

    /// Secondary explanatory text (e.g., "Press / to search again").
    pub subtitle: String,
}

/// Search bar display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Current contents of the query buffer.
    pub query: String,
    /// Whether keystrokes currently edit the query.
    pub is_focused: bool,
}

/// Kind of status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Loading,
    Error,
}

/// One-line fetch status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub kind: StatusKind,
    pub text: String,
}

/// The "load more" row below the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadMoreInfo {
    pub label: String,
}

/// Contents of the preview modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewInfo {
    /// Image description (tags).
    pub title: String,
    /// "3 / 24" style position within the loaded results.
    pub position: String,
    pub dimensions: Option<String>,
    pub preview_url: String,
    pub full_size_url: String,
    pub page_url: Option<String>,
}

/// A toast line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastInfo {
    pub kind: NotificationKind,
    pub message: String,
    pub timestamp: String,
}
