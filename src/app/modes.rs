//! Input mode state for the application.
//!
//! The input mode determines which keybindings are active and how input is
//! processed:
//! - **Search**: Typing a query into the search bar (initial mode)
//! - **Normal**: Navigating the gallery grid
//! - **Preview**: A modal showing the selected image's details
//!
//! # Example
//!
//! ```rust
//! use zpix::app::InputMode;
//!
//! let mode = InputMode::Search;
//! assert!(mode.is_typing());
//! ```

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Gallery navigation and command mode.
    ///
    /// Available keybindings: h/j/k/l (navigate), enter (preview), / (search),
    /// m (load more), r (retry), q (quit).
    Normal,

    /// Search bar has focus; characters edit the query, enter submits it.
    Search,

    /// The preview modal is open for the selected image.
    ///
    /// Available keybindings: h/l (previous/next image), o (open full size),
    /// esc/enter (close).
    Preview,
}

impl InputMode {
    /// Whether character keys should be treated as query text.
    #[must_use]
    pub const fn is_typing(self) -> bool {
        matches!(self, Self::Search)
    }
}
