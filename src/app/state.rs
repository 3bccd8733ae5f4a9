//! Application state management and view model computation.
//!
//! This module defines [`AppState`], the central state container for the plugin,
//! along with methods for grid selection and UI view model generation. The
//! search session itself lives inside the [`SearchController`]; everything here
//! is presentation state layered on top of it.
//!
//! # State Components
//!
//! - **Controller**: The search session and pagination state machine
//! - **Provider**: Builds requests and decodes responses for the controller
//! - **Query Input**: The search bar buffer, submitted on Enter
//! - **Selection**: Cursor position within the accumulated results
//! - **Input Mode**: Controls keybinding interpretation and UI layout
//! - **Toasts**: Recent notifications
//!
//! # View Model Computation
//!
//! The `compute_viewmodel` method transforms state into a renderable UI
//! representation, handling grid layout, windowing around the selection, and
//! responsive layout adjustments based on terminal dimensions.
//!
//! # Example
//!
//! ```rust
//! use zpix::app::AppState;
//! use zpix::provider::PixabayProvider;
//! use zpix::ui::Theme;
//!
//! let state = AppState::new(Box::new(PixabayProvider::default()), Theme::default());
//! let viewmodel = state.compute_viewmodel(24, 80);
//! assert!(viewmodel.empty_state.is_some());
//! ```

use super::modes::InputMode;
use super::notifications::ToastQueue;
use crate::domain::ImageResult;
use crate::provider::ImageSearchProvider;
use crate::search::{FetchStatus, SearchController};
use crate::ui::helpers::truncate;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    EmptyState, FooterInfo, GridCell, GridRow, HeaderInfo, LoadMoreInfo, PreviewInfo,
    SearchBarInfo, StatusKind, StatusLine, ToastInfo, UIViewModel,
};

/// Width of one grid cell in columns, including the gap to the next cell.
pub const CELL_WIDTH: usize = 26;

/// Terminal lines taken by one grid row (title and detail).
const GRID_ROW_HEIGHT: usize = 2;

/// Lines used by everything except the grid: blank, header, border, search box
/// (3), status, load more, border, footer.
const CHROME_ROWS: usize = 10;

/// Central application state container.
///
/// Mutated by the event handler in response to user input and provider
/// responses. View models are computed on-demand from state snapshots.
#[derive(Debug)]
pub struct AppState {
    /// Search session owner. All fetch decisions go through it.
    pub controller: SearchController,

    /// Image search backend.
    pub provider: Box<dyn ImageSearchProvider>,

    /// Text in the search bar.
    ///
    /// Edited by `Char` and `Backspace` in search mode and handed to the
    /// controller on `SubmitSearch`. Kept after submission so the query can be
    /// refined.
    pub query_input: String,

    /// Zero-based index of the selected image within the session items.
    pub selected_index: usize,

    /// Current input handling mode.
    pub input_mode: InputMode,

    /// Grid columns at the last known terminal width.
    ///
    /// Needed by up/down navigation, which moves by one grid row.
    pub grid_columns: usize,

    /// Notifications currently on screen.
    pub toasts: ToastQueue,

    /// Color scheme for UI rendering.
    pub theme: Theme,
}

impl AppState {
    /// Creates a new application state around a provider and theme.
    ///
    /// Starts in search mode since there is nothing to browse yet.
    #[must_use]
    pub fn new(provider: Box<dyn ImageSearchProvider>, theme: Theme) -> Self {
        Self {
            controller: SearchController::new(),
            provider,
            query_input: String::new(),
            selected_index: 0,
            input_mode: InputMode::Search,
            grid_columns: 1,
            toasts: ToastQueue::default(),
            theme,
        }
    }

    /// Accumulated results of the active session.
    #[must_use]
    pub fn images(&self) -> &[ImageResult] {
        &self.controller.session().items
    }

    /// Returns the currently selected image, if any.
    #[must_use]
    pub fn selected_image(&self) -> Option<&ImageResult> {
        self.images().get(self.selected_index)
    }

    /// Records the terminal width so navigation matches the rendered grid.
    pub fn set_viewport(&mut self, cols: usize) {
        self.grid_columns = Self::columns_for(cols);
    }

    const fn columns_for(cols: usize) -> usize {
        let columns = cols / CELL_WIDTH;
        if columns == 0 {
            1
        } else {
            columns
        }
    }

    /// Moves the selection one cell right. Stops at the last image.
    pub fn move_selection_right(&mut self) {
        let len = self.images().len();
        if self.selected_index + 1 < len {
            self.selected_index += 1;
        }
    }

    /// Moves the selection one cell left. Stops at the first image.
    pub fn move_selection_left(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    /// Moves the selection one grid row down, landing on the last image if the
    /// row below is partial.
    pub fn move_selection_down(&mut self) {
        let len = self.images().len();
        if len == 0 {
            return;
        }
        self.selected_index = (self.selected_index + self.grid_columns).min(len - 1);
    }

    /// Moves the selection one grid row up. Stays put on the first row.
    pub fn move_selection_up(&mut self) {
        if self.selected_index >= self.grid_columns {
            self.selected_index -= self.grid_columns;
        }
    }

    /// Keeps the selection inside the current results.
    pub fn clamp_selection(&mut self) {
        let len = self.images().len();
        if len == 0 {
            self.selected_index = 0;
        } else {
            self.selected_index = self.selected_index.min(len - 1);
        }
    }

    /// Computes a renderable UI view model from current state and terminal dimensions.
    ///
    /// # Windowing Algorithm
    ///
    /// 1. Split the items into rows of `cols / CELL_WIDTH` cells
    /// 2. Calculate how many grid rows fit after subtracting UI chrome
    /// 3. Center the window on the row holding the selection
    /// 4. Shift the window back if it would run past the last row
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let _span = tracing::trace_span!("compute_viewmodel", rows, cols).entered();

        let columns = Self::columns_for(cols);
        let images = self.images();

        let grid = if images.is_empty() {
            vec![]
        } else {
            let total_rows = (images.len() + columns - 1) / columns;
            let visible_rows = (rows.saturating_sub(CHROME_ROWS) / GRID_ROW_HEIGHT).max(1);
            let selected_row = self.selected_index / columns;

            let mut first_row = selected_row.saturating_sub(visible_rows / 2);
            let last_row = (first_row + visible_rows).min(total_rows);
            if last_row - first_row < visible_rows && total_rows >= visible_rows {
                first_row = last_row.saturating_sub(visible_rows);
            }

            (first_row..last_row)
                .map(|row| {
                    let start = row * columns;
                    let end = (start + columns).min(images.len());
                    GridRow {
                        cells: (start..end)
                            .map(|index| self.compute_grid_cell(&images[index], index))
                            .collect(),
                    }
                })
                .collect()
        };

        UIViewModel {
            header: self.compute_header(),
            search_bar: self.compute_search_bar(),
            status: self.compute_status(),
            grid,
            load_more: self.compute_load_more(),
            empty_state: self.compute_empty_state(),
            preview: self.compute_preview(),
            toasts: self.compute_toasts(),
            footer: self.compute_footer(),
        }
    }

    fn compute_grid_cell(&self, image: &ImageResult, index: usize) -> GridCell {
        const LABEL_WIDTH: usize = CELL_WIDTH - 2;

        let title = truncate(&format!("{}. {}", index + 1, image.label()), LABEL_WIDTH);
        let detail = image.dimensions().unwrap_or_default();

        GridCell {
            title,
            detail,
            is_selected: index == self.selected_index,
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let session = self.controller.session();

        let title = if session.is_active() {
            match session.total_matches {
                Some(total) => format!(
                    " zpix: \"{}\" ({} of {total}) ",
                    session.query,
                    session.items.len()
                ),
                None => format!(" zpix: \"{}\" ", session.query),
            }
        } else {
            " zpix ".to_string()
        };

        HeaderInfo { title }
    }

    fn compute_search_bar(&self) -> SearchBarInfo {
        SearchBarInfo {
            query: self.query_input.clone(),
            is_focused: self.input_mode.is_typing(),
        }
    }

    fn compute_status(&self) -> Option<StatusLine> {
        let session = self.controller.session();

        match session.status {
            FetchStatus::Loading if session.items.is_empty() => Some(StatusLine {
                kind: StatusKind::Loading,
                text: format!("Searching for \"{}\"...", session.query),
            }),
            FetchStatus::Loading => Some(StatusLine {
                kind: StatusKind::Loading,
                text: "Loading more images...".to_string(),
            }),
            FetchStatus::Errored => Some(StatusLine {
                kind: StatusKind::Error,
                text: "Request failed. Press r to retry.".to_string(),
            }),
            FetchStatus::Idle | FetchStatus::Loaded => None,
        }
    }

    fn compute_load_more(&self) -> Option<LoadMoreInfo> {
        let session = self.controller.session();
        if !session.can_load_more() {
            return None;
        }

        let label = if session.status == FetchStatus::Loading {
            "Loading...".to_string()
        } else {
            "[ m: Load more ]".to_string()
        };
        Some(LoadMoreInfo { label })
    }

    fn compute_empty_state(&self) -> Option<EmptyState> {
        let session = self.controller.session();
        if !session.items.is_empty() {
            return None;
        }

        match session.status {
            FetchStatus::Idle => Some(EmptyState {
                message: "Search Pixabay".to_string(),
                subtitle: "Type a query and press Enter".to_string(),
            }),
            FetchStatus::Loaded => Some(EmptyState {
                message: format!("No results for \"{}\"", session.query),
                subtitle: "Press / to try another query".to_string(),
            }),
            FetchStatus::Loading | FetchStatus::Errored => None,
        }
    }

    fn compute_preview(&self) -> Option<PreviewInfo> {
        if self.input_mode != InputMode::Preview {
            return None;
        }

        let image = self.selected_image()?;
        Some(PreviewInfo {
            title: image.description.clone(),
            position: format!("{} / {}", self.selected_index + 1, self.images().len()),
            dimensions: image.dimensions(),
            preview_url: image.preview_url.clone(),
            full_size_url: image.full_size_url.clone(),
            page_url: image.page_url.clone(),
        })
    }

    fn compute_toasts(&self) -> Vec<ToastInfo> {
        self.toasts
            .iter()
            .map(|toast| ToastInfo {
                kind: toast.notification.kind,
                message: toast.notification.message.clone(),
                timestamp: toast.timestamp(),
            })
            .collect()
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.input_mode {
            InputMode::Search => "Enter: search  ESC: back to results  Type to edit query",
            InputMode::Normal => {
                "h/j/k/l: navigate  Enter: preview  /: search  m: more  r: retry  q: quit"
            }
            InputMode::Preview => "h/l: previous/next  o: open full size  ESC: close",
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}
