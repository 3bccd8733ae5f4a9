//! Top-level rendering coordinator.
//!
//! The renderer follows a two-step process:
//!
//! 1. **View Model Computation**: Transform `AppState` into `UIViewModel`
//! 2. **Component Rendering**: Delegate to specialized component renderers
//!
//! # Example
//!
//! ```rust
//! use zpix::app::AppState;
//! use zpix::provider::PixabayProvider;
//! use zpix::ui::{render, Theme};
//!
//! let state = AppState::new(Box::new(PixabayProvider::default()), Theme::default());
//! render(&state, 24, 80); // Render to stdout
//! ```

use crate::app::AppState;
use crate::ui::components;

/// Renders the plugin UI to stdout.
///
/// Computes the view model from application state and draws every component
/// with ANSI escape sequences via `print!`. Does not clear the screen; every
/// component pads its lines to the full width instead.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);

    components::render_layout(&viewmodel, &state.theme, cols, rows);
}
