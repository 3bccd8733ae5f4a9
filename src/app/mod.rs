//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the plugin runtime (main.rs) and the search,
//! provider and UI layers. It implements the event-driven architecture that
//! powers the interactive gallery.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └──────── Provider Responses ──────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: Input mode state machine type
//! - [`notifications`]: Notification sink and toast queue
//! - [`state`]: Central application state container and view model computation
//!
//! # Example
//!
//! ```rust
//! use zpix::app::{handle_event, AppState, Event};
//! use zpix::provider::PixabayProvider;
//! use zpix::ui::Theme;
//!
//! let mut state = AppState::new(Box::new(PixabayProvider::default()), Theme::default());
//! let (should_render, actions) = handle_event(&mut state, &Event::Char('c'))?;
//! assert!(should_render);
//! assert!(actions.is_empty());
//! # Ok::<(), zpix::ZpixError>(())
//! ```

pub mod actions;
pub mod handler;
pub mod modes;
pub mod notifications;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::InputMode;
pub use notifications::{NotificationSink, Toast, ToastQueue};
pub use state::AppState;
