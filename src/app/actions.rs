//! Actions representing side effects to be executed by the plugin runtime.
//!
//! This module defines the [`Action`] type, which represents imperative commands
//! produced by the event handler after processing user input or provider
//! responses. Actions bridge pure state transformations and effectful
//! operations like issuing web requests, showing toasts, or launching an
//! external viewer.
//!
//! # Architecture
//!
//! The event handler returns a `Vec<Action>` after processing each event, allowing
//! multiple side effects to be queued atomically. The plugin runtime executes
//! these actions in sequence.
//!
//! # Example
//!
//! ```rust
//! use zpix::app::Action;
//! use zpix::search::Notification;
//!
//! let actions = vec![
//!     Action::Notify(Notification::found(500)),
//!     Action::OpenUrl("https://pixabay.com/get/large.jpg".to_string()),
//! ];
//! assert_eq!(actions.len(), 2);
//! ```

use crate::provider::WebRequest;
use crate::search::Notification;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Closes the focused floating pane, hiding the plugin UI.
    CloseFocus,

    /// Issues an HTTP request to the image search provider.
    ///
    /// The response comes back as a `WebRequestResult` event carrying the
    /// request's context map.
    WebRequest(WebRequest),

    /// Hands a notification to the notification sink.
    Notify(Notification),

    /// Opens a URL with the configured external command (full-size preview).
    OpenUrl(String),
}
