//! Typed user feedback produced by the search controller.

use std::fmt;

/// Severity of a [`Notification`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

/// A transient message for the user.
///
/// The controller only produces these values. Presenting them is the job of a
/// [`NotificationSink`](crate::app::NotificationSink).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    #[must_use]
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// First page of a query arrived with results.
    #[must_use]
    pub fn found(total: u64) -> Self {
        Self::new(NotificationKind::Success, format!("found {total} results"))
    }

    /// The provider returned an empty page.
    #[must_use]
    pub fn no_results() -> Self {
        Self::new(NotificationKind::Error, "no results for query")
    }

    /// Every available result has been fetched.
    #[must_use]
    pub fn end_of_results() -> Self {
        Self::new(NotificationKind::Info, "end of results reached")
    }

    /// The provider call failed for any reason.
    #[must_use]
    pub fn request_failed() -> Self {
        Self::new(NotificationKind::Error, "request failed")
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
