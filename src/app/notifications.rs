//! Toast presentation of controller notifications.
//!
//! The search controller only produces [`Notification`] values. This module is
//! the receiving end: a [`NotificationSink`] that keeps recent notifications
//! on screen for a few seconds, expired by Zellij timer ticks.

use crate::search::Notification;
use chrono::{DateTime, Utc};
use std::collections::VecDeque;

/// Seconds a toast stays visible.
pub const TOAST_LIFETIME_SECS: f64 = 4.0;

/// Most toasts shown at once; older ones are dropped first.
const MAX_VISIBLE_TOASTS: usize = 3;

/// Receiver of user-facing notifications. Fire and forget.
pub trait NotificationSink {
    fn emit(&mut self, notification: Notification);
}

/// A notification on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub notification: Notification,
    pub emitted_at: DateTime<Utc>,
    remaining_secs: f64,
}

impl Toast {
    /// Wall-clock time the toast was raised, as `HH:MM:SS` (UTC).
    #[must_use]
    pub fn timestamp(&self) -> String {
        self.emitted_at.format("%H:%M:%S").to_string()
    }
}

/// Bounded queue of live toasts, newest last.
#[derive(Debug, Clone, PartialEq)]
pub struct ToastQueue {
    toasts: VecDeque<Toast>,
    lifetime_secs: f64,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(TOAST_LIFETIME_SECS)
    }
}

impl ToastQueue {
    #[must_use]
    pub fn new(lifetime_secs: f64) -> Self {
        Self {
            toasts: VecDeque::with_capacity(MAX_VISIBLE_TOASTS),
            lifetime_secs,
        }
    }

    #[must_use]
    pub const fn lifetime_secs(&self) -> f64 {
        self.lifetime_secs
    }

    /// Ages every toast by `elapsed_secs` and drops the expired ones.
    ///
    /// Returns `true` if anything was removed.
    pub fn tick(&mut self, elapsed_secs: f64) -> bool {
        let before = self.toasts.len();
        for toast in &mut self.toasts {
            toast.remaining_secs -= elapsed_secs;
        }
        self.toasts.retain(|toast| toast.remaining_secs > 0.0);
        self.toasts.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

impl NotificationSink for ToastQueue {
    fn emit(&mut self, notification: Notification) {
        tracing::info!(kind = ?notification.kind, message = %notification.message, "notification");

        if self.toasts.len() == MAX_VISIBLE_TOASTS {
            self.toasts.pop_front();
        }
        self.toasts.push_back(Toast {
            notification,
            emitted_at: Utc::now(),
            remaining_secs: self.lifetime_secs,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toasts_expire_after_lifetime() {
        let mut queue = ToastQueue::new(2.0);
        queue.emit(Notification::found(12));

        assert!(!queue.tick(1.5));
        assert_eq!(queue.len(), 1);
        assert!(queue.tick(1.0));
        assert!(queue.is_empty());
    }

    #[test]
    fn staggered_toasts_expire_independently() {
        let mut queue = ToastQueue::new(2.0);
        queue.emit(Notification::found(3));
        queue.tick(1.0);
        queue.emit(Notification::end_of_results());

        assert!(queue.tick(1.0));
        let remaining: Vec<_> = queue.iter().map(|t| t.notification.clone()).collect();
        assert_eq!(remaining, vec![Notification::end_of_results()]);
    }

    #[test]
    fn oldest_toast_dropped_when_full() {
        let mut queue = ToastQueue::default();
        queue.emit(Notification::found(1));
        queue.emit(Notification::no_results());
        queue.emit(Notification::request_failed());
        queue.emit(Notification::end_of_results());

        let messages: Vec<_> = queue.iter().map(|t| t.notification.message.clone()).collect();
        assert_eq!(
            messages,
            vec!["no results for query", "request failed", "end of results reached"]
        );
    }

    #[test]
    fn timestamp_is_clock_formatted() {
        let mut queue = ToastQueue::default();
        queue.emit(Notification::found(1));
        let stamp = queue.iter().next().unwrap().timestamp();
        assert_eq!(stamp.len(), 8);
        assert_eq!(stamp.matches(':').count(), 2);
    }
}
