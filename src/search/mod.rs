//! Search session and pagination control.
//!
//! This is the core of the plugin: a small state machine that turns user
//! intents (submit a query, load the next page, retry) into provider fetches,
//! merges the batches that come back, and decides which notifications the user
//! sees.
//!
//! # Modules
//!
//! - [`controller`]: The [`SearchController`] state machine and its [`Effect`]s
//! - [`session`]: The [`SearchSession`] snapshot and query normalization
//! - [`notification`]: Typed user feedback values
//! - [`tag`]: Request identity used to drop stale responses

pub mod controller;
pub mod notification;
pub mod session;
pub mod tag;

pub use controller::{Effect, SearchController};
pub use notification::{Notification, NotificationKind};
pub use session::{normalize_query, FetchStatus, SearchSession};
pub use tag::FetchTag;
