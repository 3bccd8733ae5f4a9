//! Search session state.
//!
//! A [`SearchSession`] is everything the plugin knows about the active search:
//! the normalized query, the last merged page, the accumulated results and the
//! fetch status. It is owned by the [`SearchController`](super::SearchController)
//! and only read by everything else.

use crate::domain::ImageResult;

/// Fetch status of the active session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    /// No query has been submitted yet (or the query was cleared).
    Idle,
    /// A provider request is in flight.
    Loading,
    /// The last request completed, with or without results.
    Loaded,
    /// The last request failed.
    Errored,
}

/// State of one search, reset in place whenever the query changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSession {
    /// Trimmed, lower-cased search term. Empty means no active search.
    pub query: String,

    /// Most recent page merged into `items`. Starts at 1 for a new query.
    pub page: u32,

    /// Results from every merged page, in arrival order.
    pub items: Vec<ImageResult>,

    /// Total reported by the first successful fetch of the session.
    pub total_matches: Option<u64>,

    pub status: FetchStatus,

    /// Set once `items.len() >= total_matches`; cleared only by a reset.
    pub is_exhausted: bool,

    /// Incremented on every reset. Fetch tags carry it so that responses
    /// issued for an earlier session can be told apart from current ones,
    /// even when the same query text is searched again.
    pub epoch: u64,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self {
            query: String::new(),
            page: 1,
            items: Vec::new(),
            total_matches: None,
            status: FetchStatus::Idle,
            is_exhausted: false,
            epoch: 0,
        }
    }
}

impl SearchSession {
    /// Resets every per-query field at once and starts a new epoch.
    ///
    /// This is the only way the query changes, so items, page, total and the
    /// exhaustion flag can never drift out of step with it.
    pub fn reset(&mut self, query: String) {
        *self = Self {
            query,
            epoch: self.epoch.wrapping_add(1),
            ..Self::default()
        };
    }

    /// Whether a query has been submitted.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.query.is_empty()
    }

    /// Whether the presentation layer should offer a "load more" affordance.
    ///
    /// Requires at least two accumulated items, not one.
    #[must_use]
    pub fn can_load_more(&self) -> bool {
        self.items.len() >= 2 && !self.is_exhausted
    }

    /// Appends a non-empty batch and records the page it came from.
    ///
    /// The total is only taken from the first batch of the session. Returns
    /// `true` if this batch made the session exhausted.
    pub(crate) fn merge_batch(&mut self, page: u32, items: Vec<ImageResult>, total: u64) -> bool {
        self.items.extend(items);
        let total = *self.total_matches.get_or_insert(total);
        self.page = page;

        let was_exhausted = self.is_exhausted;
        if self.items.len() as u64 >= total {
            self.is_exhausted = true;
        }
        self.is_exhausted && !was_exhausted
    }
}

/// Normalizes raw user input into a session query.
///
/// # Examples
///
/// ```
/// use zpix::search::normalize_query;
///
/// assert_eq!(normalize_query("  Red Cars "), "red cars");
/// assert_eq!(normalize_query("   "), "");
/// ```
#[must_use]
pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}
