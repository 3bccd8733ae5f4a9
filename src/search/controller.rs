//! Search and pagination state machine.
//!
//! The [`SearchController`] decides what to fetch, how to merge what comes
//! back, when a query is exhausted, and which notifications the user sees. It
//! performs no I/O: every operation returns the [`Effect`]s the runtime must
//! carry out, and provider responses are fed back through
//! [`SearchController::complete`].
//!
//! # State Machine
//!
//! ```text
//! Idle ──submit──▶ Loading ──ok──▶ Loaded ──next page──▶ Loading
//!                     │                 │
//!                     └──err──▶ Errored └──(exhausted: next page is a no-op)
//!                                  │
//!                                  └──retry──▶ Loading
//! ```
//!
//! A new distinct query resets the session from any state.
//!
//! # Example
//!
//! ```rust
//! use zpix::domain::{ImageBatch, ImageResult};
//! use zpix::search::{Effect, FetchStatus, SearchController};
//!
//! let mut controller = SearchController::new();
//! let effects = controller.submit_query("  Cat ");
//! let Some(Effect::Fetch(tag)) = effects.first().cloned() else { unreachable!() };
//! assert_eq!(tag.query, "cat");
//! assert_eq!(tag.page, 1);
//!
//! let batch = ImageBatch::new(vec![ImageResult::new("p", "f", "cat")], 1);
//! controller.complete(&tag, Ok(batch));
//! assert_eq!(controller.session().status, FetchStatus::Loaded);
//! assert!(controller.session().is_exhausted);
//! ```

use super::notification::Notification;
use super::session::{normalize_query, FetchStatus, SearchSession};
use super::tag::FetchTag;
use crate::domain::{ImageBatch, Result};

/// A side effect requested by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Ask the provider for one page.
    Fetch(FetchTag),
    /// Show feedback to the user.
    Notify(Notification),
}

/// Owns the [`SearchSession`] and every transition on it.
#[derive(Debug, Clone, Default)]
pub struct SearchController {
    session: SearchSession,
    in_flight: Option<FetchTag>,
    failed_page: Option<u32>,
}

impl SearchController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only snapshot of the active session.
    #[must_use]
    pub const fn session(&self) -> &SearchSession {
        &self.session
    }

    /// Tag of the request currently awaited, if any.
    #[must_use]
    pub const fn in_flight(&self) -> Option<&FetchTag> {
        self.in_flight.as_ref()
    }

    /// Starts a new search for `raw`.
    ///
    /// Input is trimmed and lower-cased. Submitting the current query again is
    /// a no-op. Any other query resets the session and requests page 1; an
    /// empty query resets the session to [`FetchStatus::Idle`] without a fetch.
    /// A request still in flight for the previous query is abandoned and its
    /// response will be discarded.
    pub fn submit_query(&mut self, raw: &str) -> Vec<Effect> {
        let query = normalize_query(raw);

        if query == self.session.query {
            tracing::debug!(query = %query, "query unchanged, skipping fetch");
            return vec![];
        }

        let _span = tracing::debug_span!("submit_query", query = %query).entered();

        if let Some(abandoned) = self.in_flight.take() {
            tracing::debug!(
                query = %abandoned.query,
                page = abandoned.page,
                "abandoning in-flight request for previous query"
            );
        }
        self.failed_page = None;
        self.session.reset(query);

        if !self.session.is_active() {
            tracing::debug!("query cleared, session idle");
            return vec![];
        }

        self.request_page(1)
    }

    /// Requests the page after the last merged one.
    ///
    /// Only acts when the session is [`FetchStatus::Loaded`] and not
    /// exhausted, so it is a no-op while loading, after an error, or once every
    /// result has been fetched.
    pub fn request_next_page(&mut self) -> Vec<Effect> {
        if self.session.status != FetchStatus::Loaded
            || self.session.is_exhausted
            || !self.session.is_active()
        {
            tracing::debug!(
                status = ?self.session.status,
                is_exhausted = self.session.is_exhausted,
                "next page not available"
            );
            return vec![];
        }

        self.request_page(self.session.page + 1)
    }

    /// Re-issues the request that failed.
    ///
    /// Only acts in [`FetchStatus::Errored`]; the session's results are left
    /// as they were before the failure.
    pub fn retry(&mut self) -> Vec<Effect> {
        if self.session.status != FetchStatus::Errored {
            return vec![];
        }
        let Some(page) = self.failed_page else {
            return vec![];
        };

        tracing::debug!(query = %self.session.query, page = page, "retrying failed page");
        self.request_page(page)
    }

    fn request_page(&mut self, page: u32) -> Vec<Effect> {
        if let Some(pending) = &self.in_flight {
            tracing::debug!(
                pending_page = pending.page,
                requested_page = page,
                "fetch already in flight, rejecting request"
            );
            return vec![];
        }

        let tag = FetchTag::new(self.session.epoch, self.session.query.clone(), page);
        tracing::debug!(query = %tag.query, page = page, epoch = tag.epoch, "issuing fetch");

        self.session.status = FetchStatus::Loading;
        self.in_flight = Some(tag.clone());

        vec![Effect::Fetch(tag)]
    }

    /// Applies the provider's answer for `tag`.
    ///
    /// Responses that do not match the in-flight request (an earlier query, an
    /// earlier epoch of the same query, or a duplicate delivery) are dropped
    /// without touching the session.
    pub fn complete(&mut self, tag: &FetchTag, outcome: Result<ImageBatch>) -> Vec<Effect> {
        let _span = tracing::debug_span!(
            "complete_fetch",
            query = %tag.query,
            page = tag.page,
            epoch = tag.epoch
        )
        .entered();

        if self.in_flight.as_ref() != Some(tag) {
            tracing::debug!(
                current_epoch = self.session.epoch,
                current_query = %self.session.query,
                "discarding stale response"
            );
            return vec![];
        }
        self.in_flight = None;

        match outcome {
            Ok(batch) => self.apply_batch(tag.page, batch),
            Err(e) => {
                tracing::warn!(error = %e, "image search request failed");
                self.session.status = FetchStatus::Errored;
                self.failed_page = Some(tag.page);
                vec![Effect::Notify(Notification::request_failed())]
            }
        }
    }

    fn apply_batch(&mut self, page: u32, batch: ImageBatch) -> Vec<Effect> {
        self.failed_page = None;

        if batch.items.is_empty() {
            tracing::debug!(page = page, "provider returned an empty page");
            self.session.status = FetchStatus::Loaded;
            return vec![Effect::Notify(Notification::no_results())];
        }

        let received = batch.items.len();
        let reported_total = batch.total_matches;
        let became_exhausted = self.session.merge_batch(page, batch.items, reported_total);

        tracing::debug!(
            page = page,
            received = received,
            accumulated = self.session.items.len(),
            total_matches = ?self.session.total_matches,
            is_exhausted = self.session.is_exhausted,
            "batch merged"
        );

        let mut effects = Vec::new();
        if page == 1 {
            effects.push(Effect::Notify(Notification::found(reported_total)));
        }
        if became_exhausted {
            effects.push(Effect::Notify(Notification::end_of_results()));
        }

        self.session.status = FetchStatus::Loaded;
        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ImageResult, ZpixError};
    use crate::search::NotificationKind;
    use proptest::prelude::*;

    fn image(name: &str) -> ImageResult {
        ImageResult::new(format!("{name}_640.jpg"), format!("{name}_1280.jpg"), name)
    }

    fn images(prefix: &str, count: usize) -> Vec<ImageResult> {
        (0..count).map(|i| image(&format!("{prefix}{i}"))).collect()
    }

    fn fetches(effects: &[Effect]) -> Vec<FetchTag> {
        effects
            .iter()
            .filter_map(|e| match e {
                Effect::Fetch(tag) => Some(tag.clone()),
                Effect::Notify(_) => None,
            })
            .collect()
    }

    fn notifications(effects: &[Effect]) -> Vec<Notification> {
        effects
            .iter()
            .filter_map(|e| match e {
                Effect::Notify(n) => Some(n.clone()),
                Effect::Fetch(_) => None,
            })
            .collect()
    }

    fn single_fetch(effects: &[Effect]) -> FetchTag {
        let tags = fetches(effects);
        assert_eq!(tags.len(), 1, "expected exactly one fetch in {effects:?}");
        tags[0].clone()
    }

    #[test]
    fn submit_normalizes_and_requests_first_page() {
        let mut controller = SearchController::new();
        let tag = single_fetch(&controller.submit_query("  Red CARS  "));

        assert_eq!(tag.query, "red cars");
        assert_eq!(tag.page, 1);
        assert_eq!(controller.session().status, FetchStatus::Loading);
        assert_eq!(controller.in_flight(), Some(&tag));
    }

    #[test]
    fn identical_resubmission_is_a_noop() {
        let mut controller = SearchController::new();
        let first = controller.submit_query("cat");
        let second = controller.submit_query(" CAT ");

        assert_eq!(fetches(&first).len(), 1);
        assert!(second.is_empty());
    }

    #[test]
    fn resubmission_after_load_does_not_refetch() {
        let mut controller = SearchController::new();
        let tag = single_fetch(&controller.submit_query("cat"));
        controller.complete(&tag, Ok(ImageBatch::new(images("a", 2), 50)));

        assert!(controller.submit_query("cat").is_empty());
        assert_eq!(controller.session().items.len(), 2);
    }

    #[test]
    fn first_page_populates_session_and_announces_total() {
        let mut controller = SearchController::new();
        let tag = single_fetch(&controller.submit_query("cat"));
        let batch = vec![image("imgA"), image("imgB")];

        let effects = controller.complete(&tag, Ok(ImageBatch::new(batch.clone(), 50)));

        let session = controller.session();
        assert_eq!(session.items, batch);
        assert_eq!(session.status, FetchStatus::Loaded);
        assert!(!session.is_exhausted);
        assert_eq!(session.total_matches, Some(50));
        assert_eq!(
            notifications(&effects),
            vec![Notification::new(NotificationKind::Success, "found 50 results")]
        );
    }

    #[test]
    fn next_page_appends_without_end_notice() {
        let mut controller = SearchController::new();
        let tag = single_fetch(&controller.submit_query("cat"));
        controller.complete(&tag, Ok(ImageBatch::new(vec![image("imgA"), image("imgB")], 50)));

        let next = single_fetch(&controller.request_next_page());
        assert_eq!(next.page, 2);
        let effects = controller.complete(&next, Ok(ImageBatch::new(vec![image("imgC")], 50)));

        assert!(effects.is_empty());
        let session = controller.session();
        assert_eq!(session.items, vec![image("imgA"), image("imgB"), image("imgC")]);
        assert_eq!(session.page, 2);
        assert!(!session.is_exhausted);
    }

    #[test]
    fn new_query_resets_before_fetching() {
        let mut controller = SearchController::new();
        let tag = single_fetch(&controller.submit_query("cats"));
        controller.complete(&tag, Ok(ImageBatch::new(images("c", 12), 40)));
        let next = single_fetch(&controller.request_next_page());
        controller.complete(&next, Ok(ImageBatch::new(images("d", 12), 40)));
        assert_eq!(controller.session().page, 2);

        let dogs = single_fetch(&controller.submit_query("dogs"));

        let session = controller.session();
        assert!(session.items.is_empty());
        assert_eq!(session.page, 1);
        assert_eq!(session.total_matches, None);
        assert_eq!(dogs.page, 1);
        assert_eq!(dogs.query, "dogs");
    }

    #[test]
    fn empty_query_goes_idle_without_fetch() {
        let mut controller = SearchController::new();
        let tag = single_fetch(&controller.submit_query("cats"));
        controller.complete(&tag, Ok(ImageBatch::new(images("c", 3), 30)));

        let effects = controller.submit_query("   ");

        assert!(effects.is_empty());
        assert_eq!(controller.session().status, FetchStatus::Idle);
        assert!(controller.session().items.is_empty());
        assert!(controller.request_next_page().is_empty());
    }

    #[test]
    fn single_page_result_set_fires_both_notices() {
        let mut controller = SearchController::new();
        let tag = single_fetch(&controller.submit_query("rare"));

        let effects = controller.complete(&tag, Ok(ImageBatch::new(images("r", 3), 3)));

        assert_eq!(
            notifications(&effects),
            vec![Notification::found(3), Notification::end_of_results()]
        );
        assert!(controller.session().is_exhausted);
    }

    #[test]
    fn exhausted_session_never_fetches_again() {
        let mut controller = SearchController::new();
        let tag = single_fetch(&controller.submit_query("rare"));
        controller.complete(&tag, Ok(ImageBatch::new(images("r", 2), 2)));

        assert!(controller.request_next_page().is_empty());
        assert!(controller.request_next_page().is_empty());
        assert!(controller.session().is_exhausted);
        assert!(controller.in_flight().is_none());
    }

    #[test]
    fn empty_batch_leaves_session_untouched() {
        let mut controller = SearchController::new();
        let tag = single_fetch(&controller.submit_query("cat"));
        controller.complete(&tag, Ok(ImageBatch::new(images("a", 2), 50)));
        let before = controller.session().clone();

        let next = single_fetch(&controller.request_next_page());
        let effects = controller.complete(&next, Ok(ImageBatch::new(vec![], 50)));

        let session = controller.session();
        assert_eq!(session.items, before.items);
        assert_eq!(session.page, before.page);
        assert_eq!(session.total_matches, before.total_matches);
        assert_eq!(session.status, FetchStatus::Loaded);
        assert_eq!(notifications(&effects), vec![Notification::no_results()]);

        // The same page can be asked for again.
        let again = single_fetch(&controller.request_next_page());
        assert_eq!(again.page, 2);
    }

    #[test]
    fn query_without_matches_reports_error() {
        let mut controller = SearchController::new();
        let tag = single_fetch(&controller.submit_query("zzznoresults"));

        let effects = controller.complete(&tag, Ok(ImageBatch::new(vec![], 0)));

        let session = controller.session();
        assert!(session.items.is_empty());
        assert_eq!(session.status, FetchStatus::Loaded);
        assert_eq!(session.total_matches, None);
        assert_eq!(
            notifications(&effects),
            vec![Notification::new(NotificationKind::Error, "no results for query")]
        );
    }

    #[test]
    fn provider_failure_marks_errored_without_mutation() {
        let mut controller = SearchController::new();
        let tag = single_fetch(&controller.submit_query("cat"));
        controller.complete(&tag, Ok(ImageBatch::new(images("a", 4), 50)));
        let before = controller.session().clone();

        let next = single_fetch(&controller.request_next_page());
        let effects = controller.complete(&next, Err(ZpixError::Provider("HTTP 500".into())));

        let session = controller.session();
        assert_eq!(session.status, FetchStatus::Errored);
        assert_eq!(session.items, before.items);
        assert_eq!(session.page, before.page);
        assert_eq!(session.total_matches, before.total_matches);
        assert_eq!(notifications(&effects), vec![Notification::request_failed()]);
        assert!(controller.request_next_page().is_empty());
    }

    #[test]
    fn retry_reissues_failed_page() {
        let mut controller = SearchController::new();
        let tag = single_fetch(&controller.submit_query("cat"));
        controller.complete(&tag, Ok(ImageBatch::new(images("a", 4), 50)));
        let next = single_fetch(&controller.request_next_page());
        controller.complete(&next, Err(ZpixError::Provider("timeout".into())));

        let retried = single_fetch(&controller.retry());
        assert_eq!(retried.page, 2);
        assert_eq!(controller.session().status, FetchStatus::Loading);

        controller.complete(&retried, Ok(ImageBatch::new(images("b", 4), 50)));
        assert_eq!(controller.session().items.len(), 8);
        assert!(controller.retry().is_empty());
    }

    #[test]
    fn next_page_rejected_while_loading() {
        let mut controller = SearchController::new();
        single_fetch(&controller.submit_query("cat"));

        assert!(controller.request_next_page().is_empty());
        assert!(controller.retry().is_empty());
    }

    #[test]
    fn stale_response_from_previous_query_is_discarded() {
        let mut controller = SearchController::new();
        let cats = single_fetch(&controller.submit_query("cats"));
        let dogs = single_fetch(&controller.submit_query("dogs"));

        let effects = controller.complete(&cats, Ok(ImageBatch::new(images("cat", 5), 99)));

        assert!(effects.is_empty());
        let session = controller.session();
        assert_eq!(session.query, "dogs");
        assert!(session.items.is_empty());
        assert_eq!(session.status, FetchStatus::Loading);
        assert_eq!(controller.in_flight(), Some(&dogs));

        controller.complete(&dogs, Ok(ImageBatch::new(images("dog", 2), 20)));
        assert_eq!(controller.session().items, images("dog", 2));
    }

    #[test]
    fn stale_response_from_earlier_epoch_of_same_query_is_discarded() {
        let mut controller = SearchController::new();
        let first_cats = single_fetch(&controller.submit_query("cats"));
        single_fetch(&controller.submit_query("dogs"));
        let second_cats = single_fetch(&controller.submit_query("cats"));
        assert_ne!(first_cats, second_cats);

        assert!(controller
            .complete(&first_cats, Ok(ImageBatch::new(images("old", 3), 9)))
            .is_empty());
        assert!(controller.session().items.is_empty());

        controller.complete(&second_cats, Ok(ImageBatch::new(images("new", 3), 9)));
        assert_eq!(controller.session().items, images("new", 3));
    }

    #[test]
    fn stale_failure_does_not_mark_errored() {
        let mut controller = SearchController::new();
        let cats = single_fetch(&controller.submit_query("cats"));
        single_fetch(&controller.submit_query("dogs"));

        let effects = controller.complete(&cats, Err(ZpixError::Provider("boom".into())));

        assert!(effects.is_empty());
        assert_eq!(controller.session().status, FetchStatus::Loading);
    }

    #[test]
    fn duplicate_delivery_is_ignored() {
        let mut controller = SearchController::new();
        let tag = single_fetch(&controller.submit_query("cat"));
        controller.complete(&tag, Ok(ImageBatch::new(images("a", 2), 50)));

        let effects = controller.complete(&tag, Ok(ImageBatch::new(images("a", 2), 50)));

        assert!(effects.is_empty());
        assert_eq!(controller.session().items.len(), 2);
    }

    proptest! {
        #[test]
        fn pages_accumulate_in_arrival_order(sizes in prop::collection::vec(1usize..13, 1..6)) {
            let total: u64 = 10_000;
            let mut controller = SearchController::new();
            let mut expected = Vec::new();
            let mut tag = single_fetch(&controller.submit_query("landscape"));

            for (page, size) in sizes.iter().enumerate() {
                let batch = images(&format!("p{page}-"), *size);
                expected.extend(batch.clone());
                controller.complete(&tag, Ok(ImageBatch::new(batch, total)));
                let next = controller.request_next_page();
                if page + 1 < sizes.len() {
                    tag = single_fetch(&next);
                }
            }

            prop_assert_eq!(&controller.session().items, &expected);
            prop_assert_eq!(controller.session().page as usize, sizes.len());
        }

        #[test]
        fn exhaustion_is_monotonic(total in 1u64..40, page_size in 1usize..13) {
            let mut controller = SearchController::new();
            let mut effects = controller.submit_query("ocean");
            let mut pages = 0;

            while let Some(tag) = fetches(&effects).first().cloned() {
                pages += 1;
                prop_assert!(pages <= 64, "pagination did not terminate");
                controller.complete(&tag, Ok(ImageBatch::new(images("o", page_size), total)));
                effects = controller.request_next_page();
            }

            let session = controller.session();
            prop_assert!(session.is_exhausted);
            prop_assert!(session.items.len() as u64 >= total);
            for _ in 0..3 {
                prop_assert!(controller.request_next_page().is_empty());
                prop_assert!(controller.session().is_exhausted);
            }
        }
    }
}
