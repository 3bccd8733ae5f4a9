//! Event handling and state transition logic.
//!
//! This module implements the core event handler that processes user input,
//! provider responses and timer ticks, translating them into state changes and
//! action sequences.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the plugin runtime
//! 2. [`handle_event`] pattern-matches the event type
//! 3. Search transitions go through the [`SearchController`](crate::search::SearchController),
//!    presentation changes through `AppState` methods
//! 4. Controller effects are turned into actions and returned for execution
//!
//! # Event Types
//!
//! - **Navigation**: `KeyUp`, `KeyDown`, `KeyLeft`, `KeyRight`
//! - **Input**: `Char`, `Backspace`, `SubmitSearch`, `Escape`
//! - **Mode Switching**: `SearchMode`, `ExitSearch`, `OpenPreview`, `ClosePreview`
//! - **Pagination**: `LoadMore`, `Retry`
//! - **Provider**: `FetchCompleted` with the raw HTTP status and body
//! - **System**: `Tick` for toast expiry
//!
//! # Example
//!
//! ```rust
//! use zpix::app::{handle_event, Action, AppState, Event};
//! use zpix::provider::PixabayProvider;
//! use zpix::ui::Theme;
//!
//! let provider = PixabayProvider::new(Some("key".to_string()), None, 12);
//! let mut state = AppState::new(Box::new(provider), Theme::default());
//! for c in "cat".chars() {
//!     handle_event(&mut state, &Event::Char(c))?;
//! }
//! let (_, actions) = handle_event(&mut state, &Event::SubmitSearch)?;
//! assert!(matches!(actions.as_slice(), [Action::WebRequest(_)]));
//! # Ok::<(), zpix::ZpixError>(())
//! ```

use super::modes::InputMode;
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::search::{Effect, FetchTag};
use std::collections::VecDeque;

/// Events triggered by user input, provider responses, or timers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves the selection one grid row down.
    KeyDown,
    /// Moves the selection one grid row up.
    KeyUp,
    /// Moves the selection one cell left (previous image in preview).
    KeyLeft,
    /// Moves the selection one cell right (next image in preview).
    KeyRight,
    /// Closes the floating pane and hides the plugin UI.
    CloseFocus,
    /// Focuses the search bar.
    SearchMode,
    /// Leaves the search bar without submitting.
    ExitSearch,
    /// Submits the search bar contents as the new query.
    SubmitSearch,
    /// Appends a character to the search bar.
    Char(char),
    /// Removes the last character from the search bar.
    Backspace,
    /// Backs out of the current mode (search bar or preview).
    Escape,
    /// Opens the preview modal for the selected image.
    OpenPreview,
    /// Closes the preview modal.
    ClosePreview,
    /// Opens the selected image's full-size URL outside Zellij.
    OpenExternal,
    /// Requests the next page of the active query.
    LoadMore,
    /// Re-issues the page whose fetch failed.
    Retry,

    /// A provider response arrived.
    ///
    /// `tag` was recovered from the web request context; the handler decodes
    /// the body through the provider and hands the outcome to the controller.
    FetchCompleted {
        tag: FetchTag,
        status: u16,
        body: Vec<u8>,
    },

    /// Timer fired after `elapsed_ms`; used to expire toasts.
    Tick { elapsed_ms: u64 },
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Returns
///
/// Whether the UI should re-render, and the actions to execute in order.
///
/// # Errors
///
/// Reserved for state transitions that can fail; every current transition
/// folds its failures into notifications.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?EventName(event)).entered();

    match event {
        Event::KeyDown => Ok((navigate(state, Direction::Down), vec![])),
        Event::KeyUp => Ok((navigate(state, Direction::Up), vec![])),
        Event::KeyLeft => Ok((navigate(state, Direction::Left), vec![])),
        Event::KeyRight => Ok((navigate(state, Direction::Right), vec![])),
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::SearchMode => {
            tracing::debug!("focusing search bar");
            state.input_mode = InputMode::Search;
            Ok((true, vec![]))
        }
        Event::ExitSearch => {
            if state.input_mode != InputMode::Search {
                return Ok((false, vec![]));
            }
            state.input_mode = InputMode::Normal;
            Ok((true, vec![]))
        }
        Event::SubmitSearch => {
            tracing::debug!(input = %state.query_input, "submitting search");
            state.input_mode = InputMode::Normal;

            let epoch = state.controller.session().epoch;
            let effects = state.controller.submit_query(&state.query_input);
            if state.controller.session().epoch != epoch {
                state.selected_index = 0;
            }

            Ok((true, run_effects(state, effects)))
        }
        Event::Char(c) => {
            if !state.input_mode.is_typing() {
                return Ok((false, vec![]));
            }
            state.query_input.push(*c);
            tracing::trace!(query = %state.query_input, char = %c, "search input updated");
            Ok((true, vec![]))
        }
        Event::Backspace => {
            if !state.input_mode.is_typing() {
                return Ok((false, vec![]));
            }
            Ok((state.query_input.pop().is_some(), vec![]))
        }
        Event::Escape => match state.input_mode {
            InputMode::Normal => Ok((false, vec![])),
            InputMode::Search | InputMode::Preview => {
                state.input_mode = InputMode::Normal;
                Ok((true, vec![]))
            }
        },
        Event::OpenPreview => {
            if state.input_mode != InputMode::Normal || state.selected_image().is_none() {
                return Ok((false, vec![]));
            }
            tracing::debug!(index = state.selected_index, "opening preview");
            state.input_mode = InputMode::Preview;
            Ok((true, vec![]))
        }
        Event::ClosePreview => {
            if state.input_mode != InputMode::Preview {
                return Ok((false, vec![]));
            }
            state.input_mode = InputMode::Normal;
            Ok((true, vec![]))
        }
        Event::OpenExternal => {
            let Some(image) = state.selected_image() else {
                return Ok((false, vec![]));
            };
            tracing::debug!(url = %image.full_size_url, "opening full size image");
            Ok((false, vec![Action::OpenUrl(image.full_size_url.clone())]))
        }
        Event::LoadMore => {
            let effects = state.controller.request_next_page();
            if effects.is_empty() {
                tracing::debug!(status = ?state.controller.session().status, "load more ignored");
                return Ok((false, vec![]));
            }
            Ok((true, run_effects(state, effects)))
        }
        Event::Retry => {
            let effects = state.controller.retry();
            if effects.is_empty() {
                return Ok((false, vec![]));
            }
            Ok((true, run_effects(state, effects)))
        }
        Event::FetchCompleted { tag, status, body } => {
            let before = snapshot(state);

            let outcome = state.provider.decode_response(*status, body);
            let effects = state.controller.complete(tag, outcome);
            let actions = run_effects(state, effects);
            state.clamp_selection();

            Ok((snapshot(state) != before, actions))
        }
        Event::Tick { elapsed_ms } => {
            #[allow(clippy::cast_precision_loss)]
            let changed = state.toasts.tick(*elapsed_ms as f64 / 1000.0);
            Ok((changed, vec![]))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Applies a selection move in the modes where the grid has focus.
///
/// In preview mode only left/right are meaningful; they step the preview
/// through the results.
fn navigate(state: &mut AppState, direction: Direction) -> bool {
    let before = state.selected_index;
    match (state.input_mode, direction) {
        (InputMode::Normal | InputMode::Preview, Direction::Left) => state.move_selection_left(),
        (InputMode::Normal | InputMode::Preview, Direction::Right) => state.move_selection_right(),
        (InputMode::Normal, Direction::Up) => state.move_selection_up(),
        (InputMode::Normal, Direction::Down) => state.move_selection_down(),
        (InputMode::Preview, Direction::Up | Direction::Down) | (InputMode::Search, _) => {
            return false;
        }
    }
    state.selected_index != before
}

/// Turns controller effects into runtime actions.
///
/// Fetches are resolved into web requests here. A request that cannot be
/// built is reported back to the controller as a failed fetch, whose own
/// effects are processed in turn.
fn run_effects(state: &mut AppState, effects: Vec<Effect>) -> Vec<Action> {
    let mut pending: VecDeque<Effect> = effects.into();
    let mut actions = Vec::with_capacity(pending.len());

    while let Some(effect) = pending.pop_front() {
        match effect {
            Effect::Notify(notification) => actions.push(Action::Notify(notification)),
            Effect::Fetch(tag) => match state.provider.build_request(&tag) {
                Ok(request) => {
                    tracing::debug!(query = %tag.query, page = tag.page, "issuing fetch");
                    actions.push(Action::WebRequest(request));
                }
                Err(e) => {
                    tracing::debug!(error = %e, "could not build provider request");
                    pending.extend(state.controller.complete(&tag, Err(e)));
                }
            },
        }
    }

    actions
}

/// What a provider response can change on screen.
fn snapshot(state: &AppState) -> (crate::search::FetchStatus, usize, u64) {
    let session = state.controller.session();
    (session.status, session.items.len(), session.epoch)
}

/// Logs events without their payloads (response bodies can be large).
struct EventName<'a>(&'a Event);

impl std::fmt::Debug for EventName<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Event::FetchCompleted { tag, status, body } => f
                .debug_struct("FetchCompleted")
                .field("tag", tag)
                .field("status", status)
                .field("body_len", &body.len())
                .finish(),
            other => std::fmt::Debug::fmt(other, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ImageBatch, ZpixError};
    use crate::provider::{PixabayProvider, WebRequest};
    use crate::search::{FetchStatus, Notification};
    use crate::ui::Theme;
    use std::collections::BTreeMap;

    /// Provider that answers with a canned request and parses bodies as
    /// `"<count>/<total>"`.
    #[derive(Debug)]
    struct FakeProvider;

    impl crate::provider::ImageSearchProvider for FakeProvider {
        fn build_request(&self, tag: &FetchTag) -> Result<WebRequest> {
            Ok(WebRequest {
                url: format!("fake://{}/{}", tag.query, tag.page),
                headers: BTreeMap::new(),
                context: BTreeMap::new(),
            })
        }

        fn decode_response(&self, status: u16, body: &[u8]) -> Result<ImageBatch> {
            if status != 200 {
                return Err(ZpixError::Provider(format!("HTTP {status}")));
            }
            let text = String::from_utf8_lossy(body);
            let (count, total) = text
                .split_once('/')
                .ok_or_else(|| ZpixError::Provider("bad body".to_string()))?;
            let count: usize = count.parse().map_err(|_| ZpixError::Provider("count".into()))?;
            let total: u64 = total.parse().map_err(|_| ZpixError::Provider("total".into()))?;
            let items = (0..count)
                .map(|n| crate::domain::ImageResult::new(format!("p{n}"), format!("f{n}"), "d"))
                .collect();
            Ok(ImageBatch::new(items, total))
        }
    }

    fn fake_state() -> AppState {
        AppState::new(Box::new(FakeProvider), Theme::default())
    }

    fn type_query(state: &mut AppState, query: &str) {
        handle_event(state, &Event::SearchMode).unwrap();
        state.query_input.clear();
        for c in query.chars() {
            handle_event(state, &Event::Char(c)).unwrap();
        }
    }

    fn submit(state: &mut AppState, query: &str) -> (FetchTag, Vec<Action>) {
        type_query(state, query);
        let (_, actions) = handle_event(state, &Event::SubmitSearch).unwrap();
        let tag = state.controller.in_flight().cloned().unwrap();
        (tag, actions)
    }

    fn respond(state: &mut AppState, tag: &FetchTag, body: &str) -> (bool, Vec<Action>) {
        handle_event(
            state,
            &Event::FetchCompleted {
                tag: tag.clone(),
                status: 200,
                body: body.as_bytes().to_vec(),
            },
        )
        .unwrap()
    }

    #[test]
    fn submit_issues_web_request_for_first_page() {
        let mut state = fake_state();
        let (tag, actions) = submit(&mut state, "  Cat ");

        assert_eq!(tag.query, "cat");
        assert_eq!(tag.page, 1);
        assert_eq!(state.input_mode, InputMode::Normal);
        match actions.as_slice() {
            [Action::WebRequest(request)] => assert_eq!(request.url, "fake://cat/1"),
            other => panic!("unexpected actions: {other:?}"),
        }
    }

    #[test]
    fn first_page_notifies_found() {
        let mut state = fake_state();
        let (tag, _) = submit(&mut state, "cat");

        let (render, actions) = respond(&mut state, &tag, "2/50");

        assert!(render);
        assert_eq!(actions, vec![Action::Notify(Notification::found(50))]);
        assert_eq!(state.images().len(), 2);
    }

    #[test]
    fn load_more_then_exhaustion() {
        let mut state = fake_state();
        let (tag, _) = submit(&mut state, "cat");
        respond(&mut state, &tag, "2/3");

        let (_, actions) = handle_event(&mut state, &Event::LoadMore).unwrap();
        assert!(matches!(actions.as_slice(), [Action::WebRequest(r)] if r.url == "fake://cat/2"));

        let next = state.controller.in_flight().cloned().unwrap();
        let (_, actions) = respond(&mut state, &next, "1/3");
        assert_eq!(actions, vec![Action::Notify(Notification::end_of_results())]);

        let (render, actions) = handle_event(&mut state, &Event::LoadMore).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn stale_response_is_ignored() {
        let mut state = fake_state();
        let (cats, _) = submit(&mut state, "cats");
        let (dogs, _) = submit(&mut state, "dogs");

        let (render, actions) = respond(&mut state, &cats, "5/5");
        assert!(!render);
        assert!(actions.is_empty());
        assert!(state.images().is_empty());
        assert_eq!(state.controller.in_flight(), Some(&dogs));
    }

    #[test]
    fn failed_response_then_retry() {
        let mut state = fake_state();
        let (tag, _) = submit(&mut state, "cat");

        let (_, actions) = handle_event(
            &mut state,
            &Event::FetchCompleted {
                tag: tag.clone(),
                status: 429,
                body: b"rate limited".to_vec(),
            },
        )
        .unwrap();
        assert_eq!(actions, vec![Action::Notify(Notification::request_failed())]);
        assert_eq!(state.controller.session().status, FetchStatus::Errored);

        let (_, actions) = handle_event(&mut state, &Event::Retry).unwrap();
        assert!(matches!(actions.as_slice(), [Action::WebRequest(r)] if r.url == "fake://cat/1"));
        assert_eq!(state.controller.session().status, FetchStatus::Loading);
    }

    #[test]
    fn missing_api_key_fails_fetch_immediately() {
        let mut state = AppState::new(Box::new(PixabayProvider::default()), Theme::default());
        type_query(&mut state, "cat");

        let (_, actions) = handle_event(&mut state, &Event::SubmitSearch).unwrap();

        assert_eq!(actions, vec![Action::Notify(Notification::request_failed())]);
        assert_eq!(state.controller.session().status, FetchStatus::Errored);
        assert!(state.controller.in_flight().is_none());
    }

    #[test]
    fn typing_only_edits_query_in_search_mode() {
        let mut state = fake_state();
        handle_event(&mut state, &Event::Char('a')).unwrap();
        handle_event(&mut state, &Event::Backspace).unwrap();
        handle_event(&mut state, &Event::Char('b')).unwrap();
        assert_eq!(state.query_input, "b");

        handle_event(&mut state, &Event::ExitSearch).unwrap();
        let (render, _) = handle_event(&mut state, &Event::Char('c')).unwrap();
        assert!(!render);
        assert_eq!(state.query_input, "b");
    }

    #[test]
    fn preview_opens_on_selection_and_steps_through_results() {
        let mut state = fake_state();
        let (tag, _) = submit(&mut state, "cat");
        respond(&mut state, &tag, "3/3");

        handle_event(&mut state, &Event::OpenPreview).unwrap();
        assert_eq!(state.input_mode, InputMode::Preview);

        handle_event(&mut state, &Event::KeyRight).unwrap();
        assert_eq!(state.selected_index, 1);
        let (render, _) = handle_event(&mut state, &Event::KeyDown).unwrap();
        assert!(!render);

        let (_, actions) = handle_event(&mut state, &Event::OpenExternal).unwrap();
        assert_eq!(actions, vec![Action::OpenUrl("f1".to_string())]);

        handle_event(&mut state, &Event::Escape).unwrap();
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn preview_needs_an_image() {
        let mut state = fake_state();
        state.input_mode = InputMode::Normal;
        let (render, _) = handle_event(&mut state, &Event::OpenPreview).unwrap();
        assert!(!render);
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn new_query_resets_selection() {
        let mut state = fake_state();
        let (tag, _) = submit(&mut state, "cat");
        respond(&mut state, &tag, "4/10");
        handle_event(&mut state, &Event::KeyRight).unwrap();
        assert_eq!(state.selected_index, 1);

        submit(&mut state, "dog");
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn resubmitting_same_query_keeps_results() {
        let mut state = fake_state();
        let (tag, _) = submit(&mut state, "cat");
        respond(&mut state, &tag, "4/10");

        type_query(&mut state, "CAT ");
        let (_, actions) = handle_event(&mut state, &Event::SubmitSearch).unwrap();
        assert!(actions.is_empty());
        assert_eq!(state.images().len(), 4);
    }

    #[test]
    fn tick_renders_only_when_toasts_expire() {
        use crate::app::NotificationSink;

        let mut state = fake_state();
        let (render, _) = handle_event(&mut state, &Event::Tick { elapsed_ms: 1000 }).unwrap();
        assert!(!render);

        state.toasts.emit(Notification::found(1));
        let (render, _) = handle_event(&mut state, &Event::Tick { elapsed_ms: 1000 }).unwrap();
        assert!(!render);
        let (render, _) = handle_event(&mut state, &Event::Tick { elapsed_ms: 60_000 }).unwrap();
        assert!(render);
        assert!(state.toasts.is_empty());
    }

    #[test]
    fn quit_closes_focus() {
        let mut state = fake_state();
        let (_, actions) = handle_event(&mut state, &Event::CloseFocus).unwrap();
        assert_eq!(actions, vec![Action::CloseFocus]);
    }
}
