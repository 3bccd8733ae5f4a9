//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the zpix library and the Zellij plugin
//! runtime. Every host call (`web_request`, `run_command`, `set_timeout`,
//! `hide_self`) is made here; everything else lives in the library.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Subscribe**: Key, `WebRequestResult`, `Timer`, `RunCommandResult`,
//!    `PermissionRequestResult`
//! 3. **Update**: Map Zellij events to library events, execute returned actions
//! 4. **Render**: Size the grid to the pane, then draw the view model
//!
//! # Event Mapping
//!
//! - `Key` → navigation, search input and paging events (see below)
//! - `WebRequestResult` → `Event::FetchCompleted` when the context carries a
//!   zpix fetch tag
//! - `Timer` → `Event::Tick` to age toasts
//!
//! # Keybindings
//!
//! Search bar:
//! - any character: type
//! - `Backspace`: delete
//! - `Enter`: submit query
//! - `Esc`: leave the search bar
//!
//! Gallery:
//! - `h`/`j`/`k`/`l`, arrows: move selection
//! - `Enter`: preview selected image
//! - `/`: focus search bar
//! - `m`: load more
//! - `r`: retry a failed page
//! - `o`: open full-size image
//! - `q`: close plugin
//!
//! Preview:
//! - `h`/`l`, `Left`/`Right`: previous / next image
//! - `o`: open full-size image
//! - `Esc`, `Enter`, `q`: close preview

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use zpix::app::NotificationSink;
use zpix::provider::RequestContext;
use zpix::{handle_event, Action, Config, Event, InputMode};

register_plugin!(State);

/// Seconds between toast expiry ticks while toasts are on screen.
const TOAST_TICK_SECS: f64 = 0.5;

/// Context key marking `run_command` calls made to open an image.
const OPEN_CONTEXT_KEY: &str = "zpix-open";

/// Plugin state wrapper.
struct State {
    /// Core application state from library layer.
    app: zpix::AppState,

    /// Program that receives full-size image URLs.
    open_command: String,

    /// Whether a toast tick timer is pending.
    tick_armed: bool,
}

impl Default for State {
    fn default() -> Self {
        let default_config = Config::default();
        Self {
            app: zpix::initialize(&default_config),
            open_command: default_config.open_command,
            tick_armed: false,
        }
    }
}

impl ZellijPlugin for State {
    /// Parses configuration, initializes state, requests permissions and
    /// subscribes to events.
    ///
    /// # Permissions
    ///
    /// - `WebAccess`: Pixabay API requests
    /// - `RunCommands`: open full-size images with the configured opener
    /// - `ReadApplicationState`: required for `hide_self`
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        zpix::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(
            per_page = config.per_page,
            theme = ?config.theme_name,
            has_api_key = config.api_key.is_some(),
            "parsed configuration"
        );
        if config.api_key.is_none() {
            tracing::warn!("no api_key configured; searches will fail");
        }

        self.app = zpix::initialize(&config);
        self.open_command = config.open_command;

        request_permission(&[
            PermissionType::WebAccess,
            PermissionType::RunCommands,
            PermissionType::ReadApplicationState,
        ]);

        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::Timer,
            EventType::RunCommandResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete");
    }

    /// Translates the Zellij event, delegates to `handle_event` and executes
    /// the resulting actions. Returns `true` if the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", otel.name = %format!("plugin_update::{event_name}"), event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match Self::map_web_result_event(status, body, &context) {
                    Some((event, request)) => {
                        // Parent the handling span to the span that issued the request.
                        let _otel_guard = request
                            .trace_context
                            .as_ref()
                            .and_then(zpix::provider::TraceContext::attach);
                        let response_span = tracing::debug_span!(
                            "fetch_response",
                            query = %request.tag.query,
                            page = request.tag.page,
                            status
                        );
                        let _response_guard = response_span.entered();
                        return self.dispatch(&event);
                    }
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::Timer(elapsed) => {
                self.tick_armed = false;
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let elapsed_ms = (elapsed * 1000.0).round().max(0.0) as u64;
                Event::Tick { elapsed_ms }
            }
            zellij_tile::prelude::Event::RunCommandResult(exit_code, _stdout, stderr, context) => {
                Self::handle_command_result(exit_code, &stderr, &context);
                return false;
            }
            zellij_tile::prelude::Event::PermissionRequestResult(permissions) => {
                match permissions {
                    PermissionStatus::Granted => tracing::debug!("permissions granted"),
                    PermissionStatus::Denied => {
                        tracing::warn!("permissions denied - searches and opening images will fail");
                    }
                }
                return false;
            }
            _ => return false,
        };

        self.dispatch(&our_event)
    }

    fn render(&mut self, rows: usize, cols: usize) {
        self.app.set_viewport(cols);
        zpix::ui::render(&self.app, rows, cols);
    }
}

impl State {
    /// Runs one library event and executes its actions.
    fn dispatch(&mut self, event: &Event) -> bool {
        match handle_event(&mut self.app, event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                let mut toasts_changed = false;
                for action in actions {
                    toasts_changed |= self.execute_action(action);
                }
                self.arm_tick();
                should_render || toasts_changed
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    /// Keeps a tick pending while toasts are visible.
    fn arm_tick(&mut self) {
        if !self.tick_armed && !self.app.toasts.is_empty() {
            set_timeout(TOAST_TICK_SECS);
            self.tick_armed = true;
        }
    }

    /// Gets a string name for a Zellij event for logging purposes.
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
            zellij_tile::prelude::Event::RunCommandResult(..) => "RunCommandResult".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events for the current mode.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::trace!(bare_key = ?key.bare_key, mode = ?self.app.input_mode, "key event");

        Some(match self.app.input_mode {
            InputMode::Search => match key.bare_key {
                BareKey::Enter => Event::SubmitSearch,
                BareKey::Esc => Event::ExitSearch,
                BareKey::Backspace => Event::Backspace,
                BareKey::Char(c) => Event::Char(c),
                _ => return None,
            },
            InputMode::Normal => match key.bare_key {
                BareKey::Down | BareKey::Char('j') => Event::KeyDown,
                BareKey::Up | BareKey::Char('k') => Event::KeyUp,
                BareKey::Left | BareKey::Char('h') => Event::KeyLeft,
                BareKey::Right | BareKey::Char('l') => Event::KeyRight,
                BareKey::Enter => Event::OpenPreview,
                BareKey::Char('/') => Event::SearchMode,
                BareKey::Char('m') => Event::LoadMore,
                BareKey::Char('r') => Event::Retry,
                BareKey::Char('o') => Event::OpenExternal,
                BareKey::Char('q') => Event::CloseFocus,
                BareKey::Esc => Event::Escape,
                _ => return None,
            },
            InputMode::Preview => match key.bare_key {
                BareKey::Left | BareKey::Char('h') => Event::KeyLeft,
                BareKey::Right | BareKey::Char('l') => Event::KeyRight,
                BareKey::Char('o') => Event::OpenExternal,
                BareKey::Esc | BareKey::Enter | BareKey::Char('q') => Event::ClosePreview,
                _ => return None,
            },
        })
    }

    /// Maps a web request result to `FetchCompleted`, ignoring responses to
    /// requests this plugin did not issue.
    fn map_web_result_event(
        status: u16,
        body: Vec<u8>,
        context: &BTreeMap<String, String>,
    ) -> Option<(Event, RequestContext)> {
        let Some(request) = RequestContext::from_map(context) else {
            tracing::debug!(status, "ignoring web request result without zpix context");
            return None;
        };

        tracing::debug!(status, body_len = body.len(), page = request.tag.page, "web request result");
        let event = Event::FetchCompleted {
            tag: request.tag.clone(),
            status,
            body,
        };
        Some((event, request))
    }

    /// Logs the outcome of an opener invocation.
    fn handle_command_result(
        exit_code: Option<i32>,
        stderr: &[u8],
        context: &BTreeMap<String, String>,
    ) {
        let Some(url) = context.get(OPEN_CONTEXT_KEY) else {
            return;
        };
        if exit_code == Some(0) {
            tracing::debug!(url = %url, "opened image");
        } else {
            tracing::warn!(
                url = %url,
                exit_code = ?exit_code,
                stderr = %String::from_utf8_lossy(stderr),
                "open command failed"
            );
        }
    }

    /// Executes an action returned from event handling.
    ///
    /// Returns `true` if the toast list changed.
    #[tracing::instrument(level = "debug", skip_all)]
    fn execute_action(&mut self, action: Action) -> bool {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
                false
            }
            Action::WebRequest(request) => {
                tracing::debug!(url = %redact_key(&request.url), "issuing web request");
                web_request(
                    request.url,
                    HttpVerb::Get,
                    request.headers,
                    vec![],
                    request.context,
                );
                false
            }
            Action::Notify(notification) => {
                self.app.toasts.emit(notification);
                true
            }
            Action::OpenUrl(url) => {
                tracing::debug!(command = %self.open_command, url = %url, "opening url");
                let context = BTreeMap::from([(OPEN_CONTEXT_KEY.to_string(), url.clone())]);
                run_command(&[self.open_command.as_str(), url.as_str()], context);
                false
            }
        }
    }
}

/// Hides the `key` query parameter so API keys never reach the trace file.
fn redact_key(url: &str) -> String {
    let Some((base, query)) = url.split_once('?') else {
        return url.to_string();
    };
    let params: Vec<&str> = query
        .split('&')
        .map(|param| if param.starts_with("key=") { "key=***" } else { param })
        .collect();
    format!("{base}?{}", params.join("&"))
}
