//! zpix: Pixabay image search for Zellij.
//!
//! A floating-pane plugin that searches Pixabay, shows the hits as a paginated
//! gallery, previews a selected image in a modal and hands its full-size URL
//! to an external opener.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Host calls only
//! └─────────────────────────────────────────────────────┘
//!                        │ Event / Action
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Key and response events                          │
//! │  - Selection, modes, toasts                         │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Search        │   │ Provider      │   │ UI            │
//! │ (search/)     │   │ (provider/)   │   │ (ui/)         │
//! │ - Session     │   │ - Pixabay URL │   │ - Components  │
//! │ - Controller  │   │ - JSON decode │   │ - Theming     │
//! │ - Fetch tags  │   │ - Req context │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain, Infrastructure, Observability              │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! The search controller never performs I/O. It returns
//! [`Effect`](search::Effect)s; the handler turns fetches into
//! [`Action::WebRequest`] and the shim passes them to Zellij's `web_request`.
//! The response comes back as a `WebRequestResult` event carrying the
//! [`FetchTag`](search::FetchTag) in its context, and responses whose tag is no
//! longer in flight are dropped.
//!
//! # Configuration
//!
//! ```kdl
//! floating_panes {
//!     pane {
//!         plugin location="file:/path/to/zpix.wasm" {
//!             api_key "your-pixabay-key"
//!             per_page "24"
//!             open_command "xdg-open"
//!             theme "catppuccin-mocha"
//!             trace_level "info"
//!         }
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use zpix::{handle_event, initialize, Action, Config, Event};
//!
//! let options = BTreeMap::from([("api_key".to_string(), "secret".to_string())]);
//! let mut state = initialize(&Config::from_zellij(&options));
//!
//! for c in "cat".chars() {
//!     handle_event(&mut state, &Event::Char(c))?;
//! }
//! let (_, actions) = handle_event(&mut state, &Event::SubmitSearch)?;
//! assert!(matches!(actions.as_slice(), [Action::WebRequest(_)]));
//! # Ok::<(), zpix::ZpixError>(())
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod provider;
pub mod search;
pub mod ui;

pub use app::{handle_event, Action, AppState, Event, InputMode};
pub use domain::{Result, ZpixError};
pub use ui::Theme;

use provider::pixabay::{DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE};
use provider::PixabayProvider;
use std::collections::BTreeMap;

/// Opener used for [`Action::OpenUrl`] when none is configured.
pub const DEFAULT_OPEN_COMMAND: &str = "xdg-open";

/// Plugin configuration parsed from the KDL plugin block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Pixabay API key. Without it every fetch fails with a config error.
    pub api_key: Option<String>,

    /// Hits per page, clamped to what Pixabay accepts (3..=200).
    pub per_page: u32,

    /// API endpoint; overridable for proxies and tests.
    pub base_url: String,

    /// Program that receives the full-size URL (`xdg-open`, `open`, ...).
    pub open_command: String,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a TOML theme; `~` maps to the sandbox's `/host`.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for tracing. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            per_page: DEFAULT_PAGE_SIZE,
            base_url: DEFAULT_BASE_URL.to_string(),
            open_command: DEFAULT_OPEN_COMMAND.to_string(),
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses the option map Zellij passes to `load`.
    ///
    /// Blank values count as unset, an unparsable `per_page` falls back to the
    /// default and an out-of-range one is clamped.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use zpix::Config;
    ///
    /// let map = BTreeMap::from([
    ///     ("api_key".to_string(), "abc".to_string()),
    ///     ("per_page".to_string(), "500".to_string()),
    /// ]);
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.api_key.as_deref(), Some("abc"));
    /// assert_eq!(config.per_page, 200);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let get = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        let per_page = get("per_page")
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(DEFAULT_PAGE_SIZE);

        Self {
            api_key: get("api_key"),
            per_page: PixabayProvider::new(None, None, per_page).page_size(),
            base_url: get("base_url").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            open_command: get("open_command").unwrap_or_else(|| DEFAULT_OPEN_COMMAND.to_string()),
            theme_name: get("theme"),
            theme_file: get("theme_file").map(|p| infrastructure::expand_tilde(&p)),
            trace_level: get("trace_level"),
        }
    }

    /// Theme from `theme_file`, then `theme`, then the default. Failures fall
    /// through to the default with a warning.
    #[must_use]
    pub fn load_theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            match Theme::from_file(theme_file) {
                Ok(theme) => return theme,
                Err(e) => {
                    tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme file");
                }
            }
        }

        self.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
            Theme::from_name(theme_name).unwrap_or_else(|| {
                tracing::warn!(theme_name = %theme_name, "unknown theme, using default");
                Theme::default()
            })
        })
    }
}

/// Builds the initial [`AppState`]: Pixabay provider, configured theme,
/// search bar focused and no query yet.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(per_page = config.per_page, has_api_key = config.api_key.is_some(), "initializing zpix");

    let provider = PixabayProvider::new(
        config.api_key.clone(),
        Some(config.base_url.clone()),
        config.per_page,
    );

    AppState::new(Box::new(provider), config.load_theme())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::FetchStatus;

    fn options(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn empty_map_gives_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn blank_values_are_unset() {
        let config = Config::from_zellij(&options(&[("api_key", "  "), ("theme", "")]));
        assert_eq!(config.api_key, None);
        assert_eq!(config.theme_name, None);
    }

    #[test]
    fn per_page_is_parsed_and_clamped() {
        assert_eq!(Config::from_zellij(&options(&[("per_page", "30")])).per_page, 30);
        assert_eq!(Config::from_zellij(&options(&[("per_page", "1")])).per_page, 3);
        assert_eq!(
            Config::from_zellij(&options(&[("per_page", "lots")])).per_page,
            DEFAULT_PAGE_SIZE
        );
    }

    #[test]
    fn theme_file_expands_tilde() {
        let config = Config::from_zellij(&options(&[("theme_file", "~/zpix/nord.toml")]));
        assert_eq!(config.theme_file.as_deref(), Some("/host/zpix/nord.toml"));
    }

    #[test]
    fn unreadable_theme_file_falls_back_to_name() {
        let config = Config {
            theme_name: Some("catppuccin-latte".to_string()),
            theme_file: Some("/nonexistent/zpix-theme.toml".to_string()),
            ..Config::default()
        };
        let latte = Theme::from_name("catppuccin-latte").unwrap();
        assert_eq!(config.load_theme().colors.error_fg, latte.colors.error_fg);
    }

    #[test]
    fn initialize_starts_idle_in_search_mode() {
        let state = initialize(&Config::default());
        assert_eq!(state.input_mode, InputMode::Search);
        assert_eq!(state.controller.session().status, FetchStatus::Idle);
        assert!(state.images().is_empty());
    }
}
