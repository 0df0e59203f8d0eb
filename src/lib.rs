//! cinefind: a Zellij plugin for searching The Movie Database.
//!
//! Type a title, get a grid of matching movies, open one for its details.
//! The interesting part is the orchestration: searches and detail lookups are
//! asynchronous HTTP calls made through the Zellij host, replies can arrive in
//! any order, and the screen must always reflect the latest thing the user
//! asked for.

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← keys, web requests, timers
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← orchestrator state
//! │  - Event handling, sequencing, stale-reply discard  │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                                     │
//! ┌───────────────────┐               ┌───────────────────┐
//! │ UI Layer (ui/)    │               │ Catalog (catalog/)│
//! │ - Components      │               │ - TMDB client     │
//! │ - Theming         │               │ - Wire decoding   │
//! └───────────────────┘               └───────────────────┘
//!         │                                     │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain, infrastructure and observability           │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Request lifecycle
//!
//! 1. `Enter` in the search box becomes [`Event::QuerySubmitted`]
//! 2. [`handle_event`] bumps the search sequence, clears the grid and returns
//!    [`Action::Fetch`]
//! 3. main.rs hands the request to the [`catalog::TmdbCatalog`], which issues
//!    a host web request tagged with the sequence number
//! 4. The host's reply is decoded by [`catalog::decode_reply`] into
//!    [`Event::CatalogReply`]; replies for superseded sequences are dropped
//!
//! # Configuration
//!
//! ```kdl
//! plugin location="file:/path/to/cinefind.wasm" {
//!     api_token "eyJhbGciOi..."
//!     language "en-US"
//!     live_search "true"
//!     theme "catppuccin-latte"
//!     trace_level "cinefind=debug"
//! }
//! ```

pub mod app;
pub mod catalog;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod ui;

pub use app::{handle_event, Action, AppState, Event, InputMode};
pub use domain::{CatalogError, CinefindError, Result};
pub use ui::Theme;

use catalog::client::{DEFAULT_API_BASE, DEFAULT_IMAGE_BASE, DEFAULT_LANGUAGE};
use catalog::{Credentials, TmdbSettings};
use std::collections::BTreeMap;

const DEFAULT_LIVE_SEARCH_MIN_CHARS: usize = 3;
const DEFAULT_NOTICE_SECONDS: u64 = 3;
const DEFAULT_TRACE_LEVEL: &str = "info";

/// Plugin configuration parsed from the KDL block Zellij passes to `load`.
///
/// Every key is optional. Unparseable values fall back to their defaults
/// rather than failing the plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// TMDB authentication, from `api_token` (preferred) or `api_key`.
    pub credentials: Credentials,

    pub api_base: String,

    /// Base URL poster paths are appended to.
    pub image_base: String,

    /// `language` parameter sent with every request.
    pub language: String,

    pub include_adult: bool,

    /// Search as the user types.
    pub live_search: bool,

    /// Minimum trimmed input length before live search fires.
    pub live_search_min_chars: usize,

    /// Also show a transient notice when a search finds nothing.
    pub no_results_toast: bool,

    /// Seconds a notice stays in the footer.
    pub notice_seconds: u64,

    /// Built-in theme name. Ignored when `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a TOML theme; `~` refers to the host home directory.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for tracing.
    pub trace_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            credentials: Credentials::Missing,
            api_base: DEFAULT_API_BASE.to_string(),
            image_base: DEFAULT_IMAGE_BASE.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            include_adult: false,
            live_search: false,
            live_search_min_chars: DEFAULT_LIVE_SEARCH_MIN_CHARS,
            no_results_toast: true,
            notice_seconds: DEFAULT_NOTICE_SECONDS,
            theme_name: None,
            theme_file: None,
            trace_level: DEFAULT_TRACE_LEVEL.to_string(),
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use cinefind::catalog::Credentials;
    /// use cinefind::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("api_key".to_string(), "abc123".to_string());
    /// map.insert("live_search".to_string(), "true".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.credentials, Credentials::ApiKey("abc123".to_string()));
    /// assert!(config.live_search);
    /// assert_eq!(config.live_search_min_chars, 3);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        let text = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };
        let flag = |key: &str, default: bool| text(key).and_then(|v| parse_bool(&v)).unwrap_or(default);

        let credentials = match (text("api_token"), text("api_key")) {
            (Some(token), _) => Credentials::BearerToken(token),
            (None, Some(key)) => Credentials::ApiKey(key),
            (None, None) => Credentials::Missing,
        };

        Self {
            credentials,
            api_base: text("api_base").unwrap_or(defaults.api_base),
            image_base: text("image_base").unwrap_or(defaults.image_base),
            language: text("language").unwrap_or(defaults.language),
            include_adult: flag("include_adult", defaults.include_adult),
            live_search: flag("live_search", defaults.live_search),
            live_search_min_chars: text("live_search_min_chars")
                .and_then(|v| v.parse::<usize>().ok())
                .filter(|n| *n > 0)
                .unwrap_or(defaults.live_search_min_chars),
            no_results_toast: flag("no_results_toast", defaults.no_results_toast),
            notice_seconds: text("notice_seconds")
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(defaults.notice_seconds),
            theme_name: text("theme"),
            theme_file: text("theme_file"),
            trace_level: text("trace_level").unwrap_or(defaults.trace_level),
        }
    }

    /// Settings for the TMDB catalog client.
    #[must_use]
    pub fn tmdb_settings(&self) -> TmdbSettings {
        TmdbSettings {
            api_base: self.api_base.clone(),
            language: self.language.clone(),
            include_adult: self.include_adult,
            credentials: self.credentials.clone(),
        }
    }

    /// Loads the configured theme.
    ///
    /// # Errors
    ///
    /// Returns [`CinefindError::Theme`] when the theme file cannot be loaded
    /// or the theme name is not built in.
    pub fn load_theme(&self) -> Result<Theme> {
        if let Some(file) = &self.theme_file {
            return Theme::from_file(infrastructure::expand_tilde(file));
        }

        match &self.theme_name {
            Some(name) => Theme::from_name(name)
                .ok_or_else(|| CinefindError::Theme(format!("unknown built-in theme `{name}`"))),
            None => Ok(Theme::default()),
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// Builds the initial orchestrator state from configuration.
///
/// Theme problems are logged and fall back to the default theme. Missing
/// credentials are logged too; requests will fail with an explanatory banner.
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!("initializing cinefind plugin");

    let theme = config.load_theme().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "failed to load theme, using default");
        Theme::default()
    });

    if config.credentials == Credentials::Missing {
        tracing::warn!("no TMDB credentials configured");
    }

    let mut state = AppState::new(theme);
    state.live_search_min_chars = config.live_search.then_some(config.live_search_min_chars);
    state.no_results_toast = config.no_results_toast;
    state.image_base.clone_from(&config.image_base);
    state
}
