//! Zellij plugin entry point.
//!
//! This is the only place that talks to the host: it requests permissions,
//! maps host events (keys, web replies, timers) onto [`cinefind::Event`]s,
//! and executes the [`Action`]s the orchestrator returns. Everything else
//! lives in the library so it can be tested without a Zellij runtime.

#![allow(clippy::multiple_crate_versions)]

use cinefind::app::Direction;
use cinefind::catalog::{decode_reply, CatalogClient, HttpCall, TmdbCatalog, Transport};
use cinefind::ui::viewmodel::grid_columns;
use cinefind::{handle_event, Action, Config, Event, InputMode};
use std::collections::{BTreeMap, VecDeque};
use zellij_tile::prelude::*;

register_plugin!(State);

/// Sends catalog calls through the host's `web_request`.
#[derive(Debug, Default)]
struct ZellijTransport;

impl Transport for ZellijTransport {
    fn send(&mut self, call: HttpCall) {
        web_request(call.url, HttpVerb::Get, call.headers, Vec::new(), call.context);
    }
}

struct State {
    app: cinefind::AppState,
    catalog: TmdbCatalog<ZellijTransport>,
    notice_seconds: u64,
    /// Notice timers still running; the notice clears when the last fires.
    pending_timers: usize,
}

impl Default for State {
    fn default() -> Self {
        let config = Config::default();
        Self {
            app: cinefind::initialize(&config),
            catalog: TmdbCatalog::new(config.tmdb_settings(), ZellijTransport),
            notice_seconds: config.notice_seconds,
            pending_timers: 0,
        }
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        cinefind::observability::init_tracing(&config);

        let _guard = tracing::debug_span!("plugin_load").entered();

        self.app = cinefind::initialize(&config);
        self.catalog = TmdbCatalog::new(config.tmdb_settings(), ZellijTransport);
        self.notice_seconds = config.notice_seconds;

        tracing::debug!(
            live_search = config.live_search,
            language = %config.language,
            "configuration applied"
        );

        request_permission(&[PermissionType::WebAccess]);
        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::Timer,
            EventType::PermissionRequestResult,
        ]);
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!(
            "plugin_update_event",
            otel.name = %format!("plugin_update::{event_name}"),
            event_type = %event_name
        );
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match decode_reply(status, &body, &context) {
                    Ok(reply) => Event::CatalogReply(reply),
                    Err(e) => {
                        tracing::debug!(error = %e, "ignoring web reply that is not ours");
                        return false;
                    }
                }
            }
            zellij_tile::prelude::Event::Timer(_) => {
                self.pending_timers = self.pending_timers.saturating_sub(1);
                if self.pending_timers > 0 {
                    return false;
                }
                Event::NoticeExpired
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => Event::PermissionsResult {
                granted: matches!(status, PermissionStatus::Granted),
            },
            _ => return false,
        };

        self.process(our_event)
    }

    fn render(&mut self, rows: usize, cols: usize) {
        self.app.set_grid_columns(grid_columns(cols));
        cinefind::ui::render(&self.app, rows, cols);
    }
}

impl State {
    /// Runs an event and every follow-up event its actions produce.
    fn process(&mut self, event: Event) -> bool {
        let mut queue = VecDeque::from([event]);
        let mut should_render = false;

        while let Some(event) = queue.pop_front() {
            match handle_event(&mut self.app, &event) {
                Ok((render, actions)) => {
                    tracing::debug!(action_count = actions.len(), should_render = render, "event handled");
                    should_render |= render;
                    for action in actions {
                        if let Some(follow_up) = self.execute_action(action) {
                            queue.push_back(follow_up);
                        }
                    }
                }
                Err(e) => tracing::debug!(error = %e, "error handling event"),
            }
        }

        should_render
    }

    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => format!("WebRequestResult({status})"),
            zellij_tile::prelude::Event::Timer(_) => "Timer".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
            _ => "Other".to_string(),
        }
    }

    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::trace!(bare_key = ?key.bare_key, "key event");

        if self.app.overlay_open() {
            return match key.bare_key {
                BareKey::Esc | BareKey::Enter | BareKey::Char('q') => Some(Event::OverlayDismissed),
                _ => None,
            };
        }

        if key.bare_key == BareKey::Char('c') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::CloseFocus);
        }

        match self.app.input_mode {
            InputMode::Typing => Self::map_typing_key(key, &self.app.input),
            InputMode::Browsing => Self::map_browsing_key(key),
        }
    }

    fn map_typing_key(key: &KeyWithModifier, input: &str) -> Option<Event> {
        Some(match key.bare_key {
            BareKey::Enter => Event::QuerySubmitted(input.to_string()),
            BareKey::Tab | BareKey::Down => Event::FocusResults,
            BareKey::Esc => Event::ClearInput,
            BareKey::Backspace => Event::Backspace,
            BareKey::Char(c) if key.key_modifiers.is_empty() => Event::Char(c),
            _ => return None,
        })
    }

    fn map_browsing_key(key: &KeyWithModifier) -> Option<Event> {
        Some(match key.bare_key {
            BareKey::Up | BareKey::Char('k') => Event::Move(Direction::Up),
            BareKey::Down | BareKey::Char('j') => Event::Move(Direction::Down),
            BareKey::Left | BareKey::Char('h') => Event::Move(Direction::Left),
            BareKey::Right | BareKey::Char('l') => Event::Move(Direction::Right),
            BareKey::Enter => Event::OpenSelected,
            BareKey::Char('/') | BareKey::Tab | BareKey::Esc => Event::FocusInput,
            BareKey::Char('q') => Event::CloseFocus,
            _ => return None,
        })
    }

    /// Executes one action; a catalog request that cannot be sent comes back
    /// as a failed reply so the orchestrator settles it like any other.
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&mut self, action: Action) -> Option<Event> {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
                None
            }
            Action::Fetch(request) => match self.catalog.dispatch(&request) {
                Ok(()) => None,
                Err(e) => {
                    tracing::debug!(error = %e, "catalog request not sent");
                    Some(Event::CatalogReply(request.fail(e)))
                }
            },
            Action::Notify(notice) => {
                tracing::debug!(kind = ?notice.kind, "scheduling notice expiry");
                self.pending_timers += 1;
                #[allow(clippy::cast_precision_loss)]
                set_timeout(self.notice_seconds as f64);
                None
            }
        }
    }
}
