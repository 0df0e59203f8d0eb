//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only place [`AppState`] is mutated. It follows a
//! unidirectional data flow:
//! 1. Events arrive from key input, the display surface or catalog replies
//! 2. `handle_event` pattern-matches the event
//! 3. State changes through `AppState` methods
//! 4. Side effects are returned as [`Action`]s for the plugin runtime
//!
//! # Event Types
//!
//! - **Display entry points**: `QuerySubmitted`, `ItemClicked`, `OverlayDismissed`
//! - **Editing**: `Char`, `Backspace`, `ClearInput`
//! - **Focus and navigation**: `FocusResults`, `FocusInput`, `Move`, `OpenSelected`
//! - **Host**: `CatalogReply`, `NoticeExpired`, `PermissionsResult`, `CloseFocus`
//!
//! # Example
//!
//! ```rust
//! use cinefind::app::{handle_event, Action, AppState, Event};
//! use cinefind::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default());
//! let (render, actions) = handle_event(&mut state, &Event::QuerySubmitted("alien".into()))?;
//! assert!(render);
//! assert!(matches!(actions[0], Action::Fetch(_)));
//! # Ok::<(), cinefind::CinefindError>(())
//! ```

use super::actions::{Action, Notice};
use super::modes::{Direction, InputMode};
use super::state::{Completion, ErrorBanner, ErrorOrigin};
use crate::app::AppState;
use crate::catalog::CatalogReply;
use crate::domain::{MovieId, Result};

/// Events triggered by user input, the display surface or the host.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The user submitted the search box contents.
    QuerySubmitted(String),
    /// The user picked a result card.
    ItemClicked(MovieId),
    /// The user dismissed the detail overlay.
    OverlayDismissed,

    /// Appends a character to the search box.
    Char(char),
    /// Removes the last character from the search box.
    Backspace,
    /// Empties the search box.
    ClearInput,

    /// Moves focus from the search box to the result grid.
    FocusResults,
    /// Moves focus back to the search box.
    FocusInput,
    /// Moves the grid cursor.
    Move(Direction),
    /// Opens the card under the grid cursor.
    OpenSelected,

    /// Hides the plugin pane.
    CloseFocus,

    /// A catalog request settled.
    CatalogReply(CatalogReply),

    /// The timer for the current notice fired.
    NoticeExpired,

    /// Result of the startup permission request.
    PermissionsResult {
        /// Whether web access was granted.
        granted: bool,
    },
}

/// Processes an event, mutates state and returns `(should_render, actions)`.
///
/// # Errors
///
/// The current transitions are infallible; the `Result` keeps the runtime's
/// error path uniform with the rest of the crate.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event_name(event)).entered();

    match event {
        Event::QuerySubmitted(text) => {
            state.input.clone_from(text);
            Ok((true, submit(state, text)))
        }
        Event::ItemClicked(id) => {
            if state.pending_detail == Some(*id) {
                tracing::debug!(movie_id = %id, "detail already pending");
                return Ok((false, vec![]));
            }
            let request = state.select_item(*id);
            Ok((true, vec![Action::Fetch(request)]))
        }
        Event::OverlayDismissed => {
            if !state.overlay_open() {
                return Ok((false, vec![]));
            }
            state.close_detail();
            Ok((true, vec![]))
        }
        Event::Char(c) => {
            if state.input_mode != InputMode::Typing {
                return Ok((false, vec![]));
            }
            state.input.push(*c);
            tracing::trace!(input = %state.input, "search box updated");
            Ok((true, live_search(state)))
        }
        Event::Backspace => {
            if state.input_mode != InputMode::Typing || state.input.pop().is_none() {
                return Ok((false, vec![]));
            }
            Ok((true, live_search(state)))
        }
        Event::ClearInput => {
            if state.input.is_empty() {
                return Ok((false, vec![]));
            }
            state.input.clear();
            Ok((true, live_search(state)))
        }
        Event::FocusResults => {
            if state.results.is_empty() {
                return Ok((false, vec![]));
            }
            state.input_mode = InputMode::Browsing;
            Ok((true, vec![]))
        }
        Event::FocusInput => {
            state.input_mode = InputMode::Typing;
            Ok((true, vec![]))
        }
        Event::Move(direction) => {
            let before = state.cursor;
            state.move_cursor(*direction);
            Ok((state.cursor != before, vec![]))
        }
        Event::OpenSelected => {
            let Some(id) = state.item_under_cursor().map(|item| item.id) else {
                tracing::debug!("no result under cursor");
                return Ok((false, vec![]));
            };
            handle_event(state, &Event::ItemClicked(id))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::CatalogReply(reply) => Ok(apply_reply(state, reply)),
        Event::NoticeExpired => {
            if state.notice.is_none() {
                return Ok((false, vec![]));
            }
            state.clear_notice();
            Ok((true, vec![]))
        }
        Event::PermissionsResult { granted } => {
            if *granted {
                if state.error.as_ref().is_some_and(|e| e.origin == ErrorOrigin::Permissions) {
                    state.error = None;
                    return Ok((true, vec![]));
                }
                return Ok((false, vec![]));
            }
            tracing::warn!("web access permission denied");
            state.error = Some(ErrorBanner {
                origin: ErrorOrigin::Permissions,
                message: "Web access was denied; cinefind cannot reach the movie database.".to_string(),
            });
            Ok((true, vec![]))
        }
    }
}

/// Runs a search for submitted text, turning a rejection into a notice.
fn submit(state: &mut AppState, text: &str) -> Vec<Action> {
    state.search(text).map_or_else(
        || {
            let notice = Notice::validation();
            state.set_notice(notice.clone());
            vec![Action::Notify(notice)]
        },
        |request| vec![Action::Fetch(request)],
    )
}

/// Searches as the user types when live search is enabled.
///
/// Below the minimum length the grid is cleared silently; no validation
/// notice is shown for partial input.
fn live_search(state: &mut AppState) -> Vec<Action> {
    let Some(min_chars) = state.live_search_min_chars else {
        return vec![];
    };

    let trimmed = state.input.trim();
    if trimmed.chars().count() < min_chars.max(1) {
        state.reset_search();
        return vec![];
    }

    if trimmed == state.query && (state.is_loading || !state.results.is_empty()) {
        return vec![];
    }

    let text = trimmed.to_string();
    state.search(&text).map(Action::Fetch).into_iter().collect()
}

fn apply_reply(state: &mut AppState, reply: &CatalogReply) -> (bool, Vec<Action>) {
    let _context_guard = reply.trace_context().and_then(|tc| tc.attach());
    let _span = tracing::debug_span!(
        "catalog_reply",
        lineage = %reply.ticket().lineage,
        sequence = reply.ticket().sequence
    )
    .entered();

    match reply {
        CatalogReply::Search { ticket, query, outcome, .. } => {
            if state.complete_search(*ticket, query, outcome.clone()) == Completion::Discarded {
                return (false, vec![]);
            }

            let mut actions = vec![];
            if state.no_results_for.is_some() && state.no_results_toast {
                let notice = Notice::no_results(query);
                state.set_notice(notice.clone());
                actions.push(Action::Notify(notice));
            }
            (true, actions)
        }
        CatalogReply::Detail { ticket, id, outcome, .. } => {
            let completion = state.complete_detail(*ticket, *id, outcome.clone());
            (completion == Completion::Applied, vec![])
        }
    }
}

/// Short event label for span fields; avoids logging full reply payloads.
const fn event_name(event: &Event) -> &'static str {
    match event {
        Event::QuerySubmitted(_) => "QuerySubmitted",
        Event::ItemClicked(_) => "ItemClicked",
        Event::OverlayDismissed => "OverlayDismissed",
        Event::Char(_) => "Char",
        Event::Backspace => "Backspace",
        Event::ClearInput => "ClearInput",
        Event::FocusResults => "FocusResults",
        Event::FocusInput => "FocusInput",
        Event::Move(_) => "Move",
        Event::OpenSelected => "OpenSelected",
        Event::CloseFocus => "CloseFocus",
        Event::CatalogReply(_) => "CatalogReply",
        Event::NoticeExpired => "NoticeExpired",
        Event::PermissionsResult { .. } => "PermissionsResult",
    }
}
