//! Orchestrator state and its transitions.
//!
//! [`AppState`] is the single owner of everything the display shows: the
//! search box buffer, the submitted query, the result list, the loading flag,
//! the error banner, the detail overlay and the sequence counters used to
//! reconcile out-of-order catalog replies.
//!
//! # Sequencing
//!
//! Searches and detail lookups are independent lineages, each with its own
//! monotonically increasing counter. A reply is applied only when its sequence
//! number equals the lineage's latest issued number; anything older is dropped
//! without touching state. In-flight requests are never cancelled.
//!
//! # Display phases
//!
//! Loading takes precedence over everything else the grid area could show,
//! so stale results and old errors are never visible under a spinner:
//!
//! ```text
//! is_loading ─▶ Loading
//! results    ─▶ Results (an error banner goes on the status line)
//! error      ─▶ Failed, unless a detail error meets a search with no results
//! no results ─▶ NoResults
//! otherwise  ─▶ Idle
//! ```
//!
//! # Example
//!
//! ```rust
//! use cinefind::app::AppState;
//! use cinefind::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default());
//! let request = state.search("inception");
//! assert!(request.is_some());
//! assert!(state.is_loading);
//! ```

use super::actions::Notice;
use super::modes::{Direction, InputMode};
use crate::catalog::{CatalogRequest, Ticket};
use crate::domain::{CatalogError, DetailRecord, MovieId, ResultItem};
use crate::ui::theme::Theme;

/// Where the message in the error banner came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorOrigin {
    Search,
    Detail,
    Permissions,
}

/// Persistent error banner contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorBanner {
    pub origin: ErrorOrigin,
    /// User-safe text; never contains transport details.
    pub message: String,
}

/// Whether a catalog reply changed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// The reply belonged to a superseded request and was ignored.
    Discarded,
}

/// What the grid area shows, derived from state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayPhase<'a> {
    Idle,
    Loading,
    Failed(&'a str),
    NoResults(&'a str),
    Results,
}

/// Central orchestrator state.
///
/// Mutated only through the event handler; the renderer reads it through
/// [`AppState::compute_viewmodel`].
#[derive(Debug, Clone)]
pub struct AppState {
    /// Text currently in the search box.
    pub input: String,

    /// Whether keys edit the search box or move across the grid.
    pub input_mode: InputMode,

    /// The last query that was accepted and sent, trimmed.
    pub query: String,

    /// Results of the latest applied search, in catalog order.
    pub results: Vec<ResultItem>,

    /// A search is in flight and owns the grid area.
    pub is_loading: bool,

    /// Persistent error banner, cleared by the next search.
    pub error: Option<ErrorBanner>,

    /// Set when the latest applied search returned nothing; holds its query.
    pub no_results_for: Option<String>,

    /// Detail record shown in the overlay.
    pub selected: Option<DetailRecord>,

    /// Movie whose detail lookup is in flight.
    pub pending_detail: Option<MovieId>,

    /// Latest sequence number issued on the search lineage.
    pub last_issued_sequence: u64,

    /// Latest sequence number issued on the detail lineage.
    pub last_detail_sequence: u64,

    /// Index of the card under the grid cursor.
    pub cursor: usize,

    /// Number of cards per grid row, as laid out by the last render.
    pub grid_columns: usize,

    /// Transient notice shown in place of the footer hints.
    pub notice: Option<Notice>,

    /// Minimum trimmed input length for search-as-you-type; `None` disables it.
    pub live_search_min_chars: Option<usize>,

    /// Also emit a transient notice when a search returns nothing.
    pub no_results_toast: bool,

    /// Base URL used to show poster links in the overlay.
    pub image_base: String,

    /// Color scheme for rendering.
    pub theme: Theme,
}

impl AppState {
    /// Creates an idle state with default display settings.
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        Self {
            input: String::new(),
            input_mode: InputMode::Typing,
            query: String::new(),
            results: Vec::new(),
            is_loading: false,
            error: None,
            no_results_for: None,
            selected: None,
            pending_detail: None,
            last_issued_sequence: 0,
            last_detail_sequence: 0,
            cursor: 0,
            grid_columns: 1,
            notice: None,
            live_search_min_chars: None,
            no_results_toast: true,
            image_base: crate::catalog::client::DEFAULT_IMAGE_BASE.to_string(),
            theme,
        }
    }

    /// Starts a search for `query`.
    ///
    /// Whitespace-only queries are rejected: nothing is sent, results, error
    /// and the no-results signal are cleared, and any in-flight search is
    /// superseded so its reply cannot repopulate the grid. The caller shows a
    /// validation notice.
    ///
    /// Accepted queries get the next sequence number; the previous results are
    /// cleared immediately so the grid never shows stale items while loading.
    ///
    /// Returns the request to dispatch, or `None` when the query was rejected.
    pub fn search(&mut self, query: &str) -> Option<CatalogRequest> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            tracing::debug!("empty query rejected");
            self.reset_search();
            return None;
        }

        self.last_issued_sequence += 1;
        self.query = trimmed.to_string();
        self.is_loading = true;
        self.error = None;
        self.no_results_for = None;
        self.results.clear();
        self.cursor = 0;

        tracing::debug!(
            sequence = self.last_issued_sequence,
            query = %self.query,
            "search issued"
        );

        Some(CatalogRequest::search(self.last_issued_sequence, self.query.clone()))
    }

    /// Clears the grid area and supersedes any in-flight search.
    ///
    /// The counter moves forward so a reply still on its way is discarded.
    /// A permissions banner stays: access is still denied.
    pub fn reset_search(&mut self) {
        if self.is_loading {
            self.last_issued_sequence += 1;
        }
        self.is_loading = false;
        if self.error.as_ref().is_some_and(|e| e.origin != ErrorOrigin::Permissions) {
            self.error = None;
        }
        self.no_results_for = None;
        self.results.clear();
        self.cursor = 0;
    }

    /// Applies the outcome of a search request.
    ///
    /// Replies from superseded requests are discarded without any state
    /// change, including the loading flag, which belongs to the newer request.
    pub fn complete_search(
        &mut self,
        ticket: Ticket,
        query: &str,
        outcome: Result<Vec<ResultItem>, CatalogError>,
    ) -> Completion {
        if ticket.sequence != self.last_issued_sequence || !self.is_loading {
            tracing::debug!(
                sequence = ticket.sequence,
                latest = self.last_issued_sequence,
                query = %query,
                "stale search reply discarded"
            );
            return Completion::Discarded;
        }

        self.is_loading = false;
        self.cursor = 0;

        match outcome {
            Ok(items) => {
                tracing::debug!(sequence = ticket.sequence, result_count = items.len(), "search applied");
                if items.is_empty() {
                    self.no_results_for = Some(query.to_string());
                }
                self.results = items;
            }
            Err(e) => {
                tracing::debug!(sequence = ticket.sequence, error = %e, "search failed");
                self.results.clear();
                self.error = Some(ErrorBanner {
                    origin: ErrorOrigin::Search,
                    message: e.user_message(),
                });
            }
        }

        Completion::Applied
    }

    /// Starts a detail lookup for `id` on the detail lineage.
    ///
    /// Search state is left alone; a search in flight keeps its loading flag
    /// and its reply is still applied.
    pub fn select_item(&mut self, id: MovieId) -> CatalogRequest {
        self.last_detail_sequence += 1;
        self.pending_detail = Some(id);

        tracing::debug!(sequence = self.last_detail_sequence, movie_id = %id, "detail requested");

        CatalogRequest::detail(self.last_detail_sequence, id)
    }

    /// Applies the outcome of a detail request.
    ///
    /// Replies for an older selection, or arriving after the overlay was
    /// dismissed, are discarded. Failures show the error banner but keep the
    /// result list.
    pub fn complete_detail(
        &mut self,
        ticket: Ticket,
        id: MovieId,
        outcome: Result<DetailRecord, CatalogError>,
    ) -> Completion {
        if ticket.sequence != self.last_detail_sequence || self.pending_detail != Some(id) {
            tracing::debug!(
                sequence = ticket.sequence,
                latest = self.last_detail_sequence,
                movie_id = %id,
                "stale detail reply discarded"
            );
            return Completion::Discarded;
        }

        self.pending_detail = None;

        match outcome {
            Ok(record) => {
                if self.error.as_ref().is_some_and(|e| e.origin == ErrorOrigin::Detail) {
                    self.error = None;
                }
                self.selected = Some(record);
            }
            Err(e) => {
                tracing::debug!(movie_id = %id, error = %e, "detail lookup failed");
                self.error = Some(ErrorBanner {
                    origin: ErrorOrigin::Detail,
                    message: e.user_message(),
                });
            }
        }

        Completion::Applied
    }

    /// Closes the detail overlay. Idempotent.
    ///
    /// A lookup still in flight is abandoned; its reply will be discarded.
    pub fn close_detail(&mut self) {
        self.selected = None;
        self.pending_detail = None;
    }

    /// The overlay is open while a detail is shown or being fetched.
    #[must_use]
    pub const fn overlay_open(&self) -> bool {
        self.selected.is_some() || self.pending_detail.is_some()
    }

    /// Derives what the grid area currently shows.
    #[must_use]
    pub fn phase(&self) -> DisplayPhase<'_> {
        if self.is_loading {
            return DisplayPhase::Loading;
        }
        if !self.results.is_empty() {
            return DisplayPhase::Results;
        }

        // A failed detail lookup does not outrank a search that found nothing.
        match (&self.error, &self.no_results_for) {
            (Some(error), Some(query)) if error.origin == ErrorOrigin::Detail => DisplayPhase::NoResults(query),
            (Some(error), _) => DisplayPhase::Failed(&error.message),
            (None, Some(query)) => DisplayPhase::NoResults(query),
            (None, None) => DisplayPhase::Idle,
        }
    }

    /// Returns the card under the grid cursor, if any.
    #[must_use]
    pub fn item_under_cursor(&self) -> Option<&ResultItem> {
        self.results.get(self.cursor)
    }

    /// Records how many cards fit in one grid row.
    pub fn set_grid_columns(&mut self, columns: usize) {
        self.grid_columns = columns.max(1);
    }

    /// Moves the grid cursor, clamping at the edges of the grid.
    pub fn move_cursor(&mut self, direction: Direction) {
        if self.results.is_empty() {
            return;
        }

        let last = self.results.len() - 1;
        let columns = self.grid_columns.max(1);

        self.cursor = match direction {
            Direction::Left => self.cursor.saturating_sub(1),
            Direction::Right => (self.cursor + 1).min(last),
            Direction::Up => self.cursor.checked_sub(columns).unwrap_or(self.cursor),
            Direction::Down => {
                let next = self.cursor + columns;
                if next <= last {
                    next
                } else if self.cursor / columns < last / columns {
                    last
                } else {
                    self.cursor
                }
            }
        };
    }

    /// Shows a transient notice, replacing the current one.
    pub fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ReleaseYear;

    fn item(id: u64, title: &str) -> ResultItem {
        ResultItem {
            id: MovieId(id),
            title: title.to_string(),
            year: ReleaseYear::Known(2000),
            poster: None,
        }
    }

    fn detail(id: u64) -> DetailRecord {
        DetailRecord {
            id: MovieId(id),
            title: format!("Movie {id}"),
            year: ReleaseYear::Unknown,
            poster: None,
            overview: "Overview".to_string(),
            rating: 6.5,
            runtime: Some(95),
        }
    }

    fn state() -> AppState {
        AppState::new(Theme::default())
    }

    fn ticket_of(request: &CatalogRequest) -> Ticket {
        request.ticket()
    }

    #[test]
    fn whitespace_queries_never_issue_requests() {
        let mut state = state();
        for query in ["", " ", "\t", "  \n  "] {
            assert!(state.search(query).is_none());
            assert!(state.results.is_empty());
            assert!(!state.is_loading);
            assert!(state.error.is_none());
        }
        assert_eq!(state.last_issued_sequence, 0);
    }

    #[test]
    fn empty_query_clears_previous_results_and_error() {
        let mut state = state();
        let request = state.search("alien").unwrap();
        state.complete_search(ticket_of(&request), "alien", Ok(vec![item(1, "Alien")]));
        state.error = Some(ErrorBanner { origin: ErrorOrigin::Detail, message: "x".to_string() });

        assert!(state.search("   ").is_none());
        assert!(state.results.is_empty());
        assert!(state.error.is_none());
        assert_eq!(state.phase(), DisplayPhase::Idle);
    }

    #[test]
    fn empty_query_supersedes_in_flight_search() {
        let mut state = state();
        let request = state.search("alien").unwrap();
        assert!(state.search("").is_none());

        let completion = state.complete_search(ticket_of(&request), "alien", Ok(vec![item(1, "Alien")]));
        assert_eq!(completion, Completion::Discarded);
        assert!(state.results.is_empty());
    }

    #[test]
    fn search_trims_and_clears_before_fetching() {
        let mut state = state();
        let first = state.search("matrix").unwrap();
        state.complete_search(ticket_of(&first), "matrix", Ok(vec![item(1, "The Matrix")]));

        let second = state.search("  inception  ").unwrap();
        assert!(matches!(second, CatalogRequest::Search { ref query, .. } if query == "inception"));
        assert_eq!(state.query, "inception");
        assert!(state.is_loading);
        assert!(state.results.is_empty());
        assert_eq!(state.phase(), DisplayPhase::Loading);
    }

    #[test]
    fn successful_search_sets_results() {
        let mut state = state();
        let request = state.search("inception").unwrap();
        let items = vec![item(1, "Inception"), item(2, "Inception: Jump"), item(3, "Behind Inception")];

        let completion = state.complete_search(ticket_of(&request), "inception", Ok(items));

        assert_eq!(completion, Completion::Applied);
        assert!(!state.is_loading);
        assert!(state.error.is_none());
        assert_eq!(state.results.len(), 3);
        assert_eq!(state.phase(), DisplayPhase::Results);
    }

    #[test]
    fn zero_results_is_not_an_error() {
        let mut state = state();
        let request = state.search("zzzzznoresults").unwrap();

        state.complete_search(ticket_of(&request), "zzzzznoresults", Ok(vec![]));

        assert!(!state.is_loading);
        assert!(state.error.is_none());
        assert!(state.results.is_empty());
        assert_eq!(state.no_results_for.as_deref(), Some("zzzzznoresults"));
        assert_eq!(state.phase(), DisplayPhase::NoResults("zzzzznoresults"));
    }

    #[test]
    fn network_failure_sets_user_safe_error() {
        let mut state = state();
        let request = state.search("x").unwrap();

        state.complete_search(
            ticket_of(&request),
            "x",
            Err(CatalogError::Network("tcp connect error: Connection refused (os error 111)".to_string())),
        );

        let error = state.error.as_ref().unwrap();
        assert!(!error.message.is_empty());
        assert!(!error.message.contains("os error"));
        assert!(state.results.is_empty());
        assert!(!state.is_loading);
        assert!(matches!(state.phase(), DisplayPhase::Failed(_)));
    }

    #[test]
    fn older_reply_arriving_last_is_discarded() {
        let mut state = state();
        let before = state.last_issued_sequence;
        let first = state.search("a").unwrap();
        let second = state.search("ab").unwrap();

        let applied = state.complete_search(ticket_of(&second), "ab", Ok(vec![item(2, "Abyss")]));
        let dropped = state.complete_search(ticket_of(&first), "a", Ok(vec![item(1, "A"), item(3, "Aa")]));

        assert_eq!(applied, Completion::Applied);
        assert_eq!(dropped, Completion::Discarded);
        assert_eq!(state.results, vec![item(2, "Abyss")]);
        assert!(state.last_issued_sequence > before);
    }

    #[test]
    fn older_reply_arriving_first_leaves_loading_to_newer_request() {
        let mut state = state();
        let first = state.search("a").unwrap();
        let second = state.search("ab").unwrap();

        let dropped = state.complete_search(
            ticket_of(&first),
            "a",
            Err(CatalogError::Network("timeout".to_string())),
        );
        assert_eq!(dropped, Completion::Discarded);
        assert!(state.is_loading);
        assert!(state.error.is_none());

        state.complete_search(ticket_of(&second), "ab", Ok(vec![item(2, "Abyss")]));
        assert!(!state.is_loading);
        assert_eq!(state.results.len(), 1);
    }

    #[test]
    fn next_search_resets_error() {
        let mut state = state();
        let failing = state.search("x").unwrap();
        state.complete_search(ticket_of(&failing), "x", Err(CatalogError::Malformed("eof".to_string())));
        assert!(state.error.is_some());

        state.search("y").unwrap();
        assert!(state.error.is_none());
    }

    #[test]
    fn select_and_close_detail() {
        let mut state = state();
        let request = state.select_item(MovieId(42));
        assert!(state.overlay_open());

        state.complete_detail(ticket_of(&request), MovieId(42), Ok(detail(42)));
        assert_eq!(state.selected.as_ref().map(|d| d.id), Some(MovieId(42)));

        state.close_detail();
        assert!(state.selected.is_none());
        state.close_detail();
        assert!(state.selected.is_none());
        assert!(!state.overlay_open());
    }

    #[test]
    fn detail_failure_keeps_results() {
        let mut state = state();
        let search = state.search("alien").unwrap();
        state.complete_search(ticket_of(&search), "alien", Ok(vec![item(1, "Alien"), item(2, "Aliens")]));

        let request = state.select_item(MovieId(2));
        state.complete_detail(
            ticket_of(&request),
            MovieId(2),
            Err(CatalogError::Api { status: 404, message: "The resource you requested could not be found.".to_string() }),
        );

        assert_eq!(state.results.len(), 2);
        assert_eq!(state.error.as_ref().map(|e| e.origin), Some(ErrorOrigin::Detail));
        assert!(state.selected.is_none());
        assert_eq!(state.phase(), DisplayPhase::Results);
    }

    #[test]
    fn detail_lookup_survives_a_new_search() {
        let mut state = state();
        let detail_request = state.select_item(MovieId(7));
        let search = state.search("heat").unwrap();

        let completion = state.complete_detail(ticket_of(&detail_request), MovieId(7), Ok(detail(7)));
        assert_eq!(completion, Completion::Applied);
        assert_eq!(state.selected.as_ref().map(|d| d.id), Some(MovieId(7)));
        assert!(state.is_loading);

        state.complete_search(ticket_of(&search), "heat", Ok(vec![item(9, "Heat")]));
        assert_eq!(state.results.len(), 1);
        assert!(state.selected.is_some());
    }

    #[test]
    fn search_settling_first_leaves_detail_lookup_alone() {
        let mut state = state();
        let search = state.search("heat").unwrap();
        let detail_request = state.select_item(MovieId(7));

        state.complete_search(ticket_of(&search), "heat", Ok(vec![item(9, "Heat"), item(10, "Heat 2")]));
        assert!(state.pending_detail.is_some());

        let completion = state.complete_detail(ticket_of(&detail_request), MovieId(7), Ok(detail(7)));
        assert_eq!(completion, Completion::Applied);
        assert_eq!(state.selected.as_ref().map(|d| d.id), Some(MovieId(7)));
        assert_eq!(state.results, vec![item(9, "Heat"), item(10, "Heat 2")]);
        assert!(!state.is_loading);
    }

    #[test]
    fn detail_failure_does_not_hide_zero_results() {
        let mut state = state();
        let search = state.search("zzzzznoresults").unwrap();
        let detail_request = state.select_item(MovieId(1));
        state.complete_detail(ticket_of(&detail_request), MovieId(1), Err(CatalogError::Network("x".to_string())));

        state.complete_search(ticket_of(&search), "zzzzznoresults", Ok(vec![]));

        assert_eq!(state.error.as_ref().map(|e| e.origin), Some(ErrorOrigin::Detail));
        assert_eq!(state.phase(), DisplayPhase::NoResults("zzzzznoresults"));
    }

    #[test]
    fn search_error_with_empty_grid_is_failed() {
        let mut state = state();
        let search = state.search("x").unwrap();
        state.complete_search(ticket_of(&search), "x", Err(CatalogError::Network("x".to_string())));
        assert!(matches!(state.phase(), DisplayPhase::Failed(_)));
    }

    #[test]
    fn reset_keeps_permissions_banner() {
        let mut state = state();
        state.error = Some(ErrorBanner { origin: ErrorOrigin::Permissions, message: "denied".to_string() });

        assert!(state.search("  ").is_none());
        assert_eq!(state.error.as_ref().map(|e| e.origin), Some(ErrorOrigin::Permissions));

        state.reset_search();
        assert_eq!(state.phase(), DisplayPhase::Failed("denied"));
    }

    #[test]
    fn stale_detail_reply_is_discarded() {
        let mut state = state();
        let first = state.select_item(MovieId(1));
        let second = state.select_item(MovieId(2));

        state.complete_detail(ticket_of(&second), MovieId(2), Ok(detail(2)));
        let dropped = state.complete_detail(ticket_of(&first), MovieId(1), Ok(detail(1)));

        assert_eq!(dropped, Completion::Discarded);
        assert_eq!(state.selected.as_ref().map(|d| d.id), Some(MovieId(2)));
    }

    #[test]
    fn detail_reply_after_dismiss_is_discarded() {
        let mut state = state();
        let request = state.select_item(MovieId(3));
        state.close_detail();

        let completion = state.complete_detail(ticket_of(&request), MovieId(3), Ok(detail(3)));
        assert_eq!(completion, Completion::Discarded);
        assert!(!state.overlay_open());
    }

    #[test]
    fn successful_detail_clears_detail_error_only() {
        let mut state = state();
        let failed = state.select_item(MovieId(1));
        state.complete_detail(ticket_of(&failed), MovieId(1), Err(CatalogError::Network("x".to_string())));
        assert!(state.error.is_some());

        let retried = state.select_item(MovieId(1));
        state.complete_detail(ticket_of(&retried), MovieId(1), Ok(detail(1)));
        assert!(state.error.is_none());

        state.error = Some(ErrorBanner { origin: ErrorOrigin::Permissions, message: "denied".to_string() });
        let again = state.select_item(MovieId(2));
        state.complete_detail(ticket_of(&again), MovieId(2), Ok(detail(2)));
        assert_eq!(state.error.as_ref().map(|e| e.origin), Some(ErrorOrigin::Permissions));
    }

    #[test]
    fn cursor_moves_within_grid_bounds() {
        let mut state = state();
        state.results = (1..=7).map(|i| item(i, "m")).collect();
        state.set_grid_columns(3);

        state.move_cursor(Direction::Left);
        assert_eq!(state.cursor, 0);
        state.move_cursor(Direction::Down);
        assert_eq!(state.cursor, 3);
        state.move_cursor(Direction::Right);
        state.move_cursor(Direction::Right);
        assert_eq!(state.cursor, 5);
        state.move_cursor(Direction::Down);
        assert_eq!(state.cursor, 6);
        state.move_cursor(Direction::Down);
        assert_eq!(state.cursor, 6);
        state.move_cursor(Direction::Up);
        assert_eq!(state.cursor, 3);
        state.move_cursor(Direction::Right);
        state.move_cursor(Direction::Right);
        state.move_cursor(Direction::Right);
        state.move_cursor(Direction::Right);
        assert_eq!(state.cursor, 6);
        assert_eq!(state.item_under_cursor().map(|i| i.id), Some(MovieId(7)));
    }
}
