//! Projection of [`AppState`] into a [`UIViewModel`].
//!
//! Everything that depends on terminal size lives here: grid windowing around
//! the cursor, title truncation, fuzzy match highlighting and overview
//! wrapping. The renderer only prints what it is handed.

use super::modes::InputMode;
use super::state::{AppState, DisplayPhase};
use crate::domain::{DetailRecord, ResultItem};
use crate::ui::helpers::{indices_to_ranges, truncate_to_width};
use crate::ui::viewmodel::{
    grid_columns, grid_visible_rows, overlay_overview_capacity, overlay_text_width, CardView,
    FooterInfo, HeaderInfo, OverlayView, SearchBarInfo, StatusKind, StatusLine, UIViewModel,
    CARD_WIDTH,
};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

const TITLE: &str = "cinefind";

/// Cells available for text inside a card: borders and one space each side.
const CARD_TEXT_WIDTH: usize = CARD_WIDTH - 4;

const TYPING_HINTS: &str = "enter: search | tab: results | esc: clear";
const BROWSING_HINTS: &str = "arrows/hjkl: move | enter: details | /: search | q: close";
const OVERLAY_HINTS: &str = "esc/q/enter: close details";

impl AppState {
    /// Computes the view model for a `rows` x `cols` terminal.
    ///
    /// The grid window scrolls so the row holding the cursor is always
    /// visible. Highlighting is against the submitted query, not the input
    /// buffer, so it matches what the results were fetched for.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        UIViewModel {
            header: self.compute_header(),
            search_bar: SearchBarInfo {
                query: self.input.clone(),
                focused: self.input_mode == InputMode::Typing && !self.overlay_open(),
            },
            status: self.compute_status(),
            grid: self.compute_grid(rows, cols),
            overlay: self.compute_overlay(rows, cols),
            footer: self.compute_footer(),
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let summary = match self.results.len() {
            0 => None,
            1 => Some(format!("1 result for \"{}\"", self.query)),
            n => Some(format!("{n} results for \"{}\"", self.query)),
        };

        HeaderInfo { title: TITLE.to_string(), summary }
    }

    fn compute_status(&self) -> StatusLine {
        let (kind, text) = match self.phase() {
            DisplayPhase::Loading => (StatusKind::Loading, format!("Searching for \"{}\"…", self.query)),
            DisplayPhase::Failed(message) => (StatusKind::Error, message.to_string()),
            DisplayPhase::NoResults(query) => match &self.error {
                Some(banner) => (
                    StatusKind::Error,
                    format!("No movies found for \"{query}\". {}", banner.message),
                ),
                None => (StatusKind::Empty, format!("No movies found for \"{query}\".")),
            },
            DisplayPhase::Results => match &self.error {
                Some(banner) => (StatusKind::Error, banner.message.clone()),
                None => (
                    StatusKind::Hint,
                    match self.input_mode {
                        InputMode::Typing => "Press tab to browse the results.".to_string(),
                        InputMode::Browsing => "Press enter to see details.".to_string(),
                    },
                ),
            },
            DisplayPhase::Idle => (StatusKind::Hint, "Type a movie title and press enter.".to_string()),
        };

        StatusLine { kind, text }
    }

    fn compute_grid(&self, rows: usize, cols: usize) -> Vec<Vec<CardView>> {
        if self.is_loading || self.results.is_empty() {
            return Vec::new();
        }

        let columns = grid_columns(cols);
        let visible_rows = grid_visible_rows(rows);
        let cursor_row = self.cursor / columns;
        let first_row = cursor_row.saturating_sub(visible_rows - 1);

        let matcher = if self.query.is_empty() {
            None
        } else {
            Some(SkimMatcherV2::default())
        };
        let show_cursor = self.input_mode == InputMode::Browsing;

        self.results
            .chunks(columns)
            .enumerate()
            .skip(first_row)
            .take(visible_rows)
            .map(|(row, items)| {
                items
                    .iter()
                    .enumerate()
                    .map(|(col, item)| {
                        let index = row * columns + col;
                        self.compute_card(item, show_cursor && index == self.cursor, matcher.as_ref())
                    })
                    .collect()
            })
            .collect()
    }

    fn compute_card(&self, item: &ResultItem, is_selected: bool, matcher: Option<&SkimMatcherV2>) -> CardView {
        let title = truncate_to_width(&item.title, CARD_TEXT_WIDTH);

        let highlight_ranges = matcher
            .and_then(|m| m.fuzzy_indices(&item.title, &self.query))
            .map(|(_, indices)| {
                let visible = title.chars().count().saturating_sub(usize::from(title != item.title));
                let kept: Vec<usize> = indices.into_iter().filter(|&i| i < visible).collect();
                indices_to_ranges(&kept)
            })
            .unwrap_or_default();

        CardView {
            title,
            year: item.year.to_string(),
            has_poster: item.poster.is_some(),
            is_selected,
            highlight_ranges,
        }
    }

    fn compute_overlay(&self, rows: usize, cols: usize) -> Option<OverlayView> {
        if let Some(record) = &self.selected {
            return Some(self.compute_detail_overlay(record, rows, cols));
        }

        let id = self.pending_detail?;
        let title = self
            .results
            .iter()
            .find(|item| item.id == id)
            .map_or_else(|| format!("Movie {id}"), |item| item.title.clone());

        Some(OverlayView {
            title,
            facts: String::new(),
            overview: vec!["Loading details…".to_string()],
            poster_url: None,
            loading: true,
        })
    }

    fn compute_detail_overlay(&self, record: &DetailRecord, rows: usize, cols: usize) -> OverlayView {
        let width = overlay_text_width(cols);
        let capacity = overlay_overview_capacity(rows);

        let overview_text = if record.overview.trim().is_empty() {
            "No overview available."
        } else {
            record.overview.trim()
        };

        let mut overview: Vec<String> = textwrap::wrap(overview_text, width)
            .into_iter()
            .map(|line| line.into_owned())
            .collect();

        if overview.len() > capacity {
            overview.truncate(capacity);
            if let Some(last) = overview.last_mut() {
                let shortened = truncate_to_width(last, width.saturating_sub(1));
                *last = if shortened.ends_with('…') { shortened } else { format!("{shortened}…") };
            }
        }

        let facts = format!(
            "{} | {} | {}",
            record.year,
            record.rating_label(),
            record.runtime_label()
        );

        OverlayView {
            title: truncate_to_width(&record.title, width),
            facts,
            overview,
            poster_url: record.poster.as_ref().map(|p| p.url(&self.image_base, "w500")),
            loading: false,
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        if let Some(notice) = &self.notice {
            return FooterInfo { text: notice.text.clone(), is_notice: true };
        }

        let text = if self.overlay_open() {
            OVERLAY_HINTS
        } else {
            match self.input_mode {
                InputMode::Typing => TYPING_HINTS,
                InputMode::Browsing => BROWSING_HINTS,
            }
        };

        FooterInfo { text: text.to_string(), is_notice: false }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::actions::Notice;
    use crate::app::state::{ErrorBanner, ErrorOrigin};
    use crate::catalog::Ticket;
    use crate::domain::{MovieId, PosterRef, ReleaseYear};
    use crate::ui::Theme;

    fn item(id: u64, title: &str) -> ResultItem {
        ResultItem {
            id: MovieId(id),
            title: title.to_string(),
            year: ReleaseYear::Known(1999),
            poster: Some(PosterRef(format!("/{id}.jpg"))),
        }
    }

    fn with_results(query: &str, items: Vec<ResultItem>) -> AppState {
        let mut state = AppState::new(Theme::default());
        let request = state.search(query).unwrap();
        state.complete_search(request.ticket(), query, Ok(items));
        state
    }

    #[test]
    fn idle_state_shows_hint_and_no_grid() {
        let state = AppState::new(Theme::default());
        let vm = state.compute_viewmodel(24, 80);

        assert_eq!(vm.status.kind, StatusKind::Hint);
        assert!(vm.grid.is_empty());
        assert!(vm.overlay.is_none());
        assert!(vm.search_bar.focused);
        assert!(vm.header.summary.is_none());
    }

    #[test]
    fn loading_hides_grid_and_errors() {
        let mut state = with_results("alien", vec![item(1, "Alien")]);
        state.search("aliens");
        state.error = Some(ErrorBanner { origin: ErrorOrigin::Detail, message: "old".to_string() });

        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.status.kind, StatusKind::Loading);
        assert!(vm.status.text.contains("aliens"));
        assert!(vm.grid.is_empty());
    }

    #[test]
    fn grid_is_split_into_rows_by_width() {
        let items = (1..=5).map(|i| item(i, &format!("Movie {i}"))).collect();
        let state = with_results("movie", items);

        let vm = state.compute_viewmodel(40, 80);
        assert_eq!(grid_columns(80), 2);
        assert_eq!(vm.grid.len(), 3);
        assert_eq!(vm.grid[2].len(), 1);
        assert_eq!(vm.header.summary.as_deref(), Some("5 results for \"movie\""));
    }

    #[test]
    fn grid_scrolls_to_keep_cursor_visible() {
        let items = (1..=20).map(|i| item(i, &format!("Movie {i}"))).collect();
        let mut state = with_results("movie", items);
        state.input_mode = InputMode::Browsing;
        state.cursor = 19;

        // 19 rows leave two card rows visible
        let vm = state.compute_viewmodel(19, 80);
        assert_eq!(vm.grid.len(), 2);
        let last_row = vm.grid.last().unwrap();
        assert!(last_row.iter().any(|card| card.is_selected && card.title == "Movie 20"));
    }

    #[test]
    fn cursor_only_drawn_while_browsing() {
        let state = with_results("heat", vec![item(1, "Heat")]);
        let vm = state.compute_viewmodel(24, 80);
        assert!(!vm.grid[0][0].is_selected);
    }

    #[test]
    fn titles_highlight_query_characters() {
        let state = with_results("matrix", vec![item(1, "The Matrix")]);
        let card = &state.compute_viewmodel(24, 80).grid[0][0];

        assert_eq!(card.title, "The Matrix");
        assert_eq!(card.highlight_ranges, vec![(4, 10)]);
        assert_eq!(card.year, "1999");
        assert!(card.has_poster);
    }

    #[test]
    fn highlights_are_clipped_to_truncated_title() {
        let long = "Dr. Strangelove or: How I Learned to Stop Worrying and Love the Bomb";
        let state = with_results("bomb", vec![item(1, long)]);
        let card = &state.compute_viewmodel(24, 80).grid[0][0];

        assert!(card.title.ends_with('…'));
        let visible = card.title.chars().count() - 1;
        assert!(card.highlight_ranges.iter().all(|&(_, end)| end <= visible));
    }

    #[test]
    fn failed_search_shows_error_status() {
        let mut state = AppState::new(Theme::default());
        let request = state.search("x").unwrap();
        state.complete_search(
            request.ticket(),
            "x",
            Err(crate::domain::CatalogError::Network("refused".to_string())),
        );

        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.status.kind, StatusKind::Error);
        assert!(!vm.status.text.contains("refused"));
    }

    #[test]
    fn empty_results_show_no_results_status() {
        let state = with_results("qwxz", vec![]);
        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.status.kind, StatusKind::Empty);
        assert!(vm.status.text.contains("qwxz"));
    }

    #[test]
    fn detail_error_with_zero_results_keeps_no_results_text() {
        let mut state = with_results("qwxz", vec![]);
        state.error = Some(ErrorBanner { origin: ErrorOrigin::Detail, message: "Movie not found.".to_string() });

        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.status.kind, StatusKind::Error);
        assert!(vm.status.text.contains("No movies found for \"qwxz\""));
        assert!(vm.status.text.contains("Movie not found."));
    }

    #[test]
    fn pending_detail_shows_loading_overlay() {
        let mut state = with_results("heat", vec![item(7, "Heat")]);
        state.select_item(MovieId(7));

        let overlay = state.compute_viewmodel(24, 80).overlay.unwrap();
        assert!(overlay.loading);
        assert_eq!(overlay.title, "Heat");
    }

    #[test]
    fn detail_overlay_formats_record() {
        let mut state = with_results("heat", vec![item(7, "Heat")]);
        let request = state.select_item(MovieId(7));
        let record = DetailRecord {
            id: MovieId(7),
            title: "Heat".to_string(),
            year: ReleaseYear::Known(1995),
            poster: Some(PosterRef("/heat.jpg".to_string())),
            overview: "word ".repeat(200),
            rating: 7.9,
            runtime: Some(170),
        };
        state.complete_detail(request.ticket(), MovieId(7), Ok(record));

        let overlay = state.compute_viewmodel(24, 80).overlay.unwrap();
        assert!(!overlay.loading);
        assert_eq!(overlay.facts, "1995 | 7.9/10 | 2h 50m");
        assert_eq!(overlay.poster_url.as_deref(), Some("https://image.tmdb.org/t/p/w500/heat.jpg"));
        assert_eq!(overlay.overview.len(), overlay_overview_capacity(24));
        assert!(overlay.overview.last().unwrap().ends_with('…'));
        assert!(overlay.overview.iter().all(|l| l.chars().count() <= overlay_text_width(80)));
    }

    #[test]
    fn footer_prefers_notice() {
        let mut state = AppState::new(Theme::default());
        state.set_notice(Notice::validation());

        let footer = state.compute_viewmodel(24, 80).footer;
        assert!(footer.is_notice);
        assert_eq!(footer.text, "Please enter your search query.");
    }

    #[test]
    fn stale_reply_leaves_view_unchanged() {
        let mut state = AppState::new(Theme::default());
        let first = state.search("a").unwrap();
        let second = state.search("ab").unwrap();
        state.complete_search(second.ticket(), "ab", Ok(vec![item(2, "Abyss")]));
        state.complete_search(first.ticket(), "a", Ok(vec![item(1, "Alien")]));

        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.grid[0][0].title, "Abyss");
        assert_eq!(Ticket::search(2), second.ticket());
    }
}
