//! View model types representing renderable UI state.
//!
//! View models are computed from `AppState` by
//! `AppState::compute_viewmodel()` and consumed by the renderer. They hold
//! display-ready data only: truncated titles, highlight ranges, wrapped
//! overview lines and the grid already split into rows.

/// Width of one result card, borders included.
pub const CARD_WIDTH: usize = 26;

/// Height of one result card, borders included.
pub const CARD_HEIGHT: usize = 4;

/// Horizontal gap between cards.
pub const CARD_GAP: usize = 2;

/// Left margin of the grid.
pub const GRID_MARGIN: usize = 2;

/// First screen row of the grid: blank, header, border, search box (3),
/// status line and one spacer come before it.
pub const GRID_TOP: usize = 9;

/// Rows taken below the grid by the footer and its border.
pub const FOOTER_ROWS: usize = 2;

/// Widest the detail overlay gets.
pub const OVERLAY_MAX_WIDTH: usize = 72;

/// Overlay lines that are not overview text: borders, title, facts, two
/// spacers and the poster line.
const OVERLAY_CHROME_ROWS: usize = 7;

/// Number of card rows visible for a terminal height. Always at least one.
#[must_use]
pub const fn grid_visible_rows(rows: usize) -> usize {
    let available = rows.saturating_sub(GRID_TOP + FOOTER_ROWS) / CARD_HEIGHT;
    if available == 0 {
        1
    } else {
        available
    }
}

/// Outer width of the detail overlay for a terminal width.
#[must_use]
pub fn overlay_width(cols: usize) -> usize {
    cols.saturating_sub(8).min(OVERLAY_MAX_WIDTH).max(20)
}

/// Width overview text is wrapped to inside the overlay.
#[must_use]
pub fn overlay_text_width(cols: usize) -> usize {
    overlay_width(cols).saturating_sub(4).max(1)
}

/// Number of overview lines that fit in the overlay for a terminal height.
#[must_use]
pub fn overlay_overview_capacity(rows: usize) -> usize {
    rows.saturating_sub(4 + OVERLAY_CHROME_ROWS).max(1)
}

/// Number of cards that fit in one grid row for a terminal width.
///
/// ```
/// use cinefind::ui::viewmodel::grid_columns;
///
/// assert_eq!(grid_columns(10), 1);
/// assert_eq!(grid_columns(80), 2);
/// assert_eq!(grid_columns(120), 4);
/// ```
#[must_use]
pub const fn grid_columns(cols: usize) -> usize {
    let usable = cols.saturating_sub(GRID_MARGIN * 2) + CARD_GAP;
    let columns = usable / (CARD_WIDTH + CARD_GAP);
    if columns == 0 {
        1
    } else {
        columns
    }
}

/// Complete UI view model for rendering.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    pub header: HeaderInfo,
    pub search_bar: SearchBarInfo,
    /// Line between the search box and the grid (loading, error, hints).
    pub status: StatusLine,
    /// Visible grid rows, each holding up to `grid_columns` cards.
    pub grid: Vec<Vec<CardView>>,
    /// Detail overlay, drawn on top of everything else when present.
    pub overlay: Option<OverlayView>,
    pub footer: FooterInfo,
}

/// Header display information.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    pub title: String,
    /// Result count for the current query, when there are results.
    pub summary: Option<String>,
}

/// Search box contents.
#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    pub query: String,
    /// Keys currently edit the search box; a cursor is drawn.
    pub focused: bool,
}

/// Kind of status line, selecting its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Loading,
    Error,
    Empty,
    Hint,
}

#[derive(Debug, Clone)]
pub struct StatusLine {
    pub kind: StatusKind,
    pub text: String,
}

/// One result card.
#[derive(Debug, Clone)]
pub struct CardView {
    /// Title truncated to the card's inner width.
    pub title: String,
    pub year: String,
    pub has_poster: bool,
    pub is_selected: bool,
    /// Character ranges of `title` matching the query, `(start, end)` exclusive.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Detail overlay contents.
#[derive(Debug, Clone)]
pub struct OverlayView {
    pub title: String,
    /// Year, rating and runtime, already formatted.
    pub facts: String,
    /// Overview wrapped to the overlay's inner width.
    pub overview: Vec<String>,
    pub poster_url: Option<String>,
    /// The detail is still being fetched.
    pub loading: bool,
}

/// Footer contents: keybinding hints, or the current notice.
#[derive(Debug, Clone)]
pub struct FooterInfo {
    pub text: String,
    pub is_notice: bool,
}
