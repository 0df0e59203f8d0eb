//! Composable UI component renderers.
//!
//! # Components
//!
//! - [`header`]: title bar with the result count
//! - [`search`]: search input box
//! - [`status`]: loading indicator, error banner, no-results and hints
//! - [`grid`]: result cards
//! - [`overlay`]: detail overlay drawn over the grid
//! - [`footer`]: keybinding hints or the current notice
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Header]
//! [Border]
//! [Search Bar - 3 lines]
//! [Status line]
//! [blank line]
//! [Grid rows - 4 lines each]
//! [Border]
//! [Footer]
//! ```

mod footer;
mod grid;
mod header;
mod overlay;
mod search;
mod status;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{UIViewModel, GRID_TOP};

use footer::render_footer;
use grid::render_grid;
use header::render_header;
use overlay::render_overlay;
use search::render_search_bar;
use status::render_status;

/// Draws a horizontal rule at `row` and returns the next row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the full screen for a view model.
pub fn render_screen(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    current_row = render_search_bar(current_row, &vm.search_bar, theme, cols);
    let _ = render_status(current_row, &vm.status, theme, cols);

    let footer_row = rows.saturating_sub(1).max(GRID_TOP + 1);
    render_grid(GRID_TOP, footer_row.saturating_sub(1), &vm.grid, theme);

    render_border(footer_row.saturating_sub(1), &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);

    if let Some(detail) = &vm.overlay {
        render_overlay(detail, theme, cols, rows);
    }
}
