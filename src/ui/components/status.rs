//! Status line between the search box and the grid.

use crate::ui::helpers::{display_width, position_cursor, truncate_to_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{StatusKind, StatusLine};

/// Indent matching the search box margin plus its border.
const STATUS_INDENT: usize = 6;

/// Renders the status line at `row` and returns the next row.
pub fn render_status(row: usize, status: &StatusLine, theme: &Theme, cols: usize) -> usize {
    let (marker, color) = match status.kind {
        StatusKind::Loading => ("⟳ ", &theme.colors.loading_fg),
        StatusKind::Error => ("✗ ", &theme.colors.error_fg),
        StatusKind::Empty => ("∅ ", &theme.colors.empty_state_fg),
        StatusKind::Hint => ("", &theme.colors.text_dim),
    };

    let room = cols.saturating_sub(STATUS_INDENT + display_width(marker));
    let text = truncate_to_width(&status.text, room);
    let used = STATUS_INDENT + display_width(marker) + display_width(&text);

    position_cursor(row, 1);
    print!("{}", " ".repeat(STATUS_INDENT));
    print!("{}", Theme::fg(color));
    if status.kind == StatusKind::Error {
        print!("{}", Theme::bold());
    }
    print!("{marker}{text}");
    print!("{}", " ".repeat(cols.saturating_sub(used)));
    print!("{}", Theme::reset());

    row + 1
}
