//! Header component renderer.

use crate::ui::helpers::{display_width, position_cursor, truncate_to_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the title centered on `row`, followed by the result count when
/// there is one, and returns the next row.
///
/// ```text
/// [padding] cinefind · 12 results for "alien" [padding]
/// ```
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let line = match &header.summary {
        Some(summary) => format!("{} · {summary}", header.title),
        None => header.title.clone(),
    };
    let line = truncate_to_width(&line, cols);
    let width = display_width(&line);
    let padding = cols.saturating_sub(width) / 2;

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }

    print!("{}", " ".repeat(padding));
    print!("{line}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + width)));

    print!("{}", Theme::reset());
    row + 1
}
