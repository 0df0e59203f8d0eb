//! Footer component renderer.

use crate::ui::helpers::{centered_offset, display_width, position_cursor, truncate_to_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Renders the footer centered on `row` and returns the next row.
///
/// Notices use the notice color in bold; keybinding hints are dimmed. Text
/// wider than the terminal is truncated so the layout never wraps.
pub fn render_footer(row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    let text = truncate_to_width(&footer.text, cols);
    let padding = centered_offset(&text, cols);

    position_cursor(row, 1);
    if footer.is_notice {
        print!("{}{}", Theme::bold(), Theme::fg(&theme.colors.notice_fg));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    print!("{}", " ".repeat(padding));
    print!("{text}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + display_width(&text))));
    print!("{}", Theme::reset());
    row + 1
}
