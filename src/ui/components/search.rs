//! Search box component renderer.

use crate::ui::helpers::{display_width, position_cursor, truncate_to_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Spaces left and right of the box.
const SEARCH_BOX_MARGIN: usize = 5;

const PROMPT: &str = " Search: ";

/// Renders the 3-line search box at `row` and returns the row below it.
///
/// ```text
/// [margin] ┌──────────────────┐ [margin]
/// [margin] │ Search: alien█   │ [margin]
/// [margin] └──────────────────┘ [margin]
/// ```
///
/// The border is dimmed while the grid has focus; the block cursor is only
/// drawn while typing. Long input keeps its tail visible.
pub fn render_search_bar(row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border = if search.focused {
        &theme.colors.search_bar_border
    } else {
        &theme.colors.border
    };

    position_cursor(row, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border));
    print!("┌{}┐", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    let cursor = if search.focused { "█" } else { "" };
    let room = inner_width.saturating_sub(display_width(PROMPT) + display_width(cursor));
    let query = visible_tail(&search.query, room);
    let used = display_width(PROMPT) + display_width(&query) + display_width(cursor);

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}│", Theme::fg(border));
    print!("{}{PROMPT}", Theme::fg(&theme.colors.text_dim));
    print!("{}{query}{cursor}", Theme::fg(&theme.colors.text_normal));
    print!("{}", " ".repeat(inner_width.saturating_sub(used)));
    print!("{}│", Theme::fg(border));
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    row + 3
}

/// Last `width` cells of `text`, so the caret end of long input stays visible.
fn visible_tail(text: &str, width: usize) -> String {
    if display_width(text) <= width {
        return text.to_string();
    }

    let reversed: String = text.chars().rev().collect();
    let cut = truncate_to_width(&reversed, width);
    cut.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_input_is_shown_whole() {
        assert_eq!(visible_tail("alien", 10), "alien");
    }

    #[test]
    fn long_input_keeps_the_end() {
        let tail = visible_tail("the good the bad and the ugly", 10);
        assert_eq!(tail, "… the ugly");
        assert!(display_width(&tail) <= 10);
    }
}
