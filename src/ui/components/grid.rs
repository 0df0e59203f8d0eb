//! Result grid renderer.
//!
//! Each card is four lines tall:
//!
//! ```text
//! ╭──────────────────────╮
//! │ The Matrix           │
//! │ 1999          poster │
//! ╰──────────────────────╯
//! ```
//!
//! The card under the cursor is filled with the selection colors.

use crate::ui::helpers::{display_width, pad_to_width, position_cursor, render_highlighted_text};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{CardView, CARD_GAP, CARD_HEIGHT, CARD_WIDTH, GRID_MARGIN};

const POSTER_MARKER: &str = "poster";
const INNER_WIDTH: usize = CARD_WIDTH - 2;

/// Renders card rows from `top`, stopping before `bottom`.
pub fn render_grid(top: usize, bottom: usize, grid: &[Vec<CardView>], theme: &Theme) {
    for (index, cards) in grid.iter().enumerate() {
        let row = top + index * CARD_HEIGHT;
        if row + CARD_HEIGHT > bottom {
            break;
        }

        for (column, card) in cards.iter().enumerate() {
            let col = 1 + GRID_MARGIN + column * (CARD_WIDTH + CARD_GAP);
            render_card(row, col, card, theme);
        }
    }
}

fn render_card(row: usize, col: usize, card: &CardView, theme: &Theme) {
    let border = Theme::fg(&theme.colors.card_border);
    let fill = if card.is_selected {
        format!(
            "{}{}",
            Theme::fg(&theme.colors.selection_fg),
            Theme::bg(&theme.colors.selection_bg)
        )
    } else {
        Theme::fg(&theme.colors.text_normal)
    };

    position_cursor(row, col);
    print!("{border}╭{}╮{}", "─".repeat(INNER_WIDTH), Theme::reset());

    position_cursor(row + 1, col);
    print!("{border}│{}{fill} ", Theme::reset());
    if card.is_selected {
        print!("{}", Theme::bold());
    }
    render_highlighted_text(&card.title, &card.highlight_ranges, theme, &fill, card.is_selected);
    print!("{}", " ".repeat(INNER_WIDTH.saturating_sub(1 + display_width(&card.title))));
    print!("{}{border}│{}", Theme::reset(), Theme::reset());

    let marker = if card.has_poster { POSTER_MARKER } else { "" };
    let year_width = INNER_WIDTH.saturating_sub(2 + display_width(marker));
    let year_color = if card.is_selected {
        String::new()
    } else {
        Theme::fg(&theme.colors.year_fg)
    };
    let marker_color = if card.is_selected {
        String::new()
    } else {
        Theme::fg(&theme.colors.text_dim)
    };

    position_cursor(row + 2, col);
    print!("{border}│{}{fill} ", Theme::reset());
    print!("{year_color}{}", pad_to_width(&card.year, year_width));
    print!("{marker_color}{marker} ");
    print!("{}{border}│{}", Theme::reset(), Theme::reset());

    position_cursor(row + 3, col);
    print!("{border}╰{}╯{}", "─".repeat(INNER_WIDTH), Theme::reset());
}
