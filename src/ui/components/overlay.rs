//! Detail overlay renderer.
//!
//! The overlay is a box centered over the grid. Its height follows its
//! content; lines that were wrapped and capped by the view model are printed
//! as they are.

use crate::ui::helpers::{centered_offset, pad_to_width, position_cursor, truncate_to_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{overlay_width, OverlayView};

pub fn render_overlay(overlay: &OverlayView, theme: &Theme, cols: usize, rows: usize) {
    let width = overlay_width(cols);
    let inner = width.saturating_sub(2);
    let text_width = inner.saturating_sub(2);

    let mut body: Vec<(String, String)> = Vec::new();
    let normal = Theme::fg(&theme.colors.text_normal);

    body.push((
        format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.header_fg)),
        overlay.title.clone(),
    ));
    if !overlay.facts.is_empty() {
        body.push((Theme::fg(&theme.colors.rating_fg), overlay.facts.clone()));
    }
    body.push((normal.clone(), String::new()));

    let overview_color = if overlay.loading {
        Theme::fg(&theme.colors.loading_fg)
    } else {
        normal.clone()
    };
    for line in &overlay.overview {
        body.push((overview_color.clone(), line.clone()));
    }

    if let Some(url) = &overlay.poster_url {
        body.push((normal.clone(), String::new()));
        body.push((Theme::fg(&theme.colors.text_dim), url.clone()));
    }

    let height = body.len() + 2;
    let top = 1 + rows.saturating_sub(height) / 2;
    let left = 1 + cols.saturating_sub(width) / 2;
    let border = Theme::fg(&theme.colors.search_bar_border);

    position_cursor(top, left);
    print!("{border}╭{}╮{}", "─".repeat(inner), Theme::reset());

    for (offset, (color, text)) in body.iter().enumerate() {
        let text = truncate_to_width(text, text_width);
        position_cursor(top + 1 + offset, left);
        print!("{border}│{}", Theme::reset());
        print!("{color} {} ", pad_to_width(&text, text_width));
        print!("{}{border}│{}", Theme::reset(), Theme::reset());
    }

    let hint = " esc to close ";
    let hint_offset = centered_offset(hint, inner);
    position_cursor(top + height - 1, left);
    print!("{border}╰{}", "─".repeat(hint_offset));
    print!("{}{hint}{}", Theme::fg(&theme.colors.text_dim), border);
    print!(
        "{}╯{}",
        "─".repeat(inner.saturating_sub(hint_offset + hint.chars().count())),
        Theme::reset()
    );
}
