//! Shared rendering utilities.
//!
//! Widths here are terminal cell widths as reported by `unicode-width`, so
//! titles in CJK scripts or with emoji stay inside their card borders.
//! Highlight ranges are character indices, never byte offsets.

use crate::ui::theme::Theme;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Moves the cursor to a 1-indexed `row` and `col`.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Terminal cell width of `text`.
#[must_use]
pub fn display_width(text: &str) -> usize {
    text.width()
}

/// Cuts `text` to at most `max_width` cells, ending with `…` when shortened.
///
/// ```
/// use cinefind::ui::helpers::truncate_to_width;
///
/// assert_eq!(truncate_to_width("Alien", 10), "Alien");
/// assert_eq!(truncate_to_width("The Lord of the Rings", 10), "The Lord …");
/// assert_eq!(truncate_to_width("anything", 0), "");
/// ```
#[must_use]
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut result = String::new();
    let mut width = 0;

    for ch in text.chars() {
        let char_width = ch.width().unwrap_or(0);
        if width + char_width + 1 > max_width {
            break;
        }
        result.push(ch);
        width += char_width;
    }

    result.push('…');
    result
}

/// Pads `text` with spaces on the right up to `width` cells.
#[must_use]
pub fn pad_to_width(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(pad))
}

/// Left padding that centers `text` in `width` cells.
#[must_use]
pub fn centered_offset(text: &str, width: usize) -> usize {
    width.saturating_sub(text.width()) / 2
}

/// Prints `text` with the characters in `ranges` highlighted.
///
/// `base` is the escape sequence of the surrounding style; it is restored
/// after every highlighted section. Selected cards skip highlighting so the
/// selection colors stay uniform.
pub fn render_highlighted_text(
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    base: &str,
    is_selected: bool,
) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current_pos || start >= end {
            continue;
        }

        if start > current_pos {
            let normal: String = chars[current_pos..start].iter().collect();
            print!("{normal}");
        }

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted: String = chars[start..end].iter().collect();
        print!("{highlighted}");
        print!("{}{base}", Theme::reset());

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}

/// Collapses sorted character indices into `(start, end)` runs.
///
/// ```
/// use cinefind::ui::helpers::indices_to_ranges;
///
/// assert_eq!(indices_to_ranges(&[0, 1, 2, 5, 7, 8]), vec![(0, 3), (5, 6), (7, 9)]);
/// assert!(indices_to_ranges(&[]).is_empty());
/// ```
#[must_use]
pub fn indices_to_ranges(indices: &[usize]) -> Vec<(usize, usize)> {
    let mut ranges: Vec<(usize, usize)> = Vec::new();

    for &index in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == index => *end = index + 1,
            _ => ranges.push((index, index + 1)),
        }
    }

    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_respects_wide_characters() {
        let title = "千と千尋の神隠し";
        assert_eq!(display_width(title), 16);

        let cut = truncate_to_width(title, 7);
        assert!(display_width(&cut) <= 7);
        assert!(cut.ends_with('…'));
        assert_eq!(cut, "千と千…");
    }

    #[test]
    fn exact_fit_is_untouched() {
        assert_eq!(truncate_to_width("Heat", 4), "Heat");
        assert_eq!(truncate_to_width("Heats", 4), "Hea…");
    }

    #[test]
    fn padding_fills_cells() {
        assert_eq!(pad_to_width("ab", 5), "ab   ");
        assert_eq!(pad_to_width("abcdef", 3), "abcdef");
        assert_eq!(centered_offset("abcd", 10), 3);
    }

    #[test]
    fn unsorted_indices_start_new_runs() {
        assert_eq!(indices_to_ranges(&[3, 4, 1]), vec![(3, 5), (1, 2)]);
    }
}
