//! Shared rendering utilities and helpers.
//!
//! Low-level text utilities used across UI components: cursor positioning,
//! character-aware truncation and padding, and rendering text with
//! highlighted character ranges. All widths and ranges are in characters,
//! not bytes.

use crate::ui::theme::Theme;

/// Positions the cursor at a specific row and column.
///
/// Coordinates are 1-indexed (row 1 = first row, col 1 = first column).
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Number of characters in `text`.
#[must_use]
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Shortens `text` to at most `width` characters, ending with `…` when cut.
///
/// # Examples
///
/// ```
/// use galleria::ui::helpers::truncate;
///
/// assert_eq!(truncate("mountain, lake", 20), "mountain, lake");
/// assert_eq!(truncate("mountain, lake", 6), "mount…");
/// assert_eq!(truncate("mountain", 0), "");
/// ```
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if char_len(text) <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut truncated: String = text.chars().take(width - 1).collect();
    truncated.push('…');
    truncated
}

/// Spaces needed to pad `text` out to `width` characters.
#[must_use]
pub fn padding(text: &str, width: usize) -> String {
    " ".repeat(width.saturating_sub(char_len(text)))
}

/// Drops or shortens ranges so none reaches past `limit`.
#[must_use]
pub fn clip_ranges(ranges: &[(usize, usize)], limit: usize) -> Vec<(usize, usize)> {
    ranges
        .iter()
        .filter(|(start, _)| *start < limit)
        .map(|&(start, end)| (start, end.min(limit)))
        .collect()
}

/// Coalesces sorted character indices into `(start, end)` ranges.
///
/// # Examples
///
/// ```
/// use galleria::ui::helpers::indices_to_ranges;
///
/// assert_eq!(indices_to_ranges(&[0, 1, 2, 5, 7, 8]), vec![(0, 3), (5, 6), (7, 9)]);
/// ```
#[must_use]
pub fn indices_to_ranges(indices: &[usize]) -> Vec<(usize, usize)> {
    let mut ranges = Vec::new();
    let mut start = None;
    let mut prev = None;

    for &idx in indices {
        match (start, prev) {
            (Some(_), Some(p)) if idx == p + 1 => {
                prev = Some(idx);
            }
            (Some(s), Some(p)) => {
                ranges.push((s, p + 1));
                start = Some(idx);
                prev = Some(idx);
            }
            _ => {
                start = Some(idx);
                prev = Some(idx);
            }
        }
    }

    if let (Some(s), Some(p)) = (start, prev) {
        ranges.push((s, p + 1));
    }

    ranges
}

/// Renders text with highlighted character ranges for query matches.
///
/// Ranges are `(start, end)` character indices, start inclusive and end
/// exclusive, sorted and non-overlapping. When `is_selected` is `true` the
/// selection colors are restored after each highlight so the card background
/// stays intact.
pub fn render_highlighted_text(
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
) {
    if ranges.is_empty() {
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
            let normal_section: String = chars[current_pos..start].iter().collect();
            print!("{normal_section}");
        }

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted_section: String = chars[start..end].iter().collect();
        print!("{highlighted_section}");
        print!("{}", Theme::reset());

        if is_selected {
            print!("{}", Theme::fg(&theme.colors.selection_fg));
            print!("{}", Theme::bg(&theme.colors.selection_bg));
        } else {
            print!("{}", Theme::fg(&theme.colors.text_normal));
        }

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_characters_not_bytes() {
        assert_eq!(truncate("café, crème", 6), "café,…");
        assert_eq!(char_len(&truncate("ééééééé", 4)), 4);
    }

    #[test]
    fn padding_fills_to_width() {
        assert_eq!(padding("ab", 5), "   ");
        assert_eq!(padding("abcdef", 3), "");
    }

    #[test]
    fn clip_drops_ranges_past_limit() {
        assert_eq!(clip_ranges(&[(0, 2), (4, 9), (12, 14)], 6), vec![(0, 2), (4, 6)]);
    }

    #[test]
    fn empty_indices_make_no_ranges() {
        assert!(indices_to_ranges(&[]).is_empty());
        assert_eq!(indices_to_ranges(&[4]), vec![(4, 5)]);
    }
}
