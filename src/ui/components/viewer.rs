//! Lightbox viewer renderer.
//!
//! Replaces the search bar and grid with a detail panel for one item. A
//! terminal cannot show the image itself, so the panel carries the caption,
//! metadata and the full-resolution URL that `o` hands to the opener.

use crate::ui::helpers::{padding, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ViewerInfo;

const MARGIN: usize = 4;
const LABEL_WIDTH: usize = 9;

/// Renders the viewer panel between `row` and `last_row` inclusive.
pub fn render_viewer(row: usize, last_row: usize, viewer: &ViewerInfo, theme: &Theme, cols: usize) {
    let width = cols.saturating_sub(MARGIN * 2);
    let mut current_row = row;

    let mut line = |text: &str, color: &str, bold: bool| {
        if current_row > last_row {
            return;
        }
        let text = truncate(text, width);
        position_cursor(current_row, 1);
        print!("{}", " ".repeat(MARGIN));
        if bold {
            print!("{}", Theme::bold());
        }
        print!("{}", Theme::fg(color));
        print!("{text}");
        print!("{}", padding(&text, width + MARGIN));
        print!("{}", Theme::reset());
        current_row += 1;
    };

    line(&viewer.position, &theme.colors.accent_fg, true);
    line("", &theme.colors.text_normal, false);
    for caption_line in wrap(&viewer.caption, width) {
        line(&caption_line, &theme.colors.header_fg, true);
    }
    line("", &theme.colors.text_normal, false);
    for (label, value) in &viewer.details {
        let text = format!("{label:<LABEL_WIDTH$}{value}");
        line(&text, &theme.colors.text_normal, false);
    }
    line("", &theme.colors.text_normal, false);
    line("Full image", &theme.colors.text_dim, false);
    line(&viewer.full_url, &theme.colors.info_fg, false);
}

/// Greedy word wrap. Words longer than `width` are cut.
fn wrap(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }

    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let word = truncate(word, width);
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };

        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
