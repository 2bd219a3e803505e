//! Pagination status line renderer.

use crate::ui::helpers::{char_len, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::StatusLine;

/// Renders the load-more control, loading indicator or end-of-results line,
/// centered at `row`.
pub fn render_status(row: usize, status: &StatusLine, theme: &Theme, cols: usize) -> usize {
    let (text, color) = match status {
        StatusLine::Hidden => (String::new(), &theme.colors.text_dim),
        StatusLine::Loading { page } => (format!("Loading page {page}…"), &theme.colors.info_fg),
        StatusLine::LoadMore { shown, total } => (
            format!("[ m: Load more ]  {shown} of {total}"),
            &theme.colors.accent_fg,
        ),
        StatusLine::Exhausted { shown, total } => (
            format!("End of results  {shown} of {total}"),
            &theme.colors.text_dim,
        ),
    };

    let text_len = char_len(&text).min(cols);
    let padding = (cols.saturating_sub(text_len)) / 2;

    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", " ".repeat(padding));
    print!("{text}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + text_len)));
    print!("{}", Theme::reset());
    row + 1
}
