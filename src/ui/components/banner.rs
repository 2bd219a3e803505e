//! Notice banner and error line renderers.

use crate::ui::helpers::{padding, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{BannerInfo, ErrorInfo};

/// Renders the notice banner line, or a blank line when there is none.
///
/// Returns the next available row.
pub fn render_banner(row: usize, banner: Option<&BannerInfo>, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    let Some(banner) = banner else {
        print!("{}", " ".repeat(cols));
        return row + 1;
    };

    let text = truncate(&format!(" ● {}", banner.message), cols);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(theme.colors.notice_fg(banner.level)));
    print!("{text}");
    print!("{}", padding(&text, cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the retained fetch error with its timestamp.
///
/// Returns the next available row.
pub fn render_error(row: usize, error: &ErrorInfo, theme: &Theme, cols: usize) -> usize {
    let stamp = format!(" [{}]", error.occurred_at);
    let message = truncate(
        &format!(" {}", error.message),
        cols.saturating_sub(stamp.len()),
    );

    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.error_fg));
    print!("{message}");
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{stamp}");
    print!("{}", padding(&format!("{message}{stamp}"), cols));
    print!("{}", Theme::reset());
    row + 1
}
