//! Composable UI component renderers.
//!
//! # Components
//!
//! - [`header`]: Title bar with query and counts
//! - [`search`]: Search input box
//! - [`banner`]: Notice banner and error line
//! - [`grid`]: Result cards
//! - [`status`]: Load-more / loading / end-of-results line
//! - [`viewer`]: Lightbox detail panel
//! - [`empty`]: Empty state message
//! - [`footer`]: Keybinding hints
//!
//! # Layout Modes
//!
//! - [`render_grid_mode`]: Header + `SearchBar` + Banner + Grid + Status + Footer
//! - [`render_viewer_mode`]: Header + Banner + Viewer + Footer

mod banner;
mod empty;
mod footer;
mod grid;
mod header;
mod search;
mod status;
mod viewer;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{UIViewModel, ViewerInfo};

use banner::{render_banner, render_error};
use empty::render_empty_state;
use footer::render_footer;
use grid::render_grid;
use header::render_header;
use search::render_search_bar;
use status::render_status;
use viewer::render_viewer;

/// Renders a horizontal border line at the specified row.
///
/// Returns the next available row position (row + 1).
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the bottom border and footer, returning the status line row.
fn render_bottom(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) -> usize {
    let footer_row = rows.saturating_sub(1);
    let border_row = footer_row.saturating_sub(1);

    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);
    border_row.saturating_sub(1)
}

/// Renders the grid layout.
///
/// Layout structure:
/// ```text
/// [blank line]
/// [Header]
/// [Border]
/// [Search Bar - 3 lines]
/// [Banner]
/// [Error - only when present]
/// [Grid cards or empty state]
/// [Status line]
/// [Border]
/// [Footer]
/// ```
pub fn render_grid_mode(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    current_row = render_search_bar(current_row, &vm.search_bar, theme, cols);
    current_row = render_banner(current_row, vm.banner.as_ref(), theme, cols);
    if let Some(error) = &vm.error {
        current_row = render_error(current_row, error, theme, cols);
    }

    if let Some(empty) = &vm.empty_state {
        render_empty_state(current_row, empty, theme, cols);
    } else {
        render_grid(current_row, &vm.grid, theme);
    }

    let status_row = render_bottom(vm, theme, cols, rows);
    render_status(status_row, &vm.status, theme, cols);
}

/// Renders the viewer layout.
///
/// Layout structure:
/// ```text
/// [blank line]
/// [Header]
/// [Border]
/// [Banner]
/// [Viewer panel]
/// [Border]
/// [Footer]
/// ```
pub fn render_viewer_mode(vm: &UIViewModel, viewer: &ViewerInfo, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    current_row = render_banner(current_row, vm.banner.as_ref(), theme, cols);

    let last_row = render_bottom(vm, theme, cols, rows);
    render_viewer(current_row + 1, last_row, viewer, theme, cols);
}
