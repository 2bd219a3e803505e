//! Application state management and view model computation.
//!
//! [`AppState`] wraps the [`SearchSession`] with everything the plugin needs
//! to present it: keyboard focus, the draft query being typed, grid
//! selection, the lightbox, the notice banner and the configured gateway.
//!
//! # View Model Computation
//!
//! The `compute_viewmodel` method transforms state into a renderable UI
//! representation, handling grid geometry, windowing around the selection,
//! caption truncation and query highlighting.

use super::modes::{InputMode, ViewMode};
use crate::domain::GalleryItem;
use crate::gateway::Gateway;
use crate::search::{Notice, SearchSession, SessionStatus};
use crate::ui::helpers::{char_len, clip_ranges, indices_to_ranges, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    grid_columns, BannerInfo, CardInfo, EmptyState, ErrorInfo, FooterInfo, GridInfo, HeaderInfo,
    SearchBarInfo, StatusLine, UIViewModel, ViewerInfo, CARD_HEIGHT,
};
use fuzzy_matcher::skim::SkimMatcherV2;

/// Default banner lifetime in seconds.
pub const DEFAULT_NOTICE_SECONDS: u32 = 3;

/// Default program used to open full-resolution images.
pub const DEFAULT_OPENER: &str = "xdg-open";

/// Rows used by everything except the grid, without an error line.
///
/// Blank, header, border, search box (3), banner, status, border, footer.
const CHROME_ROWS: usize = 11;

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Paginated search state.
    pub session: SearchSession,

    /// Current keyboard focus.
    pub input_mode: InputMode,

    /// Grid or lightbox.
    pub view_mode: ViewMode,

    /// Text in the search bar, submitted on Enter.
    pub draft: String,

    /// Zero-based index of the selected card within the accumulator.
    pub selected_index: usize,

    /// Notice currently shown as a banner.
    pub banner: Option<Notice>,

    /// Number of banner timers armed but not yet fired.
    ///
    /// Only the timer that brings this back to zero clears the banner, so a
    /// newer notice is never cut short by an older notice's timer.
    pub pending_notice_timers: usize,

    /// Last known pane height.
    pub rows: usize,

    /// Last known pane width.
    pub cols: usize,

    /// Color scheme for UI rendering.
    pub theme: Theme,

    /// Search API endpoint and filters.
    pub gateway: Gateway,

    /// Banner lifetime in seconds.
    pub notice_seconds: u32,

    /// Program used to open full-resolution images.
    pub opener: String,
}

impl AppState {
    /// Creates an idle application state with the search bar focused.
    #[must_use]
    pub fn new(theme: Theme, gateway: Gateway) -> Self {
        Self {
            session: SearchSession::new(),
            input_mode: InputMode::Typing,
            view_mode: ViewMode::Grid,
            draft: String::new(),
            selected_index: 0,
            banner: None,
            pending_notice_timers: 0,
            rows: 24,
            cols: 80,
            theme,
            gateway,
            notice_seconds: DEFAULT_NOTICE_SECONDS,
            opener: DEFAULT_OPENER.to_string(),
        }
    }

    /// Number of grid columns at the current pane width.
    #[must_use]
    pub const fn columns(&self) -> usize {
        grid_columns(self.cols)
    }

    /// Returns the currently selected item, if any.
    #[must_use]
    pub fn selected_item(&self) -> Option<&GalleryItem> {
        self.session.items().get(self.selected_index)
    }

    /// Returns the item open in the viewer, if the viewer is open.
    #[must_use]
    pub fn viewed_item(&self) -> Option<&GalleryItem> {
        match self.view_mode {
            ViewMode::Viewer { index } => self.session.items().get(index),
            ViewMode::Grid => None,
        }
    }

    pub fn move_selection_left(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn move_selection_right(&mut self) {
        let last = self.session.items().len().saturating_sub(1);
        self.selected_index = (self.selected_index + 1).min(last);
    }

    pub fn move_selection_up(&mut self) {
        if self.selected_index >= self.columns() {
            self.selected_index -= self.columns();
        }
    }

    /// Moves one row down, landing on the last card when the row below is
    /// only partly filled.
    pub fn move_selection_down(&mut self) {
        let len = self.session.items().len();
        if len == 0 {
            return;
        }
        let current_row = self.selected_index / self.columns();
        let last_row = (len - 1) / self.columns();
        if current_row < last_row {
            self.selected_index = (self.selected_index + self.columns()).min(len - 1);
        }
    }

    /// Keeps the selection inside the accumulator.
    pub fn clamp_selection(&mut self) {
        let len = self.session.items().len();
        self.selected_index = if len == 0 {
            0
        } else {
            self.selected_index.min(len - 1)
        };
    }

    /// Computes a renderable UI view model from current state and pane size.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let _span = tracing::trace_span!(
            "compute_viewmodel",
            rows,
            cols,
            items = self.session.items().len()
        )
        .entered();

        let error = self.compute_error();
        let chrome = CHROME_ROWS + usize::from(error.is_some());

        UIViewModel {
            header: self.compute_header(),
            search_bar: SearchBarInfo {
                query: self.draft.clone(),
                is_focused: self.input_mode == InputMode::Typing,
            },
            banner: self.banner.as_ref().map(|notice| BannerInfo {
                message: notice.message(),
                level: notice.level(),
            }),
            error,
            grid: self.compute_grid(rows.saturating_sub(chrome), cols),
            status: self.compute_status(),
            empty_state: self.compute_empty_state(),
            viewer: self.compute_viewer(),
            footer: self.compute_footer(),
        }
    }

    /// Builds the visible window of cards.
    ///
    /// # Windowing Algorithm
    ///
    /// 1. Convert available rows into whole card rows (at least one)
    /// 2. Center the window on the selected card's row
    /// 3. Pull the window back if it would run past the last row
    fn compute_grid(&self, available_rows: usize, cols: usize) -> GridInfo {
        let columns = grid_columns(cols);
        let card_width = cols / columns;
        let items = self.session.items();

        if items.is_empty() {
            return GridInfo {
                columns,
                card_width,
                cards: Vec::new(),
            };
        }

        let visible_rows = (available_rows / CARD_HEIGHT).max(1);
        let total_rows = items.len().div_ceil(columns);
        let selected_row = self.selected_index / columns;

        let mut start_row = selected_row.saturating_sub(visible_rows / 2);
        let end_row = (start_row + visible_rows).min(total_rows);
        if end_row - start_row < visible_rows && total_rows >= visible_rows {
            start_row = end_row - visible_rows;
        }

        let start = start_row * columns;
        let end = (end_row * columns).min(items.len());

        let matcher = self.session.query().map(|_| SkimMatcherV2::default());
        let inner_width = card_width.saturating_sub(2);

        let cards = items[start..end]
            .iter()
            .enumerate()
            .map(|(offset, item)| {
                let index = start + offset;
                self.compute_card(item, index, inner_width, matcher.as_ref())
            })
            .collect();

        GridInfo {
            columns,
            card_width,
            cards,
        }
    }

    fn compute_card(
        &self,
        item: &GalleryItem,
        index: usize,
        width: usize,
        matcher: Option<&SkimMatcherV2>,
    ) -> CardInfo {
        let caption = truncate(&item.caption, width);
        let visible = if caption == item.caption {
            char_len(&caption)
        } else {
            char_len(&caption).saturating_sub(1)
        };

        let highlight_ranges = matcher.map_or_else(Vec::new, |m| {
            clip_ranges(&self.compute_highlight_ranges(&item.caption, m), visible)
        });

        let meta = match item.dimensions() {
            Some(dimensions) => format!("{dimensions}  ♥ {}", item.likes),
            None => format!("♥ {}", item.likes),
        };

        CardInfo {
            number: index + 1,
            caption,
            highlight_ranges,
            meta: truncate(&meta, width),
            author: truncate(&item.author, width),
            is_selected: index == self.selected_index && self.input_mode == InputMode::Browsing,
        }
    }

    /// Computes character ranges of `text` matching the active query.
    ///
    /// Each whitespace-separated query term is matched on its own, so
    /// `"red fox"` highlights both words in `"fox, red, animal"`.
    fn compute_highlight_ranges(&self, text: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
        use fuzzy_matcher::FuzzyMatcher;

        let Some(query) = self.session.query() else {
            return Vec::new();
        };

        let mut indices: Vec<usize> = query
            .as_str()
            .split_whitespace()
            .map(str::to_lowercase)
            .filter_map(|term| matcher.fuzzy_indices(text, &term))
            .flat_map(|(_score, term_indices)| term_indices)
            .collect();
        indices.sort_unstable();
        indices.dedup();

        indices_to_ranges(&indices)
    }

    fn compute_header(&self) -> HeaderInfo {
        let title = match (self.session.query(), self.session.total_hits()) {
            (Some(query), Some(total)) => format!(
                " Galleria: {query} ({}/{total}) ",
                self.session.items().len()
            ),
            (Some(query), None) => format!(" Galleria: {query} "),
            (None, _) => " Galleria ".to_string(),
        };
        HeaderInfo { title }
    }

    fn compute_error(&self) -> Option<ErrorInfo> {
        self.session.error().map(|retained| ErrorInfo {
            message: format!("Whoops, something went wrong: {}", retained.error),
            occurred_at: retained.occurred_at.format("%H:%M:%S").to_string(),
        })
    }

    fn compute_status(&self) -> StatusLine {
        let shown = self.session.items().len();
        match (self.session.status(), self.session.total_hits()) {
            (SessionStatus::Loading, _) => StatusLine::Loading {
                page: self.session.page(),
            },
            (_, Some(total)) if total > 0 && self.session.has_more() => {
                StatusLine::LoadMore { shown, total }
            }
            (_, Some(total)) if total > 0 => StatusLine::Exhausted { shown, total },
            _ => StatusLine::Hidden,
        }
    }

    fn compute_empty_state(&self) -> Option<EmptyState> {
        if !self.session.items().is_empty() {
            return None;
        }

        let (message, subtitle) = match (self.session.status(), self.session.query()) {
            (SessionStatus::Idle, _) | (_, None) => (
                "Search for images".to_string(),
                "Type a query and press Enter".to_string(),
            ),
            (SessionStatus::Loading, Some(query)) => (
                "Searching…".to_string(),
                format!("Looking for \"{query}\""),
            ),
            (SessionStatus::Errored, Some(_)) => (
                "Nothing to show".to_string(),
                "Press r to retry or / to change the query".to_string(),
            ),
            (SessionStatus::Loaded, Some(query)) => (
                "No images found".to_string(),
                format!("Nothing matches \"{query}\", try another query"),
            ),
        };

        Some(EmptyState { message, subtitle })
    }

    fn compute_viewer(&self) -> Option<ViewerInfo> {
        let ViewMode::Viewer { index } = self.view_mode else {
            return None;
        };
        let item = self.session.items().get(index)?;

        let or_unknown = |value: String| {
            if value.is_empty() {
                "unknown".to_string()
            } else {
                value
            }
        };

        Some(ViewerInfo {
            position: format!("{} / {}", index + 1, self.session.items().len()),
            caption: item.caption.clone(),
            details: vec![
                ("Image".to_string(), format!("#{}", item.id)),
                ("Size".to_string(), item.dimensions().unwrap_or_else(|| "unknown".to_string())),
                ("Author".to_string(), or_unknown(item.author.clone())),
                ("Likes".to_string(), item.likes.to_string()),
                ("Preview".to_string(), or_unknown(item.thumbnail_url.clone())),
            ],
            full_url: item.full_url.clone(),
        })
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match (self.view_mode, self.input_mode) {
            (ViewMode::Viewer { .. }, _) => {
                "h/l: prev/next  o: open full image  Esc/q: close".to_string()
            }
            (ViewMode::Grid, InputMode::Typing) => {
                "Enter: search  Esc/Tab: results  Type to edit query".to_string()
            }
            (ViewMode::Grid, InputMode::Browsing) => {
                let mut keys =
                    "hjkl: navigate  Enter: view  m: more  /: search  q: quit".to_string();
                if self.session.error().is_some() {
                    keys.push_str("  r: retry  x: dismiss");
                }
                keys
            }
        };

        FooterInfo { keybindings }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FetchError, ResultPage};

    fn item(id: u64, caption: &str) -> GalleryItem {
        GalleryItem::new(id, format!("t{id}"), caption, format!("f{id}"))
    }

    fn loaded_state(count: u64, total: u64, cols: usize) -> AppState {
        let mut state = AppState::new(Theme::default(), Gateway::default());
        state.cols = cols;
        let ticket = state.session.submit_query("red fox").dispatch.unwrap();
        let items = (0..count).map(|id| item(id, "fox, red, animal")).collect();
        state.session.complete(&ticket, Ok(ResultPage::new(items, total)));
        state.input_mode = InputMode::Browsing;
        state
    }

    #[test]
    fn selection_moves_by_rows_and_clamps() {
        let mut state = loaded_state(7, 30, 96);
        assert_eq!(state.columns(), 3);

        state.move_selection_down();
        assert_eq!(state.selected_index, 3);
        state.move_selection_down();
        // last row holds only index 6
        assert_eq!(state.selected_index, 6);
        state.move_selection_down();
        assert_eq!(state.selected_index, 6);

        state.move_selection_up();
        assert_eq!(state.selected_index, 3);
        state.move_selection_left();
        state.move_selection_left();
        assert_eq!(state.selected_index, 1);
        state.move_selection_up();
        assert_eq!(state.selected_index, 1);
    }

    #[test]
    fn right_stops_at_last_item() {
        let mut state = loaded_state(2, 2, 80);
        state.move_selection_right();
        state.move_selection_right();
        assert_eq!(state.selected_index, 1);
    }

    #[test]
    fn grid_window_follows_selection() {
        let mut state = loaded_state(40, 100, 64);
        // 2 columns, 24 - 11 = 13 rows → 3 card rows
        state.selected_index = 39;
        let vm = state.compute_viewmodel(24, 64);

        assert_eq!(vm.grid.columns, 2);
        assert_eq!(vm.grid.card_width, 32);
        assert_eq!(vm.grid.cards.len(), 6);
        assert_eq!(vm.grid.cards.first().map(|c| c.number), Some(35));
        assert!(vm.grid.cards.last().unwrap().is_selected);
    }

    #[test]
    fn captions_highlight_every_query_term() {
        let state = loaded_state(1, 1, 80);
        let vm = state.compute_viewmodel(24, 80);
        let card = &vm.grid.cards[0];

        assert_eq!(card.caption, "fox, red, animal");
        assert_eq!(card.highlight_ranges, vec![(0, 3), (5, 8)]);
    }

    #[test]
    fn status_line_tracks_pagination() {
        let state = loaded_state(12, 30, 80);
        assert_eq!(
            state.compute_viewmodel(24, 80).status,
            StatusLine::LoadMore { shown: 12, total: 30 }
        );

        let state = loaded_state(5, 5, 80);
        assert_eq!(
            state.compute_viewmodel(24, 80).status,
            StatusLine::Exhausted { shown: 5, total: 5 }
        );

        let mut state = loaded_state(12, 30, 80);
        state.session.request_more();
        assert_eq!(
            state.compute_viewmodel(24, 80).status,
            StatusLine::Loading { page: 2 }
        );
    }

    #[test]
    fn zero_hits_show_empty_state_without_status() {
        let state = loaded_state(0, 0, 80);
        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.status, StatusLine::Hidden);
        assert_eq!(vm.empty_state.unwrap().message, "No images found");
        assert_eq!(vm.header.title, " Galleria: red fox (0/0) ");
    }

    #[test]
    fn error_is_presented_with_prefix() {
        let mut state = AppState::new(Theme::default(), Gateway::default());
        let ticket = state.session.submit_query("cats").dispatch.unwrap();
        state.session.complete(
            &ticket,
            Err(FetchError::Network {
                status: 429,
                message: "rate limited".to_string(),
            }),
        );
        state.input_mode = InputMode::Browsing;

        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(
            vm.error.unwrap().message,
            "Whoops, something went wrong: request failed with status 429: rate limited"
        );
        assert!(vm.footer.keybindings.contains("r: retry"));
    }

    #[test]
    fn viewer_describes_the_open_item() {
        let mut state = loaded_state(3, 3, 80);
        state.view_mode = ViewMode::Viewer { index: 1 };

        let viewer = state.compute_viewmodel(24, 80).viewer.unwrap();
        assert_eq!(viewer.position, "2 / 3");
        assert_eq!(viewer.full_url, "f1");
        assert!(viewer
            .details
            .contains(&("Author".to_string(), "unknown".to_string())));
    }
}
