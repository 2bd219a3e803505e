//! View model types representing renderable UI state.
//!
//! View models are created via `AppState::compute_viewmodel()` and consumed by
//! the renderer. They contain no business logic, only display-ready data:
//! truncated captions, highlight ranges, grid geometry and the windowed slice
//! of cards that fits the pane.

use crate::search::NoticeLevel;

/// Narrowest a grid card may be, in terminal columns.
pub const MIN_CARD_WIDTH: usize = 32;

/// Rows occupied by one card, including the gap below it.
pub const CARD_HEIGHT: usize = 4;

/// Number of grid columns that fit in `cols` terminal columns.
///
/// Every card is at least [`MIN_CARD_WIDTH`] wide and the grid always has at
/// least one column, so very narrow panes get a single truncated column.
///
/// # Examples
///
/// ```
/// use galleria::ui::viewmodel::grid_columns;
///
/// assert_eq!(grid_columns(20), 1);
/// assert_eq!(grid_columns(64), 2);
/// assert_eq!(grid_columns(100), 3);
/// ```
#[must_use]
pub const fn grid_columns(cols: usize) -> usize {
    let columns = cols / MIN_CARD_WIDTH;
    if columns == 0 {
        1
    } else {
        columns
    }
}

/// Complete UI view model for rendering.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    /// Header information (title, query, counts).
    pub header: HeaderInfo,

    /// Search input box.
    pub search_bar: SearchBarInfo,

    /// Transient notice, if one is showing.
    pub banner: Option<BannerInfo>,

    /// Retained fetch error, if any.
    pub error: Option<ErrorInfo>,

    /// Visible window of the result grid.
    pub grid: GridInfo,

    /// Load-more / loading / end-of-results line.
    pub status: StatusLine,

    /// Message shown instead of the grid when there are no items.
    pub empty_state: Option<EmptyState>,

    /// Lightbox contents when the viewer is open.
    pub viewer: Option<ViewerInfo>,

    /// Footer information (keybindings, help text).
    pub footer: FooterInfo,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Title text to display in the header.
    pub title: String,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding help text (e.g., "hjkl: navigate  Enter: view  q: quit").
    pub keybindings: String,
}

/// Search bar display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Draft query text.
    pub query: String,

    /// Whether the search bar has keyboard focus.
    pub is_focused: bool,
}

/// A notice rendered as a one-line banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerInfo {
    pub message: String,
    pub level: NoticeLevel,
}

/// A retained fetch error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    /// Full user-facing message.
    pub message: String,

    /// UTC time of the failure, `HH:MM:SS`.
    pub occurred_at: String,
}

/// Visible part of the result grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridInfo {
    /// Number of card columns.
    pub columns: usize,

    /// Width of each card in terminal columns.
    pub card_width: usize,

    /// Cards in the visible window, row-major.
    pub cards: Vec<CardInfo>,
}

/// Display information for a single result card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardInfo {
    /// 1-based position in the accumulator.
    pub number: usize,

    /// Caption truncated to the card width.
    pub caption: String,

    /// Character ranges of `caption` to highlight.
    ///
    /// Each tuple is `(start_index, end_index)` in character indices.
    pub highlight_ranges: Vec<(usize, usize)>,

    /// Dimensions and likes, e.g. `"1920x1280  ♥ 12"`.
    pub meta: String,

    /// Uploader, already truncated.
    pub author: String,

    /// Whether this card is currently selected.
    pub is_selected: bool,
}

/// Line below the grid describing pagination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusLine {
    /// Nothing to say (no query, or zero hits).
    Hidden,

    /// A fetch is in flight.
    Loading {
        /// Page being fetched.
        page: u32,
    },

    /// More results can be requested.
    LoadMore { shown: usize, total: u64 },

    /// Every reachable result has been fetched.
    Exhausted { shown: usize, total: u64 },
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message (e.g., "No images found").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}

/// Lightbox contents for the selected item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerInfo {
    /// `"3 / 25"` style position.
    pub position: String,

    /// Full caption (wrapped by the renderer).
    pub caption: String,

    /// Labelled detail lines, e.g. `("Size", "1920x1280")`.
    pub details: Vec<(String, String)>,

    /// Full-resolution URL.
    pub full_url: String,
}
