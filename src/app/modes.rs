//! Input and view mode state types for the application.
//!
//! # State Machine
//!
//! Keyboard input is interpreted according to the [`InputMode`]:
//! - **Typing**: keys edit the search bar draft
//! - **Browsing**: keys move through the result grid
//!
//! The [`ViewMode`] decides what occupies the body of the pane:
//! - **Grid**: the responsive grid of result cards
//! - **Viewer**: a single item shown full-size (lightbox)
//!
//! ```text
//!   Typing ──Enter (fetch)/Esc/Tab──▶ Browsing ──Enter──▶ Viewer
//!     ▲                                 │   ▲               │
//!     └──────────────── / ──────────────┘   └──── Esc/q ────┘
//! ```

/// Current keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// The search bar has focus; characters edit the draft query.
    ///
    /// Accepts character input, backspace, enter (submit) and esc/tab to
    /// move focus to the grid.
    Typing,

    /// The result grid has focus.
    ///
    /// Accepts h/j/k/l for movement, enter to open the viewer, m to load
    /// more, r to retry, x to dismiss an error and / to edit the query.
    Browsing,
}

/// What the body of the pane shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Result grid.
    Grid,

    /// Lightbox viewer for the item at `index` in the accumulator.
    Viewer {
        /// Zero-based index into the session's items.
        index: usize,
    },
}
