//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler returns a `Vec<Action>` after processing each event,
//! and the plugin runtime executes them in order. Actions are the boundary
//! between pure state transitions and host calls (`web_request`,
//! `set_timeout`, `run_command`, `hide_self`).

use crate::gateway::FetchRequest;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    ///
    /// Sent when the user explicitly requests to exit the plugin (e.g., pressing 'q').
    CloseFocus,

    /// Performs one HTTP GET against the search API.
    ///
    /// The response comes back later as a `WebRequestResult` event carrying
    /// the request's context map.
    Fetch(FetchRequest),

    /// Arms a timer whose expiry may clear the notice banner.
    ScheduleNoticeExpiry {
        /// Delay before the timer fires.
        seconds: u32,
    },

    /// Opens a URL with an external program on the host.
    OpenUrl {
        /// Program to run (e.g. `xdg-open`).
        opener: String,
        /// URL passed as the program's only argument.
        url: String,
    },
}
