//! Paginated search state.
//!
//! - [`session`]: The search session state machine and fetch tickets
//! - [`notice`]: Outcome classification and one-shot user notices

pub mod notice;
pub mod session;

#[cfg(test)]
mod properties;

pub use notice::{classify_page, Notice, NoticeLevel, PageOutcome};
pub use session::{Completion, FetchTicket, SearchSession, SessionError, SessionStatus, Transition};

/// Number of items requested per page.
pub const PAGE_SIZE: u32 = 12;
