//! Fetch outcome classification and user-facing notices.
//!
//! [`classify_page`] decides which informational message, if any, a
//! successful fetch deserves. It is a pure function of the page cursor, the
//! reported total and the page size, so "hits left" is never stored anywhere.
//!
//! [`Notice`] is the one-shot event the presentation layer turns into a
//! transient banner. Notices are not session state: once emitted they are
//! gone from the session's point of view.

use crate::domain::SearchQuery;

/// Classification of one successful fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// Nothing worth telling the user.
    Quiet,
    /// The API reported zero hits for the query.
    NoMatches,
    /// First page of a query with hits.
    Found {
        /// Total hits reported by the API.
        total: u64,
    },
    /// The page-boundary formula says no further pages exist.
    EndOfResults,
}

/// Classifies a successful fetch of `page` for a query with `total_hits` hits.
///
/// Rules are checked in order and the first match wins:
///
/// 1. `total_hits == 0` → [`PageOutcome::NoMatches`]
/// 2. `page == 1` → [`PageOutcome::Found`]
/// 3. `total_hits - page * page_size <= 0` → [`PageOutcome::EndOfResults`]
/// 4. otherwise → [`PageOutcome::Quiet`]
///
/// Rule 3 counts whole pages rather than the items actually received. When
/// the API returns a short page in the middle of a result set the two views
/// disagree, and the page count wins.
///
/// # Examples
///
/// ```
/// use galleria::search::{classify_page, PageOutcome, PAGE_SIZE};
///
/// assert_eq!(classify_page(1, 25, PAGE_SIZE), PageOutcome::Found { total: 25 });
/// assert_eq!(classify_page(2, 25, PAGE_SIZE), PageOutcome::Quiet);
/// assert_eq!(classify_page(3, 25, PAGE_SIZE), PageOutcome::EndOfResults);
/// ```
#[must_use]
pub fn classify_page(page: u32, total_hits: u64, page_size: u32) -> PageOutcome {
    if total_hits == 0 {
        return PageOutcome::NoMatches;
    }
    if page == 1 {
        return PageOutcome::Found { total: total_hits };
    }

    let fetched_through = u64::from(page) * u64::from(page_size);
    if total_hits <= fetched_through {
        PageOutcome::EndOfResults
    } else {
        PageOutcome::Quiet
    }
}

impl PageOutcome {
    /// Converts the outcome into the notice it produces, if any.
    #[must_use]
    pub const fn notice(self) -> Option<Notice> {
        match self {
            Self::Quiet => None,
            Self::NoMatches => Some(Notice::NoMatches),
            Self::Found { total } => Some(Notice::Found { total }),
            Self::EndOfResults => Some(Notice::EndOfResults),
        }
    }
}

/// Severity of a notice, mapped to a banner color by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
}

/// A one-shot informational event for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The query matched nothing.
    NoMatches,
    /// The first page of a query arrived.
    Found {
        /// Total hits reported by the API.
        total: u64,
    },
    /// The last page of a query arrived.
    EndOfResults,
    /// The submitted query equals the active one; nothing was fetched.
    DuplicateQuery {
        /// The query that is already active.
        query: SearchQuery,
    },
    /// The submitted text was blank; nothing was fetched.
    EmptyQuery,
}

impl Notice {
    #[must_use]
    pub const fn level(&self) -> NoticeLevel {
        match self {
            Self::NoMatches | Self::EmptyQuery => NoticeLevel::Warning,
            Self::Found { .. } => NoticeLevel::Success,
            Self::EndOfResults | Self::DuplicateQuery { .. } => NoticeLevel::Info,
        }
    }

    /// Banner text for the notice.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::NoMatches => {
                "Sorry, there are no images matching your search query. Please try again."
                    .to_string()
            }
            Self::Found { total } => format!("Found {total} images"),
            Self::EndOfResults => {
                "We're sorry, but you've reached the end of search results.".to_string()
            }
            Self::DuplicateQuery { query } => {
                format!("Already showing results for \"{query}\"")
            }
            Self::EmptyQuery => "Type something to search for.".to_string(),
        }
    }
}
