//! Incremental paginated search session.
//!
//! [`SearchSession`] is the state machine behind the gallery: it owns the
//! active query, the page cursor, the accumulated items, the reported total
//! and the fetch status, and it decides when a fetch is needed. It performs
//! no I/O. Transitions hand back a [`FetchTicket`] describing the fetch to
//! perform; the caller runs it and feeds the outcome to
//! [`SearchSession::complete`].
//!
//! # State Machine
//!
//! ```text
//!          submit / more / retry            success
//!   Idle ───────────────────────▶ Loading ─────────▶ Loaded ──┐
//!                                  │  ▲                        │
//!                          failure │  └──── submit / more ─────┘
//!                                  ▼             ▲
//!                               Errored ─────────┘ submit / more / retry
//! ```
//!
//! # Stale Responses
//!
//! Every query change bumps the session generation. Tickets carry the
//! generation they were issued under, and a completion is applied only when
//! its ticket equals the in-flight one. A response for a superseded query is
//! therefore dropped instead of leaking into the new accumulator.

use super::notice::{classify_page, Notice};
use super::PAGE_SIZE;
use crate::domain::{FetchError, GalleryItem, ResultPage, SearchQuery};
use chrono::{DateTime, Utc};

/// Fetch status of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStatus {
    /// No query submitted yet.
    #[default]
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The last fetch succeeded.
    Loaded,
    /// The last fetch failed.
    Errored,
}

/// Tag identifying one dispatched fetch.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FetchTicket {
    /// Session generation at dispatch time.
    pub generation: u64,
    /// Query to fetch.
    pub query: SearchQuery,
    /// 1-based page to fetch.
    pub page: u32,
}

/// A failed fetch retained for presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionError {
    pub error: FetchError,
    pub occurred_at: DateTime<Utc>,
}

/// Result of a user intent.
///
/// At most one of the fields is set by the current transitions, but callers
/// treat them independently.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Transition {
    /// Fetch the caller must perform.
    pub dispatch: Option<FetchTicket>,
    /// Notice to show the user.
    pub notice: Option<Notice>,
}

impl Transition {
    const fn none() -> Self {
        Self {
            dispatch: None,
            notice: None,
        }
    }

    const fn dispatch(ticket: FetchTicket) -> Self {
        Self {
            dispatch: Some(ticket),
            notice: None,
        }
    }

    const fn notice(notice: Notice) -> Self {
        Self {
            dispatch: None,
            notice: Some(notice),
        }
    }

    /// Returns `true` if the transition neither fetches nor notifies.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.dispatch.is_none() && self.notice.is_none()
    }
}

/// Result of feeding a fetch outcome back into the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Items were appended.
    Merged {
        /// Number of items actually appended.
        appended: usize,
        /// Notice produced by classifying the page.
        notice: Option<Notice>,
    },
    /// The fetch failed and the error is now retained.
    Failed,
    /// The ticket no longer matches; nothing changed.
    Discarded,
}

/// Paginated search state for one gallery view.
#[derive(Debug, Clone)]
pub struct SearchSession {
    query: Option<SearchQuery>,
    page: u32,
    items: Vec<GalleryItem>,
    total_hits: Option<u64>,
    status: SessionStatus,
    error: Option<SessionError>,
    generation: u64,
    in_flight: Option<FetchTicket>,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchSession {
    /// Creates an idle session with no query.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            query: None,
            page: 1,
            items: Vec::new(),
            total_hits: None,
            status: SessionStatus::Idle,
            error: None,
            generation: 0,
            in_flight: None,
        }
    }

    #[must_use]
    pub const fn query(&self) -> Option<&SearchQuery> {
        self.query.as_ref()
    }

    /// The page most recently requested (1 before any query).
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Accumulated items for the active query, in fetch order.
    #[must_use]
    pub fn items(&self) -> &[GalleryItem] {
        &self.items
    }

    #[must_use]
    pub const fn total_hits(&self) -> Option<u64> {
        self.total_hits
    }

    #[must_use]
    pub const fn status(&self) -> SessionStatus {
        self.status
    }

    #[must_use]
    pub const fn error(&self) -> Option<&SessionError> {
        self.error.as_ref()
    }

    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub const fn in_flight(&self) -> Option<&FetchTicket> {
        self.in_flight.as_ref()
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.status, SessionStatus::Loading)
    }

    /// Returns `true` when a "load more" control should be offered.
    ///
    /// Stricter than the [`request_more`](Self::request_more) precondition:
    /// the total must be known, so the control stays hidden until the first
    /// page arrives.
    #[must_use]
    pub fn has_more(&self) -> bool {
        !self.is_loading()
            && self
                .total_hits
                .is_some_and(|total| Self::len_u64(&self.items) < total)
    }

    /// Handles a query submission.
    ///
    /// Blank text produces [`Notice::EmptyQuery`]; text equal to the active
    /// query produces [`Notice::DuplicateQuery`]. Neither changes state. Any
    /// other text starts a new session generation and dispatches page 1.
    pub fn submit_query(&mut self, text: &str) -> Transition {
        let Some(query) = SearchQuery::parse(text) else {
            tracing::debug!("ignoring blank query submission");
            return Transition::notice(Notice::EmptyQuery);
        };

        if self.query.as_ref() == Some(&query) {
            tracing::debug!(query = %query, "duplicate query submission");
            return Transition::notice(Notice::DuplicateQuery { query });
        }

        if let Some(stale) = &self.in_flight {
            tracing::debug!(
                stale_generation = stale.generation,
                stale_page = stale.page,
                "superseding in-flight fetch"
            );
        }

        self.generation += 1;
        self.query = Some(query.clone());
        self.page = 1;
        self.items.clear();
        self.total_hits = None;
        self.error = None;

        tracing::debug!(
            query = ?self.query,
            generation = self.generation,
            "query changed, session reset"
        );

        Transition::dispatch(self.begin_fetch(query))
    }

    /// Handles a "load more" request.
    ///
    /// No-op while loading, before any query, or once the accumulator has
    /// reached the known total.
    pub fn request_more(&mut self) -> Transition {
        if self.is_loading() {
            tracing::debug!("load more rejected: fetch in flight");
            return Transition::none();
        }
        let Some(query) = self.query.clone() else {
            tracing::debug!("load more rejected: no active query");
            return Transition::none();
        };
        if let Some(total) = self.total_hits {
            if Self::len_u64(&self.items) >= total {
                tracing::debug!(total, "load more rejected: results exhausted");
                return Transition::none();
            }
        }

        self.page += 1;
        tracing::debug!(page = self.page, "requesting next page");

        Transition::dispatch(self.begin_fetch(query))
    }

    /// Re-dispatches the current page after a failure.
    pub fn retry(&mut self) -> Transition {
        if self.status != SessionStatus::Errored {
            return Transition::none();
        }
        let Some(query) = self.query.clone() else {
            return Transition::none();
        };

        tracing::debug!(page = self.page, "retrying failed fetch");
        Transition::dispatch(self.begin_fetch(query))
    }

    /// Clears the retained error. Returns `true` if there was one.
    pub fn dismiss_error(&mut self) -> bool {
        self.error.take().is_some()
    }

    /// Applies the outcome of the fetch identified by `ticket`.
    pub fn complete(
        &mut self,
        ticket: &FetchTicket,
        outcome: Result<ResultPage, FetchError>,
    ) -> Completion {
        if self.in_flight.as_ref() != Some(ticket) || ticket.generation != self.generation {
            tracing::debug!(
                ticket_generation = ticket.generation,
                ticket_page = ticket.page,
                current_generation = self.generation,
                "discarding stale fetch result"
            );
            return Completion::Discarded;
        }

        self.in_flight = None;

        match outcome {
            Ok(page) => {
                // classified against what this fetch reported, not the clamped total
                let reported = page.total_hits;
                let appended = self.merge(page);
                self.status = SessionStatus::Loaded;
                self.error = None;

                let notice = classify_page(self.page, reported, PAGE_SIZE).notice();

                tracing::debug!(
                    page = self.page,
                    appended,
                    accumulated = self.items.len(),
                    total_hits = reported,
                    "fetch merged"
                );

                Completion::Merged { appended, notice }
            }
            Err(error) => {
                tracing::warn!(page = self.page, error = %error, "fetch failed");
                self.status = SessionStatus::Errored;
                self.error = Some(SessionError {
                    error,
                    occurred_at: Utc::now(),
                });
                Completion::Failed
            }
        }
    }

    /// Appends a page, never letting the accumulator outgrow the total.
    fn merge(&mut self, page: ResultPage) -> usize {
        let held = Self::len_u64(&self.items);
        if page.total_hits < held {
            tracing::warn!(
                held,
                total_hits = page.total_hits,
                "total hits shrank below the accumulated items"
            );
        }
        self.total_hits = Some(page.total_hits.max(held));

        let room = page.total_hits.saturating_sub(held);
        let room = usize::try_from(room).unwrap_or(usize::MAX);
        let received = page.items.len();

        if received > room {
            tracing::warn!(
                received,
                room,
                total_hits = page.total_hits,
                "gateway returned more items than total hits allow, truncating"
            );
        }

        let appended = received.min(room);
        self.items.extend(page.items.into_iter().take(appended));
        appended
    }

    fn begin_fetch(&mut self, query: SearchQuery) -> FetchTicket {
        let ticket = FetchTicket {
            generation: self.generation,
            query,
            page: self.page,
        };
        self.status = SessionStatus::Loading;
        self.in_flight = Some(ticket.clone());
        ticket
    }

    fn len_u64(items: &[GalleryItem]) -> u64 {
        u64::try_from(items.len()).unwrap_or(u64::MAX)
    }
}
