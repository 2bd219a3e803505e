//! Property-based tests for the paginated search session.
//!
//! Random sequences of user intents and fetch completions are replayed
//! against a [`SearchSession`], and the pagination invariants are checked
//! after every step:
//!
//! - The accumulator never outgrows the reported total
//! - A query change empties the accumulator and resets the cursor to 1
//! - The cursor only moves forward within one query
//! - "Load more" while a fetch is in flight changes nothing
//! - Completions for superseded tickets are discarded without effect
//! - The session is loading exactly when a fetch is in flight

use crate::domain::{FetchError, GalleryItem, ResultPage};
use crate::search::{Completion, FetchTicket, SearchSession, SessionStatus};
use proptest::prelude::*;

// ===== Arbitrary Strategies =====

#[derive(Debug, Clone)]
enum Step {
    Submit(String),
    LoadMore,
    Retry,
    DismissError,
    /// Completes the in-flight fetch, if any.
    CompleteCurrent(Outcome),
    /// Completes a previously dispatched ticket picked by index.
    CompleteOld(usize, Outcome),
}

#[derive(Debug, Clone)]
enum Outcome {
    Page { count: u64, total: u64 },
    Failure,
}

fn arb_query() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("   ".to_string()),
        Just("cat".to_string()),
        Just("red fox".to_string()),
        Just("  cat ".to_string()),
        "[a-z]{1,6}",
    ]
}

fn arb_outcome() -> impl Strategy<Value = Outcome> {
    prop_oneof![
        4 => (0u64..=15, 0u64..=60).prop_map(|(count, total)| Outcome::Page { count, total }),
        1 => Just(Outcome::Failure),
    ]
}

fn arb_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        2 => arb_query().prop_map(Step::Submit),
        3 => Just(Step::LoadMore),
        1 => Just(Step::Retry),
        1 => Just(Step::DismissError),
        4 => arb_outcome().prop_map(Step::CompleteCurrent),
        1 => (0usize..8, arb_outcome()).prop_map(|(i, o)| Step::CompleteOld(i, o)),
    ]
}

// ===== Helpers =====

fn into_result(outcome: &Outcome) -> Result<ResultPage, FetchError> {
    match outcome {
        Outcome::Page { count, total } => {
            let items = (0..*count)
                .map(|id| GalleryItem::new(id, "thumb", "caption", "full"))
                .collect();
            Ok(ResultPage::new(items, *total))
        }
        Outcome::Failure => Err(FetchError::Network {
            status: 503,
            message: "unavailable".to_string(),
        }),
    }
}

/// Observable session state compared before and after no-op steps.
fn snapshot(session: &SearchSession) -> (Option<String>, u32, usize, Option<u64>, SessionStatus, u64) {
    (
        session.query().map(|q| q.as_str().to_string()),
        session.page(),
        session.items().len(),
        session.total_hits(),
        session.status(),
        session.generation(),
    )
}

fn check_invariants(session: &SearchSession) -> Result<(), TestCaseError> {
    match session.total_hits() {
        Some(total) => prop_assert!(session.items().len() as u64 <= total),
        None => prop_assert!(session.items().is_empty()),
    }
    prop_assert!(session.page() >= 1);
    prop_assert_eq!(session.is_loading(), session.in_flight().is_some());
    if let Some(ticket) = session.in_flight() {
        prop_assert_eq!(ticket.generation, session.generation());
        prop_assert_eq!(ticket.page, session.page());
    }
    Ok(())
}

// ===== Properties =====

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn session_invariants_hold(steps in prop::collection::vec(arb_step(), 1..40)) {
        let mut session = SearchSession::new();
        let mut dispatched: Vec<FetchTicket> = Vec::new();

        for step in steps {
            let before = snapshot(&session);

            match step {
                Step::Submit(text) => {
                    let transition = session.submit_query(&text);
                    if let Some(ticket) = transition.dispatch {
                        prop_assert!(session.items().is_empty());
                        prop_assert_eq!(session.page(), 1);
                        prop_assert_eq!(session.total_hits(), None);
                        prop_assert_eq!(session.generation(), before.5 + 1);
                        dispatched.push(ticket);
                    } else {
                        prop_assert!(transition.notice.is_some());
                        prop_assert_eq!(&snapshot(&session), &before);
                    }
                }
                Step::LoadMore => {
                    let was_loading = session.is_loading();
                    let transition = session.request_more();
                    if was_loading {
                        prop_assert!(transition.is_noop());
                        prop_assert_eq!(&snapshot(&session), &before);
                    }
                    if let Some(ticket) = transition.dispatch {
                        prop_assert_eq!(session.page(), before.1 + 1);
                        dispatched.push(ticket);
                    }
                }
                Step::Retry => {
                    let was_errored = session.status() == SessionStatus::Errored;
                    let transition = session.retry();
                    prop_assert_eq!(transition.dispatch.is_some(), was_errored);
                    prop_assert_eq!(session.page(), before.1);
                    if let Some(ticket) = transition.dispatch {
                        dispatched.push(ticket);
                    }
                }
                Step::DismissError => {
                    session.dismiss_error();
                    prop_assert!(session.error().is_none());
                    prop_assert_eq!(&snapshot(&session), &before);
                }
                Step::CompleteCurrent(outcome) => {
                    let Some(ticket) = session.in_flight().cloned() else {
                        continue;
                    };
                    let completion = session.complete(&ticket, into_result(&outcome));
                    match (&outcome, completion) {
                        (Outcome::Page { count, total }, Completion::Merged { appended, .. }) => {
                            let room = total.saturating_sub(before.2 as u64);
                            prop_assert_eq!(appended as u64, (*count).min(room));
                            prop_assert_eq!(session.items().len(), before.2 + appended);
                            prop_assert_eq!(session.status(), SessionStatus::Loaded);
                            prop_assert!(session.error().is_none());
                        }
                        (Outcome::Failure, Completion::Failed) => {
                            prop_assert_eq!(session.items().len(), before.2);
                            prop_assert_eq!(session.status(), SessionStatus::Errored);
                            prop_assert!(session.error().is_some());
                        }
                        (outcome, completion) => {
                            prop_assert!(false, "unexpected {:?} for {:?}", completion, outcome);
                        }
                    }
                }
                Step::CompleteOld(index, outcome) => {
                    if dispatched.is_empty() {
                        continue;
                    }
                    let ticket = dispatched[index % dispatched.len()].clone();
                    if session.in_flight() == Some(&ticket) {
                        continue;
                    }
                    let completion = session.complete(&ticket, into_result(&outcome));
                    prop_assert_eq!(completion, Completion::Discarded);
                    prop_assert_eq!(&snapshot(&session), &before);
                }
            }

            if session.query().map(|q| q.as_str()) == before.0.as_deref() {
                prop_assert!(session.page() >= before.1);
            }
            check_invariants(&session)?;
        }
    }

    #[test]
    fn paging_walks_to_the_end(total in 1u64..=60) {
        let mut session = SearchSession::new();
        let mut ticket = session.submit_query("mountains").dispatch.unwrap();

        loop {
            let already = session.items().len() as u64;
            let count = (total - already).min(12);
            let completion = session.complete(&ticket, into_result(&Outcome::Page { count, total }));
            prop_assert!(matches!(completion, Completion::Merged { .. }), "expected a merge");

            match session.request_more().dispatch {
                Some(next) => ticket = next,
                None => break,
            }
        }

        prop_assert_eq!(session.items().len() as u64, total);
        prop_assert_eq!(u64::from(session.page()), total.div_ceil(12));
        prop_assert!(!session.has_more());
    }
}
