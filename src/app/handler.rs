//! Event handling and state transition logic.
//!
//! [`handle_event`] is the single entry point through which everything that
//! happens to the plugin flows: key presses already translated into intents
//! by `main.rs`, fetch completions decoded from `WebRequestResult`, timer
//! ticks and resizes. It mutates [`AppState`] and returns whether a render is
//! needed plus the [`Action`]s to execute.
//!
//! # Event Types
//!
//! - **Navigation**: `MoveLeft`, `MoveRight`, `MoveUp`, `MoveDown`
//! - **Search bar**: `Char`, `Backspace`, `Submit`, `FocusSearchBar`, `FocusGallery`
//! - **Pagination**: `LoadMore`, `Retry`, `DismissError`
//! - **Viewer**: `OpenViewer`, `CloseViewer`, `ViewerNext`, `ViewerPrev`, `OpenExternal`
//! - **System**: `FetchCompleted`, `NoticeTimerElapsed`, `Resize`, `CloseFocus`

use crate::app::modes::{InputMode, ViewMode};
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::{FetchError, ResultPage};
use crate::search::{Completion, FetchTicket, Notice, Transition};

/// Events triggered by user input or host callbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves the grid selection one card left.
    MoveLeft,
    /// Moves the grid selection one card right.
    MoveRight,
    /// Moves the grid selection one row up.
    MoveUp,
    /// Moves the grid selection one row down.
    MoveDown,

    /// Appends a character to the draft query.
    Char(char),
    /// Removes the last character from the draft query.
    Backspace,
    /// Submits the draft query.
    Submit,
    /// Gives keyboard focus to the search bar.
    FocusSearchBar,
    /// Gives keyboard focus to the result grid.
    FocusGallery,

    /// Requests the next page of results.
    LoadMore,
    /// Re-requests the page whose fetch failed.
    Retry,
    /// Hides the retained error message.
    DismissError,

    /// Opens the selected card in the viewer.
    OpenViewer,
    /// Closes the viewer, returning to the grid.
    CloseViewer,
    /// Shows the next item in the viewer.
    ViewerNext,
    /// Shows the previous item in the viewer.
    ViewerPrev,
    /// Opens the viewed or selected item's full image with the opener.
    OpenExternal,

    /// Hides the plugin pane.
    CloseFocus,

    /// The pane was resized.
    Resize {
        rows: usize,
        cols: usize,
    },

    /// A fetch finished.
    FetchCompleted {
        /// Ticket the fetch was dispatched with.
        ticket: FetchTicket,
        /// Decoded response or failure.
        outcome: std::result::Result<ResultPage, FetchError>,
    },

    /// A banner timer fired.
    NoticeTimerElapsed,
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Returns
///
/// A `(should_render, actions)` pair. `actions` may be empty.
///
/// # Errors
///
/// Currently infallible; the `Result` keeps the signature stable for
/// transitions that may fail in the future.
///
/// # Example
///
/// ```
/// use galleria::app::{handle_event, Action, AppState, Event};
/// use galleria::gateway::Gateway;
/// use galleria::ui::Theme;
///
/// let mut state = AppState::new(Theme::default(), Gateway::default());
/// for c in "cats".chars() {
///     handle_event(&mut state, &Event::Char(c))?;
/// }
/// let (render, actions) = handle_event(&mut state, &Event::Submit)?;
/// assert!(render);
/// assert!(matches!(actions[0], Action::Fetch(_)));
/// # Ok::<(), galleria::GalleryError>(())
/// ```
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::MoveLeft => {
            state.move_selection_left();
            Ok((true, vec![]))
        }
        Event::MoveRight => {
            state.move_selection_right();
            Ok((true, vec![]))
        }
        Event::MoveUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::MoveDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::Char(c) => {
            if state.input_mode != InputMode::Typing {
                return Ok((false, vec![]));
            }
            state.draft.push(*c);
            tracing::trace!(draft = %state.draft, char = %c, "draft query updated");
            Ok((true, vec![]))
        }
        Event::Backspace => {
            if state.input_mode != InputMode::Typing {
                return Ok((false, vec![]));
            }
            state.draft.pop();
            Ok((true, vec![]))
        }
        Event::Submit => {
            let transition = state.session.submit_query(&state.draft);
            if transition.dispatch.is_some() {
                state.selected_index = 0;
                state.view_mode = ViewMode::Grid;
                state.input_mode = InputMode::Browsing;
            }
            Ok((true, apply_transition(state, transition)))
        }
        Event::FocusSearchBar => {
            state.input_mode = InputMode::Typing;
            state.view_mode = ViewMode::Grid;
            Ok((true, vec![]))
        }
        Event::FocusGallery => {
            state.input_mode = InputMode::Browsing;
            Ok((true, vec![]))
        }
        Event::LoadMore => {
            let transition = state.session.request_more();
            if transition.is_noop() {
                return Ok((false, vec![]));
            }
            Ok((true, apply_transition(state, transition)))
        }
        Event::Retry => {
            let transition = state.session.retry();
            if transition.is_noop() {
                return Ok((false, vec![]));
            }
            Ok((true, apply_transition(state, transition)))
        }
        Event::DismissError => Ok((state.session.dismiss_error(), vec![])),
        Event::OpenViewer => {
            if state.selected_item().is_none() {
                tracing::debug!("no item selected");
                return Ok((false, vec![]));
            }
            state.view_mode = ViewMode::Viewer {
                index: state.selected_index,
            };
            Ok((true, vec![]))
        }
        Event::CloseViewer => {
            let ViewMode::Viewer { index } = state.view_mode else {
                return Ok((false, vec![]));
            };
            state.selected_index = index;
            state.view_mode = ViewMode::Grid;
            Ok((true, vec![]))
        }
        Event::ViewerNext => step_viewer(state, 1),
        Event::ViewerPrev => step_viewer(state, -1),
        Event::OpenExternal => {
            let item = state.viewed_item().or_else(|| state.selected_item());
            let Some(item) = item else {
                return Ok((false, vec![]));
            };
            tracing::debug!(item_id = item.id, opener = %state.opener, "opening full image");
            Ok((
                false,
                vec![Action::OpenUrl {
                    opener: state.opener.clone(),
                    url: item.full_url.clone(),
                }],
            ))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::Resize { rows, cols } => {
            let changed = state.rows != *rows || state.cols != *cols;
            state.rows = *rows;
            state.cols = *cols;
            Ok((changed, vec![]))
        }
        Event::FetchCompleted { ticket, outcome } => {
            match state.session.complete(ticket, outcome.clone()) {
                Completion::Merged { appended, notice } => {
                    tracing::debug!(appended, "fetch completed");
                    state.clamp_selection();
                    let actions = notice.map_or_else(Vec::new, |n| show_notice(state, n));
                    Ok((true, actions))
                }
                Completion::Failed => Ok((true, vec![])),
                Completion::Discarded => Ok((false, vec![])),
            }
        }
        Event::NoticeTimerElapsed => {
            state.pending_notice_timers = state.pending_notice_timers.saturating_sub(1);
            if state.pending_notice_timers == 0 && state.banner.is_some() {
                state.banner = None;
                return Ok((true, vec![]));
            }
            Ok((false, vec![]))
        }
    }
}

/// Turns a session transition into actions, arming the banner if needed.
fn apply_transition(state: &mut AppState, transition: Transition) -> Vec<Action> {
    let mut actions = Vec::new();

    if let Some(ticket) = transition.dispatch {
        tracing::debug!(
            generation = ticket.generation,
            page = ticket.page,
            query = %ticket.query,
            "dispatching fetch"
        );
        actions.push(Action::Fetch(state.gateway.request_for(&ticket)));
    }

    if let Some(notice) = transition.notice {
        actions.extend(show_notice(state, notice));
    }

    actions
}

fn show_notice(state: &mut AppState, notice: Notice) -> Vec<Action> {
    tracing::debug!(notice = ?notice, "showing notice");
    state.banner = Some(notice);
    state.pending_notice_timers += 1;
    vec![Action::ScheduleNoticeExpiry {
        seconds: state.notice_seconds,
    }]
}

fn step_viewer(state: &mut AppState, delta: isize) -> Result<(bool, Vec<Action>)> {
    let ViewMode::Viewer { index } = state.view_mode else {
        return Ok((false, vec![]));
    };

    let last = state.session.items().len().saturating_sub(1);
    let next = index.saturating_add_signed(delta).min(last);
    if next == index {
        return Ok((false, vec![]));
    }

    state.view_mode = ViewMode::Viewer { index: next };
    state.selected_index = next;
    Ok((true, vec![]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GalleryItem;
    use crate::gateway::{decode_context, Gateway};
    use crate::ui::Theme;

    fn new_state() -> AppState {
        AppState::new(Theme::default(), Gateway::default())
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            handle_event(state, &Event::Char(c)).unwrap();
        }
    }

    fn fetched_ticket(actions: &[Action]) -> FetchTicket {
        actions
            .iter()
            .find_map(|action| match action {
                Action::Fetch(request) => Some(decode_context(&request.context).unwrap()),
                _ => None,
            })
            .expect("expected a fetch action")
    }

    fn page(start: u64, count: u64, total: u64) -> ResultPage {
        let items = (start..start + count)
            .map(|id| GalleryItem::new(id, "t", "cat, kitten", format!("https://img/{id}.jpg")))
            .collect();
        ResultPage::new(items, total)
    }

    fn complete(state: &mut AppState, ticket: FetchTicket, outcome: std::result::Result<ResultPage, FetchError>) -> (bool, Vec<Action>) {
        handle_event(state, &Event::FetchCompleted { ticket, outcome }).unwrap()
    }

    #[test]
    fn typing_edits_draft_only_while_focused() {
        let mut state = new_state();
        type_text(&mut state, "cats");
        handle_event(&mut state, &Event::Backspace).unwrap();
        assert_eq!(state.draft, "cat");

        handle_event(&mut state, &Event::FocusGallery).unwrap();
        let (render, _) = handle_event(&mut state, &Event::Char('x')).unwrap();
        assert!(!render);
        assert_eq!(state.draft, "cat");
    }

    #[test]
    fn submit_dispatches_and_moves_focus_to_grid() {
        let mut state = new_state();
        type_text(&mut state, "cats");
        let (render, actions) = handle_event(&mut state, &Event::Submit).unwrap();

        assert!(render);
        let ticket = fetched_ticket(&actions);
        assert_eq!(ticket.page, 1);
        assert_eq!(state.input_mode, InputMode::Browsing);
    }

    #[test]
    fn blank_submit_shows_notice_and_keeps_focus() {
        let mut state = new_state();
        type_text(&mut state, "  ");
        let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();

        assert_eq!(actions, vec![Action::ScheduleNoticeExpiry { seconds: 3 }]);
        assert_eq!(state.banner, Some(Notice::EmptyQuery));
        assert_eq!(state.input_mode, InputMode::Typing);
    }

    #[test]
    fn first_page_shows_found_banner() {
        let mut state = new_state();
        type_text(&mut state, "cats");
        let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();
        let ticket = fetched_ticket(&actions);

        let (render, actions) = complete(&mut state, ticket, Ok(page(0, 12, 25)));
        assert!(render);
        assert_eq!(actions, vec![Action::ScheduleNoticeExpiry { seconds: 3 }]);
        assert_eq!(state.banner, Some(Notice::Found { total: 25 }));
    }

    #[test]
    fn only_last_timer_clears_banner() {
        let mut state = new_state();
        type_text(&mut state, "cats");
        let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();
        let ticket = fetched_ticket(&actions);
        complete(&mut state, ticket, Ok(page(0, 12, 12)));

        // a second notice arrives before the first expires
        handle_event(&mut state, &Event::FocusSearchBar).unwrap();
        handle_event(&mut state, &Event::Submit).unwrap();
        assert_eq!(state.pending_notice_timers, 2);

        let (render, _) = handle_event(&mut state, &Event::NoticeTimerElapsed).unwrap();
        assert!(!render);
        assert!(matches!(state.banner, Some(Notice::DuplicateQuery { .. })));

        let (render, _) = handle_event(&mut state, &Event::NoticeTimerElapsed).unwrap();
        assert!(render);
        assert_eq!(state.banner, None);
    }

    #[test]
    fn load_more_while_loading_does_nothing() {
        let mut state = new_state();
        type_text(&mut state, "cats");
        handle_event(&mut state, &Event::Submit).unwrap();

        let (render, actions) = handle_event(&mut state, &Event::LoadMore).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn load_more_fetches_next_page_and_ends_results() {
        let mut state = new_state();
        type_text(&mut state, "cats");
        let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();
        complete(&mut state, fetched_ticket(&actions), Ok(page(0, 12, 20)));

        let (_, actions) = handle_event(&mut state, &Event::LoadMore).unwrap();
        let ticket = fetched_ticket(&actions);
        assert_eq!(ticket.page, 2);

        complete(&mut state, ticket, Ok(page(12, 8, 20)));
        assert_eq!(state.session.items().len(), 20);
        assert_eq!(state.banner, Some(Notice::EndOfResults));

        let (render, actions) = handle_event(&mut state, &Event::LoadMore).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn stale_completion_is_ignored() {
        let mut state = new_state();
        type_text(&mut state, "cats");
        let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();
        let stale = fetched_ticket(&actions);

        handle_event(&mut state, &Event::FocusSearchBar).unwrap();
        state.draft = "dogs".to_string();
        handle_event(&mut state, &Event::Submit).unwrap();

        let (render, actions) = complete(&mut state, stale, Ok(page(0, 12, 40)));
        assert!(!render);
        assert!(actions.is_empty());
        assert!(state.session.items().is_empty());
    }

    #[test]
    fn failure_then_retry_then_dismiss() {
        let mut state = new_state();
        type_text(&mut state, "cats");
        let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();
        let ticket = fetched_ticket(&actions);

        let failure = FetchError::Network {
            status: 500,
            message: "oops".to_string(),
        };
        let (render, actions) = complete(&mut state, ticket.clone(), Err(failure));
        assert!(render);
        assert!(actions.is_empty());

        let (_, actions) = handle_event(&mut state, &Event::Retry).unwrap();
        assert_eq!(fetched_ticket(&actions), ticket);

        complete(
            &mut state,
            ticket,
            Err(FetchError::Decode("bad".to_string())),
        );
        let (render, _) = handle_event(&mut state, &Event::DismissError).unwrap();
        assert!(render);
        assert!(state.session.error().is_none());
    }

    #[test]
    fn viewer_navigation_is_clamped_and_syncs_selection() {
        let mut state = new_state();
        type_text(&mut state, "cats");
        let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();
        complete(&mut state, fetched_ticket(&actions), Ok(page(0, 3, 3)));

        handle_event(&mut state, &Event::MoveRight).unwrap();
        handle_event(&mut state, &Event::OpenViewer).unwrap();
        assert_eq!(state.view_mode, ViewMode::Viewer { index: 1 });

        handle_event(&mut state, &Event::ViewerNext).unwrap();
        let (render, _) = handle_event(&mut state, &Event::ViewerNext).unwrap();
        assert!(!render);
        assert_eq!(state.view_mode, ViewMode::Viewer { index: 2 });

        handle_event(&mut state, &Event::ViewerPrev).unwrap();
        handle_event(&mut state, &Event::CloseViewer).unwrap();
        assert_eq!(state.view_mode, ViewMode::Grid);
        assert_eq!(state.selected_index, 1);
    }

    #[test]
    fn open_viewer_without_items_is_noop() {
        let mut state = new_state();
        let (render, _) = handle_event(&mut state, &Event::OpenViewer).unwrap();
        assert!(!render);
        assert_eq!(state.view_mode, ViewMode::Grid);
    }

    #[test]
    fn open_external_uses_configured_opener() {
        let mut state = new_state();
        state.opener = "open".to_string();
        type_text(&mut state, "cats");
        let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();
        complete(&mut state, fetched_ticket(&actions), Ok(page(0, 2, 2)));
        handle_event(&mut state, &Event::OpenViewer).unwrap();

        let (_, actions) = handle_event(&mut state, &Event::OpenExternal).unwrap();
        assert_eq!(
            actions,
            vec![Action::OpenUrl {
                opener: "open".to_string(),
                url: "https://img/0.jpg".to_string(),
            }]
        );
    }

    #[test]
    fn resize_renders_only_on_change() {
        let mut state = new_state();
        let (render, _) = handle_event(&mut state, &Event::Resize { rows: 24, cols: 80 }).unwrap();
        assert!(!render);
        let (render, _) = handle_event(&mut state, &Event::Resize { rows: 40, cols: 120 }).unwrap();
        assert!(render);
        assert_eq!(state.columns(), 3);
    }
}
