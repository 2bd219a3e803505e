//! Web access gating for fetches.
//!
//! Zellij answers the permission request asynchronously, and the user may
//! submit a query before it does. [`FetchGate`] decides, for each fetch the
//! handler emits, whether it goes out now, waits for the answer, or fails
//! immediately because access was denied.

use super::handler::Event;
use crate::domain::FetchError;
use crate::gateway::{decode_context, FetchRequest};

/// Answer to the plugin's permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PermissionState {
    /// No answer yet.
    #[default]
    Pending,
    Granted,
    Denied,
}

/// What to do with one fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Routed {
    /// Send it with `web_request`.
    Send(FetchRequest),
    /// Held until the permission answer arrives.
    Held,
    /// Feed this completion back into the state machine instead.
    Refused(Event),
    /// Not a gallery fetch; nothing to send or complete.
    Dropped,
}

/// Holds fetches until web access is granted and fails them once denied.
#[derive(Debug, Clone, Default)]
pub struct FetchGate {
    state: PermissionState,
    held: Vec<FetchRequest>,
}

impl FetchGate {
    #[must_use]
    pub const fn state(&self) -> PermissionState {
        self.state
    }

    /// Number of fetches waiting for the permission answer.
    #[must_use]
    pub fn held(&self) -> usize {
        self.held.len()
    }

    pub fn route(&mut self, request: FetchRequest) -> Routed {
        match self.state {
            PermissionState::Granted => Routed::Send(request),
            PermissionState::Pending => {
                tracing::debug!("holding fetch until permissions are granted");
                self.held.push(request);
                Routed::Held
            }
            PermissionState::Denied => {
                refusal(&request).map_or(Routed::Dropped, Routed::Refused)
            }
        }
    }

    /// Records the grant and returns the held fetches to send.
    pub fn grant(&mut self) -> Vec<FetchRequest> {
        self.state = PermissionState::Granted;
        std::mem::take(&mut self.held)
    }

    /// Records the denial and returns failed completions for the held fetches.
    pub fn deny(&mut self) -> Vec<Event> {
        self.state = PermissionState::Denied;
        std::mem::take(&mut self.held)
            .iter()
            .filter_map(refusal)
            .collect()
    }
}

/// Failed completion for a fetch that can never be sent.
///
/// `None` if the request context does not carry a fetch ticket.
fn refusal(request: &FetchRequest) -> Option<Event> {
    match decode_context(&request.context) {
        Ok(ticket) => Some(Event::FetchCompleted {
            ticket,
            outcome: Err(FetchError::Network {
                status: 0,
                message: "web access permission denied".to_string(),
            }),
        }),
        Err(e) => {
            tracing::warn!(error = %e, "dropping fetch without a ticket");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{handle_event, Action, AppState};
    use crate::gateway::Gateway;
    use crate::search::SessionStatus;
    use crate::ui::Theme;

    fn submit(state: &mut AppState, text: &str) -> FetchRequest {
        state.draft = text.to_string();
        let (_, actions) = handle_event(state, &Event::Submit).unwrap();
        actions
            .into_iter()
            .find_map(|action| match action {
                Action::Fetch(request) => Some(request),
                _ => None,
            })
            .expect("submit should fetch")
    }

    #[test]
    fn fetches_wait_for_the_grant() {
        let mut state = AppState::new(Theme::default(), Gateway::default());
        let mut gate = FetchGate::default();

        let request = submit(&mut state, "cats");
        assert_eq!(gate.route(request.clone()), Routed::Held);
        assert_eq!(gate.held(), 1);

        assert_eq!(gate.grant(), vec![request.clone()]);
        assert_eq!(gate.held(), 0);
        assert_eq!(gate.route(request.clone()), Routed::Send(request));
    }

    #[test]
    fn denial_fails_held_fetches() {
        let mut state = AppState::new(Theme::default(), Gateway::default());
        let mut gate = FetchGate::default();
        gate.route(submit(&mut state, "cats"));

        let completions = gate.deny();
        assert_eq!(completions.len(), 1);
        for event in &completions {
            handle_event(&mut state, event).unwrap();
        }

        assert_eq!(state.session.status(), SessionStatus::Errored);
        assert_eq!(gate.state(), PermissionState::Denied);
    }

    #[test]
    fn fetches_after_denial_fail_immediately() {
        let mut state = AppState::new(Theme::default(), Gateway::default());
        let mut gate = FetchGate::default();
        assert!(gate.deny().is_empty());

        let Routed::Refused(event) = gate.route(submit(&mut state, "dogs")) else {
            panic!("fetch after denial should be refused");
        };
        handle_event(&mut state, &event).unwrap();

        assert_eq!(gate.held(), 0);
        assert_eq!(state.session.status(), SessionStatus::Errored);
        let message = state.session.error().unwrap().error.to_string();
        assert!(message.contains("permission denied"));

        // retry is available again instead of hanging in Loading
        let (_, actions) = handle_event(&mut state, &Event::Retry).unwrap();
        assert!(matches!(actions[0], Action::Fetch(_)));
    }
}
