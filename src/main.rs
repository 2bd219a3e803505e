//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the Galleria library and the Zellij plugin
//! system: it translates host events into library events, runs the library's
//! state machine, and executes the resulting actions through host calls.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Subscribe**: Register for Key, `WebRequestResult`, `Timer` and
//!    `PermissionRequestResult` events
//! 3. **Update**: Translate events, delegate to `handle_event`, run actions
//! 4. **Render**: Report the pane size, then call the library renderer
//!
//! # Fetch Round Trip
//!
//! ```text
//! Action::Fetch ──web_request──▶ host ──WebRequestResult──▶ decode_context
//!                                                            decode_response
//!                                                            Event::FetchCompleted
//! ```
//!
//! Fetches issued before `WebAccess` is granted are held back and sent once
//! the permission arrives. If it is denied they complete as failures so the
//! session does not stay loading forever.
//!
//! # Keybindings
//!
//! Global:
//! - `Ctrl+n` / `Ctrl+p`: Move selection down / up
//!
//! Search bar focused:
//! - Characters: Edit the query
//! - `Enter`: Search
//! - `Esc` / `Tab`: Focus the grid
//!
//! Grid focused:
//! - `h`/`j`/`k`/`l`, arrows: Move selection
//! - `Enter`: Open the viewer
//! - `m` / `Space`: Load more
//! - `o`: Open the full image externally
//! - `r`: Retry after an error
//! - `x`: Dismiss the error
//! - `/`: Edit the query
//! - `q` / `Esc`: Close the plugin
//!
//! Viewer:
//! - `h`/`l`, `Left`/`Right`: Previous / next image
//! - `o`: Open the full image externally
//! - `q` / `Esc`: Back to the grid

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use galleria::app::{map_key_event, FetchGate, Routed};
use galleria::gateway::{decode_context, decode_response, FetchRequest};
use galleria::observability::TraceContext;
use galleria::{handle_event, Action, Config, Event};

register_plugin!(State);

/// Plugin state wrapper.
///
/// Wraps the library's `AppState` with the host permission state.
struct State {
    /// Core application state from library layer.
    app: galleria::AppState,

    /// Routes fetches according to the `WebAccess` answer.
    gate: FetchGate,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: galleria::initialize(&Config::default()),
            gate: FetchGate::default(),
        }
    }
}

impl ZellijPlugin for State {
    /// Parses configuration, initializes tracing and state, requests
    /// permissions and subscribes to events.
    ///
    /// # Permissions
    ///
    /// - `WebAccess`: Query the search API
    /// - `RunCommands`: Launch the external image opener
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        galleria::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(
            endpoint = %config.endpoint,
            has_api_key = config.api_key.is_some(),
            "parsed configuration"
        );
        self.app = galleria::initialize(&config);

        request_permission(&[PermissionType::WebAccess, PermissionType::RunCommands]);

        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::Timer,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Translates a Zellij event and runs it through the library.
    ///
    /// Returns `true` if the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
        let _guard = span.entered();

        match event {
            zellij_tile::prelude::Event::Key(ref key) => {
                match map_key_event(self.app.input_mode, self.app.view_mode, key) {
                    Some(event) => self.dispatch(&event),
                    None => false,
                }
            }
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                self.handle_web_response(status, &body, &context)
            }
            zellij_tile::prelude::Event::Timer(_elapsed) => self.dispatch(&Event::NoticeTimerElapsed),
            zellij_tile::prelude::Event::PermissionRequestResult(permissions) => {
                self.handle_permission_result(permissions)
            }
            _ => false,
        }
    }

    /// Renders the plugin UI.
    ///
    /// The pane size only reaches the plugin here, so it is fed to the state
    /// machine first; grid geometry depends on it.
    fn render(&mut self, rows: usize, cols: usize) {
        self.dispatch(&Event::Resize { rows, cols });
        galleria::ui::render(&self.app, rows, cols);
    }
}

impl State {
    /// Runs one event through the library and executes its actions.
    fn dispatch(&mut self, event: &Event) -> bool {
        match handle_event(&mut self.app, event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for action in actions {
                    self.execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    /// Rebuilds the fetch ticket and decodes the body of a search response.
    ///
    /// Responses to requests this plugin did not issue are ignored.
    fn handle_web_response(
        &mut self,
        status: u16,
        body: &[u8],
        context: &BTreeMap<String, String>,
    ) -> bool {
        let ticket = match decode_context(context) {
            Ok(ticket) => ticket,
            Err(e) => {
                tracing::debug!(error = %e, "ignoring web response");
                return false;
            }
        };

        let _remote_parent = TraceContext::read_from(context).and_then(|trace| trace.attach());
        let span = tracing::debug_span!(
            "fetch_response",
            status,
            generation = ticket.generation,
            page = ticket.page,
            body_len = body.len()
        );
        let _guard = span.entered();

        let outcome = decode_response(status, body);
        if let Err(e) = &outcome {
            tracing::warn!(error = %e, "fetch failed");
        }

        self.dispatch(&Event::FetchCompleted { ticket, outcome })
    }

    fn handle_permission_result(&mut self, permissions: PermissionStatus) -> bool {
        match permissions {
            PermissionStatus::Granted => {
                let held = self.gate.grant();
                tracing::debug!(held = held.len(), "permissions granted - sending held fetches");
                for request in &held {
                    send_fetch(request);
                }
                false
            }
            PermissionStatus::Denied => {
                tracing::warn!("permissions denied - searches cannot reach the network");
                let mut should_render = false;
                for completion in self.gate.deny() {
                    should_render |= self.dispatch(&completion);
                }
                should_render
            }
        }
    }

    /// Executes an action returned from event handling.
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&mut self, action: Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::Fetch(request) => match self.gate.route(request) {
                Routed::Send(request) => send_fetch(&request),
                Routed::Refused(completion) => {
                    self.dispatch(&completion);
                }
                Routed::Held | Routed::Dropped => {}
            },
            Action::ScheduleNoticeExpiry { seconds } => {
                set_timeout(f64::from(seconds));
            }
            Action::OpenUrl { opener, url } => {
                tracing::debug!(opener = %opener, url = %url, "launching opener");
                run_command(&[opener.as_str(), url.as_str()], BTreeMap::new());
            }
        }
    }

    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }
}

fn send_fetch(request: &FetchRequest) {
    tracing::debug!(url_len = request.url.len(), "sending web request");
    web_request(
        &request.url,
        HttpVerb::Get,
        request.headers.clone(),
        vec![],
        request.context.clone(),
    );
}
