//! Application layer coordinating state, events, and actions.
//!
//! This layer sits between the plugin runtime (`main.rs`) and the search
//! session. It owns focus, selection and banners, and turns session
//! transitions into host side effects.
//!
//! # Architecture
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └──────── Fetch Completions ───────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`keys`]: Key bindings per focus and view
//! - [`modes`]: Input focus and view mode types
//! - [`permissions`]: Holding and refusing fetches around the web access grant
//! - [`state`]: Central application state container and view model computation

pub mod actions;
pub mod handler;
pub mod keys;
pub mod modes;
pub mod permissions;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use keys::map_key_event;
pub use modes::{InputMode, ViewMode};
pub use permissions::{FetchGate, PermissionState, Routed};
pub use state::AppState;
