//! Galleria: a Zellij plugin for browsing photo search results.
//!
//! Galleria queries the Pixabay image search API and lays the results out as
//! a grid of cards in a floating pane:
//! - Incremental, page-by-page loading with "load more"
//! - Stale-response protection when the query changes mid-flight
//! - Transient notices for new searches and the end of results
//! - A lightbox viewer and an external opener for full-size images
//! - Retained fetch errors with manual retry

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Focus, selection,
//! │  - Event handling and action dispatching            │    banners
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Search Layer  │   │ Gateway       │
//! │ (ui/)         │   │ (search/)     │   │ (gateway/)    │
//! │ - Rendering   │   │ - Pagination  │   │ - Request URL │
//! │ - Theming     │   │ - Notices     │   │ - Decoding    │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain, Infrastructure, Observability              │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Application state machine with event/action model
//! - [`search`]: Paginated search session and notice classification
//! - [`gateway`]: Search API request building and response decoding
//! - [`domain`]: Core value types and errors
//! - [`infrastructure`]: Sandbox path utilities
//! - [`ui`]: Terminal rendering with theme support
//! - [`observability`]: OpenTelemetry tracing with file export
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/galleria.wasm" {
//!         api_key "your-pixabay-key"
//!         orientation "all"
//!         notice_seconds "5"
//!         theme "catppuccin-frappe"
//!         trace_level "debug"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use galleria::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//!
//! for c in "red fox".chars() {
//!     handle_event(&mut state, &Event::Char(c))?;
//! }
//! let (_, actions) = handle_event(&mut state, &Event::Submit)?;
//! assert!(actions.iter().any(|a| matches!(a, Action::Fetch(_))));
//! # Ok::<(), galleria::GalleryError>(())
//! ```
//!
//! # Platform Support
//!
//! - **Target**: `wasm32-wasip1` (Zellij WASM runtime)
//! - **Permissions**: `WebAccess` for the search API, `RunCommands` for the opener

pub mod app;
pub mod domain;
pub mod gateway;
pub mod infrastructure;
pub mod observability;
pub mod search;
pub mod ui;

pub use app::{handle_event, Action, AppState, Event, InputMode, ViewMode};
pub use domain::{GalleryError, Result};
pub use ui::Theme;

use app::state::{DEFAULT_NOTICE_SECONDS, DEFAULT_OPENER};
use gateway::{Gateway, DEFAULT_ENDPOINT};
use std::collections::BTreeMap;

const IMAGE_TYPES: &[&str] = &["all", "photo", "illustration", "vector"];
const ORIENTATIONS: &[&str] = &["all", "horizontal", "vertical"];

/// Plugin configuration parsed from Zellij's configuration map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Pixabay API key. Without one every search fails upstream.
    pub api_key: Option<String>,

    /// Search endpoint. Default: `https://pixabay.com/api/`
    pub endpoint: String,

    /// One of `all`, `photo`, `illustration`, `vector`. Default: `photo`
    pub image_type: String,

    /// One of `all`, `horizontal`, `vertical`. Default: `horizontal`
    pub orientation: String,

    pub safesearch: bool,

    /// Banner lifetime in seconds, at least 1. Default: 3
    pub notice_seconds: u32,

    /// Command that opens full-size images. Default: `xdg-open`
    pub opener: String,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file; `~` resolves to the host home.
    pub theme_file: Option<String>,

    /// Tracing filter directive. Default: `"info"`
    pub trace_level: String,
}

impl Default for Config {
    fn default() -> Self {
        let gateway = Gateway::default();
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            image_type: gateway.image_type,
            orientation: gateway.orientation,
            safesearch: gateway.safesearch,
            notice_seconds: DEFAULT_NOTICE_SECONDS,
            opener: DEFAULT_OPENER.to_string(),
            theme_name: None,
            theme_file: None,
            trace_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Unknown keys are ignored. Blank or invalid values keep their default
    /// and log a warning naming the key.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use galleria::Config;
    ///
    /// let map = BTreeMap::from([
    ///     ("api_key".to_string(), "abc123".to_string()),
    ///     ("orientation".to_string(), "vertical".to_string()),
    ///     ("notice_seconds".to_string(), "0".to_string()),
    /// ]);
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.api_key.as_deref(), Some("abc123"));
    /// assert_eq!(config.orientation, "vertical");
    /// assert_eq!(config.notice_seconds, 3);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let get = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
        };

        Self {
            api_key: get("api_key").map(String::from),
            endpoint: get("endpoint").map_or(defaults.endpoint, String::from),
            image_type: or_default(
                get("image_type").map(|v| parse_choice("image_type", v, IMAGE_TYPES)),
                defaults.image_type,
            ),
            orientation: or_default(
                get("orientation").map(|v| parse_choice("orientation", v, ORIENTATIONS)),
                defaults.orientation,
            ),
            safesearch: or_default(
                get("safesearch").map(|v| parse_bool("safesearch", v)),
                defaults.safesearch,
            ),
            notice_seconds: or_default(
                get("notice_seconds").map(|v| parse_seconds("notice_seconds", v)),
                defaults.notice_seconds,
            ),
            opener: get("opener").map_or(defaults.opener, String::from),
            theme_name: get("theme").map(String::from),
            theme_file: get("theme_file").map(String::from),
            trace_level: get("trace_level").map_or(defaults.trace_level, String::from),
        }
    }

    /// Gateway configured with this endpoint, key and filters.
    #[must_use]
    pub fn gateway(&self) -> Gateway {
        Gateway {
            endpoint: self.endpoint.clone(),
            api_key: self.api_key.clone().unwrap_or_default(),
            image_type: self.image_type.clone(),
            orientation: self.orientation.clone(),
            safesearch: self.safesearch,
        }
    }

    /// Resolves the theme: `theme_file`, then `theme`, then the default.
    ///
    /// A theme that fails to load is logged and replaced by the default.
    #[must_use]
    pub fn theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            let path = infrastructure::expand_tilde(theme_file);
            return Theme::from_file(&path).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %path, error = %e, "failed to load theme from file, using default");
                Theme::default()
            });
        }

        self.theme_name.as_ref().map_or_else(Theme::default, |name| {
            Theme::from_name(name).unwrap_or_else(|| {
                tracing::warn!(theme_name = %name, "unknown theme, using default");
                Theme::default()
            })
        })
    }
}

fn or_default<T>(parsed: Option<Result<T>>, default: T) -> T {
    match parsed {
        Some(Ok(value)) => value,
        Some(Err(e)) => {
            tracing::warn!(error = %e, "ignoring configuration value");
            default
        }
        None => default,
    }
}

fn parse_choice(key: &str, value: &str, allowed: &[&str]) -> Result<String> {
    let lowered = value.to_ascii_lowercase();
    if allowed.contains(&lowered.as_str()) {
        Ok(lowered)
    } else {
        Err(GalleryError::Config(format!(
            "{key} must be one of {}, got {value:?}",
            allowed.join(", ")
        )))
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    value
        .to_ascii_lowercase()
        .parse::<bool>()
        .map_err(|_| GalleryError::Config(format!("{key} must be true or false, got {value:?}")))
}

fn parse_seconds(key: &str, value: &str) -> Result<u32> {
    match value.parse::<u32>() {
        Ok(seconds) if seconds > 0 => Ok(seconds),
        _ => Err(GalleryError::Config(format!(
            "{key} must be a positive number of seconds, got {value:?}"
        ))),
    }
}

/// Builds the initial application state from configuration.
///
/// Loads the theme and gateway and applies banner and opener settings. The
/// session starts idle with the search bar focused.
///
/// # Example
///
/// ```rust
/// use galleria::{initialize, Config, InputMode};
///
/// let state = initialize(&Config {
///     notice_seconds: 5,
///     ..Default::default()
/// });
/// assert_eq!(state.notice_seconds, 5);
/// assert_eq!(state.input_mode, InputMode::Typing);
/// ```
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(
        endpoint = %config.endpoint,
        image_type = %config.image_type,
        orientation = %config.orientation,
        "initializing galleria plugin"
    );

    if config.api_key.is_none() {
        tracing::warn!("no api_key configured, searches will be rejected upstream");
    }

    let mut state = AppState::new(config.theme(), config.gateway());
    state.notice_seconds = config.notice_seconds;
    state.opener = config.opener.clone();
    state
}
