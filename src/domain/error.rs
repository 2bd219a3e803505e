//! Error types for the Galleria plugin.
//!
//! Two layers of errors live here. [`FetchError`] describes why a single
//! gallery fetch failed; it is `Clone + Eq` so it can ride inside application
//! events and be retained by the search session. [`GalleryError`] is the
//! crate-wide error that everything else propagates with `?`.

use thiserror::Error;

/// Failure of one fetch against the photo search API.
///
/// The `Display` text is what the user sees after "Whoops, something went
/// wrong:", so it carries the upstream message verbatim where one exists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request did not produce a successful HTTP response.
    ///
    /// Zellij reports transport failures as non-2xx statuses as well, so
    /// both cases collapse into this variant.
    #[error("request failed with status {status}: {message}")]
    Network {
        /// HTTP status code reported by the host.
        status: u16,
        /// Response body text, trimmed and truncated.
        message: String,
    },

    /// The response body was not a valid search result document.
    #[error("malformed search response: {0}")]
    Decode(String),
}

/// The main error type for Galleria plugin operations.
///
/// # Examples
///
/// ```
/// use galleria::domain::{FetchError, GalleryError};
///
/// let err: GalleryError = FetchError::Decode("expected value".to_string()).into();
/// assert_eq!(err.to_string(), "Fetch error: malformed search response: expected value");
/// ```
#[derive(Debug, Error)]
pub enum GalleryError {
    /// A gallery fetch failed.
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or application failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A web request context could not be turned back into a fetch ticket.
    ///
    /// Happens when a response arrives for a request this plugin did not
    /// issue, or when the context map was truncated by the host.
    #[error("Request context error: {0}")]
    Context(String),
}

/// A specialized `Result` type for Galleria operations.
pub type Result<T> = std::result::Result<T, GalleryError>;
