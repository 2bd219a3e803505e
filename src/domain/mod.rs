//! Domain layer for the Galleria plugin.
//!
//! Core value types shared by the search session, the gateway and the UI,
//! independent of Zellij APIs.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`image`]: Gallery items and result pages
//! - [`query`]: The validated search term

pub mod error;
pub mod image;
pub mod query;

pub use error::{FetchError, GalleryError, Result};
pub use image::{GalleryItem, ResultPage};
pub use query::SearchQuery;
