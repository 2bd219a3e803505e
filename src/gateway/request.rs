//! Search request construction and request context encoding.
//!
//! A fetch is identified by its [`FetchTicket`]. Since Zellij delivers the
//! HTTP response as an unrelated event, the ticket is flattened into the
//! request's context map on the way out and rebuilt from it on the way back.

use crate::domain::{GalleryError, Result, SearchQuery};
use crate::observability::TraceContext;
use crate::search::FetchTicket;
use std::collections::BTreeMap;

/// Context key marking a request as a gallery fetch.
pub const KIND_KEY: &str = "galleria.kind";

/// Value of [`KIND_KEY`] for gallery fetches.
pub const KIND_SEARCH: &str = "search";

const GENERATION_KEY: &str = "galleria.generation";
const QUERY_KEY: &str = "galleria.query";
const PAGE_KEY: &str = "galleria.page";

/// Everything the host needs to perform one fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Fully encoded request URL, including the API key.
    pub url: String,

    /// Request headers.
    pub headers: BTreeMap<String, String>,

    /// Opaque context echoed back with the response.
    pub context: BTreeMap<String, String>,
}

/// Builds the query string for one page of results.
///
/// Parameters are emitted in a fixed order so identical tickets produce
/// identical URLs.
pub(crate) fn build_url(
    endpoint: &str,
    params: &[(&str, String)],
) -> String {
    let query_string = params
        .iter()
        .map(|(name, value)| format!("{name}={}", urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&");

    let separator = if endpoint.contains('?') { '&' } else { '?' };
    format!("{endpoint}{separator}{query_string}")
}

/// Flattens a ticket, plus the current trace context if any, into a
/// request context map.
#[must_use]
pub fn encode_context(ticket: &FetchTicket) -> BTreeMap<String, String> {
    let mut context = BTreeMap::new();
    context.insert(KIND_KEY.to_string(), KIND_SEARCH.to_string());
    context.insert(GENERATION_KEY.to_string(), ticket.generation.to_string());
    context.insert(QUERY_KEY.to_string(), ticket.query.as_str().to_string());
    context.insert(PAGE_KEY.to_string(), ticket.page.to_string());

    if let Some(trace) = TraceContext::from_current() {
        trace.write_to(&mut context);
    }

    context
}

/// Rebuilds the ticket stored by [`encode_context`].
///
/// # Errors
///
/// Returns [`GalleryError::Context`] when the map was not produced by
/// [`encode_context`] or a field is missing or malformed.
pub fn decode_context(context: &BTreeMap<String, String>) -> Result<FetchTicket> {
    if context.get(KIND_KEY).map(String::as_str) != Some(KIND_SEARCH) {
        return Err(GalleryError::Context("not a gallery search request".to_string()));
    }

    let field = |key: &str| {
        context
            .get(key)
            .ok_or_else(|| GalleryError::Context(format!("missing {key}")))
    };

    let generation = field(GENERATION_KEY)?
        .parse::<u64>()
        .map_err(|e| GalleryError::Context(format!("invalid {GENERATION_KEY}: {e}")))?;
    let page = field(PAGE_KEY)?
        .parse::<u32>()
        .map_err(|e| GalleryError::Context(format!("invalid {PAGE_KEY}: {e}")))?;
    let query = SearchQuery::parse(field(QUERY_KEY)?)
        .ok_or_else(|| GalleryError::Context(format!("blank {QUERY_KEY}")))?;

    Ok(FetchTicket {
        generation,
        query,
        page,
    })
}
