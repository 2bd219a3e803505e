//! Photo search API gateway.
//!
//! The gateway never performs I/O. [`Gateway::request_for`] describes the
//! HTTP GET for a [`FetchTicket`], the plugin hands that to Zellij's
//! `web_request`, and [`decode_response`] turns the eventual response into a
//! [`ResultPage`](crate::domain::ResultPage) or a
//! [`FetchError`](crate::domain::FetchError).
//!
//! # Modules
//!
//! - [`request`]: URL building and request context encoding
//! - [`response`]: Response body decoding

pub mod request;
pub mod response;

pub use request::{decode_context, encode_context, FetchRequest};
pub use response::decode_response;

use crate::search::{FetchTicket, PAGE_SIZE};
use std::collections::BTreeMap;

/// Default search endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://pixabay.com/api/";

/// Endpoint, credentials and result filters for the search API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gateway {
    pub endpoint: String,
    pub api_key: String,
    pub image_type: String,
    pub orientation: String,
    pub safesearch: bool,
}

impl Default for Gateway {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: String::new(),
            image_type: "photo".to_string(),
            orientation: "horizontal".to_string(),
            safesearch: true,
        }
    }
}

impl Gateway {
    /// Describes the request that fetches `ticket`'s page.
    ///
    /// # Examples
    ///
    /// ```
    /// use galleria::domain::SearchQuery;
    /// use galleria::gateway::Gateway;
    /// use galleria::search::FetchTicket;
    ///
    /// let gateway = Gateway { api_key: "k".to_string(), ..Gateway::default() };
    /// let ticket = FetchTicket { generation: 1, query: SearchQuery::parse("cat").unwrap(), page: 2 };
    ///
    /// let request = gateway.request_for(&ticket);
    /// assert!(request.url.ends_with("q=cat&image_type=photo&orientation=horizontal&safesearch=true&per_page=12&page=2"));
    /// ```
    #[must_use]
    pub fn request_for(&self, ticket: &FetchTicket) -> FetchRequest {
        let params = [
            ("key", self.api_key.clone()),
            ("q", ticket.query.as_str().to_string()),
            ("image_type", self.image_type.clone()),
            ("orientation", self.orientation.clone()),
            ("safesearch", self.safesearch.to_string()),
            ("per_page", PAGE_SIZE.to_string()),
            ("page", ticket.page.to_string()),
        ];

        let headers = BTreeMap::from([("Accept".to_string(), "application/json".to_string())]);

        FetchRequest {
            url: request::build_url(&self.endpoint, &params),
            headers,
            context: encode_context(ticket),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SearchQuery;

    #[test]
    fn request_carries_filters_and_ticket() {
        let gateway = Gateway {
            api_key: "abc123".to_string(),
            orientation: "vertical".to_string(),
            safesearch: false,
            ..Gateway::default()
        };
        let ticket = FetchTicket {
            generation: 9,
            query: SearchQuery::parse("mountain lake").unwrap(),
            page: 1,
        };

        let request = gateway.request_for(&ticket);

        assert_eq!(
            request.url,
            "https://pixabay.com/api/?key=abc123&q=mountain%20lake&image_type=photo\
             &orientation=vertical&safesearch=false&per_page=12&page=1"
        );
        assert_eq!(
            request.headers.get("Accept").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(decode_context(&request.context).unwrap(), ticket);
    }
}
