//! Search query value type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A trimmed, non-empty search term.
///
/// Constructed only through [`SearchQuery::parse`], so holding one proves the
/// text is worth sending to the API. Equality is exact after trimming:
/// `"cats"` and `" cats "` are the same query, `"Cats"` is not.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Parses user input into a query, returning `None` for blank input.
    ///
    /// # Examples
    ///
    /// ```
    /// use galleria::domain::SearchQuery;
    ///
    /// assert_eq!(SearchQuery::parse("  red fox ").unwrap().as_str(), "red fox");
    /// assert!(SearchQuery::parse("   ").is_none());
    /// ```
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for SearchQuery {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| "search query must not be blank".to_string())
    }
}

impl From<SearchQuery> for String {
    fn from(query: SearchQuery) -> Self {
        query.0
    }
}
