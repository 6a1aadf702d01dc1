//! Search request/response types and the continuation cursor.

use serde::{Deserialize, Serialize};

use super::{PaperDetail, SearchResult};
use crate::config::api;

/// Opaque continuation token ("cursorMark").
///
/// Only equality is meaningful; the contents are never interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    /// The token sent with the first page of every search.
    #[must_use]
    pub fn initial() -> Self {
        Self(api::INITIAL_CURSOR.to_string())
    }

    /// Wrap a token received from the API.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token, for sending back to the API.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One search request against the cursor-paginated API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Query string in ADS syntax.
    pub query: String,

    /// Field list to return.
    pub fields: &'static [&'static str],

    /// Rows per page.
    pub rows: u32,

    /// Cursor to continue from.
    pub cursor: Cursor,
}

impl SearchRequest {
    /// Request the first page of `query`.
    #[must_use]
    pub fn first_page(query: impl Into<String>, fields: &'static [&'static str], rows: u32) -> Self {
        Self { query: query.into(), fields, rows, cursor: Cursor::initial() }
    }
}

/// What the search collaborator returns for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResponse {
    /// Records on this page.
    pub docs: Vec<SearchResult>,

    /// Cursor reported by the API, possibly an echo of the one sent.
    pub next_cursor: Option<Cursor>,

    /// Total number of matches.
    pub num_found: u64,
}

/// A page surfaced to callers, after the exhaustion rule has been applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Page {
    /// Records on this page.
    pub docs: Vec<SearchResult>,

    /// Cursor for the next page; `None` once the query is exhausted.
    pub next_cursor: Option<Cursor>,

    /// Total number of matches.
    pub num_found: u64,
}

impl Page {
    /// Check if there are more results available.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.next_cursor.is_some()
    }
}

/// Raw search response body.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchBody<T> {
    pub response: ResponseBody<T>,

    #[serde(default, rename = "nextCursorMark")]
    pub next_cursor_mark: Option<String>,
}

/// `response` object of a search body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ResponseBody<T> {
    #[serde(default = "Vec::new")]
    pub docs: Vec<T>,

    #[serde(default)]
    pub num_found: u64,
}

impl From<SearchBody<SearchResult>> for SearchResponse {
    fn from(body: SearchBody<SearchResult>) -> Self {
        Self {
            docs: body.response.docs,
            next_cursor: body.next_cursor_mark.map(Cursor::new),
            num_found: body.response.num_found,
        }
    }
}

impl SearchBody<PaperDetail> {
    /// The single record of a detail query, if any matched.
    pub(crate) fn into_first(self) -> Option<PaperDetail> {
        self.response.docs.into_iter().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_body_into_response() {
        let json = r#"{
            "responseHeader": {"status": 0},
            "response": {
                "numFound": 2,
                "docs": [{"bibcode": "A"}, {"bibcode": "B"}]
            },
            "nextCursorMark": "AoE/abc"
        }"#;

        let body: SearchBody<SearchResult> = serde_json::from_str(json).unwrap();
        let response = SearchResponse::from(body);
        assert_eq!(response.num_found, 2);
        assert_eq!(response.docs.len(), 2);
        assert_eq!(response.next_cursor, Some(Cursor::new("AoE/abc")));
    }

    #[test]
    fn test_search_body_without_cursor() {
        let json = r#"{"response": {"numFound": 0, "docs": []}}"#;
        let body: SearchBody<SearchResult> = serde_json::from_str(json).unwrap();
        let response = SearchResponse::from(body);
        assert!(response.next_cursor.is_none());
        assert!(response.docs.is_empty());
    }

    #[test]
    fn test_detail_body_first_doc() {
        let json = r#"{"response": {"numFound": 0, "docs": []}}"#;
        let body: SearchBody<PaperDetail> = serde_json::from_str(json).unwrap();
        assert!(body.into_first().is_none());
    }

    #[test]
    fn test_initial_cursor_is_star() {
        assert_eq!(Cursor::initial().as_str(), "*");
        let request = SearchRequest::first_page("q", &[], 10);
        assert_eq!(request.cursor, Cursor::initial());
    }
}
