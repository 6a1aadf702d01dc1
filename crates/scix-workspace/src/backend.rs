//! Collaborator interfaces the workspace core is written against.
//!
//! [`crate::client::AdsClient`] implements both traits over HTTP; tests
//! substitute in-memory fakes.

use crate::error::ClientResult;
use crate::models::{ExportFormatInfo, PaperDetail, SearchRequest, SearchResponse, SearchResult};

/// Cursor-paginated search service.
#[async_trait::async_trait]
pub trait SearchBackend: Send + Sync {
    /// Run one search request and return the raw page, cursor included.
    async fn search(&self, request: &SearchRequest) -> ClientResult<SearchResponse>;

    /// Fetch one record with the detail field set; `None` when nothing matches.
    async fn fetch_detail(&self, bibcode: &str) -> ClientResult<Option<PaperDetail>>;

    /// Records referenced by `bibcode`.
    async fn references(&self, bibcode: &str, rows: u32) -> ClientResult<Vec<SearchResult>>;
}

/// Batch citation rendering service.
#[async_trait::async_trait]
pub trait ExportGateway: Send + Sync {
    /// Render every bibcode in `format` as one trimmed block of text.
    async fn export(&self, bibcodes: &[String], format: &str) -> ClientResult<String>;

    /// Formats the service can render.
    async fn manifest(&self) -> ClientResult<Vec<ExportFormatInfo>>;
}
