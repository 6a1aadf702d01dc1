//! Cursor-based pagination over the search collaborator.
//!
//! Session state lives in an explicit [`SearchSession`]. Every request is
//! stamped with the session generation when it is issued, and a response is
//! only applied if the session has not moved on in the meantime.

use std::sync::Arc;

use futures::Stream;

use crate::backend::SearchBackend;
use crate::config::fields;
use crate::error::{WorkspaceError, WorkspaceResult};
use crate::models::{Cursor, Page, SearchRequest, SearchResponse, SearchResult};

/// The next cursor to surface after sending `sent` and receiving `received`.
///
/// The API echoes the sent cursor instead of omitting it once results run
/// out, so an echo means exhausted just like an absent cursor.
#[must_use]
pub fn continuation(sent: &Cursor, received: Option<Cursor>) -> Option<Cursor> {
    received.filter(|next| next != sent)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RequestKind {
    NewSearch,
    LoadMore,
}

/// A search request stamped with the session generation it was issued under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Session generation at issue time.
    pub generation: u64,

    /// The request to send.
    pub search: SearchRequest,

    kind: RequestKind,
}

/// Marks which expanded result a detail fetch was started for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailTicket {
    /// Bibcode being expanded.
    pub bibcode: String,
    generation: u64,
    epoch: u64,
}

/// Per-user pagination state.
#[derive(Debug, Clone, Default)]
pub struct SearchSession {
    query: Option<String>,
    cursor: Option<Cursor>,
    rows: u32,
    generation: u64,
    expanded: Option<String>,
    expand_epoch: u64,
}

impl SearchSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Query of the last successful search.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Cursor for the next page, if the query is not exhausted.
    #[must_use]
    pub fn next_cursor(&self) -> Option<&Cursor> {
        self.cursor.as_ref()
    }

    /// Check if `load_more` has anything to fetch.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.query.is_some() && self.cursor.is_some()
    }

    /// Current fencing generation.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Forget the query and cursor. In-flight responses become stale.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.query = None;
        self.cursor = None;
        self.expanded = None;
    }

    /// Start a new search. Any request issued before this becomes stale.
    ///
    /// Query and cursor are only replaced once the response is applied, so a
    /// failed search leaves the previous results pageable.
    pub fn begin_search(&mut self, query: &str, rows: u32) -> WorkspaceResult<PageRequest> {
        let query = query.trim();
        if query.is_empty() {
            return Err(WorkspaceError::EmptyQuery);
        }

        self.generation += 1;
        Ok(PageRequest {
            generation: self.generation,
            search: SearchRequest::first_page(query, fields::DEFAULT, rows),
            kind: RequestKind::NewSearch,
        })
    }

    /// Request the page after the last one applied.
    pub fn begin_load_more(&self) -> WorkspaceResult<PageRequest> {
        let query = self.query.as_ref().ok_or(WorkspaceError::NoActiveQuery)?;
        let cursor = self.cursor.as_ref().ok_or(WorkspaceError::Exhausted)?;

        Ok(PageRequest {
            generation: self.generation,
            search: SearchRequest {
                query: query.clone(),
                fields: fields::DEFAULT,
                rows: self.rows,
                cursor: cursor.clone(),
            },
            kind: RequestKind::LoadMore,
        })
    }

    /// Apply a response to the session and surface it as a page.
    ///
    /// Fails with [`WorkspaceError::Stale`], leaving the session untouched,
    /// if a newer search started after `request` was issued, or if another
    /// page was applied since a load-more `request` was issued.
    pub fn apply(&mut self, request: &PageRequest, response: SearchResponse) -> WorkspaceResult<Page> {
        let superseded = request.generation != self.generation
            || (request.kind == RequestKind::LoadMore
                && (self.cursor.as_ref() != Some(&request.search.cursor)
                    || self.query.as_deref() != Some(request.search.query.as_str())));

        if superseded {
            tracing::warn!(
                query = %request.search.query,
                issued = request.generation,
                current = self.generation,
                "Dropping stale search response"
            );
            return Err(WorkspaceError::Stale {
                issued: request.generation,
                current: self.generation,
            });
        }

        let next_cursor = continuation(&request.search.cursor, response.next_cursor);

        if request.kind == RequestKind::NewSearch {
            self.query = Some(request.search.query.clone());
            self.rows = request.search.rows;
            self.expanded = None;
        }
        self.cursor.clone_from(&next_cursor);

        tracing::debug!(
            query = %request.search.query,
            generation = self.generation,
            docs = response.docs.len(),
            exhausted = next_cursor.is_none(),
            "Applied search page"
        );

        Ok(Page { docs: response.docs, next_cursor, num_found: response.num_found })
    }

    /// Toggle the expanded result. Returns a ticket when `bibcode` opens.
    pub fn toggle_expanded(&mut self, bibcode: &str) -> Option<DetailTicket> {
        self.expand_epoch += 1;
        if self.expanded.as_deref() == Some(bibcode) {
            self.expanded = None;
            return None;
        }

        self.expanded = Some(bibcode.to_string());
        Some(DetailTicket {
            bibcode: bibcode.to_string(),
            generation: self.generation,
            epoch: self.expand_epoch,
        })
    }

    /// The currently expanded bibcode.
    #[must_use]
    pub fn expanded(&self) -> Option<&str> {
        self.expanded.as_deref()
    }

    /// Check whether a detail fetch started under `ticket` should still be shown.
    #[must_use]
    pub fn accepts(&self, ticket: &DetailTicket) -> bool {
        ticket.generation == self.generation
            && ticket.epoch == self.expand_epoch
            && self.expanded.as_deref() == Some(ticket.bibcode.as_str())
    }
}

/// Drives paged searches against a [`SearchBackend`].
#[derive(Clone)]
pub struct PaginationController {
    backend: Arc<dyn SearchBackend>,
}

impl PaginationController {
    #[must_use]
    pub fn new(backend: Arc<dyn SearchBackend>) -> Self {
        Self { backend }
    }

    /// Send a request without touching any session.
    pub async fn fetch(&self, request: &PageRequest) -> WorkspaceResult<SearchResponse> {
        Ok(self.backend.search(&request.search).await?)
    }

    /// Run a fresh search, replacing the session's query on success.
    pub async fn search(
        &self,
        session: &mut SearchSession,
        query: &str,
        page_size: u32,
    ) -> WorkspaceResult<Page> {
        let request = session.begin_search(query, page_size)?;
        tracing::info!(query = %request.search.query, "Starting search");
        let response = self.fetch(&request).await?;
        session.apply(&request, response)
    }

    /// Fetch the next page of the session's query.
    pub async fn load_more(&self, session: &mut SearchSession) -> WorkspaceResult<Page> {
        let request = session.begin_load_more()?;
        let response = self.fetch(&request).await?;
        session.apply(&request, response)
    }

    /// Stream pages of `query` until exhausted, or until `max_pages` pages.
    ///
    /// `Some(0)` yields nothing and sends no request.
    pub fn pages<'a>(
        &'a self,
        query: &'a str,
        page_size: u32,
        max_pages: Option<usize>,
    ) -> impl Stream<Item = WorkspaceResult<Page>> + Send + 'a {
        async_stream::try_stream! {
            if max_pages != Some(0) {
                let mut session = SearchSession::new();
                let mut page = self.search(&mut session, query, page_size).await?;
                let mut fetched = 1usize;

                loop {
                    let more = page.has_more();
                    yield page;

                    if !more || max_pages.is_some_and(|max| fetched >= max) {
                        break;
                    }

                    page = self.load_more(&mut session).await?;
                    fetched += 1;
                }
            }
        }
    }

    /// Records referenced by `bibcode`.
    pub async fn references(&self, bibcode: &str, rows: u32) -> WorkspaceResult<Vec<SearchResult>> {
        Ok(self.backend.references(bibcode, rows).await?)
    }
}

impl std::fmt::Debug for PaginationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaginationController").finish()
    }
}
