//! The workspace facade: one client, one detail cache, the persisted stores,
//! and the selected citation format.

use std::sync::Arc;

use futures::Stream;

use crate::backend::{ExportGateway, SearchBackend};
use crate::client::AdsClient;
use crate::config::Config;
use crate::error::{ClientError, WorkspaceError, WorkspaceResult};
use crate::export::{FormatGroup, citation_text, fallback_groups, group_formats};
use crate::models::{BibliographyEntry, CitationFormat, Page, PaperDetail, SearchResult};
use crate::session::{DetailCache, PaginationController, SearchSession};
use crate::storage::{self, BibliographyStore, KeyValueStore, TokenStore};

/// Entry point for front ends: one client, one detail cache and the persisted stores.
pub struct Workspace {
    config: Config,
    export: Arc<dyn ExportGateway>,
    pagination: PaginationController,
    details: DetailCache,
    bibliography: BibliographyStore,
    tokens: TokenStore,
    citation_format: CitationFormat,
}

impl Workspace {
    /// Build a workspace over explicit collaborators.
    pub fn new<B>(config: Config, backend: Arc<B>, store: Arc<dyn KeyValueStore>) -> Self
    where
        B: SearchBackend + ExportGateway + 'static,
    {
        let search: Arc<dyn SearchBackend> = backend.clone();
        Self {
            config,
            export: backend,
            pagination: PaginationController::new(search.clone()),
            details: DetailCache::new(search),
            bibliography: BibliographyStore::new(store.clone()),
            tokens: TokenStore::new(store),
            citation_format: CitationFormat::default(),
        }
    }

    /// Open the on-disk workspace and connect to ADS.
    ///
    /// `token` overrides the stored token for this session.
    pub fn connect(config: Config, token: Option<String>) -> WorkspaceResult<Self> {
        let store = storage::open(&config.data_dir);
        let tokens = TokenStore::new(store.clone());

        let token = match token.filter(|t| !t.trim().is_empty()) {
            Some(token) => token,
            None => tokens.get()?.ok_or(WorkspaceError::MissingToken)?,
        };

        let client = AdsClient::new(&config, token.trim())
            .map_err(|e| ClientError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self::new(config, Arc::new(client), store))
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Start a fresh pagination session.
    #[must_use]
    pub fn session(&self) -> SearchSession {
        SearchSession::new()
    }

    /// Run a new search in `session` with the configured page size.
    pub async fn search(&self, session: &mut SearchSession, query: &str) -> WorkspaceResult<Page> {
        self.pagination.search(session, query, self.config.page_size).await
    }

    /// Next page of the session's query.
    pub async fn load_more(&self, session: &mut SearchSession) -> WorkspaceResult<Page> {
        self.pagination.load_more(session).await
    }

    /// Stream up to `max_pages` pages of `query`.
    pub fn pages<'a>(
        &'a self,
        query: &'a str,
        max_pages: Option<usize>,
    ) -> impl Stream<Item = WorkspaceResult<Page>> + Send + 'a {
        self.pagination.pages(query, self.config.page_size, max_pages)
    }

    /// Paper detail, cached for the life of the workspace.
    pub async fn detail(&self, bibcode: &str) -> WorkspaceResult<Arc<PaperDetail>> {
        self.details.get(bibcode).await
    }

    /// The detail cache.
    #[must_use]
    pub const fn details(&self) -> &DetailCache {
        &self.details
    }

    /// Records referenced by `bibcode`.
    pub async fn references(&self, bibcode: &str) -> WorkspaceResult<Vec<SearchResult>> {
        self.pagination.references(bibcode, self.config.references_rows).await
    }

    /// Currently selected citation format.
    #[must_use]
    pub const fn citation_format(&self) -> CitationFormat {
        self.citation_format
    }

    /// Select the citation format used by [`Self::cite`].
    pub fn select_citation_format(&mut self, format: CitationFormat) {
        tracing::debug!(?format, "Citation format selected");
        self.citation_format = format;
    }

    /// Citation text for `doc` in the selected format.
    pub async fn cite(&self, doc: &SearchResult) -> WorkspaceResult<String> {
        citation_text(doc, self.citation_format, self.export.as_ref()).await
    }

    /// The persisted bibliography.
    #[must_use]
    pub const fn bibliography(&self) -> &BibliographyStore {
        &self.bibliography
    }

    /// The persisted token.
    #[must_use]
    pub const fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    /// Save a record to the bibliography. Returns `false` if it was already saved.
    pub fn save(&self, doc: &SearchResult) -> WorkspaceResult<bool> {
        self.bibliography.add(BibliographyEntry::now(doc))
    }

    /// Render the whole bibliography with one export call.
    pub async fn export_bibliography(&self, format: &str) -> WorkspaceResult<String> {
        self.bibliography.export_all(self.export.as_ref(), format).await
    }

    /// Export formats grouped for selection.
    pub async fn export_formats(&self) -> WorkspaceResult<Vec<FormatGroup>> {
        let manifest = self.export.manifest().await?;
        Ok(group_formats(&manifest))
    }

    /// Export formats, or a built-in short list when the manifest is unavailable.
    pub async fn export_formats_or_default(&self) -> Vec<FormatGroup> {
        match self.export_formats().await {
            Ok(groups) if !groups.is_empty() => groups,
            Ok(_) => fallback_groups(),
            Err(err) => {
                tracing::warn!(error = %err, "Export manifest unavailable, using defaults");
                fallback_groups()
            }
        }
    }
}

impl std::fmt::Debug for Workspace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workspace")
            .field("config", &self.config)
            .field("citation_format", &self.citation_format)
            .finish()
    }
}
