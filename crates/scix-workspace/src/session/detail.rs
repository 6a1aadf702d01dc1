//! On-demand paper detail cache.
//!
//! Details are fetched on first use and kept for the life of the cache.
//! Concurrent requests for the same bibcode share a single fetch.

use std::sync::Arc;

use moka::future::Cache;

use crate::backend::SearchBackend;
use crate::error::{ClientError, WorkspaceError, WorkspaceResult};
use crate::models::PaperDetail;

/// Why a shared fetch produced no detail. Cloned out to every waiter.
#[derive(Debug, Clone)]
enum FetchFailure {
    NotFound,
    Client(ClientError),
}

/// Session-lifetime cache of paper details keyed by bibcode.
#[derive(Clone)]
pub struct DetailCache {
    backend: Arc<dyn SearchBackend>,

    /// Unbounded, no TTL: entries live until the cache is dropped.
    cache: Cache<String, Arc<PaperDetail>>,
}

impl DetailCache {
    #[must_use]
    pub fn new(backend: Arc<dyn SearchBackend>) -> Self {
        Self { backend, cache: Cache::builder().build() }
    }

    /// Get the detail for `bibcode`, fetching it on a miss.
    ///
    /// Repeated calls return the same `Arc`. A bibcode that matches nothing
    /// yields [`WorkspaceError::NotFound`]; failures are not cached.
    pub async fn get(&self, bibcode: &str) -> WorkspaceResult<Arc<PaperDetail>> {
        if let Some(hit) = self.cache.get(bibcode).await {
            tracing::debug!(bibcode, "Detail cache hit");
            return Ok(hit);
        }

        let backend = &self.backend;
        let init = async move {
            match backend.fetch_detail(bibcode).await {
                Ok(Some(detail)) => Ok(Arc::new(detail)),
                Ok(None) => Err(FetchFailure::NotFound),
                Err(err) => Err(FetchFailure::Client(err)),
            }
        };

        self.cache.try_get_with(bibcode.to_string(), init).await.map_err(|failure| {
            match failure.as_ref() {
                FetchFailure::NotFound => WorkspaceError::not_found(bibcode),
                FetchFailure::Client(err) => WorkspaceError::Client(err.clone()),
            }
        })
    }

    /// Cached detail, without fetching.
    pub async fn peek(&self, bibcode: &str) -> Option<Arc<PaperDetail>> {
        self.cache.get(bibcode).await
    }

    /// Check whether `bibcode` is cached.
    #[must_use]
    pub fn contains(&self, bibcode: &str) -> bool {
        self.cache.contains_key(bibcode)
    }

    /// Number of cached details.
    pub async fn len(&self) -> u64 {
        self.cache.run_pending_tasks().await;
        self.cache.entry_count()
    }

    /// Drop every cached detail.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }
}

impl std::fmt::Debug for DetailCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetailCache").field("entries", &self.cache.entry_count()).finish()
    }
}
