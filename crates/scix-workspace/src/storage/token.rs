//! Persisted API token.

use std::sync::Arc;

use super::KeyValueStore;
use crate::backend::SearchBackend;
use crate::config::{api, fields};
use crate::error::WorkspaceResult;
use crate::models::SearchRequest;

/// Storage key holding the ADS API token.
pub const TOKEN_KEY: &str = "scix_ads_api_token";

/// The user's ADS API token.
#[derive(Clone)]
pub struct TokenStore {
    store: Arc<dyn KeyValueStore>,
}

impl TokenStore {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// The stored token, if any.
    pub fn get(&self) -> WorkspaceResult<Option<String>> {
        Ok(self.store.get(TOKEN_KEY)?.filter(|t| !t.is_empty()))
    }

    /// Store a token, trimming surrounding whitespace.
    pub fn set(&self, token: &str) -> WorkspaceResult<()> {
        self.store.set(TOKEN_KEY, token.trim())
    }

    /// Forget the stored token.
    pub fn clear(&self) -> WorkspaceResult<()> {
        self.store.remove(TOKEN_KEY)
    }

    /// Check whether a non-empty token is stored.
    pub fn has(&self) -> WorkspaceResult<bool> {
        Ok(self.get()?.is_some())
    }

    /// Check that the token `backend` authenticates with is accepted.
    ///
    /// Runs a one-row probe search; any failure counts as invalid.
    pub async fn validate(backend: &dyn SearchBackend) -> bool {
        let request = SearchRequest::first_page(api::TOKEN_PROBE_QUERY, fields::DEFAULT, 1);
        match backend.search(&request).await {
            Ok(_) => true,
            Err(err) => {
                tracing::debug!(error = %err, "Token validation failed");
                false
            }
        }
    }
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore").finish()
    }
}
