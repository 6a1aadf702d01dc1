//! ADS API client.
//!
//! Provides async HTTP client with:
//! - Connection pooling via reqwest
//! - Retry middleware with exponential backoff
//! - Bearer-token authentication
//! - 401 mapped to [`ClientError::Unauthorized`], other failures to
//!   [`ClientError::Remote`]

use std::time::Duration;

use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use serde::Deserialize;

use crate::backend::{ExportGateway, SearchBackend};
use crate::config::{Config, api, fields};
use crate::error::{ClientError, ClientResult};
use crate::models::{
    ExportFormatInfo, PaperDetail, SearchBody, SearchRequest, SearchResponse,
    SearchResult,
};

/// ADS search and export API client.
#[derive(Clone)]
pub struct AdsClient {
    /// HTTP client with middleware.
    client: ClientWithMiddleware,

    /// Bearer token.
    token: String,

    /// Search endpoint URL.
    search_url: String,

    /// Export endpoint URL.
    export_url: String,
}

impl AdsClient {
    /// Create a new client with the given configuration and API token.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: &Config, token: impl Into<String>) -> anyhow::Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(reqwest::header::ACCEPT, "application/json".parse()?);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(api::MAX_KEEPALIVE)
            .pool_idle_timeout(api::KEEPALIVE_EXPIRY)
            .gzip(true)
            .build()?;

        let retry_policy = ExponentialBackoff::builder()
            .retry_bounds(Duration::from_secs(1), Duration::from_secs(30))
            .build_with_max_retries(config.max_retries);

        let client = ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            client,
            token: token.into(),
            search_url: config.search_url.clone(),
            export_url: config.export_url.trim_end_matches('/').to_string(),
        })
    }

    /// Make an authenticated GET request.
    async fn get<T>(&self, url: &str, params: &[(&str, String)]) -> ClientResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let response =
            self.client.get(url).bearer_auth(&self.token).query(params).send().await?;

        let response = Self::handle_response(response).await?;
        let value: serde_json::Value = response.json().await?;

        serde_json::from_value(value).map_err(ClientError::from)
    }

    /// Make an authenticated POST request with a JSON body.
    async fn post<T>(&self, url: &str, body: &serde_json::Value) -> ClientResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let body_str = serde_json::to_string(body)?;

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.token)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body_str)
            .send()
            .await?;

        let response = Self::handle_response(response).await?;
        let value: serde_json::Value = response.json().await?;

        serde_json::from_value(value).map_err(ClientError::from)
    }

    /// Handle API response status codes.
    async fn handle_response(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ClientError::Unauthorized);
        }

        let text = response.text().await.unwrap_or_default();
        tracing::debug!(status = status.as_u16(), body = %text, "ADS request failed");
        Err(ClientError::remote(status.as_u16(), text))
    }
}

#[async_trait::async_trait]
impl SearchBackend for AdsClient {
    async fn search(&self, request: &SearchRequest) -> ClientResult<SearchResponse> {
        tracing::debug!(query = %request.query, cursor = %request.cursor, rows = request.rows, "Searching");

        let params = [
            ("q", request.query.clone()),
            ("fl", request.fields.join(",")),
            ("rows", request.rows.to_string()),
            ("sort", api::SORT.to_string()),
            ("cursorMark", request.cursor.as_str().to_string()),
        ];

        let body: SearchBody<SearchResult> = self.get(&self.search_url, &params).await?;
        Ok(body.into())
    }

    async fn fetch_detail(&self, bibcode: &str) -> ClientResult<Option<PaperDetail>> {
        tracing::debug!(bibcode, "Fetching paper detail");

        let params = [
            ("q", format!("bibcode:{bibcode}")),
            ("fl", fields::DETAIL.join(",")),
            ("rows", "1".to_string()),
        ];

        let body: SearchBody<PaperDetail> = self.get(&self.search_url, &params).await?;
        Ok(body.into_first())
    }

    async fn references(&self, bibcode: &str, rows: u32) -> ClientResult<Vec<SearchResult>> {
        let params = [
            ("q", format!("references(bibcode:{bibcode})")),
            ("fl", fields::DEFAULT.join(",")),
            ("rows", rows.to_string()),
        ];

        let body: SearchBody<SearchResult> = self.get(&self.search_url, &params).await?;
        Ok(body.response.docs)
    }
}

#[async_trait::async_trait]
impl ExportGateway for AdsClient {
    async fn export(&self, bibcodes: &[String], format: &str) -> ClientResult<String> {
        #[derive(Deserialize)]
        struct ExportResponse {
            export: String,
        }

        tracing::debug!(format, count = bibcodes.len(), "Exporting citations");

        let url = format!("{}/{}", self.export_url, format.trim_start_matches('/'));
        let body = serde_json::json!({ "bibcode": bibcodes });

        let result: ExportResponse = self.post(&url, &body).await?;
        Ok(result.export.trim().to_string())
    }

    async fn manifest(&self) -> ClientResult<Vec<ExportFormatInfo>> {
        let url = format!("{}/manifest", self.export_url);
        self.get(&url, &[]).await
    }
}

impl std::fmt::Debug for AdsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdsClient")
            .field("search_url", &self.search_url)
            .field("has_token", &!self.token.is_empty())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_hides_token() {
        let client = AdsClient::new(&Config::default(), "super-secret").unwrap();
        let debug = format!("{client:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("has_token"));
    }
}
