//! Configuration for the SciX workspace.

use std::path::PathBuf;
use std::time::Duration;

/// API configuration constants.
pub mod api {
    use std::time::Duration;

    /// Search endpoint.
    pub const SEARCH_URL: &str = "https://api.adsabs.harvard.edu/v1/search/query";

    /// Export endpoint (format route is appended).
    pub const EXPORT_URL: &str = "https://api.adsabs.harvard.edu/v1/export";

    /// Request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Retries for transient failures (exponential backoff).
    pub const MAX_RETRIES: u32 = 3;

    /// Maximum keepalive connections.
    pub const MAX_KEEPALIVE: usize = 10;

    /// Keepalive expiry.
    pub const KEEPALIVE_EXPIRY: Duration = Duration::from_secs(30);

    /// Results per page for interactive search.
    pub const PAGE_SIZE: u32 = 10;

    /// Rows requested when listing references.
    pub const REFERENCES_ROWS: u32 = 25;

    /// Cursor sent with the first page of a search.
    pub const INITIAL_CURSOR: &str = "*";

    /// Result ordering. Cursor paging needs a unique tiebreaker.
    pub const SORT: &str = "score desc, id desc";

    /// Query used to probe whether a token is accepted.
    pub const TOKEN_PROBE_QUERY: &str = "bibcode:2024ApJ";

    /// Directory name for persisted workspace state, under the user config dir.
    pub const DATA_DIR: &str = "scix-workspace";
}

/// Field lists for search requests.
pub mod fields {
    /// Fields shown in result lists.
    pub const DEFAULT: &[&str] = &["bibcode", "title", "author", "year", "pub"];

    /// Fields for the expanded detail view.
    pub const DETAIL: &[&str] = &[
        "bibcode",
        "title",
        "author",
        "year",
        "pub",
        "abstract",
        "citation_count",
        "doi",
        "aff",
    ];
}

/// Workspace configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Search endpoint URL.
    pub search_url: String,

    /// Export endpoint URL.
    pub export_url: String,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Retries for transient failures.
    pub max_retries: u32,

    /// Results per page.
    pub page_size: u32,

    /// Rows requested for reference lists.
    pub references_rows: u32,

    /// Where the token and bibliography are persisted.
    pub data_dir: PathBuf,
}

impl Config {
    /// Create a configuration pointing at the public ADS API.
    #[must_use]
    pub fn new() -> Self {
        Self {
            search_url: api::SEARCH_URL.to_string(),
            export_url: api::EXPORT_URL.to_string(),
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
            max_retries: api::MAX_RETRIES,
            page_size: api::PAGE_SIZE,
            references_rows: api::REFERENCES_ROWS,
            data_dir: default_data_dir(),
        }
    }

    /// Create a test configuration with custom URLs for mock servers.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            search_url: format!("{base_url}/v1/search/query"),
            export_url: format!("{base_url}/v1/export"),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            max_retries: 0, // Fail fast in tests
            data_dir: std::env::temp_dir().join("scix-workspace-test"),
            ..Self::new()
        }
    }

    /// Create configuration from environment variables.
    ///
    /// `SCIX_API_URL` and `SCIX_EXPORT_URL` point the client at a local proxy
    /// during development.
    ///
    /// # Errors
    ///
    /// Returns error if environment variables are invalid.
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::new();

        if let Ok(search_url) = std::env::var("SCIX_API_URL") {
            url::Url::parse(&search_url)
                .map_err(|e| anyhow::anyhow!("SCIX_API_URL is not a valid URL: {e}"))?;
            config.search_url = search_url;
        }

        if let Ok(export_url) = std::env::var("SCIX_EXPORT_URL") {
            url::Url::parse(&export_url)
                .map_err(|e| anyhow::anyhow!("SCIX_EXPORT_URL is not a valid URL: {e}"))?;
            config.export_url = export_url.trim_end_matches('/').to_string();
        }

        if let Ok(dir) = std::env::var("SCIX_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }

        Ok(config)
    }

    /// Override the data directory.
    #[must_use]
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }
}

/// Per-user data directory, falling back to the home directory and then the
/// working directory on platforms without either.
fn default_data_dir() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join(api::DATA_DIR))
        .or_else(|| dirs::home_dir().map(|home| home.join(format!(".{}", api::DATA_DIR))))
        .unwrap_or_else(|| PathBuf::from(format!(".{}", api::DATA_DIR)))
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
