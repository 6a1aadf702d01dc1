//! Error types for the SciX workspace.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.

/// Errors from the collaborator layer (search, detail, export APIs).
///
/// `Clone` so that one failed in-flight fetch can be handed to every waiter.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The API token is missing, invalid or expired (401 response)
    #[error("Invalid API token")]
    Unauthorized,

    /// Any other non-success HTTP status
    #[error("ADS API error ({status}): {message}")]
    Remote {
        /// HTTP status code
        status: u16,
        /// Response body or message
        message: String,
    },

    /// HTTP transport error (connection, DNS, TLS, etc.)
    #[error("HTTP error: {0}")]
    Transport(String),

    /// Request timeout
    #[error("Request timed out")]
    Timeout,

    /// Response body did not match the expected shape
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl ClientError {
    /// Create a remote error for a non-success status.
    #[must_use]
    pub fn remote(status: u16, message: impl Into<String>) -> Self {
        Self::Remote { status, message: message.into() }
    }

    /// Returns true if re-issuing the same request may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout | Self::Transport(_) => true,
            Self::Remote { status, .. } => *status == 429 || *status >= 500,
            Self::Unauthorized | Self::Parse(_) => false,
        }
    }

    /// Returns true if the credential must be re-entered.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Parse(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<reqwest_middleware::Error> for ClientError {
    fn from(err: reqwest_middleware::Error) -> Self {
        match err {
            reqwest_middleware::Error::Reqwest(inner) => inner.into(),
            reqwest_middleware::Error::Middleware(inner) => Self::Transport(inner.to_string()),
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Errors from workspace operations.
#[derive(thiserror::Error, Debug)]
pub enum WorkspaceError {
    /// Error from a collaborator
    #[error("API error: {0}")]
    Client(#[from] ClientError),

    /// A single-identifier detail query matched nothing
    #[error("Paper not found: {identifier}")]
    NotFound {
        /// The bibcode that was requested
        identifier: String,
    },

    /// A search was requested with a blank query
    #[error("Enter a search query")]
    EmptyQuery,

    /// `load_more` was called before any search ran
    #[error("No active query; run a search first")]
    NoActiveQuery,

    /// The session holds no continuation token
    #[error("No more results for this query")]
    Exhausted,

    /// A response arrived for a request the session has since superseded
    #[error("Stale response (issued at generation {issued}, session at {current})")]
    Stale {
        /// Generation the request was issued under
        issued: u64,
        /// Generation the session is at now
        current: u64,
    },

    /// Persisted bibliography failed to parse
    #[error("Stored bibliography is corrupt: {0}")]
    PersistenceCorrupt(String),

    /// Persistence backend failed to read or write
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Export was requested for an empty bibliography
    #[error("Bibliography is empty")]
    EmptyBibliography,

    /// An operation needs an API token and none is configured
    #[error("API token required")]
    MissingToken,
}

impl WorkspaceError {
    /// Create a not found error.
    #[must_use]
    pub fn not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound { identifier: identifier.into() }
    }

    /// Returns true if the credential must be re-entered.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Client(ClientError::Unauthorized) | Self::MissingToken)
    }

    /// Convert to a message suitable for showing to the user.
    #[must_use]
    pub fn to_user_message(&self) -> String {
        match self {
            Self::Client(ClientError::Unauthorized) => {
                "Invalid API token. Please re-enter your ADS token (scix token set <TOKEN>)."
                    .to_string()
            }
            Self::MissingToken => {
                "Please configure your API token first (scix token set <TOKEN>).".to_string()
            }
            Self::Client(err) if err.is_retryable() => {
                format!("{err}. The request can be retried.")
            }
            Self::NotFound { identifier } => {
                format!("Paper not found: {identifier}. Please check the bibcode is correct.")
            }
            _ => self.to_string(),
        }
    }
}

impl From<std::io::Error> for WorkspaceError {
    fn from(err: std::io::Error) -> Self {
        Self::Persistence(err.to_string())
    }
}

/// Result type alias for collaborator operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type alias for workspace operations.
pub type WorkspaceResult<T> = Result<T, WorkspaceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_retryable() {
        assert!(ClientError::Timeout.is_retryable());
        assert!(ClientError::remote(503, "unavailable").is_retryable());
        assert!(ClientError::remote(429, "slow down").is_retryable());

        assert!(!ClientError::Unauthorized.is_retryable());
        assert!(!ClientError::remote(400, "bad query").is_retryable());
        assert!(!ClientError::Parse("eof".into()).is_retryable());
    }

    #[test]
    fn test_unauthorized_prompts_for_token() {
        let err = WorkspaceError::from(ClientError::Unauthorized);
        assert!(err.is_unauthorized());
        assert!(err.to_user_message().contains("token"));
    }

    #[test]
    fn test_not_found_message_names_bibcode() {
        let err = WorkspaceError::not_found("2024ApJ...1..1X");
        assert!(err.to_user_message().contains("2024ApJ...1..1X"));
        assert!(!err.is_unauthorized());
    }
}
