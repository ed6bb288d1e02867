//! Error types for search service operations

use crate::error::AppError;

/// Result type for search operations
pub type SearchResult<T> = std::result::Result<T, SearchError>;

/// Errors that can occur while talking to the search service
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Connection, DNS or TLS failure, or a body that is not UTF-8 text
    #[error("Transport error: {0}")]
    Transport(String),

    /// Non-empty body that is not valid JSON
    #[error("Decode error: {0}")]
    Decode(String),

    /// Expected field absent from an otherwise valid response
    #[error("Missing field in search response: {0}")]
    MissingField(String),

    /// Provisioning document missing, unreadable or malformed
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        SearchError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(err: serde_json::Error) -> Self {
        SearchError::Decode(err.to_string())
    }
}

impl From<SearchError> for AppError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::Config(msg) => AppError::Configuration(msg),
            other => AppError::Upstream(other),
        }
    }
}
