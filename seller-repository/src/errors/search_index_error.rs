//! Search index error types.
//!
//! This module defines the error types that can occur during search index operations.

use thiserror::Error;

/// Errors that can occur during search index operations.
#[derive(Debug, Clone, Error)]
pub enum SearchIndexError {
    /// Failed to establish connection to the search engine.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Failed to index a document.
    #[error("Index error: {0}")]
    IndexError(String),

    /// Failed to delete a document.
    #[error("Delete error: {0}")]
    DeleteError(String),

    /// Search query execution failed.
    #[error("Query error: {0}")]
    QueryError(String),

    /// Failed to create the search index.
    #[error("Index creation error: {0}")]
    IndexCreationError(String),

    /// Failed to parse a response from the search engine.
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl SearchIndexError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create an index error.
    pub fn index(msg: impl Into<String>) -> Self {
        Self::IndexError(msg.into())
    }

    /// Create a delete error.
    pub fn delete(msg: impl Into<String>) -> Self {
        Self::DeleteError(msg.into())
    }

    /// Create a query error.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::QueryError(msg.into())
    }

    /// Create an index creation error.
    pub fn index_creation(msg: impl Into<String>) -> Self {
        Self::IndexCreationError(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Whether the failure looks transient and the operation is worth retrying.
    ///
    /// Connection and parse failures are always retried. Index and delete
    /// failures are retried only when the engine reported throttling,
    /// unavailability or a timeout.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::ConnectionError(_) | Self::ParseError(_) => true,
            Self::IndexError(msg) | Self::DeleteError(msg) => {
                let msg_lower = msg.to_lowercase();
                msg_lower.contains("rate limit")
                    || msg_lower.contains("timeout")
                    || msg_lower.contains("connection")
                    || msg_lower.contains("503")
                    || msg_lower.contains("429")
            }
            Self::QueryError(_) | Self::IndexCreationError(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_errors_are_retryable() {
        assert!(SearchIndexError::connection("refused").is_retryable());
    }

    #[test]
    fn test_throttled_index_errors_are_retryable() {
        assert!(SearchIndexError::index("Index failed with status 429 Too Many Requests").is_retryable());
        assert!(SearchIndexError::delete("Delete failed with status 503").is_retryable());
        assert!(!SearchIndexError::index("mapper_parsing_exception").is_retryable());
    }

    #[test]
    fn test_query_errors_are_not_retryable() {
        assert!(!SearchIndexError::query("bad").is_retryable());
        assert!(!SearchIndexError::index_creation("bad mapping").is_retryable());
    }
}
