//! Error types for the seller gateway.

use seller_repository::{SearchIndexError, StoreError};
use seller_shared::SellerId;
use thiserror::Error;

/// Errors that can occur in a gateway operation.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// The request carried an argument the operation cannot accept.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// No seller exists with the requested identifier.
    #[error("Seller not found: {0}")]
    NotFound(SellerId),

    /// Error from the record store.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Error from the search index.
    #[error("Search index error: {0}")]
    Index(#[from] SearchIndexError),
}

impl GatewayError {
    /// Create an invalid argument error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}
