//! Search index trait definition.
//!
//! This module defines the abstract interface for the secondary seller search
//! index, allowing for different backend implementations (OpenSearch, in-memory, etc.).

use async_trait::async_trait;

use crate::errors::SearchIndexError;
use seller_shared::{Seller, SellerId};

/// Secondary, text-searchable mirror of the seller records.
///
/// Implementations are injected into the gateway to enable dependency injection
/// and easy testing with mock implementations.
#[async_trait]
pub trait SearchIndex: Send + Sync {
    /// Index a seller document.
    ///
    /// If a document with the same identifier already exists, it will be replaced.
    ///
    /// # Arguments
    ///
    /// * `seller` - The seller to index. It must carry an identifier.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the document was indexed successfully
    /// * `Err(SearchIndexError)` - If indexing fails
    async fn upsert(&self, seller: &Seller) -> Result<(), SearchIndexError>;

    /// Delete a seller document.
    ///
    /// If the document doesn't exist, the operation is considered successful.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the document was deleted (or didn't exist)
    /// * `Err(SearchIndexError)` - If the deletion fails
    async fn delete_by_id(&self, id: SellerId) -> Result<(), SearchIndexError>;

    /// Run a free-text query and return every matching seller.
    ///
    /// The query text is passed to the engine verbatim. Results are ordered by
    /// relevance as the engine defines it and are not paginated.
    async fn search(&self, query: &str) -> Result<Vec<Seller>, SearchIndexError>;

    /// Ensure the search index exists with proper mappings.
    ///
    /// This should be called during application startup.
    async fn ensure_index_exists(&self) -> Result<(), SearchIndexError>;

    /// Check if the search engine is healthy and reachable.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - If the search engine is healthy
    /// * `Ok(false)` - If the search engine is unhealthy
    /// * `Err(SearchIndexError)` - If the health check fails to execute
    async fn health_check(&self) -> Result<bool, SearchIndexError>;
}
