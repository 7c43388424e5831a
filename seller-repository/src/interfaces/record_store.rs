//! Record store trait definition.
//!
//! This module defines the abstract interface for the authoritative seller
//! storage, allowing for different backend implementations (PostgreSQL, in-memory, etc.).

use async_trait::async_trait;

use crate::errors::StoreError;
use seller_shared::{Page, PageRequest, Seller, SellerId};

/// Authoritative, durable keyed storage for sellers.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` to allow use across async tasks.
///
/// # Error Handling
///
/// All methods return `Result<T, StoreError>` for consistent error handling.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert a new seller and assign it an identifier.
    ///
    /// Any identifier already present on `seller` is ignored.
    ///
    /// # Returns
    ///
    /// * `Ok(Seller)` - The stored seller, with its new identifier
    /// * `Err(StoreError)` - If the insert fails
    async fn insert(&self, seller: Seller) -> Result<Seller, StoreError>;

    /// Write a seller at its identifier, inserting it if no record exists.
    ///
    /// # Returns
    ///
    /// * `Ok(Seller)` - The stored seller
    /// * `Err(StoreError::QueryError)` - If `seller.id` is absent
    /// * `Err(StoreError)` - If the write fails
    async fn upsert(&self, seller: Seller) -> Result<Seller, StoreError>;

    /// Look up a seller by identifier.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(Seller))` - If the seller exists
    /// * `Ok(None)` - If it does not
    /// * `Err(StoreError)` - If the lookup fails
    async fn find_by_id(&self, id: SellerId) -> Result<Option<Seller>, StoreError>;

    /// Read one page of sellers in ascending identifier order.
    ///
    /// Requesting a page past the end returns an empty page with the correct total.
    async fn find_page(&self, request: PageRequest) -> Result<Page, StoreError>;

    /// Remove a seller.
    ///
    /// Removing an identifier that does not exist is not an error.
    async fn delete_by_id(&self, id: SellerId) -> Result<(), StoreError>;

    /// Check if the store is reachable.
    async fn health_check(&self) -> Result<bool, StoreError>;
}
