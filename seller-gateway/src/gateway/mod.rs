//! The seller gateway.
//!
//! Every write goes to the record store first and is then mirrored into the
//! search index. There is no rollback: if the mirror fails the store keeps the
//! write and the error is returned to the caller.

use std::sync::Arc;
use tracing::{debug, instrument};

use crate::config::{GatewayConfig, UpdateWithoutId};
use crate::errors::GatewayError;
use crate::mirror::IndexMirror;
use crate::pagination::PageParams;
use crate::validation::SellerValidator;
use seller_repository::{RecordStore, SearchIndex, StoreError};
use seller_shared::{Page, Seller, SellerId};

/// A seller that was just created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedSeller {
    /// The stored seller, carrying its new identifier.
    pub seller: Seller,
    /// Location of the new resource, `/sellers/{id}`.
    pub location: String,
}

impl CreatedSeller {
    fn new(seller: Seller, id: SellerId) -> Self {
        Self {
            seller,
            location: format!("/sellers/{}", id),
        }
    }
}

/// Result of an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// An existing identifier was written.
    Updated(Seller),
    /// The seller had no identifier and was created instead.
    Created(CreatedSeller),
}

/// Façade over the record store and search index.
pub struct SellerGateway {
    store: Arc<dyn RecordStore>,
    index: Arc<dyn SearchIndex>,
    mirror: IndexMirror,
    validators: Vec<Arc<dyn SellerValidator>>,
    config: GatewayConfig,
}

impl SellerGateway {
    /// Create a gateway with the default configuration.
    pub fn new(store: Arc<dyn RecordStore>, index: Arc<dyn SearchIndex>) -> Self {
        Self::with_config(store, index, GatewayConfig::default())
    }

    /// Create a gateway with a custom configuration.
    pub fn with_config(
        store: Arc<dyn RecordStore>,
        index: Arc<dyn SearchIndex>,
        config: GatewayConfig,
    ) -> Self {
        let mirror = IndexMirror::with_config(index.clone(), config.mirror.clone());
        Self {
            store,
            index,
            mirror,
            validators: Vec::new(),
            config,
        }
    }

    /// Install a validator run before every create and update.
    pub fn with_validator(mut self, validator: Arc<dyn SellerValidator>) -> Self {
        self.validators.push(validator);
        self
    }

    async fn validate(&self, seller: &Seller) -> Result<(), GatewayError> {
        for validator in &self.validators {
            validator.validate(seller).await?;
        }
        Ok(())
    }

    /// Create a new seller.
    ///
    /// Fails with `InvalidArgument` and writes nothing if the seller already
    /// carries an identifier.
    #[instrument(skip(self, seller))]
    pub async fn create(&self, seller: Seller) -> Result<CreatedSeller, GatewayError> {
        debug!(seller = ?seller, "Request to create seller");

        if seller.id.is_some() {
            return Err(GatewayError::invalid_argument(
                "A new seller cannot already have an ID",
            ));
        }
        self.validate(&seller).await?;

        let stored = self.store.insert(seller).await?;
        let id = stored
            .id
            .ok_or_else(|| StoreError::query("store returned a seller without an id"))?;

        self.mirror.upsert(&stored).await?;

        debug!(seller_id = %id, "Seller created");
        Ok(CreatedSeller::new(stored, id))
    }

    /// Update a seller, inserting it at its identifier if it does not exist.
    ///
    /// A seller without an identifier is created instead, unless the gateway
    /// is configured to reject it.
    #[instrument(skip(self, seller), fields(seller_id = ?seller.id))]
    pub async fn update(&self, seller: Seller) -> Result<UpdateOutcome, GatewayError> {
        debug!(seller = ?seller, "Request to update seller");

        if seller.id.is_none() {
            return match self.config.update_without_id {
                UpdateWithoutId::CreateInstead => {
                    self.create(seller).await.map(UpdateOutcome::Created)
                }
                UpdateWithoutId::Reject => Err(GatewayError::invalid_argument(
                    "An updated seller must have an ID",
                )),
            };
        }
        self.validate(&seller).await?;

        let stored = self.store.upsert(seller).await?;
        self.mirror.upsert(&stored).await?;

        Ok(UpdateOutcome::Updated(stored))
    }

    /// Read one page of sellers.
    #[instrument(skip(self))]
    pub async fn list(&self, params: PageParams) -> Result<Page, GatewayError> {
        let request = params.to_request();
        debug!(page = request.page, size = request.size, "Request to list sellers");
        Ok(self.store.find_page(request).await?)
    }

    /// Read a single seller.
    #[instrument(skip(self))]
    pub async fn get(&self, id: SellerId) -> Result<Seller, GatewayError> {
        debug!(seller_id = %id, "Request to get seller");
        self.store
            .find_by_id(id)
            .await?
            .ok_or(GatewayError::NotFound(id))
    }

    /// Delete a seller from the store, then from the index.
    ///
    /// Deleting an identifier that does not exist succeeds.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: SellerId) -> Result<(), GatewayError> {
        debug!(seller_id = %id, "Request to delete seller");
        self.store.delete_by_id(id).await?;
        self.mirror.delete(id).await?;
        Ok(())
    }

    /// Run a free-text query against the search index.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Vec<Seller>, GatewayError> {
        let results = self.index.search(query).await?;
        debug!(hits = results.len(), "Seller search completed");
        Ok(results)
    }

    /// Whether both the store and the index report healthy.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> Result<bool, GatewayError> {
        let store_healthy = self.store.health_check().await?;
        let index_healthy = self.index.health_check().await?;
        Ok(store_healthy && index_healthy)
    }
}
