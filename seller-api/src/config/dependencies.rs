//! Dependency initialization and wiring for the seller API.

use std::sync::Arc;
use tracing::info;

use super::{Config, IndexBackend, StoreBackend};
use crate::ServiceError;
use seller_gateway::{RequireName, SellerGateway};
use seller_repository::{
    InMemoryRecordStore, InMemorySearchIndex, OpenSearchIndex, PostgresRecordStore, RecordStore,
    SearchIndex,
};

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The gateway every route calls into.
    pub gateway: Arc<SellerGateway>,
}

impl Dependencies {
    /// Connect the configured backends and build the gateway.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(ServiceError)` - If a backend cannot be reached or is unhealthy
    pub async fn new(config: &Config) -> Result<Self, ServiceError> {
        let store = Self::record_store(&config.store).await?;
        let index = Self::search_index(&config.index).await?;

        let mut gateway = SellerGateway::with_config(store, index, config.gateway.clone());
        if config.require_name {
            info!("Sellers must have a name");
            gateway = gateway.with_validator(Arc::new(RequireName));
        }

        Ok(Self {
            gateway: Arc::new(gateway),
        })
    }

    async fn record_store(backend: &StoreBackend) -> Result<Arc<dyn RecordStore>, ServiceError> {
        match backend {
            StoreBackend::Memory => {
                info!("Using in-memory record store");
                Ok(Arc::new(InMemoryRecordStore::new()))
            }
            StoreBackend::Postgres(store_config) => {
                info!(
                    max_connections = store_config.max_connections,
                    "Connecting to PostgreSQL"
                );
                let store = PostgresRecordStore::connect(store_config).await?;

                if !store.health_check().await? {
                    return Err(ServiceError::config("PostgreSQL health check failed"));
                }

                info!("PostgreSQL connection verified");
                Ok(Arc::new(store))
            }
        }
    }

    async fn search_index(backend: &IndexBackend) -> Result<Arc<dyn SearchIndex>, ServiceError> {
        match backend {
            IndexBackend::Memory => {
                info!("Using in-memory search index");
                Ok(Arc::new(InMemorySearchIndex::new()))
            }
            IndexBackend::OpenSearch { url, index } => {
                info!(opensearch_url = %url, index = %index.name, "Connecting to OpenSearch");

                let search_index = OpenSearchIndex::new(url, index.clone()).await.map_err(|e| {
                    ServiceError::config(format!("Failed to create OpenSearch client: {}", e))
                })?;

                let healthy = search_index.health_check().await.map_err(|e| {
                    ServiceError::config(format!("OpenSearch health check failed: {}", e))
                })?;
                if !healthy {
                    return Err(ServiceError::config("OpenSearch cluster is unhealthy"));
                }

                search_index.ensure_index_exists().await?;

                info!("OpenSearch connection verified");
                Ok(Arc::new(search_index))
            }
        }
    }
}
