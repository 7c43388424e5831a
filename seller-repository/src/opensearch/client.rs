//! OpenSearch client implementation.
//!
//! This module provides the concrete implementation of `SearchIndex`
//! using the OpenSearch Rust client.

use async_trait::async_trait;
use opensearch::{
    cluster::ClusterHealthParts,
    http::response::Response,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    indices::{IndicesCreateParts, IndicesExistsParts},
    params::Refresh,
    ClearScrollParts, DeleteParts, IndexParts, OpenSearch, ScrollParts, SearchParts,
};
use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

use crate::errors::SearchIndexError;
use crate::interfaces::SearchIndex;
use crate::opensearch::index_config::{get_index_settings, IndexConfig};
use crate::opensearch::queries::{
    build_clear_scroll_request, build_scroll_request, build_search_query, SCROLL_KEEP_ALIVE,
    SCROLL_PAGE_SIZE,
};
use seller_shared::{Seller, SellerId};

/// OpenSearch search index implementation.
///
/// Provides full-text search over sellers using OpenSearch as the backend.
/// Writes wait for the next refresh so a seller is searchable as soon as the
/// call returns.
///
/// # Example
///
/// ```ignore
/// let client = OpenSearchIndex::new("http://localhost:9200", IndexConfig::default()).await?;
/// client.ensure_index_exists().await?;
/// client.upsert(&Seller::named("Garage Dupont").with_id(1)).await?;
/// let hits = client.search("dupont").await?;
/// ```
pub struct OpenSearchIndex {
    client: OpenSearch,
    index_config: IndexConfig,
}

impl OpenSearchIndex {
    /// Create a new OpenSearch client connected to the specified URL.
    ///
    /// # Arguments
    ///
    /// * `url` - The OpenSearch server URL (e.g., "http://localhost:9200")
    /// * `index_config` - The index the client reads and writes
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchIndex)` - A new client instance
    /// * `Err(SearchIndexError)` - If connection setup fails
    pub async fn new(url: &str, index_config: IndexConfig) -> Result<Self, SearchIndexError> {
        let parsed_url =
            Url::parse(url).map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let transport = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .build()
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(
            url = %url,
            index = %index_config.name,
            "Created OpenSearch client"
        );

        Ok(Self {
            client,
            index_config,
        })
    }

    /// Document IDs are the decimal seller identifier.
    fn document_id(id: SellerId) -> String {
        id.to_string()
    }

    /// Convert a search hit into a seller.
    ///
    /// The identifier comes from `_source` when present, else from `_id`.
    /// Returns `None` when the hit has no usable source or identifier.
    fn parse_hit(hit: &Value) -> Option<Seller> {
        let mut seller: Seller = serde_json::from_value(hit.get("_source")?.clone()).ok()?;
        if seller.id.is_none() {
            seller.id = Some(hit.get("_id")?.as_str()?.parse().ok()?);
        }
        Some(seller)
    }

    fn parse_hits(body: &Value) -> Vec<Seller> {
        body["hits"]["hits"]
            .as_array()
            .map(|hits| hits.iter().filter_map(Self::parse_hit).collect())
            .unwrap_or_default()
    }

    async fn read_json(response: Response) -> Result<Value, SearchIndexError> {
        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Search request failed");
            return Err(SearchIndexError::query(format!(
                "Search failed with status {}: {}",
                status, error_body
            )));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| SearchIndexError::parse(e.to_string()))
    }

    async fn clear_scroll(&self, scroll_id: &str) {
        let result = self
            .client
            .clear_scroll(ClearScrollParts::None)
            .body(build_clear_scroll_request(scroll_id))
            .send()
            .await;

        if let Err(e) = result {
            warn!(error = %e, "Failed to clear scroll context");
        }
    }
}

#[async_trait]
impl SearchIndex for OpenSearchIndex {
    #[instrument(skip(self, seller), fields(seller_id = ?seller.id))]
    async fn upsert(&self, seller: &Seller) -> Result<(), SearchIndexError> {
        let id = seller
            .id
            .ok_or_else(|| SearchIndexError::index("cannot index a seller without an id"))?;
        let doc_id = Self::document_id(id);

        let response = self
            .client
            .index(IndexParts::IndexId(&self.index_config.name, &doc_id))
            .refresh(Refresh::WaitFor)
            .body(seller)
            .send()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Index request failed");
            return Err(SearchIndexError::index(format!(
                "Index failed with status {}: {}",
                status, error_body
            )));
        }

        debug!(doc_id = %doc_id, "Document indexed");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&self, id: SellerId) -> Result<(), SearchIndexError> {
        let doc_id = Self::document_id(id);

        let response = self
            .client
            .delete(DeleteParts::IndexId(&self.index_config.name, &doc_id))
            .refresh(Refresh::WaitFor)
            .send()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let status = response.status_code();

        // 404 is acceptable - document may not exist
        if !status.is_success() && status.as_u16() != 404 {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Delete request failed");
            return Err(SearchIndexError::delete(format!(
                "Delete failed with status {}: {}",
                status, error_body
            )));
        }

        debug!(doc_id = %doc_id, "Document deleted");
        Ok(())
    }

    /// Collect every hit by walking a scroll context to exhaustion.
    #[instrument(skip(self))]
    async fn search(&self, query: &str) -> Result<Vec<Seller>, SearchIndexError> {
        let index_names = [self.index_config.name.as_str()];
        let response = self
            .client
            .search(SearchParts::Index(&index_names))
            .scroll(SCROLL_KEEP_ALIVE)
            .size(SCROLL_PAGE_SIZE)
            .body(build_search_query(query))
            .send()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let mut body = Self::read_json(response).await?;
        let mut sellers = Vec::new();

        loop {
            let page = Self::parse_hits(&body);
            let scroll_id = body["_scroll_id"].as_str().map(str::to_owned);

            let Some(scroll_id) = scroll_id else {
                sellers.extend(page);
                break;
            };

            if page.is_empty() {
                self.clear_scroll(&scroll_id).await;
                break;
            }
            sellers.extend(page);

            let response = self
                .client
                .scroll(ScrollParts::None)
                .body(build_scroll_request(&scroll_id))
                .send()
                .await
                .map_err(|e| SearchIndexError::connection(e.to_string()))?;

            body = match Self::read_json(response).await {
                Ok(body) => body,
                Err(e) => {
                    self.clear_scroll(&scroll_id).await;
                    return Err(e);
                }
            };
        }

        debug!(hits = sellers.len(), "Search completed");
        Ok(sellers)
    }

    async fn ensure_index_exists(&self) -> Result<(), SearchIndexError> {
        let index_names = [self.index_config.name.as_str()];
        let response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&index_names))
            .send()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        if response.status_code().is_success() {
            debug!(index = %self.index_config.name, "Index already exists");
            return Ok(());
        }

        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(&self.index_config.name))
            .body(get_index_settings())
            .send()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            // Another instance may have created it in the meantime
            if error_body.contains("resource_already_exists_exception") {
                return Ok(());
            }
            error!(status = %status, body = %error_body, "Index creation failed");
            return Err(SearchIndexError::index_creation(format!(
                "Index creation failed with status {}: {}",
                status, error_body
            )));
        }

        info!(index = %self.index_config.name, "Created search index");
        Ok(())
    }

    async fn health_check(&self) -> Result<bool, SearchIndexError> {
        let response = self
            .client
            .cluster()
            .health(ClusterHealthParts::None)
            .send()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        if !response.status_code().is_success() {
            return Ok(false);
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(|e| SearchIndexError::parse(e.to_string()))?;

        Ok(matches!(body["status"].as_str(), Some("green") | Some("yellow")))
    }
}
