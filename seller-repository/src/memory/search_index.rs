use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::errors::SearchIndexError;
use crate::interfaces::SearchIndex;
use seller_shared::{Seller, SellerId};

/// Search index over an in-memory copy of the indexed sellers.
///
/// Queries are split on whitespace into terms. A seller matches when any term
/// appears, case-insensitively, inside any of its text attributes; results are
/// ranked by the number of distinct matching terms, then by identifier. The
/// single term `*` matches every document.
#[derive(Debug, Default)]
pub struct InMemorySearchIndex {
    documents: RwLock<BTreeMap<SellerId, Seller>>,
}

impl InMemorySearchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of indexed documents.
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Whether a document is indexed under `id`.
    pub async fn contains(&self, id: SellerId) -> bool {
        self.documents.read().await.contains_key(&id)
    }

    fn score(seller: &Seller, terms: &[String]) -> usize {
        let fields: Vec<String> = seller.text_fields().map(str::to_lowercase).collect();
        terms
            .iter()
            .filter(|term| fields.iter().any(|field| field.contains(term.as_str())))
            .count()
    }
}

#[async_trait]
impl SearchIndex for InMemorySearchIndex {
    async fn upsert(&self, seller: &Seller) -> Result<(), SearchIndexError> {
        let id = seller
            .id
            .ok_or_else(|| SearchIndexError::index("cannot index a seller without an id"))?;
        self.documents.write().await.insert(id, seller.clone());
        Ok(())
    }

    async fn delete_by_id(&self, id: SellerId) -> Result<(), SearchIndexError> {
        self.documents.write().await.remove(&id);
        Ok(())
    }

    async fn search(&self, query: &str) -> Result<Vec<Seller>, SearchIndexError> {
        let documents = self.documents.read().await;

        if query.trim() == "*" {
            return Ok(documents.values().cloned().collect());
        }

        let mut terms: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
        terms.sort();
        terms.dedup();
        if terms.is_empty() {
            return Ok(Vec::new());
        }

        let mut scored: Vec<(usize, &Seller)> = documents
            .values()
            .map(|seller| (Self::score(seller, &terms), seller))
            .filter(|(score, _)| *score > 0)
            .collect();

        // BTreeMap iteration is already in id order, so a stable sort keeps ties by id
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        Ok(scored.into_iter().map(|(_, seller)| seller.clone()).collect())
    }

    async fn ensure_index_exists(&self) -> Result<(), SearchIndexError> {
        Ok(())
    }

    async fn health_check(&self) -> Result<bool, SearchIndexError> {
        Ok(true)
    }
}
