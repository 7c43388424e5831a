use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::errors::StoreError;
use crate::interfaces::RecordStore;
use seller_shared::{Page, PageRequest, Seller, SellerId};

#[derive(Debug, Default)]
struct Inner {
    records: BTreeMap<SellerId, Seller>,
    last_id: i64,
}

/// Record store keeping sellers in an ordered map.
///
/// Identifiers are assigned from a counter starting at 1. An upsert at an
/// explicit identifier moves the counter past it.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    inner: RwLock<Inner>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sellers.
    pub async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn insert(&self, mut seller: Seller) -> Result<Seller, StoreError> {
        let mut inner = self.inner.write().await;
        inner.last_id = inner
            .last_id
            .checked_add(1)
            .ok_or_else(|| StoreError::query("seller id space exhausted"))?;
        let id = SellerId(inner.last_id);
        seller.id = Some(id);
        inner.records.insert(id, seller.clone());
        Ok(seller)
    }

    async fn upsert(&self, seller: Seller) -> Result<Seller, StoreError> {
        let id = seller
            .id
            .ok_or_else(|| StoreError::query("upsert requires a seller id"))?;

        let mut inner = self.inner.write().await;
        inner.last_id = inner.last_id.max(id.value());
        inner.records.insert(id, seller.clone());
        Ok(seller)
    }

    async fn find_by_id(&self, id: SellerId) -> Result<Option<Seller>, StoreError> {
        Ok(self.inner.read().await.records.get(&id).cloned())
    }

    async fn find_page(&self, request: PageRequest) -> Result<Page, StoreError> {
        let inner = self.inner.read().await;
        let skip = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let content = inner
            .records
            .values()
            .skip(skip)
            .take(request.size as usize)
            .cloned()
            .collect();

        Ok(Page::new(content, inner.records.len() as u64, request))
    }

    async fn delete_by_id(&self, id: SellerId) -> Result<(), StoreError> {
        self.inner.write().await.records.remove(&id);
        Ok(())
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_after_max_id_fails_without_writing() {
        let store = InMemoryRecordStore::new();
        store
            .upsert(Seller::named("Last").with_id(i64::MAX))
            .await
            .unwrap();

        let result = store.insert(Seller::named("Overflow")).await;

        assert!(matches!(result, Err(StoreError::QueryError(_))));
        assert_eq!(store.len().await, 1);
        assert!(store.find_by_id(SellerId(i64::MAX)).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let store = InMemoryRecordStore::new();

        let first = store.insert(Seller::named("First")).await.unwrap();
        let second = store.insert(Seller::named("Second")).await.unwrap();

        assert_eq!(first.id, Some(SellerId(1)));
        assert_eq!(second.id, Some(SellerId(2)));
    }

    #[tokio::test]
    async fn test_insert_ignores_existing_id() {
        let store = InMemoryRecordStore::new();
        let stored = store
            .insert(Seller::named("Preset").with_id(99))
            .await
            .unwrap();

        assert_eq!(stored.id, Some(SellerId(1)));
        assert!(store.find_by_id(SellerId(99)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_upsert_creates_and_overwrites() {
        let store = InMemoryRecordStore::new();

        store
            .upsert(Seller::named("Original").with_id(5))
            .await
            .unwrap();
        store
            .upsert(Seller::named("Renamed").with_id(5))
            .await
            .unwrap();

        let found = store.find_by_id(SellerId(5)).await.unwrap().unwrap();
        assert_eq!(found.name.as_deref(), Some("Renamed"));
        assert_eq!(store.len().await, 1);

        // The counter moved past the explicit id
        let next = store.insert(Seller::named("Next")).await.unwrap();
        assert_eq!(next.id, Some(SellerId(6)));
    }

    #[tokio::test]
    async fn test_upsert_without_id_fails() {
        let store = InMemoryRecordStore::new();
        let result = store.upsert(Seller::named("No id")).await;
        assert!(matches!(result, Err(StoreError::QueryError(_))));
    }

    #[tokio::test]
    async fn test_find_page() {
        let store = InMemoryRecordStore::new();
        for i in 0..5 {
            store.insert(Seller::named(format!("Seller {}", i))).await.unwrap();
        }

        let page = store.find_page(PageRequest::new(1, 2)).await.unwrap();
        let ids: Vec<_> = page.content.iter().filter_map(|s| s.id).collect();
        assert_eq!(ids, vec![SellerId(3), SellerId(4)]);
        assert_eq!(page.total_elements, 5);
        assert_eq!(page.total_pages(), 3);

        let past_end = store.find_page(PageRequest::new(10, 2)).await.unwrap();
        assert!(past_end.content.is_empty());
        assert_eq!(past_end.total_elements, 5);
    }

    #[tokio::test]
    async fn test_delete_missing_is_ok() {
        let store = InMemoryRecordStore::new();
        assert!(store.delete_by_id(SellerId(123)).await.is_ok());
        assert!(store.is_empty().await);
    }
}
