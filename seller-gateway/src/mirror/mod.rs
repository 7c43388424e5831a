//! Mirror module for the seller gateway.
//!
//! Propagates record store writes into the search index.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use seller_repository::{SearchIndex, SearchIndexError};
use seller_shared::{Seller, SellerId};

/// Configuration for the index mirror.
#[derive(Debug, Clone)]
pub struct MirrorConfig {
    /// Maximum number of retry attempts for failed index operations.
    pub max_retries: u32,
    /// Initial retry delay in milliseconds.
    pub initial_retry_delay_ms: u64,
    /// Maximum retry delay in milliseconds.
    pub max_retry_delay_ms: u64,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_retry_delay_ms: 100,
            max_retry_delay_ms: 5000,
        }
    }
}

impl MirrorConfig {
    /// A policy that tries each operation exactly once.
    pub fn no_retries() -> Self {
        Self {
            max_retries: 0,
            ..Default::default()
        }
    }

    /// Set the maximum number of retries.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }
}

enum MirrorOp<'a> {
    Upsert(&'a Seller),
    Delete(SellerId),
}

impl MirrorOp<'_> {
    fn name(&self) -> &'static str {
        match self {
            Self::Upsert(_) => "upsert",
            Self::Delete(_) => "delete",
        }
    }
}

/// Writes store changes through to the search index.
///
/// The mirror is responsible for:
/// - Retrying transient index failures with exponential backoff
/// - Giving up immediately on failures that will not heal
///
/// It never rolls back the store write that preceded it.
pub struct IndexMirror {
    index: Arc<dyn SearchIndex>,
    config: MirrorConfig,
}

impl IndexMirror {
    /// Create a mirror with the given retry policy.
    pub fn with_config(index: Arc<dyn SearchIndex>, config: MirrorConfig) -> Self {
        Self { index, config }
    }

    /// Index a stored seller.
    pub async fn upsert(&self, seller: &Seller) -> Result<(), SearchIndexError> {
        self.with_retry(MirrorOp::Upsert(seller)).await
    }

    /// Remove a seller from the index.
    pub async fn delete(&self, id: SellerId) -> Result<(), SearchIndexError> {
        self.with_retry(MirrorOp::Delete(id)).await
    }

    async fn apply(&self, op: &MirrorOp<'_>) -> Result<(), SearchIndexError> {
        match op {
            MirrorOp::Upsert(seller) => self.index.upsert(seller).await,
            MirrorOp::Delete(id) => self.index.delete_by_id(*id).await,
        }
    }

    /// Run an index operation with exponential backoff retry logic.
    async fn with_retry(&self, op: MirrorOp<'_>) -> Result<(), SearchIndexError> {
        let mut delay_ms = self.config.initial_retry_delay_ms;
        let mut attempt = 0;

        loop {
            match self.apply(&op).await {
                Ok(()) => {
                    if attempt > 0 {
                        info!(
                            attempt = attempt,
                            operation = op.name(),
                            "Index operation succeeded after retry"
                        );
                    }
                    return Ok(());
                }
                Err(e) if !e.is_retryable() => {
                    debug!(error = %e, operation = op.name(), "Non-retryable error encountered");
                    return Err(e);
                }
                Err(e) if attempt >= self.config.max_retries => {
                    warn!(
                        attempts = attempt + 1,
                        operation = op.name(),
                        error = %e,
                        "Index operation failed after retries"
                    );
                    return Err(e);
                }
                Err(e) => {
                    attempt += 1;
                    warn!(
                        attempt = attempt,
                        max_retries = self.config.max_retries,
                        delay_ms = delay_ms,
                        operation = op.name(),
                        error = %e,
                        "Index operation failed, retrying"
                    );

                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;

                    delay_ms = std::cmp::min(delay_ms * 2, self.config.max_retry_delay_ms);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Search index that fails a fixed number of times before succeeding.
    struct FlakyIndex {
        failures_left: AtomicUsize,
        calls: AtomicUsize,
        error: SearchIndexError,
    }

    impl FlakyIndex {
        fn new(failures: usize, error: SearchIndexError) -> Self {
            Self {
                failures_left: AtomicUsize::new(failures),
                calls: AtomicUsize::new(0),
                error,
            }
        }

        fn attempt(&self) -> Result<(), SearchIndexError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let left = self.failures_left.load(Ordering::SeqCst);
            if left > 0 {
                self.failures_left.store(left - 1, Ordering::SeqCst);
                return Err(self.error.clone());
            }
            Ok(())
        }
    }

    #[async_trait]
    impl SearchIndex for FlakyIndex {
        async fn upsert(&self, _seller: &Seller) -> Result<(), SearchIndexError> {
            self.attempt()
        }

        async fn delete_by_id(&self, _id: SellerId) -> Result<(), SearchIndexError> {
            self.attempt()
        }

        async fn search(&self, _query: &str) -> Result<Vec<Seller>, SearchIndexError> {
            Ok(vec![])
        }

        async fn ensure_index_exists(&self) -> Result<(), SearchIndexError> {
            Ok(())
        }

        async fn health_check(&self) -> Result<bool, SearchIndexError> {
            Ok(true)
        }
    }

    fn fast_config(max_retries: u32) -> MirrorConfig {
        MirrorConfig {
            max_retries,
            initial_retry_delay_ms: 1,
            max_retry_delay_ms: 2,
        }
    }

    #[tokio::test]
    async fn test_upsert_succeeds_first_time() {
        let index = Arc::new(FlakyIndex::new(0, SearchIndexError::connection("down")));
        let mirror = IndexMirror::with_config(index.clone(), fast_config(3));

        mirror
            .upsert(&Seller::named("Garage").with_id(1))
            .await
            .unwrap();

        assert_eq!(index.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_transient_failures_are_retried() {
        let index = Arc::new(FlakyIndex::new(2, SearchIndexError::connection("down")));
        let mirror = IndexMirror::with_config(index.clone(), fast_config(3));

        mirror.delete(SellerId(1)).await.unwrap();

        assert_eq!(index.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_retries() {
        let index = Arc::new(FlakyIndex::new(10, SearchIndexError::connection("down")));
        let mirror = IndexMirror::with_config(index.clone(), fast_config(2));

        let result = mirror.upsert(&Seller::named("Garage").with_id(1)).await;

        assert!(matches!(result, Err(SearchIndexError::ConnectionError(_))));
        assert_eq!(index.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_permanent_failures_are_not_retried() {
        let index = Arc::new(FlakyIndex::new(
            10,
            SearchIndexError::index("mapper_parsing_exception"),
        ));
        let mirror = IndexMirror::with_config(index.clone(), fast_config(3));

        let result = mirror.upsert(&Seller::named("Garage").with_id(1)).await;

        assert!(matches!(result, Err(SearchIndexError::IndexError(_))));
        assert_eq!(index.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_no_retries_policy() {
        let index = Arc::new(FlakyIndex::new(1, SearchIndexError::connection("down")));
        let mirror = IndexMirror::with_config(index.clone(), MirrorConfig::no_retries());

        assert!(mirror.delete(SellerId(1)).await.is_err());
        assert_eq!(index.calls.load(Ordering::SeqCst), 1);
    }
}
