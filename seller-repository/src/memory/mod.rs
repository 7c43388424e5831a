//! In-memory implementations of the record store and search index.
//!
//! Used when no external database or search engine is configured, and by tests.

mod record_store;
mod search_index;

pub use record_store::InMemoryRecordStore;
pub use search_index::InMemorySearchIndex;
