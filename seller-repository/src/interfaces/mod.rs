//! Interface definitions for the seller collaborators.
//!
//! This module defines the abstract `RecordStore` and `SearchIndex` traits that
//! allow for dependency injection and swappable storage and search backends.

mod record_store;
mod search_index;

pub use record_store::RecordStore;
pub use search_index::SearchIndex;
