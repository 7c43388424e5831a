//! # Seller Repository
//!
//! This crate provides the traits and implementations for the two collaborators
//! behind the seller gateway: the authoritative `RecordStore` and the secondary
//! `SearchIndex`. It includes definitions for errors, interfaces, concrete
//! implementations for PostgreSQL and OpenSearch, and in-memory implementations
//! for local runs and tests.

pub mod config;
pub mod errors;
pub mod interfaces;
pub mod memory;
pub mod opensearch;
pub mod postgres;

pub use config::StoreConfig;
pub use errors::{SearchIndexError, StoreError};
pub use interfaces::{RecordStore, SearchIndex};
pub use memory::{InMemoryRecordStore, InMemorySearchIndex};
pub use opensearch::{IndexConfig, OpenSearchIndex};
pub use postgres::PostgresRecordStore;
