//! OpenSearch implementation of the seller search index.
//!
//! This module provides a concrete implementation of `SearchIndex`
//! using OpenSearch as the backend.

mod client;
mod index_config;
mod queries;

pub use client::OpenSearchIndex;
pub use index_config::IndexConfig;
