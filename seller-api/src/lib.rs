//! # Seller API
//!
//! HTTP service for the seller resource.
//!
//! This crate provides the axum routes, the mapping from gateway errors to
//! HTTP responses, environment configuration and the wiring of the record
//! store and search index backends.

pub mod api;
pub mod config;
pub mod telemetry;

pub use api::{create_router, AppState};
pub use config::{Config, Dependencies};

use seller_repository::{SearchIndexError, StoreError};
use thiserror::Error;

/// Errors that can occur during service initialization or execution.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Record store error.
    #[error("Store error: {0}")]
    StoreError(#[from] StoreError),

    /// Search index error.
    #[error("Search index error: {0}")]
    SearchIndexError(#[from] SearchIndexError),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ServiceError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
