//! # Seller Gateway
//!
//! This crate provides the façade the HTTP layer calls for every seller
//! operation. Each call reads or writes the authoritative record store and
//! then mirrors the change into the search index.
//!
//! ## Architecture
//!
//! 1. **Gateway**: validates identifiers and sequences the two collaborators
//! 2. **Mirror**: propagates writes to the search index with retries
//! 3. **Pagination**: turns optional paging parameters into page requests and links
//! 4. **Validation**: hook for write-time checks installed by the application

pub mod config;
pub mod errors;
pub mod gateway;
pub mod mirror;
pub mod pagination;
pub mod validation;

pub use config::{GatewayConfig, UpdateWithoutId};
pub use errors::GatewayError;
pub use gateway::{CreatedSeller, SellerGateway, UpdateOutcome};
pub use mirror::{IndexMirror, MirrorConfig};
pub use pagination::{PageParams, PaginationLinks};
pub use validation::{RequireName, SellerValidator};
