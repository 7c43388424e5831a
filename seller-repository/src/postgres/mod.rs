//! PostgreSQL implementation of the record store.
//!
//! Sellers live in a single `seller` table whose schema is managed by the
//! migrations embedded from this crate's `migrations/` directory.

mod row;
mod store;

pub use store::PostgresRecordStore;
