//! # Seller Shared
//!
//! Shared types used across the seller service crates: the `Seller` entity
//! itself and the paging types exchanged with the record store.

mod page;
mod seller;

pub use page::{Page, PageRequest};
pub use seller::{Seller, SellerId};
