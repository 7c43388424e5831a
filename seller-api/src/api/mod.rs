//! HTTP surface of the seller service.

pub mod error;
pub mod handlers;
mod routes;

pub use error::{ApiError, ApiResult};
pub use routes::create_router;

use std::sync::Arc;

use seller_gateway::SellerGateway;

/// Prefix every seller route is nested under.
pub const API_PREFIX: &str = "/api";

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<SellerGateway>,
}

impl AppState {
    pub fn new(gateway: Arc<SellerGateway>) -> Self {
        Self { gateway }
    }
}
