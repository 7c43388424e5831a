use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::handlers;
use super::{AppState, API_PREFIX};

/// Build the service router.
///
/// Seller routes are nested under `/api`; `/health` sits at the root.
pub fn create_router(state: AppState) -> Router {
    let sellers = Router::new()
        .route(
            "/sellers",
            post(handlers::create_seller)
                .put(handlers::update_seller)
                .get(handlers::list_sellers),
        )
        .route(
            "/sellers/{id}",
            get(handlers::get_seller).delete(handlers::delete_seller),
        )
        .route("/_search/sellers/{query}", get(handlers::search_sellers));

    Router::new()
        .nest(API_PREFIX, sellers)
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
