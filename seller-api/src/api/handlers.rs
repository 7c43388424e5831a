//! Route handlers for the seller resource.

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use super::error::{ApiError, ApiResult};
use super::{AppState, API_PREFIX};
use seller_gateway::pagination::TOTAL_COUNT_HEADER;
use seller_gateway::{CreatedSeller, PageParams, PaginationLinks, UpdateOutcome};
use seller_shared::{Seller, SellerId};

/// Query string of the listing route.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl From<ListQuery> for PageParams {
    fn from(query: ListQuery) -> Self {
        PageParams::new(query.page, query.per_page)
    }
}

fn header_value(value: &str) -> ApiResult<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| ApiError::internal(format!("Invalid header value: {}", e)))
}

/// 201 with the new resource's location and no body.
fn created_response(created: CreatedSeller) -> ApiResult<Response> {
    let location = header_value(&format!("{}{}", API_PREFIX, created.location))?;
    Ok((StatusCode::CREATED, [(header::LOCATION, location)]).into_response())
}

/// POST /sellers
pub async fn create_seller(
    State(state): State<AppState>,
    Json(seller): Json<Seller>,
) -> ApiResult<Response> {
    let created = state.gateway.create(seller).await?;
    created_response(created)
}

/// PUT /sellers
///
/// 200 with no body for an existing identifier, or the create response.
pub async fn update_seller(
    State(state): State<AppState>,
    Json(seller): Json<Seller>,
) -> ApiResult<Response> {
    match state.gateway.update(seller).await? {
        UpdateOutcome::Updated(_) => Ok(StatusCode::OK.into_response()),
        UpdateOutcome::Created(created) => created_response(created),
    }
}

/// GET /sellers?page=&per_page=
pub async fn list_sellers(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Response> {
    let params = PageParams::from(query);
    let page = state.gateway.list(params).await?;
    let links = PaginationLinks::new(&page, format!("{}/sellers", API_PREFIX), params);

    let total_count = HeaderName::from_bytes(TOTAL_COUNT_HEADER.as_bytes())
        .map_err(|e| ApiError::internal(format!("Invalid header name: {}", e)))?;

    let mut headers = HeaderMap::new();
    headers.insert(total_count, header_value(&links.total_count().to_string())?);
    headers.insert(header::LINK, header_value(&links.link_header())?);

    Ok((headers, Json(page.content)).into_response())
}

/// GET /sellers/{id}
pub async fn get_seller(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Seller>> {
    let seller = state.gateway.get(SellerId(id)).await?;
    Ok(Json(seller))
}

/// DELETE /sellers/{id}
pub async fn delete_seller(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.gateway.delete(SellerId(id)).await?;
    Ok(StatusCode::OK)
}

/// GET /_search/sellers/{query}
pub async fn search_sellers(
    State(state): State<AppState>,
    Path(query): Path<String>,
) -> ApiResult<Json<Vec<Seller>>> {
    let results = state.gateway.search(&query).await?;
    Ok(Json(results))
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    match state.gateway.health_check().await {
        Ok(true) => (StatusCode::OK, Json(json!({ "status": "ok" }))),
        Ok(false) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "unhealthy" })),
        ),
        Err(e) => {
            warn!(error = %e, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unhealthy" })),
            )
        }
    }
}
