//! Mapping from gateway errors to HTTP responses.

use axum::{
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;
use tracing::error;

use seller_gateway::GatewayError;

/// Header carrying the reason a request was rejected.
pub const FAILURE_HEADER: HeaderName = HeaderName::from_static("failure");

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Missing resources answer with an empty body.
        if self.status == StatusCode::NOT_FOUND {
            return self.status.into_response();
        }

        let body = Json(json!({
            "error": {
                "message": self.message,
                "status": self.status.as_u16(),
            }
        }));

        let mut response = (self.status, body).into_response();
        if self.status == StatusCode::BAD_REQUEST {
            if let Ok(value) = HeaderValue::from_str(&self.message) {
                response.headers_mut().insert(FAILURE_HEADER, value);
            }
        }
        response
    }
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::InvalidArgument(msg) => Self::bad_request(msg),
            GatewayError::NotFound(id) => Self::not_found(format!("Seller {} not found", id)),
            GatewayError::Store(e) => {
                error!(error = %e, "Record store failure");
                Self::internal(e.to_string())
            }
            GatewayError::Index(e) => {
                error!(error = %e, "Search index failure");
                Self::internal(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seller_repository::StoreError;
    use seller_shared::SellerId;

    #[test]
    fn test_invalid_argument_sets_failure_header() {
        let response = ApiError::from(GatewayError::invalid_argument(
            "A new seller cannot already have an ID",
        ))
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers().get("Failure").unwrap(),
            "A new seller cannot already have an ID"
        );
    }

    #[test]
    fn test_not_found_has_no_failure_header() {
        let response = ApiError::from(GatewayError::NotFound(SellerId(9))).into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().get(FAILURE_HEADER).is_none());
    }

    #[test]
    fn test_store_error_is_internal() {
        let err = ApiError::from(GatewayError::Store(StoreError::connection("refused")));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
