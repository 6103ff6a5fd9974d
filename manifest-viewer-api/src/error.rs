///! Standardized error handling for API responses
///!
///! Provides consistent JSON error responses across all API endpoints

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use manifest_viewer_common::ErrorResponse;
use tracing::error;

/// API error types with standardized responses
#[derive(Debug)]
pub enum ApiError {
    /// 500, the cluster API call failed
    Upstream(String),

    /// 400 Bad Request
    BadRequest(String),

    /// 500 Internal Server Error
    Internal(String),
}

impl ApiError {
    /// Convert error to ErrorResponse
    pub fn to_error_response(&self) -> ErrorResponse {
        match self {
            ApiError::Upstream(msg) => ErrorResponse::new(500, "UPSTREAM_ERROR", msg),
            ApiError::BadRequest(msg) => ErrorResponse::new(400, "BAD_REQUEST", msg),
            ApiError::Internal(msg) => {
                error!("Internal API error: {}", msg);
                ErrorResponse::new(500, "INTERNAL_ERROR", "An internal server error occurred")
                    .with_details(msg)
            }
        }
    }

    pub fn unknown_kind(kind: impl Into<String>) -> Self {
        ApiError::BadRequest(format!("Unknown resource kind '{}'", kind.into()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error_response = self.to_error_response();
        let status_code = StatusCode::from_u16(error_response.status)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status_code, Json(error_response)).into_response()
    }
}

impl From<manifest_viewer_common::Error> for ApiError {
    fn from(err: manifest_viewer_common::Error) -> Self {
        match err {
            manifest_viewer_common::Error::UnknownKind(kind) => ApiError::unknown_kind(kind),
            other => ApiError::Internal(other.to_string()),
        }
    }
}
