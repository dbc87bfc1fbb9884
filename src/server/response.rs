use std::fmt::Display;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;

use crate::error::{Error as StoreError, Result as StoreResult};

/// Standard API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    #[must_use]
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }
}

/// API error that converts to a proper HTTP response
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    /// Underlying error text. Only populated in debug builds.
    pub detail: Option<String>,
}

impl ApiError {
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            detail: None,
        }
    }

    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    #[must_use]
    pub fn payload_too_large(message: impl Into<String>) -> Self {
        Self::new(StatusCode::PAYLOAD_TOO_LARGE, message)
    }

    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    #[must_use]
    pub fn with_detail(mut self, detail: impl Display) -> Self {
        if cfg!(debug_assertions) {
            self.detail = Some(detail.to_string());
        }
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.detail {
            Some(detail) => json!({ "data": null, "error": self.message, "detail": detail }),
            None => json!({ "data": null, "error": self.message }),
        };
        (self.status, Json(body)).into_response()
    }
}

fn from_store_error(e: StoreError, message: &'static str, conflict: &'static str) -> ApiError {
    match e {
        StoreError::Conflict(_) => {
            tracing::warn!("{message}: {e}");
            ApiError::conflict(conflict).with_detail(e)
        }
        _ => {
            tracing::error!("{message}: {e}");
            ApiError::internal(message).with_detail(e)
        }
    }
}

/// Extension trait for converting store results to API errors with a custom message.
pub trait StoreResultExt<T> {
    /// Unique-key violations become 409, everything else 500.
    fn api_err(self, message: &'static str) -> Result<T, ApiError>;

    /// Like [`StoreResultExt::api_err`] with a specific message for the 409 case.
    fn api_err_or_conflict(
        self,
        message: &'static str,
        conflict: &'static str,
    ) -> Result<T, ApiError>;
}

impl<T> StoreResultExt<T> for StoreResult<T> {
    fn api_err(self, message: &'static str) -> Result<T, ApiError> {
        self.map_err(|e| from_store_error(e, message, "Resource already exists"))
    }

    fn api_err_or_conflict(
        self,
        message: &'static str,
        conflict: &'static str,
    ) -> Result<T, ApiError> {
        self.map_err(|e| from_store_error(e, message, conflict))
    }
}

/// Extension for Option types from store operations.
pub trait StoreOptionExt<T> {
    fn or_not_found(self, message: &'static str) -> Result<T, ApiError>;
}

impl<T> StoreOptionExt<T> for Option<T> {
    fn or_not_found(self, message: &'static str) -> Result<T, ApiError> {
        self.ok_or_else(|| ApiError::not_found(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_error_envelope() {
        let response = ApiError::bad_request("title is required").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["data"], serde_json::Value::Null);
        assert_eq!(body["error"], "title is required");
    }

    #[test]
    fn test_conflict_maps_to_409() {
        let result: StoreResult<()> = Err(StoreError::Conflict("UNIQUE".to_string()));
        let err = result
            .api_err_or_conflict("Failed to create redirect", "Redirect already exists")
            .unwrap_err();

        assert_eq!(err.status, StatusCode::CONFLICT);
        assert_eq!(err.message, "Redirect already exists");
    }

    #[test]
    fn test_other_store_errors_map_to_500() {
        let result: StoreResult<()> = Err(StoreError::Config("boom".to_string()));
        let err = result.api_err("Failed to list projects").unwrap_err();

        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Failed to list projects");
        assert_eq!(err.detail.is_some(), cfg!(debug_assertions));
    }

    #[test]
    fn test_or_not_found() {
        let err = None::<()>.or_not_found("Project not found").unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }
}
