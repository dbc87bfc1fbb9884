use axum::extract::FromRequest;
use axum::extract::rejection::JsonRejection;

use super::response::ApiError;

/// `Json` with rejections rendered as 400 in the API envelope.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request(format!("Invalid request body: {}", rejection.body_text()))
    }
}
