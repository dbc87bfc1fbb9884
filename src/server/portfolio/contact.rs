use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::auth::RequireAuth;
use crate::server::AppState;
use crate::server::extract::ApiJson;
use crate::server::response::{ApiError, ApiResponse, StoreResultExt};
use crate::server::validation::validate_contact_message;
use crate::types::NewContactMessage;

/// POST /contact - open to visitors
pub async fn create_contact_message(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<NewContactMessage>,
) -> Result<impl IntoResponse, ApiError> {
    validate_contact_message(&req)?;

    let message = state
        .store
        .create_contact_message(&req)
        .api_err("Failed to save message")?;

    tracing::info!("Contact message {} received", message.id);

    Ok((StatusCode::CREATED, Json(ApiResponse::success(message))))
}

/// GET /contact
pub async fn list_contact_messages(
    _auth: RequireAuth,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let messages = state
        .store
        .list_contact_messages()
        .api_err("Failed to list messages")?;

    Ok(Json(ApiResponse::success(messages)))
}

/// DELETE /contact/{id}
pub async fn delete_contact_message(
    _auth: RequireAuth,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .store
        .delete_contact_message(id)
        .api_err("Failed to delete message")?;

    Ok(StatusCode::NO_CONTENT)
}
