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
use crate::server::response::{ApiError, ApiResponse, StoreOptionExt, StoreResultExt};
use crate::server::validation::validate_redirect;
use crate::types::{NewRedirect, RedirectPatch, RedirectStatus};

const DUPLICATE_REDIRECT: &str = "A redirect for this path already exists";

/// GET /redirects
pub async fn list_redirects(
    _auth: RequireAuth,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let redirects = state
        .store
        .list_redirects()
        .api_err("Failed to list redirects")?;

    Ok(Json(ApiResponse::success(redirects)))
}

/// GET /redirects/{id}
pub async fn get_redirect(
    _auth: RequireAuth,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let redirect = state
        .store
        .get_redirect(id)
        .api_err("Failed to get redirect")?
        .or_not_found("Redirect not found")?;

    Ok(Json(ApiResponse::success(redirect)))
}

/// POST /redirects
pub async fn create_redirect(
    _auth: RequireAuth,
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<NewRedirect>,
) -> Result<impl IntoResponse, ApiError> {
    let status_code = req
        .status_code
        .unwrap_or(RedirectStatus::default().code());
    validate_redirect(&req.from_path, &req.to_path, status_code)?;

    let redirect = state
        .store
        .create_redirect(&req)
        .api_err_or_conflict("Failed to create redirect", DUPLICATE_REDIRECT)?;

    tracing::info!(
        "Created redirect {} -> {} ({})",
        redirect.from_path,
        redirect.to_path,
        redirect.status_code
    );

    Ok((StatusCode::CREATED, Json(ApiResponse::success(redirect))))
}

/// PATCH /redirects/{id}
pub async fn update_redirect(
    _auth: RequireAuth,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    ApiJson(req): ApiJson<RedirectPatch>,
) -> Result<impl IntoResponse, ApiError> {
    let existing = state
        .store
        .get_redirect(id)
        .api_err("Failed to get redirect")?
        .or_not_found("Redirect not found")?;

    // Rules apply to the row as it will be stored, not just the patch.
    validate_redirect(
        req.from_path.as_deref().unwrap_or(&existing.from_path),
        req.to_path.as_deref().unwrap_or(&existing.to_path),
        req.status_code.unwrap_or(existing.status_code),
    )?;

    let redirect = state
        .store
        .update_redirect(id, &req)
        .api_err_or_conflict("Failed to update redirect", DUPLICATE_REDIRECT)?
        .or_not_found("Redirect not found")?;

    Ok(Json(ApiResponse::success(redirect)))
}

/// DELETE /redirects/{id}
pub async fn delete_redirect(
    _auth: RequireAuth,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .store
        .delete_redirect(id)
        .api_err("Failed to delete redirect")?;

    Ok(StatusCode::NO_CONTENT)
}
