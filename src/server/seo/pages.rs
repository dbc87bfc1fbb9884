use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::auth::RequireAuth;
use crate::server::AppState;
use crate::server::extract::ApiJson;
use crate::server::response::{ApiError, ApiResponse, StoreResultExt};
use crate::server::validation::validate_page_seo;
use crate::types::PageSeoInput;

/// GET /seo/pages
pub async fn list_page_seo(
    _auth: RequireAuth,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let pages = state.store.list_page_seo().api_err("Failed to list page SEO")?;

    Ok(Json(ApiResponse::success(pages)))
}

/// GET /seo/pages/{slug} - read by the page renderer, so an unknown slug
/// yields an empty object rather than 404.
pub async fn get_page_seo(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Response, ApiError> {
    let page = state
        .store
        .get_page_seo(&slug)
        .api_err("Failed to get page SEO")?;

    Ok(match page {
        Some(page) => Json(ApiResponse::success(page)).into_response(),
        None => Json(ApiResponse::success(json!({}))).into_response(),
    })
}

/// POST /seo/pages - upsert by slug
pub async fn upsert_page_seo(
    _auth: RequireAuth,
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<PageSeoInput>,
) -> Result<impl IntoResponse, ApiError> {
    validate_page_seo(&req)?;

    let page = state
        .store
        .upsert_page_seo(&req)
        .api_err("Failed to save page SEO")?;

    Ok(Json(ApiResponse::success(page)))
}

/// DELETE /seo/pages/{slug}
pub async fn delete_page_seo(
    _auth: RequireAuth,
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .store
        .delete_page_seo(&slug)
        .api_err("Failed to delete page SEO")?;

    Ok(StatusCode::NO_CONTENT)
}
