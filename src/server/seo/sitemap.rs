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
use crate::server::validation::validate_sitemap_config;
use crate::types::SitemapConfigInput;

/// GET /seo/sitemap
pub async fn list_sitemap_config(
    _auth: RequireAuth,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let configs = state
        .store
        .list_sitemap_config()
        .api_err("Failed to list sitemap config")?;

    Ok(Json(ApiResponse::success(configs)))
}

/// POST /seo/sitemap - upsert by slug
pub async fn upsert_sitemap_config(
    _auth: RequireAuth,
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<SitemapConfigInput>,
) -> Result<impl IntoResponse, ApiError> {
    validate_sitemap_config(&req)?;

    let config = state
        .store
        .upsert_sitemap_config(&req)
        .api_err("Failed to save sitemap config")?;

    Ok(Json(ApiResponse::success(config)))
}

/// DELETE /seo/sitemap/{slug}
pub async fn delete_sitemap_config(
    _auth: RequireAuth,
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .store
        .delete_sitemap_config(&slug)
        .api_err("Failed to delete sitemap config")?;

    Ok(StatusCode::NO_CONTENT)
}
