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
use crate::server::validation::{validate_new_schema_markup, validate_schema_markup_patch};
use crate::types::{NewSchemaMarkup, SchemaMarkupPatch};

/// GET /seo/schema
pub async fn list_schema_markup(
    _auth: RequireAuth,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let markup = state
        .store
        .list_schema_markup()
        .api_err("Failed to list schema markup")?;

    Ok(Json(ApiResponse::success(markup)))
}

/// GET /seo/schema/page/{slug} - active documents only
pub async fn list_page_schema_markup(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let markup: Vec<_> = state
        .store
        .list_schema_markup_for_page(&slug)
        .api_err("Failed to list schema markup")?
        .into_iter()
        .filter(|m| m.is_active)
        .collect();

    Ok(Json(ApiResponse::success(markup)))
}

/// GET /seo/schema/{id}
pub async fn get_schema_markup(
    _auth: RequireAuth,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let markup = state
        .store
        .get_schema_markup(id)
        .api_err("Failed to get schema markup")?
        .or_not_found("Schema markup not found")?;

    Ok(Json(ApiResponse::success(markup)))
}

/// POST /seo/schema
pub async fn create_schema_markup(
    _auth: RequireAuth,
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<NewSchemaMarkup>,
) -> Result<impl IntoResponse, ApiError> {
    let req = validate_new_schema_markup(req)?;

    let markup = state
        .store
        .create_schema_markup(&req)
        .api_err("Failed to create schema markup")?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(markup))))
}

/// PATCH /seo/schema/{id}
pub async fn update_schema_markup(
    _auth: RequireAuth,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    ApiJson(req): ApiJson<SchemaMarkupPatch>,
) -> Result<impl IntoResponse, ApiError> {
    let req = validate_schema_markup_patch(req)?;

    let markup = state
        .store
        .update_schema_markup(id, &req)
        .api_err("Failed to update schema markup")?
        .or_not_found("Schema markup not found")?;

    Ok(Json(ApiResponse::success(markup)))
}

/// DELETE /seo/schema/{id}
pub async fn delete_schema_markup(
    _auth: RequireAuth,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .store
        .delete_schema_markup(id)
        .api_err("Failed to delete schema markup")?;

    Ok(StatusCode::NO_CONTENT)
}
