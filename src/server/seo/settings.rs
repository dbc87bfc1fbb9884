use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::auth::RequireAuth;
use crate::server::AppState;
use crate::server::dto::PublicAnalyticsResponse;
use crate::server::extract::ApiJson;
use crate::server::response::{ApiError, ApiResponse, StoreResultExt};
use crate::server::validation::normalize_schema_data;
use crate::types::{AnalyticsConfigInput, GlobalSeoInput};

// Analytics

/// GET /seo/analytics
pub async fn get_analytics_config(
    _auth: RequireAuth,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let config = state
        .store
        .get_analytics_config()
        .api_err("Failed to get analytics config")?;

    Ok(match config {
        Some(config) => Json(ApiResponse::success(config)).into_response(),
        None => Json(ApiResponse::success(json!({}))).into_response(),
    })
}

/// GET /seo/analytics/public
pub async fn get_public_analytics(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let ids = state
        .store
        .get_analytics_config()
        .api_err("Failed to get analytics config")?
        .map(PublicAnalyticsResponse::from)
        .unwrap_or_default();

    Ok(Json(ApiResponse::success(ids)))
}

/// POST /seo/analytics
pub async fn upsert_analytics_config(
    _auth: RequireAuth,
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<AnalyticsConfigInput>,
) -> Result<impl IntoResponse, ApiError> {
    let config = state
        .store
        .upsert_analytics_config(&req)
        .api_err("Failed to save analytics config")?;

    Ok(Json(ApiResponse::success(config)))
}

// Global SEO

/// GET /seo/global
pub async fn get_global_seo(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let config = state
        .store
        .get_global_seo()
        .api_err("Failed to get global SEO")?;

    Ok(match config {
        Some(config) => Json(ApiResponse::success(config)).into_response(),
        None => Json(ApiResponse::success(json!({}))).into_response(),
    })
}

/// POST /seo/global
pub async fn upsert_global_seo(
    _auth: RequireAuth,
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<GlobalSeoInput>,
) -> Result<impl IntoResponse, ApiError> {
    let req = GlobalSeoInput {
        organization_schema: req
            .organization_schema
            .map(|schema| schema.map(normalize_schema_data).transpose())
            .transpose()?,
        ..req
    };

    let config = state
        .store
        .upsert_global_seo(&req)
        .api_err("Failed to save global SEO")?;

    Ok(Json(ApiResponse::success(config)))
}
