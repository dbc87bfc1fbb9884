use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use bytes::Bytes;

use crate::auth::RequireAuth;
use crate::server::AppState;
use crate::server::dto::{SuccessResponse, TrackRequest};
use crate::server::response::{ApiError, ApiResponse, StoreResultExt};
use crate::server::validation::validate_slug;

/// POST /track - best effort. Always answers `{success: true}`, whatever the
/// body holds or the store does.
pub async fn track_page_view(State(state): State<Arc<AppState>>, body: Bytes) -> impl IntoResponse {
    let req: TrackRequest = serde_json::from_slice(&body).unwrap_or_default();

    if let Some(slug) = req.page_slug.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        if validate_slug("pageSlug", slug).is_err() {
            tracing::debug!("Ignoring page view for invalid slug '{slug}'");
        } else if let Err(e) = state.store.track_page_view(slug) {
            tracing::warn!("Failed to track page view for '{slug}': {e}");
        }
    }

    Json(ApiResponse::success(SuccessResponse { success: true }))
}

/// GET /analytics/views
pub async fn list_page_views(
    _auth: RequireAuth,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let views = state
        .store
        .list_page_views()
        .api_err("Failed to list page views")?;

    Ok(Json(ApiResponse::success(views)))
}

/// DELETE /analytics/views
pub async fn reset_page_views(
    _auth: RequireAuth,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let deleted = state
        .store
        .reset_page_views()
        .api_err("Failed to reset page views")?;

    tracing::info!("Reset page views ({deleted} pages)");

    Ok(StatusCode::NO_CONTENT)
}
