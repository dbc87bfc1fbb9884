use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, header},
    response::IntoResponse,
};
use chrono::Utc;

use crate::seo::{render_robots, render_sitemap};
use crate::server::AppState;
use crate::server::response::{ApiError, StoreResultExt};

/// GET /sitemap.xml
pub async fn sitemap_xml(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let entries = state
        .store
        .list_sitemap_config()
        .api_err("Failed to load sitemap config")?;

    let base_url = state.base_url(&headers);
    let xml = render_sitemap(&entries, &base_url, Utc::now().date_naive())
        .api_err("Failed to render sitemap")?;

    Ok(([(header::CONTENT_TYPE, "application/xml")], xml))
}

/// GET /robots.txt
pub async fn robots_txt(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let config = state
        .store
        .get_robots_config(state.config.environment.as_str())
        .api_err("Failed to load robots config")?;

    let base_url = state.base_url(&headers);
    let body = render_robots(config.as_ref(), &base_url);

    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body))
}
