use std::sync::Arc;
use std::time::Instant;

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::{Router, routing::get};

use super::auth::auth_router;
use super::portfolio::{portfolio_router, serve_upload};
use super::response::ApiError;
use super::seo::{robots_txt, seo_router, sitemap_xml};
use super::traffic::traffic_router;
use super::validation::is_exempt_path;
use crate::auth::Argon2Hasher;
use crate::config::ServerConfig;
use crate::store::Store;
use crate::types::RedirectStatus;
use crate::uploads::UploadStorage;

pub struct AppState {
    pub store: Arc<dyn Store>,
    pub uploads: UploadStorage,
    pub config: ServerConfig,
    pub hasher: Argon2Hasher,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, config: ServerConfig) -> Self {
        Self {
            store,
            uploads: UploadStorage::new(&config.data_dir),
            config,
            hasher: Argon2Hasher::new(),
        }
    }

    /// Scheme and host for absolute links. The configured public URL wins
    /// over request headers.
    #[must_use]
    pub fn base_url(&self, headers: &HeaderMap) -> String {
        match &self.config.public_base_url {
            Some(url) => url.clone(),
            None => get_host_from_headers(headers),
        }
    }
}

#[must_use]
fn get_host_from_headers(headers: &HeaderMap) -> String {
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");

    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("http");

    format!("{scheme}://{host}")
}

async fn health() -> &'static str {
    "OK"
}

async fn not_found() -> ApiError {
    ApiError::not_found("Not found")
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let response = next.run(request).await;

    let latency = start.elapsed();
    let status = response.status();

    tracing::info!(
        "{} {} {} {}ms",
        method,
        uri.path(),
        status.as_u16(),
        latency.as_millis()
    );

    response
}

/// Answers with the stored redirect when an active rule matches the exact
/// request path. API and admin paths are never looked up.
async fn apply_redirects(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path();
    if is_exempt_path(path) {
        return next.run(request).await;
    }

    match state.store.get_redirect_by_path(path) {
        Ok(Some(rule)) if rule.is_active => {
            let status = match RedirectStatus::from_code(rule.status_code) {
                Some(RedirectStatus::Temporary) => StatusCode::FOUND,
                _ => StatusCode::MOVED_PERMANENTLY,
            };
            tracing::debug!("Redirecting {} to {} ({})", path, rule.to_path, status.as_u16());

            return Response::builder()
                .status(status)
                .header(header::LOCATION, rule.to_path)
                .body(Body::empty())
                .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response());
        }
        Ok(_) => {}
        Err(e) => tracing::warn!("Redirect lookup failed for {path}: {e}"),
    }

    next.run(request).await
}

fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(auth_router())
        .merge(portfolio_router())
        .merge(seo_router())
        .merge(traffic_router())
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/sitemap.xml", get(sitemap_xml))
        .route("/robots.txt", get(robots_txt))
        .route("/uploads/{name}", get(serve_upload))
        .nest("/api", api_router())
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(state.clone(), apply_redirects))
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_host_from_headers() {
        let mut headers = HeaderMap::new();
        assert_eq!(get_host_from_headers(&headers), "http://localhost");

        headers.insert(header::HOST, HeaderValue::from_static("example.com"));
        headers.insert("x-forwarded-proto", HeaderValue::from_static("https"));
        assert_eq!(get_host_from_headers(&headers), "https://example.com");
    }
}
