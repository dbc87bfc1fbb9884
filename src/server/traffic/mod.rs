mod redirects;
mod views;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::server::AppState;

pub fn traffic_router() -> Router<Arc<AppState>> {
    Router::new()
        // Redirect routes
        .route(
            "/redirects",
            get(redirects::list_redirects).post(redirects::create_redirect),
        )
        .route(
            "/redirects/{id}",
            get(redirects::get_redirect)
                .patch(redirects::update_redirect)
                .delete(redirects::delete_redirect),
        )
        // Page view routes
        .route("/track", post(views::track_page_view))
        .route(
            "/analytics/views",
            get(views::list_page_views).delete(views::reset_page_views),
        )
}
