mod contact;
mod projects;
mod upload;

use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
};

use crate::server::AppState;
use crate::uploads::MAX_UPLOAD_BYTES;

pub use upload::serve_upload;

// Room for multipart boundaries and headers around the file itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub fn portfolio_router() -> Router<Arc<AppState>> {
    Router::new()
        // Project routes
        .route(
            "/projects",
            get(projects::list_projects).post(projects::create_project),
        )
        .route(
            "/projects/{id}",
            get(projects::get_project)
                .patch(projects::update_project)
                .delete(projects::delete_project),
        )
        // Contact routes
        .route(
            "/contact",
            get(contact::list_contact_messages).post(contact::create_contact_message),
        )
        .route("/contact/{id}", delete(contact::delete_contact_message))
        // Upload routes
        .route(
            "/upload",
            post(upload::upload_image)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + MULTIPART_OVERHEAD)),
        )
}
