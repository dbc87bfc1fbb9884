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
use crate::server::validation::{validate_new_project, validate_project_patch};
use crate::types::{NewProject, ProjectPatch};

/// GET /projects
pub async fn list_projects(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let projects = state
        .store
        .list_projects()
        .api_err("Failed to list projects")?;

    Ok(Json(ApiResponse::success(projects)))
}

/// GET /projects/{id}
pub async fn get_project(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let project = state
        .store
        .get_project(id)
        .api_err("Failed to get project")?
        .or_not_found("Project not found")?;

    Ok(Json(ApiResponse::success(project)))
}

/// POST /projects
pub async fn create_project(
    _auth: RequireAuth,
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<NewProject>,
) -> Result<impl IntoResponse, ApiError> {
    validate_new_project(&req)?;

    let project = state
        .store
        .create_project(&req)
        .api_err("Failed to create project")?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(project))))
}

/// PATCH /projects/{id}
pub async fn update_project(
    _auth: RequireAuth,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    ApiJson(req): ApiJson<ProjectPatch>,
) -> Result<impl IntoResponse, ApiError> {
    validate_project_patch(&req)?;

    let project = state
        .store
        .update_project(id, &req)
        .api_err("Failed to update project")?
        .or_not_found("Project not found")?;

    Ok(Json(ApiResponse::success(project)))
}

/// DELETE /projects/{id}
pub async fn delete_project(
    _auth: RequireAuth,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .store
        .delete_project(id)
        .api_err("Failed to delete project")?;

    Ok(StatusCode::NO_CONTENT)
}
