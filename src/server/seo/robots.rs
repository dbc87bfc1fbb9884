use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};

use crate::auth::RequireAuth;
use crate::server::AppState;
use crate::server::dto::{EmptyRobotsResponse, RobotsQuery};
use crate::server::extract::ApiJson;
use crate::server::response::{ApiError, ApiResponse, StoreResultExt};
use crate::server::validation::validate_robots_config;
use crate::types::{Environment, RobotsConfigInput};

/// GET /seo/robots?environment= - defaults to the environment being served
pub async fn get_robots_config(
    _auth: RequireAuth,
    State(state): State<Arc<AppState>>,
    Query(query): Query<RobotsQuery>,
) -> Result<Response, ApiError> {
    let environment = match query.environment.as_deref() {
        Some(value) => match value {
            "production" => Environment::Production,
            "staging" => Environment::Staging,
            _ => {
                return Err(ApiError::bad_request(
                    "environment must be production or staging",
                ));
            }
        },
        None => state.config.environment,
    };

    let config = state
        .store
        .get_robots_config(environment.as_str())
        .api_err("Failed to get robots config")?;

    Ok(match config {
        Some(config) => Json(ApiResponse::success(config)).into_response(),
        None => Json(ApiResponse::success(EmptyRobotsResponse {
            environment: environment.to_string(),
            content: String::new(),
        }))
        .into_response(),
    })
}

/// GET /seo/robots/all
pub async fn list_robots_config(
    _auth: RequireAuth,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let configs = state
        .store
        .list_robots_config()
        .api_err("Failed to list robots config")?;

    Ok(Json(ApiResponse::success(configs)))
}

/// POST /seo/robots - upsert by environment
pub async fn upsert_robots_config(
    _auth: RequireAuth,
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<RobotsConfigInput>,
) -> Result<impl IntoResponse, ApiError> {
    validate_robots_config(&req)?;

    let config = state
        .store
        .upsert_robots_config(&req)
        .api_err("Failed to save robots config")?;

    Ok(Json(ApiResponse::success(config)))
}
