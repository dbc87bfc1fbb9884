use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, header},
    response::IntoResponse,
    routing::{get, patch, post},
};
use chrono::Utc;

use crate::auth::{
    MaybeAuth, RequireAuth, clear_session_cookie, hash_token, issue_session, session_cookie,
    token_from_headers,
};
use crate::server::AppState;
use crate::server::dto::{
    AuthStatusResponse, ChangePasswordRequest, LoginRequest, MessageResponse,
};
use crate::server::extract::ApiJson;
use crate::server::response::{ApiError, ApiResponse, StoreOptionExt, StoreResultExt};
use crate::server::validation::{validate_login, validate_password_change};

const INVALID_CREDENTIALS: &str = "Invalid credentials";

pub fn auth_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/check", get(check))
        .route("/auth/password", patch(change_password))
}

/// POST /auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_login(&req.username, &req.password)?;

    let admin = state
        .store
        .get_admin_user_by_username(&req.username)
        .api_err("Failed to load admin user")?;

    let valid = match &admin {
        Some(admin) => state
            .hasher
            .verify(&req.password, &admin.password_hash)
            .api_err("Failed to verify password")?,
        None => state.hasher.verify_absent(&req.password),
    };
    let admin = match admin {
        Some(admin) if valid => admin,
        _ => {
            tracing::warn!("Failed login attempt for '{}'", req.username);
            return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
        }
    };

    let issued = issue_session(Utc::now());
    state
        .store
        .create_session(&issued.session)
        .api_err("Failed to create session")?;

    tracing::info!("Admin '{}' logged in", admin.username);

    let cookie = session_cookie(&issued.token, state.config.environment.is_production());
    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(ApiResponse::success(MessageResponse::new("Login successful"))),
    ))
}

/// POST /auth/logout
pub async fn logout(State(state): State<Arc<AppState>>, headers: HeaderMap) -> impl IntoResponse {
    if let Some(token) = token_from_headers(&headers) {
        if let Err(e) = state.store.delete_session(&hash_token(&token)) {
            tracing::warn!("Failed to delete session on logout: {e}");
        }
    }

    let cookie = clear_session_cookie(state.config.environment.is_production());
    (
        [(header::SET_COOKIE, cookie)],
        Json(ApiResponse::success(MessageResponse::new("Logged out"))),
    )
}

/// GET /auth/check
pub async fn check(MaybeAuth(session): MaybeAuth) -> impl IntoResponse {
    Json(ApiResponse::success(AuthStatusResponse {
        authenticated: session.is_some(),
    }))
}

/// PATCH /auth/password
pub async fn change_password(
    _auth: RequireAuth,
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<ChangePasswordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_password_change(&req.current_password, &req.new_password)?;

    let admin = state
        .store
        .get_first_admin_user()
        .api_err("Failed to load admin user")?
        .or_not_found("Admin user not found")?;

    let valid = state
        .hasher
        .verify(&req.current_password, &admin.password_hash)
        .api_err("Failed to verify password")?;
    if !valid {
        return Err(ApiError::unauthorized("Current password is incorrect"));
    }

    let hash = state
        .hasher
        .hash(&req.new_password)
        .api_err("Failed to hash password")?;
    state
        .store
        .update_admin_password(admin.id, &hash)
        .api_err("Failed to update password")?;

    tracing::info!("Admin '{}' changed password", admin.username);

    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Password updated successfully",
    ))))
}
