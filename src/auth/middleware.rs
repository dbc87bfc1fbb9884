use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde_json::json;

use super::session::{hash_token, token_from_headers};
use crate::server::AppState;
use crate::types::Session;

/// Extractor that requires a live admin session.
pub struct RequireAuth(pub Session);

/// Resolves the session if there is one. Never rejects.
pub struct MaybeAuth(pub Option<Session>);

#[derive(Debug, PartialEq, Eq)]
pub enum AuthError {
    MissingSession,
    InvalidSession,
    SessionExpired,
    InternalError,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        // Clients only learn that authentication failed, not which part.
        let (status, message) = match self {
            AuthError::MissingSession | AuthError::InvalidSession | AuthError::SessionExpired => {
                (StatusCode::UNAUTHORIZED, "Authentication required")
            }
            AuthError::InternalError => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let body = json!({ "data": null, "error": message });
        (status, Json(body)).into_response()
    }
}

/// The gate every admin route composes with.
pub fn authorize(session: Option<&Session>, now: DateTime<Utc>) -> Result<(), AuthError> {
    match session {
        None => Err(AuthError::InvalidSession),
        Some(s) if s.is_expired(now) => Err(AuthError::SessionExpired),
        Some(_) => Ok(()),
    }
}

impl FromRequestParts<Arc<AppState>> for RequireAuth {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let raw_token = token_from_headers(&parts.headers).ok_or(AuthError::MissingSession)?;
        resolve_session(state, &raw_token).map(RequireAuth)
    }
}

impl FromRequestParts<Arc<AppState>> for MaybeAuth {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let session = token_from_headers(&parts.headers)
            .and_then(|raw_token| resolve_session(state, &raw_token).ok());
        Ok(MaybeAuth(session))
    }
}

fn resolve_session(state: &Arc<AppState>, raw_token: &str) -> Result<Session, AuthError> {
    let id_hash = hash_token(raw_token);

    let session = state.store.get_session(&id_hash).map_err(|e| {
        tracing::error!("Failed to load session: {e}");
        AuthError::InternalError
    })?;

    match authorize(session.as_ref(), Utc::now()) {
        Ok(()) => session.ok_or(AuthError::InvalidSession),
        Err(AuthError::SessionExpired) => {
            if let Err(e) = state.store.delete_session(&id_hash) {
                tracing::warn!("Failed to delete expired session: {e}");
            }
            Err(AuthError::SessionExpired)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn session(expires_in: Duration) -> Session {
        let now = Utc::now();
        Session {
            id_hash: "h".to_string(),
            created_at: now,
            expires_at: now + expires_in,
        }
    }

    #[test]
    fn test_authorize_without_session() {
        assert_eq!(authorize(None, Utc::now()), Err(AuthError::InvalidSession));
    }

    #[test]
    fn test_authorize_live_session() {
        let s = session(Duration::hours(1));
        assert_eq!(authorize(Some(&s), Utc::now()), Ok(()));
    }

    #[test]
    fn test_authorize_expired_session() {
        let s = session(Duration::hours(1));
        assert_eq!(
            authorize(Some(&s), s.expires_at),
            Err(AuthError::SessionExpired)
        );
        assert_eq!(
            authorize(Some(&s), s.expires_at + Duration::seconds(1)),
            Err(AuthError::SessionExpired)
        );
    }
}
