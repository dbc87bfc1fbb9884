use axum::http::{HeaderMap, header::COOKIE};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use sha2::{Digest, Sha256};

use crate::types::Session;

pub const SESSION_COOKIE: &str = "folio_session";
pub const SESSION_TTL_DAYS: i64 = 7;

const TOKEN_BYTES: usize = 32;

/// A freshly minted session. `token` goes to the client; only
/// `session.id_hash` is persisted.
pub struct IssuedSession {
    pub token: String,
    pub session: Session,
}

#[must_use]
pub fn issue_session(now: DateTime<Utc>) -> IssuedSession {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill(&mut bytes);
    let token = URL_SAFE_NO_PAD.encode(bytes);

    IssuedSession {
        session: Session {
            id_hash: hash_token(&token),
            created_at: now,
            expires_at: now + Duration::days(SESSION_TTL_DAYS),
        },
        token,
    }
}

#[must_use]
pub fn hash_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

#[must_use]
pub fn session_cookie(token: &str, secure: bool) -> String {
    let max_age = Duration::days(SESSION_TTL_DAYS).num_seconds();
    let mut cookie =
        format!("{SESSION_COOKIE}={token}; HttpOnly; SameSite=Lax; Path=/; Max-Age={max_age}");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

#[must_use]
pub fn clear_session_cookie(secure: bool) -> String {
    let mut cookie = format!("{SESSION_COOKIE}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Finds the session token among the request's `Cookie` headers.
#[must_use]
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_issue_session_stores_only_digest() {
        let now = Utc::now();
        let issued = issue_session(now);

        assert_eq!(issued.token.len(), 43);
        assert_ne!(issued.session.id_hash, issued.token);
        assert_eq!(issued.session.id_hash, hash_token(&issued.token));
        assert_eq!(issued.session.id_hash.len(), 64);
        assert_eq!(issued.session.expires_at - now, Duration::days(7));
    }

    #[test]
    fn test_cookie_flags() {
        let cookie = session_cookie("abc", false);
        assert!(cookie.starts_with("folio_session=abc;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Path=/"));
        assert!(!cookie.contains("Secure"));

        assert!(session_cookie("abc", true).ends_with("; Secure"));
        assert!(clear_session_cookie(false).contains("Max-Age=0"));
    }

    #[test]
    fn test_token_from_headers() {
        let mut headers = HeaderMap::new();
        assert_eq!(token_from_headers(&headers), None);

        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; folio_session=tok123; other=x"),
        );
        assert_eq!(token_from_headers(&headers).as_deref(), Some("tok123"));

        headers.insert(COOKIE, HeaderValue::from_static("folio_session="));
        assert_eq!(token_from_headers(&headers), None);

        headers.insert(COOKIE, HeaderValue::from_static("xfolio_session=nope"));
        assert_eq!(token_from_headers(&headers), None);
    }
}
