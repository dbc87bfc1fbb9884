mod middleware;
mod password;
mod session;

pub use middleware::{AuthError, MaybeAuth, RequireAuth, authorize};
pub use password::{Argon2Hasher, generate_password};
pub use session::{
    IssuedSession, SESSION_COOKIE, SESSION_TTL_DAYS, clear_session_cookie, hash_token,
    issue_session, session_cookie, token_from_headers,
};
