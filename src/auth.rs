//! Session-backed request principal.
//!
//! Sessions are signed cookies written by whichever service performs the
//! login; this crate only reads the user id back out of them.

use std::future::{ready, Ready};

use actix_session::config::CookieContentSecurity;
use actix_session::storage::CookieSessionStore;
use actix_session::{SessionExt, SessionMiddleware};
use actix_web::cookie::Key;
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use uuid::Uuid;

use crate::errors::AppError;

/// Session key holding the signed-in user's id.
pub const USER_ID_KEY: &str = "user_id";

/// Extractor that requires a signed-in user.
///
/// Responds `401` when the session carries no user id and `500` when the
/// session cookie cannot be read.
///
/// ```rust,ignore
/// async fn handler(AuthenticatedUser(user_id): AuthenticatedUser) -> HttpResponse {
///     HttpResponse::Ok().body(user_id.to_string())
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser(pub Uuid);

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = match req.get_session().get::<Uuid>(USER_ID_KEY) {
            Ok(Some(user_id)) => Ok(Self(user_id)),
            Ok(None) => Err(AppError::Unauthorized),
            Err(e) => Err(AppError::Internal(format!("unreadable session: {}", e))),
        };
        ready(result)
    }
}

/// Signed (not encrypted) cookie sessions; the cookie only carries the user id.
pub fn session_middleware(key: Key, secure: bool) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_content_security(CookieContentSecurity::Signed)
        .cookie_secure(secure)
        .cookie_http_only(true)
        .build()
}
