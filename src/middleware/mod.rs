use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use std::sync::Arc;

use crate::error::ApiError;
use crate::sessions::SessionId;
use crate::AppState;

pub const SESSION_COOKIE: &str = "seat_session";

/// Reads our session id out of the `Cookie` header(s), if there is a
/// well-formed one.
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<SessionId> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| value.trim().parse().ok())
}

pub fn session_cookie(id: &SessionId, max_age_seconds: u64) -> String {
    format!("{SESSION_COOKIE}={id}; HttpOnly; SameSite=Lax; Path=/; Max-Age={max_age_seconds}")
}

pub fn expired_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0")
}

/// Whatever session cookie the caller sent, valid or not. Never rejects.
#[derive(Debug, Clone, Copy)]
pub struct SessionCookie(pub Option<SessionId>);

impl FromRequestParts<Arc<AppState>> for SessionCookie {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        Ok(SessionCookie(session_id_from_headers(&parts.headers)))
    }
}

/// Caller holding a live admin session. Rejects with 401 otherwise.
#[derive(Debug, Clone, Copy)]
pub struct AdminSession {
    pub id: SessionId,
}

impl FromRequestParts<Arc<AppState>> for AdminSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let id = session_id_from_headers(&parts.headers).ok_or_else(ApiError::not_admin)?;

        if !state.sessions.is_admin(&id).await? {
            return Err(ApiError::not_admin());
        }

        Ok(AdminSession { id })
    }
}
