//! Class representative login. A single shared password unlocks an admin
//! session; the session id is handed back as an HttpOnly cookie.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{ApiError, MSG_WRONG_PASSWORD};
use crate::middleware::{expired_session_cookie, session_cookie, SessionCookie};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/admin/login", post(login))
        .route("/admin/logout", post(logout))
        .route("/admin/status", get(status))
}

// Anything that is not a matching string is just a wrong password.
#[derive(Debug, Deserialize)]
struct LoginRequest {
    #[serde(default)]
    password: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
struct MessageResponse {
    success: bool,
    message: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusResponse {
    is_admin: bool,
}

// POST /api/admin/login
async fn login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    let password = match &req.password {
        Some(serde_json::Value::String(password)) => password.as_str(),
        _ => "",
    };

    if password.is_empty() || !state.password_matches(password) {
        tracing::warn!("Admin login rejected");
        return Err(ApiError::Unauthorized(MSG_WRONG_PASSWORD.to_string()));
    }

    let id = state.sessions.create().await?;
    tracing::info!("Admin session {} opened", id);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, session_cookie(&id, state.config.admin.session_ttl_seconds))],
        Json(MessageResponse {
            success: true,
            message: "Đăng nhập thành công",
        }),
    ))
}

// POST /api/admin/logout
async fn logout(
    State(state): State<Arc<AppState>>,
    SessionCookie(session): SessionCookie,
) -> Result<impl IntoResponse, ApiError> {
    if let Some(id) = session {
        state.sessions.destroy(&id).await?;
    }

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, expired_session_cookie())],
        Json(MessageResponse {
            success: true,
            message: "Đăng xuất thành công",
        }),
    ))
}

// GET /api/admin/status
async fn status(
    State(state): State<Arc<AppState>>,
    SessionCookie(session): SessionCookie,
) -> Result<impl IntoResponse, ApiError> {
    let is_admin = match session {
        Some(id) => state.sessions.is_admin(&id).await?,
        None => false,
    };

    Ok(Json(StatusResponse { is_admin }))
}
