use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use validator::ValidationErrors;

use crate::registry::SeatError;
use crate::sessions::SessionError;

pub const MSG_SEAT_NOT_FOUND: &str = "Chỗ ngồi không tồn tại";
pub const MSG_SEAT_OCCUPIED: &str = "Chỗ ngồi đã có học sinh";
pub const MSG_SEAT_VACANT: &str = "Chỗ ngồi chưa có học sinh để cập nhật tên";
pub const MSG_NOT_ADMIN: &str = "Không có quyền truy cập. Vui lòng đăng nhập với quyền lớp trưởng.";
pub const MSG_WRONG_PASSWORD: &str = "Mật khẩu không đúng. Vui lòng thử lại.";
pub const MSG_INVALID_REQUEST: &str = "Dữ liệu không hợp lệ";
pub const MSG_INTERNAL: &str = "Lỗi máy chủ";

/// Error returned by every handler; serialized as `{"error": "..."}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn not_admin() -> Self {
        ApiError::Unauthorized(MSG_NOT_ADMIN.to_string())
    }

    /// Maps registry failures, using `fallback` as the client message for
    /// backend errors (the details only go to the log).
    pub fn from_seat(err: SeatError, fallback: &str) -> Self {
        match err {
            SeatError::NotFound(_) => ApiError::NotFound(MSG_SEAT_NOT_FOUND.to_string()),
            SeatError::Vacant(_) => ApiError::NotFound(MSG_SEAT_VACANT.to_string()),
            SeatError::Conflict(_) => ApiError::Conflict(MSG_SEAT_OCCUPIED.to_string()),
            SeatError::Database(e) => {
                tracing::error!("seat registry error: {:?}", e);
                ApiError::Internal(fallback.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<SeatError> for ApiError {
    fn from(err: SeatError) -> Self {
        ApiError::from_seat(err, MSG_INTERNAL)
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        tracing::error!("session store error: {:?}", err);
        ApiError::Internal("Lỗi phiên đăng nhập".to_string())
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        // Fields are checked by name so the reported message is stable.
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|(a, _), (b, _)| a.cmp(b));
        let message = fields
            .into_iter()
            .flat_map(|(_, errs)| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| MSG_INVALID_REQUEST.to_string());
        ApiError::Validation(message)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("rejected request body: {}", rejection.body_text());
        ApiError::Validation(MSG_INVALID_REQUEST.to_string())
    }
}
