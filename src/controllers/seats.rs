use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use std::borrow::Cow;
use std::sync::Arc;
use validator::{Validate, ValidationError};

use crate::error::{ApiError, MSG_SEAT_NOT_FOUND};
use crate::middleware::AdminSession;
use crate::models::seat::MAX_STUDENT_NAME_CHARS;
use crate::services::stats::compute_stats;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/seats", get(get_seats))
        .route("/seats/stats", get(get_stats))
        .route("/seats/register", post(register_seat))
        .route("/seats/{seat_id}", get(get_seat).delete(clear_seat))
        .route("/seats/{seat_id}/student-name", put(update_student_name))
}

/* ---------- validation ---------- */

const MSG_EMPTY_NAME: &str = "Tên học sinh không được để trống";
const MSG_NAME_TOO_LONG: &str = "Tên học sinh không được quá 50 ký tự";

fn validate_student_name(name: &str) -> Result<(), ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new("student_name_empty").with_message(Cow::Borrowed(MSG_EMPTY_NAME)));
    }
    if trimmed.chars().count() > MAX_STUDENT_NAME_CHARS {
        return Err(ValidationError::new("student_name_too_long").with_message(Cow::Borrowed(MSG_NAME_TOO_LONG)));
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct RegisterSeatRequest {
    #[validate(length(min = 1, message = "ID chỗ ngồi không được để trống"))]
    seat_id: String,
    #[validate(custom(function = "validate_student_name"))]
    student_name: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct UpdateStudentNameRequest {
    #[validate(custom(function = "validate_student_name"))]
    student_name: String,
}

/* ---------- reads ---------- */

// GET /api/seats
async fn get_seats(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let seats = state
        .seats
        .list_all()
        .await
        .map_err(|e| ApiError::from_seat(e, "Không thể lấy danh sách chỗ ngồi"))?;

    Ok((StatusCode::OK, Json(seats)))
}

// GET /api/seats/stats
async fn get_stats(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let seats = state
        .seats
        .list_all()
        .await
        .map_err(|e| ApiError::from_seat(e, "Không thể lấy thống kê chỗ ngồi"))?;

    Ok((StatusCode::OK, Json(compute_stats(&seats))))
}

// GET /api/seats/{seat_id}
async fn get_seat(
    State(state): State<Arc<AppState>>,
    Path(seat_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let seat = state
        .seats
        .get_by_id(&seat_id)
        .await
        .map_err(|e| ApiError::from_seat(e, "Không thể lấy thông tin chỗ ngồi"))?
        .ok_or_else(|| ApiError::NotFound(MSG_SEAT_NOT_FOUND.to_string()))?;

    Ok((StatusCode::OK, Json(seat)))
}

/* ---------- mutations ---------- */

// POST /api/seats/register
async fn register_seat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RegisterSeatRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    req.validate()?;

    let seat = state
        .seats
        .register(&req.seat_id, req.student_name.trim())
        .await
        .map_err(|e| ApiError::from_seat(e, "Không thể đăng ký chỗ ngồi"))?;

    Ok((StatusCode::OK, Json(seat)))
}

// DELETE /api/seats/{seat_id}
async fn clear_seat(
    State(state): State<Arc<AppState>>,
    admin: AdminSession,
    Path(seat_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let seat = state
        .seats
        .clear(&seat_id)
        .await
        .map_err(|e| ApiError::from_seat(e, "Không thể xóa chỗ ngồi"))?;

    tracing::debug!("Seat {} cleared by admin session {}", seat_id, admin.id);
    Ok((StatusCode::OK, Json(seat)))
}

// PUT /api/seats/{seat_id}/student-name
async fn update_student_name(
    State(state): State<Arc<AppState>>,
    Path(seat_id): Path<String>,
    payload: Result<Json<UpdateStudentNameRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    req.validate()?;

    let seat = state
        .seats
        .rename(&seat_id, req.student_name.trim())
        .await
        .map_err(|e| ApiError::from_seat(e, "Không thể cập nhật tên học sinh"))?;

    Ok((StatusCode::OK, Json(seat)))
}
