use anyhow::anyhow;
use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
};
use rollcall_core::AppError;
use rollcall_models::{AttendanceQuery, AttendanceRecord, AttendanceSubmission, SubmissionResponse};
use tracing::instrument;

use super::service::AttendanceService;
use crate::middleware::auth::AuthTeacher;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::classes::service::ClassService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Attendance records of a class for one date and session
#[utoipa::path(
    get,
    path = "/api/classes/{class_id}/attendance",
    params(
        ("class_id" = String, Path, description = "Class ID"),
        AttendanceQuery
    ),
    responses(
        (status = 200, description = "Records in submission order; empty if none", body = Vec<AttendanceRecord>),
        (status = 400, description = "Invalid date or session", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Class not found or access denied", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
#[instrument(skip(state))]
pub async fn get_attendance(
    State(state): State<AppState>,
    auth: AuthTeacher,
    Path(class_id): Path<String>,
    query: Result<Query<AttendanceQuery>, QueryRejection>,
) -> Result<Json<Vec<AttendanceRecord>>, AppError> {
    let Query(query) =
        query.map_err(|e| AppError::bad_request(anyhow!("Invalid query parameters: {}", e)))?;
    let class_id = ClassService::parse_class_id(&class_id)?;
    let records =
        AttendanceService::get_records(state.store.as_ref(), class_id, auth.teacher_id(), query)
            .await?;
    Ok(Json(records))
}

/// Submit attendance for a class, date and session
///
/// Accepted once per `(class, date, session)`; later submissions for the same
/// key are rejected with 400 and write nothing.
#[utoipa::path(
    post,
    path = "/api/classes/{class_id}/attendance",
    params(
        ("class_id" = String, Path, description = "Class ID")
    ),
    request_body = AttendanceSubmission,
    responses(
        (status = 200, description = "Attendance recorded", body = SubmissionResponse),
        (status = 400, description = "Already submitted, or body class_id mismatch", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Class not found or access denied", body = ErrorResponse),
        (status = 422, description = "Invalid entries", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
#[instrument(skip(state, submission))]
pub async fn submit_attendance(
    State(state): State<AppState>,
    auth: AuthTeacher,
    Path(class_id): Path<String>,
    ValidatedJson(submission): ValidatedJson<AttendanceSubmission>,
) -> Result<Json<SubmissionResponse>, AppError> {
    let class_id = ClassService::parse_class_id(&class_id)?;
    let response =
        AttendanceService::submit(state.store.as_ref(), class_id, auth.teacher_id(), submission)
            .await?;
    Ok(Json(response))
}
