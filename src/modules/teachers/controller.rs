use axum::Json;
use axum::extract::State;
use rollcall_core::AppError;
use rollcall_models::Teacher;
use tracing::instrument;

use super::service::TeacherService;
use crate::middleware::auth::AuthTeacher;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;

/// Get the authenticated teacher's profile
#[utoipa::path(
    get,
    path = "/api/teacher/profile",
    responses(
        (status = 200, description = "Teacher profile", body = Teacher),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Teacher no longer exists", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Teachers"
)]
#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthTeacher,
) -> Result<Json<Teacher>, AppError> {
    let teacher = TeacherService::get_profile(state.store.as_ref(), auth.teacher_id()).await?;
    Ok(Json(teacher))
}
