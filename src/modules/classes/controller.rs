use anyhow::anyhow;
use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
};
use rollcall_core::{AppError, PaginationParams};
use rollcall_models::{Class, Student};
use tracing::instrument;

use super::service::ClassService;
use crate::middleware::auth::AuthTeacher;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::Paginated;

fn invalid_query(rejection: QueryRejection) -> AppError {
    AppError::bad_request(anyhow!("Invalid query parameters: {}", rejection))
}

/// List the classes owned by the authenticated teacher
///
/// Returns every class unless `limit`/`offset`/`page` are given. The total is
/// in the `X-Total-Count` header.
#[utoipa::path(
    get,
    path = "/api/classes",
    params(PaginationParams),
    responses(
        (status = 200, description = "Classes ordered by name", body = Vec<Class>,
            headers(("X-Total-Count" = i64, description = "Total number of classes"))),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Classes"
)]
#[instrument(skip(state))]
pub async fn list_classes(
    State(state): State<AppState>,
    auth: AuthTeacher,
    params: Result<Query<PaginationParams>, QueryRejection>,
) -> Result<Paginated<Class>, AppError> {
    let Query(params) = params.map_err(invalid_query)?;
    let listing =
        ClassService::list_classes(state.store.as_ref(), auth.teacher_id(), params.to_page())
            .await?;
    Ok(listing.into())
}

#[utoipa::path(
    get,
    path = "/api/classes/{class_id}",
    params(
        ("class_id" = String, Path, description = "Class ID")
    ),
    responses(
        (status = 200, description = "Class details", body = Class),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Class not found or access denied", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Classes"
)]
#[instrument(skip(state))]
pub async fn get_class(
    State(state): State<AppState>,
    auth: AuthTeacher,
    Path(class_id): Path<String>,
) -> Result<Json<Class>, AppError> {
    let class_id = ClassService::parse_class_id(&class_id)?;
    let class =
        ClassService::get_owned_class(state.store.as_ref(), class_id, auth.teacher_id()).await?;
    Ok(Json(class))
}

/// List the students of a class in roster order
#[utoipa::path(
    get,
    path = "/api/classes/{class_id}/students",
    params(
        ("class_id" = String, Path, description = "Class ID"),
        PaginationParams
    ),
    responses(
        (status = 200, description = "Students in roster order", body = Vec<Student>,
            headers(("X-Total-Count" = i64, description = "Total number of students"))),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Class not found or access denied", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Classes"
)]
#[instrument(skip(state))]
pub async fn list_students(
    State(state): State<AppState>,
    auth: AuthTeacher,
    Path(class_id): Path<String>,
    params: Result<Query<PaginationParams>, QueryRejection>,
) -> Result<Paginated<Student>, AppError> {
    let Query(params) = params.map_err(invalid_query)?;
    let class_id = ClassService::parse_class_id(&class_id)?;
    let listing = ClassService::list_students(
        state.store.as_ref(),
        class_id,
        auth.teacher_id(),
        params.to_page(),
    )
    .await?;
    Ok(listing.into())
}
