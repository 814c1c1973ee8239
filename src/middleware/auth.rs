use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use rollcall_auth::verify_token;
use rollcall_core::AppError;
use rollcall_models::TeacherId;

use crate::state::AppState;

/// The teacher a request's bearer token was issued to.
///
/// Rejects with 401 when the `Authorization` header is missing, is not a
/// bearer token, fails signature verification, or lacks a usable
/// `teacher_id` claim.
#[derive(Debug, Clone, Copy)]
pub struct AuthTeacher(pub TeacherId);

impl AuthTeacher {
    pub fn teacher_id(&self) -> TeacherId {
        self.0
    }
}

impl FromRequestParts<AppState> for AuthTeacher {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| {
                    AppError::unauthorized("Missing or invalid authorization header".to_string())
                })?;

        let claims = verify_token(bearer.token(), &state.jwt_config)?;

        Ok(AuthTeacher(claims.teacher_id()?))
    }
}
