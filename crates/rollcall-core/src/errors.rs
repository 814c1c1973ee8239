//! Application error type.
//!
//! Every handler returns `Result<_, AppError>`. An [`AppError`] carries the HTTP
//! status to answer with and the underlying [`anyhow::Error`]; it renders as
//! `{"error": "<message>"}`.
//!
//! The request-terminal error kinds of the attendance API map onto named
//! constructors:
//!
//! | Kind | Constructor | Status |
//! |------|-------------|--------|
//! | Invalid credentials | [`AppError::invalid_credentials`] | 401 |
//! | Missing/invalid token | [`AppError::unauthorized`] | 401 |
//! | Class absent or not owned | [`AppError::class_not_found`] | 404 |
//! | Attendance already recorded | [`AppError::duplicate_submission`] | 400 |

use anyhow::{Error, anyhow};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn internal_error(message: String) -> Self {
        Self::internal(anyhow!(message))
    }

    pub fn database<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn unprocessable<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, err)
    }

    pub fn unauthorized(message: String) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, anyhow!(message))
    }

    /// Unknown username or wrong password. The two cases share one message.
    pub fn invalid_credentials() -> Self {
        Self::unauthorized("Invalid credentials".to_string())
    }

    /// Class does not exist or belongs to another teacher.
    ///
    /// Both cases produce this exact error so callers cannot probe for class ids.
    pub fn class_not_found() -> Self {
        Self::not_found(anyhow!("Class not found or access denied"))
    }

    pub fn duplicate_submission() -> Self {
        Self::bad_request(anyhow!("Attendance already submitted for this session"))
    }

    pub fn is_server_error(&self) -> bool {
        self.status.is_server_error()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_server_error() {
            tracing::error!(error = ?self.error, "request failed");
        }

        let body = Json(json!({
            "error": self.error.to_string()
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}
