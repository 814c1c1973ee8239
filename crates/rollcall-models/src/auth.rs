//! Authentication DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::teachers::Teacher;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    /// Always `bearer`
    pub token_type: String,
    pub teacher: Teacher,
}

impl LoginResponse {
    pub fn bearer(access_token: String, teacher: Teacher) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
            teacher,
        }
    }
}
