//! Teacher accounts.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::TeacherId;

/// Public view of a teacher account. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Teacher {
    pub id: TeacherId,
    pub username: String,
    pub full_name: String,
    pub email: String,
}

/// A teacher row as stored, including the bcrypt hash.
#[derive(Debug, Clone, FromRow)]
pub struct TeacherCredentials {
    pub id: TeacherId,
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub hashed_password: String,
}

impl TeacherCredentials {
    pub fn to_teacher(&self) -> Teacher {
        Teacher {
            id: self.id,
            username: self.username.clone(),
            full_name: self.full_name.clone(),
            email: self.email.clone(),
        }
    }
}

impl From<TeacherCredentials> for Teacher {
    fn from(credentials: TeacherCredentials) -> Self {
        Teacher {
            id: credentials.id,
            username: credentials.username,
            full_name: credentials.full_name,
            email: credentials.email,
        }
    }
}

/// Input for creating a teacher account from the admin CLI.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTeacherDto {
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 100))]
    pub full_name: String,
    #[validate(length(min = 8))]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_teacher_json_has_no_password() {
        let credentials = TeacherCredentials {
            id: TeacherId::new(),
            username: "teacher1".to_string(),
            full_name: "Sarah Johnson".to_string(),
            email: "teacher1@school.com".to_string(),
            hashed_password: "$2b$04$hash".to_string(),
        };
        let json = serde_json::to_value(credentials.to_teacher()).unwrap();
        assert_eq!(json["username"], "teacher1");
        assert!(json.get("hashed_password").is_none());
    }

    #[test]
    fn test_create_teacher_validation() {
        let dto = CreateTeacherDto {
            username: "t1".to_string(),
            email: "not-an-email".to_string(),
            full_name: "".to_string(),
            password: "short".to_string(),
        };
        let errors = dto.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("username"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("full_name"));
        assert!(fields.contains_key("password"));
    }
}
