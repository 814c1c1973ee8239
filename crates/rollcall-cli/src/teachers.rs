//! Teacher account management.

use rollcall_core::hash_password_with_cost;
use rollcall_db::{Store, StoreError};
use rollcall_models::{CreateTeacherDto, Teacher, TeacherCredentials, TeacherId};
use tracing::info;
use validator::{Validate, ValidationErrors};

#[derive(Debug, thiserror::Error)]
pub enum CreateTeacherError {
    #[error("invalid teacher details: {0}")]
    Invalid(#[from] ValidationErrors),
    #[error("teacher with username {0} already exists")]
    UsernameTaken(String),
    #[error("failed to hash password: {0}")]
    Password(String),
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for CreateTeacherError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UsernameTaken(username) => Self::UsernameTaken(username),
            other => Self::Store(other),
        }
    }
}

/// Validates and stores a new teacher account.
pub async fn create_teacher(
    store: &dyn Store,
    dto: CreateTeacherDto,
    password_cost: u32,
) -> Result<Teacher, CreateTeacherError> {
    dto.validate()?;

    let hashed_password = hash_password_with_cost(&dto.password, password_cost)
        .map_err(|e| CreateTeacherError::Password(e.error.to_string()))?;

    let credentials = TeacherCredentials {
        id: TeacherId::new(),
        username: dto.username,
        full_name: dto.full_name,
        email: dto.email,
        hashed_password,
    };
    store.insert_teacher(&credentials).await?;

    info!(username = %credentials.username, "Teacher created");
    Ok(credentials.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rollcall_db::{MemoryStore, TeacherRepository};

    fn dto(username: &str) -> CreateTeacherDto {
        CreateTeacherDto {
            username: username.to_string(),
            email: format!("{}@school.com", username),
            full_name: "Amina Idrissi".to_string(),
            password: "longenough".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_teacher() {
        let store = MemoryStore::new();
        let teacher = create_teacher(&store, dto("teacher3"), 4).await.unwrap();

        assert_eq!(teacher.username, "teacher3");
        let stored = store.find_teacher(teacher.id).await.unwrap();
        assert_eq!(stored, Some(teacher));
    }

    #[tokio::test]
    async fn test_duplicate_username_fails() {
        let store = MemoryStore::new();
        create_teacher(&store, dto("teacher3"), 4).await.unwrap();

        let err = create_teacher(&store, dto("teacher3"), 4).await.unwrap_err();
        assert!(matches!(err, CreateTeacherError::UsernameTaken(name) if name == "teacher3"));
    }

    #[tokio::test]
    async fn test_short_password_fails_validation() {
        let store = MemoryStore::new();
        let mut input = dto("teacher3");
        input.password = "short".to_string();

        let err = create_teacher(&store, input, 4).await.unwrap_err();
        assert!(matches!(err, CreateTeacherError::Invalid(_)));
        assert_eq!(store.count_teachers().await.unwrap(), 0);
    }
}
