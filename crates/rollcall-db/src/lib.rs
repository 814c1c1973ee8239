//! # Rollcall DB
//!
//! Storage for the attendance API. The service never talks to a database
//! directly; it is handed an `Arc<dyn Store>` at construction time.
//!
//! [`Store`] is the union of three repositories, one per stored component:
//!
//! - [`TeacherRepository`]: teacher accounts and password hashes
//! - [`RosterRepository`]: classes, their ordered rosters, and students
//! - [`AttendanceRepository`]: the append-only attendance ledger
//!
//! Two implementations ship with the crate:
//!
//! - [`PgStore`]: PostgreSQL via SQLx, schema applied from `migrations/`
//! - [`MemoryStore`]: in-process tables behind a Tokio `RwLock`
//!
//! Both enforce the ledger rule themselves: at most one batch per
//! `(class_id, date, session)`, written all-or-nothing. A second batch for the
//! same key fails with [`StoreError::DuplicateSubmission`], including when two
//! batches race.
//!
//! ```ignore
//! use std::sync::Arc;
//! use rollcall_db::{MemoryStore, Store};
//!
//! let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
//! let teacher = store.find_teacher_by_username("teacher1").await?;
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use rollcall_core::Page;
use rollcall_models::{
    AttendanceRecord, Class, ClassId, Student, StudentId, SubmissionKey, Teacher,
    TeacherCredentials, TeacherId,
};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::{MIGRATOR, PgStore, init_db_pool};

// Re-export PgPool for convenience
pub use sqlx::PgPool;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("attendance already submitted for this class, date and session")]
    DuplicateSubmission,
    #[error("username already taken: {0}")]
    UsernameTaken(String),
    #[error("class not found: {0}")]
    ClassNotFound(ClassId),
    #[error("store misconfigured: {0}")]
    Configuration(String),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Migration(#[from] sqlx::migrate::MigrateError),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// One attendance batch, written atomically under its key.
#[derive(Debug, Clone)]
pub struct SubmissionBatch {
    pub key: SubmissionKey,
    pub submitted_by: TeacherId,
    pub submitted_at: DateTime<Utc>,
    pub records: Vec<AttendanceRecord>,
}

/// A page of results together with the total number of matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing<T> {
    pub items: Vec<T>,
    pub total: i64,
}

#[async_trait]
pub trait TeacherRepository: Send + Sync {
    async fn find_teacher_by_username(
        &self,
        username: &str,
    ) -> StoreResult<Option<TeacherCredentials>>;

    async fn find_teacher(&self, id: TeacherId) -> StoreResult<Option<Teacher>>;

    /// Fails with [`StoreError::UsernameTaken`] when the username exists.
    async fn insert_teacher(&self, teacher: &TeacherCredentials) -> StoreResult<()>;

    async fn count_teachers(&self) -> StoreResult<i64>;
}

#[async_trait]
pub trait RosterRepository: Send + Sync {
    /// Classes owned by a teacher, ordered by name.
    async fn list_classes_for_teacher(
        &self,
        teacher_id: TeacherId,
        page: Page,
    ) -> StoreResult<Listing<Class>>;

    /// The class only if it exists *and* is owned by `teacher_id`.
    async fn find_owned_class(
        &self,
        class_id: ClassId,
        teacher_id: TeacherId,
    ) -> StoreResult<Option<Class>>;

    /// Students of a class in roster order.
    async fn list_students(&self, class_id: ClassId, page: Page) -> StoreResult<Listing<Student>>;

    async fn insert_class(&self, class: &Class) -> StoreResult<()>;

    async fn insert_students(&self, students: &[Student]) -> StoreResult<()>;

    /// Appends ids to the end of a class roster.
    async fn append_class_students(
        &self,
        class_id: ClassId,
        student_ids: &[StudentId],
    ) -> StoreResult<()>;
}

#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    /// Records matching the key exactly, in the order they were written.
    async fn find_records(&self, key: SubmissionKey) -> StoreResult<Vec<AttendanceRecord>>;

    /// Writes every record of the batch or none of them.
    async fn insert_submission(&self, batch: &SubmissionBatch) -> StoreResult<()>;
}

#[async_trait]
pub trait Store: TeacherRepository + RosterRepository + AttendanceRepository {
    fn backend_name(&self) -> &'static str;

    /// Deletes every row. Used by the admin CLI and tests.
    async fn clear(&self) -> StoreResult<()>;
}
