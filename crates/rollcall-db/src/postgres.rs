//! PostgreSQL store.
//!
//! Closed vocabularies are Postgres enum types and class rosters are `UUID[]`
//! columns, so rows decode straight into the model structs. The ledger's
//! uniqueness rule lives in the `attendance_submissions` primary key.

use async_trait::async_trait;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::{info, instrument};

use rollcall_config::StoreConfig;
use rollcall_core::Page;
use rollcall_models::{
    AttendanceRecord, Class, ClassId, Student, StudentId, SubmissionKey, Teacher,
    TeacherCredentials, TeacherId,
};

use crate::{
    AttendanceRepository, Listing, RosterRepository, Store, StoreError, StoreResult,
    SubmissionBatch, TeacherRepository,
};

pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Opens a connection pool for `config.database_url`.
pub async fn init_db_pool(config: &StoreConfig) -> StoreResult<PgPool> {
    let database_url = config
        .database_url
        .as_deref()
        .ok_or_else(|| StoreError::Configuration("DATABASE_URL must be set".to_string()))?;

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(database_url)
        .await?;

    Ok(pool)
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}

#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects and brings the schema up to date.
    pub async fn connect(config: &StoreConfig) -> StoreResult<Self> {
        let pool = init_db_pool(config).await?;
        let store = Self::new(pool);
        store.migrate().await?;
        Ok(store)
    }

    pub async fn migrate(&self) -> StoreResult<()> {
        MIGRATOR.run(&self.pool).await?;
        info!("database migrations applied");
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl TeacherRepository for PgStore {
    #[instrument(skip(self))]
    async fn find_teacher_by_username(
        &self,
        username: &str,
    ) -> StoreResult<Option<TeacherCredentials>> {
        let teacher = sqlx::query_as::<_, TeacherCredentials>(
            r#"SELECT id, username, full_name, email, hashed_password
               FROM teachers
               WHERE username = $1"#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(teacher)
    }

    #[instrument(skip(self))]
    async fn find_teacher(&self, id: TeacherId) -> StoreResult<Option<Teacher>> {
        let teacher = sqlx::query_as::<_, Teacher>(
            "SELECT id, username, full_name, email FROM teachers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(teacher)
    }

    #[instrument(skip(self, teacher), fields(username = %teacher.username))]
    async fn insert_teacher(&self, teacher: &TeacherCredentials) -> StoreResult<()> {
        sqlx::query(
            r#"INSERT INTO teachers (id, username, full_name, email, hashed_password)
               VALUES ($1, $2, $3, $4, $5)"#,
        )
        .bind(teacher.id)
        .bind(&teacher.username)
        .bind(&teacher.full_name)
        .bind(&teacher.email)
        .bind(&teacher.hashed_password)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                return StoreError::UsernameTaken(teacher.username.clone());
            }
            StoreError::from(e)
        })?;

        Ok(())
    }

    async fn count_teachers(&self) -> StoreResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM teachers")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[async_trait]
impl RosterRepository for PgStore {
    #[instrument(skip(self))]
    async fn list_classes_for_teacher(
        &self,
        teacher_id: TeacherId,
        page: Page,
    ) -> StoreResult<Listing<Class>> {
        let total =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM classes WHERE teacher_id = $1")
                .bind(teacher_id)
                .fetch_one(&self.pool)
                .await?;

        let items = sqlx::query_as::<_, Class>(
            r#"SELECT id, name, level, stream, teacher_id, student_ids
               FROM classes
               WHERE teacher_id = $1
               ORDER BY name, id
               LIMIT $2 OFFSET $3"#,
        )
        .bind(teacher_id)
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(Listing { items, total })
    }

    #[instrument(skip(self))]
    async fn find_owned_class(
        &self,
        class_id: ClassId,
        teacher_id: TeacherId,
    ) -> StoreResult<Option<Class>> {
        let class = sqlx::query_as::<_, Class>(
            r#"SELECT id, name, level, stream, teacher_id, student_ids
               FROM classes
               WHERE id = $1 AND teacher_id = $2"#,
        )
        .bind(class_id)
        .bind(teacher_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(class)
    }

    #[instrument(skip(self))]
    async fn list_students(&self, class_id: ClassId, page: Page) -> StoreResult<Listing<Student>> {
        let total =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM students WHERE class_id = $1")
                .bind(class_id)
                .fetch_one(&self.pool)
                .await?;

        let items = sqlx::query_as::<_, Student>(
            r#"SELECT s.id, s.full_name, s.class_id
               FROM students s
               JOIN classes c ON c.id = s.class_id
               WHERE s.class_id = $1
               ORDER BY array_position(c.student_ids, s.id) NULLS LAST, s.full_name, s.id
               LIMIT $2 OFFSET $3"#,
        )
        .bind(class_id)
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(Listing { items, total })
    }

    #[instrument(skip(self, class), fields(class_id = %class.id))]
    async fn insert_class(&self, class: &Class) -> StoreResult<()> {
        sqlx::query(
            r#"INSERT INTO classes (id, name, level, stream, teacher_id, student_ids)
               VALUES ($1, $2, $3, $4, $5, $6)"#,
        )
        .bind(class.id)
        .bind(&class.name)
        .bind(class.level)
        .bind(class.stream)
        .bind(class.teacher_id)
        .bind(class.students.clone())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    #[instrument(skip(self, students), fields(count = students.len()))]
    async fn insert_students(&self, students: &[Student]) -> StoreResult<()> {
        if students.is_empty() {
            return Ok(());
        }

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("INSERT INTO students (id, full_name, class_id) ");
        builder.push_values(students, |mut row, student| {
            row.push_bind(student.id)
                .push_bind(student.full_name.clone())
                .push_bind(student.class_id);
        });
        builder.build().execute(&self.pool).await?;

        Ok(())
    }

    #[instrument(skip(self, student_ids), fields(count = student_ids.len()))]
    async fn append_class_students(
        &self,
        class_id: ClassId,
        student_ids: &[StudentId],
    ) -> StoreResult<()> {
        let result =
            sqlx::query("UPDATE classes SET student_ids = student_ids || $2 WHERE id = $1")
                .bind(class_id)
                .bind(student_ids.to_vec())
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::ClassNotFound(class_id));
        }

        Ok(())
    }
}

#[async_trait]
impl AttendanceRepository for PgStore {
    #[instrument(skip(self))]
    async fn find_records(&self, key: SubmissionKey) -> StoreResult<Vec<AttendanceRecord>> {
        let records = sqlx::query_as::<_, AttendanceRecord>(
            r#"SELECT id, class_id, student_id, date, session, status, recorded_at, recorded_by
               FROM attendance_records
               WHERE class_id = $1 AND date = $2 AND session = $3
               ORDER BY seq"#,
        )
        .bind(key.class_id)
        .bind(key.date)
        .bind(key.session)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    #[instrument(skip(self, batch), fields(key = ?batch.key, count = batch.records.len()))]
    async fn insert_submission(&self, batch: &SubmissionBatch) -> StoreResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"INSERT INTO attendance_submissions (class_id, date, session, submitted_by, submitted_at)
               VALUES ($1, $2, $3, $4, $5)"#,
        )
        .bind(batch.key.class_id)
        .bind(batch.key.date)
        .bind(batch.key.session)
        .bind(batch.submitted_by)
        .bind(batch.submitted_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                return StoreError::DuplicateSubmission;
            }
            StoreError::from(e)
        })?;

        if !batch.records.is_empty() {
            let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
                "INSERT INTO attendance_records \
                 (id, class_id, student_id, date, session, status, recorded_at, recorded_by) ",
            );
            builder.push_values(&batch.records, |mut row, record| {
                row.push_bind(record.id)
                    .push_bind(record.class_id)
                    .push_bind(record.student_id)
                    .push_bind(record.date)
                    .push_bind(record.session)
                    .push_bind(record.status)
                    .push_bind(record.recorded_at)
                    .push_bind(record.recorded_by);
            });
            builder.build().execute(&mut *tx).await?;
        }

        tx.commit().await?;

        Ok(())
    }
}

#[async_trait]
impl Store for PgStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn clear(&self) -> StoreResult<()> {
        sqlx::query(
            "TRUNCATE attendance_records, attendance_submissions, students, classes, teachers",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
