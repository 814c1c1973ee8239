//! In-process store.
//!
//! All tables sit behind one Tokio `RwLock`. Writes that must be atomic (the
//! attendance ledger check-and-insert) happen under a single write guard.

use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::RwLock;

use rollcall_core::Page;
use rollcall_models::{
    AttendanceRecord, Class, ClassId, Student, StudentId, SubmissionKey, Teacher,
    TeacherCredentials, TeacherId,
};

use crate::{
    AttendanceRepository, Listing, RosterRepository, Store, StoreError, StoreResult,
    SubmissionBatch, TeacherRepository,
};

#[derive(Debug, Default)]
struct Tables {
    teachers: Vec<TeacherCredentials>,
    classes: Vec<Class>,
    students: Vec<Student>,
    submissions: HashSet<SubmissionKey>,
    attendance: Vec<AttendanceRecord>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TeacherRepository for MemoryStore {
    async fn find_teacher_by_username(
        &self,
        username: &str,
    ) -> StoreResult<Option<TeacherCredentials>> {
        let tables = self.tables.read().await;
        Ok(tables
            .teachers
            .iter()
            .find(|t| t.username == username)
            .cloned())
    }

    async fn find_teacher(&self, id: TeacherId) -> StoreResult<Option<Teacher>> {
        let tables = self.tables.read().await;
        Ok(tables
            .teachers
            .iter()
            .find(|t| t.id == id)
            .map(TeacherCredentials::to_teacher))
    }

    async fn insert_teacher(&self, teacher: &TeacherCredentials) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        if tables.teachers.iter().any(|t| t.username == teacher.username) {
            return Err(StoreError::UsernameTaken(teacher.username.clone()));
        }
        tables.teachers.push(teacher.clone());
        Ok(())
    }

    async fn count_teachers(&self) -> StoreResult<i64> {
        Ok(self.tables.read().await.teachers.len() as i64)
    }
}

#[async_trait]
impl RosterRepository for MemoryStore {
    async fn list_classes_for_teacher(
        &self,
        teacher_id: TeacherId,
        page: Page,
    ) -> StoreResult<Listing<Class>> {
        let tables = self.tables.read().await;
        let mut classes: Vec<Class> = tables
            .classes
            .iter()
            .filter(|c| c.is_owned_by(teacher_id))
            .cloned()
            .collect();
        classes.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

        Ok(Listing {
            total: classes.len() as i64,
            items: page.slice(&classes),
        })
    }

    async fn find_owned_class(
        &self,
        class_id: ClassId,
        teacher_id: TeacherId,
    ) -> StoreResult<Option<Class>> {
        let tables = self.tables.read().await;
        Ok(tables
            .classes
            .iter()
            .find(|c| c.id == class_id && c.is_owned_by(teacher_id))
            .cloned())
    }

    async fn list_students(&self, class_id: ClassId, page: Page) -> StoreResult<Listing<Student>> {
        let tables = self.tables.read().await;
        let roster = tables.classes.iter().find(|c| c.id == class_id);

        let mut students: Vec<Student> = tables
            .students
            .iter()
            .filter(|s| s.class_id == class_id)
            .cloned()
            .collect();
        // Students missing from the roster sort last, like NULLS LAST in Postgres.
        students.sort_by_key(|s| {
            let position = roster
                .and_then(|c| c.roster_position(s.id))
                .unwrap_or(usize::MAX);
            (position, s.full_name.clone(), s.id)
        });

        Ok(Listing {
            total: students.len() as i64,
            items: page.slice(&students),
        })
    }

    async fn insert_class(&self, class: &Class) -> StoreResult<()> {
        self.tables.write().await.classes.push(class.clone());
        Ok(())
    }

    async fn insert_students(&self, students: &[Student]) -> StoreResult<()> {
        self.tables
            .write()
            .await
            .students
            .extend_from_slice(students);
        Ok(())
    }

    async fn append_class_students(
        &self,
        class_id: ClassId,
        student_ids: &[StudentId],
    ) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        let class = tables
            .classes
            .iter_mut()
            .find(|c| c.id == class_id)
            .ok_or(StoreError::ClassNotFound(class_id))?;
        class.students.extend_from_slice(student_ids);
        Ok(())
    }
}

#[async_trait]
impl AttendanceRepository for MemoryStore {
    async fn find_records(&self, key: SubmissionKey) -> StoreResult<Vec<AttendanceRecord>> {
        let tables = self.tables.read().await;
        Ok(tables
            .attendance
            .iter()
            .filter(|r| r.key() == key)
            .cloned()
            .collect())
    }

    async fn insert_submission(&self, batch: &SubmissionBatch) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        if !tables.submissions.insert(batch.key) {
            return Err(StoreError::DuplicateSubmission);
        }
        tables.attendance.extend_from_slice(&batch.records);
        Ok(())
    }
}

#[async_trait]
impl Store for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn clear(&self) -> StoreResult<()> {
        *self.tables.write().await = Tables::default();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use rollcall_models::{
        AttendanceEntry, AttendanceStatus, AttendanceSubmission, Level, NewClass, Session, Stream,
    };
    use std::sync::Arc;

    fn teacher(username: &str) -> TeacherCredentials {
        TeacherCredentials {
            id: TeacherId::new(),
            username: username.to_string(),
            full_name: "Sarah Johnson".to_string(),
            email: format!("{}@school.com", username),
            hashed_password: "hash".to_string(),
        }
    }

    async fn class_with_students(store: &MemoryStore, owner: TeacherId, name: &str, n: usize) -> Class {
        let mut class = NewClass {
            name: name.to_string(),
            level: Level::CommonCore,
            stream: Stream::General,
            teacher_id: owner,
        }
        .into_class();
        store.insert_class(&class).await.unwrap();

        let students: Vec<Student> = (0..n)
            .map(|i| Student {
                id: StudentId::new(),
                full_name: format!("Student {} Com", i + 1),
                class_id: class.id,
            })
            .collect();
        let ids: Vec<StudentId> = students.iter().map(|s| s.id).collect();
        store.insert_students(&students).await.unwrap();
        store.append_class_students(class.id, &ids).await.unwrap();
        class.students = ids;
        class
    }

    fn batch(class: &Class, teacher_id: TeacherId, date: NaiveDate) -> SubmissionBatch {
        let submission = AttendanceSubmission {
            class_id: Some(class.id),
            date,
            session: Session::Morning,
            attendance_data: class
                .students
                .iter()
                .map(|id| AttendanceEntry {
                    student_id: *id,
                    status: AttendanceStatus::Present,
                })
                .collect(),
        };
        let now = Utc::now();
        SubmissionBatch {
            key: SubmissionKey {
                class_id: class.id,
                date,
                session: Session::Morning,
            },
            submitted_by: teacher_id,
            submitted_at: now,
            records: submission.into_records(class.id, teacher_id, now),
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    #[tokio::test]
    async fn test_username_is_unique() {
        let store = MemoryStore::new();
        store.insert_teacher(&teacher("teacher1")).await.unwrap();

        let err = store.insert_teacher(&teacher("teacher1")).await.unwrap_err();
        assert!(matches!(err, StoreError::UsernameTaken(name) if name == "teacher1"));
        assert_eq!(store.count_teachers().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_classes_for_teacher_without_classes_is_empty() {
        let store = MemoryStore::new();
        let listing = store
            .list_classes_for_teacher(TeacherId::new(), Page::all())
            .await
            .unwrap();
        assert!(listing.items.is_empty());
        assert_eq!(listing.total, 0);
    }

    #[tokio::test]
    async fn test_find_owned_class_checks_owner() {
        let store = MemoryStore::new();
        let owner = TeacherId::new();
        let class = class_with_students(&store, owner, "Physics", 0).await;

        assert!(store.find_owned_class(class.id, owner).await.unwrap().is_some());
        assert!(
            store
                .find_owned_class(class.id, TeacherId::new())
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_students_in_roster_order_with_paging() {
        let store = MemoryStore::new();
        let owner = TeacherId::new();
        let class = class_with_students(&store, owner, "Mathematics", 25).await;

        let all = store.list_students(class.id, Page::all()).await.unwrap();
        assert_eq!(all.total, 25);
        let ids: Vec<StudentId> = all.items.iter().map(|s| s.id).collect();
        assert_eq!(ids, class.students);

        let window = store
            .list_students(
                class.id,
                Page {
                    limit: Some(10),
                    offset: 20,
                },
            )
            .await
            .unwrap();
        assert_eq!(window.total, 25);
        assert_eq!(window.items.len(), 5);
        assert_eq!(window.items[0].full_name, "Student 21 Com");
    }

    #[tokio::test]
    async fn test_second_batch_for_same_key_is_rejected() {
        let store = MemoryStore::new();
        let owner = TeacherId::new();
        let class = class_with_students(&store, owner, "Mathematics", 3).await;

        let first = batch(&class, owner, date());
        store.insert_submission(&first).await.unwrap();

        let second = batch(&class, owner, date());
        let err = store.insert_submission(&second).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateSubmission));

        let stored = store.find_records(first.key).await.unwrap();
        assert_eq!(stored, first.records);
    }

    #[tokio::test]
    async fn test_other_session_is_independent() {
        let store = MemoryStore::new();
        let owner = TeacherId::new();
        let class = class_with_students(&store, owner, "Mathematics", 2).await;

        let morning = batch(&class, owner, date());
        store.insert_submission(&morning).await.unwrap();

        let mut afternoon = batch(&class, owner, date());
        afternoon.key.session = Session::Afternoon;
        for record in &mut afternoon.records {
            record.session = Session::Afternoon;
        }
        store.insert_submission(&afternoon).await.unwrap();

        assert_eq!(store.find_records(morning.key).await.unwrap().len(), 2);
        assert_eq!(store.find_records(afternoon.key).await.unwrap().len(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_batches_admit_exactly_one() {
        let store = Arc::new(MemoryStore::new());
        let owner = TeacherId::new();
        let class = class_with_students(&store, owner, "Mathematics", 5).await;

        let mut tasks = tokio::task::JoinSet::new();
        for _ in 0..16 {
            let store = store.clone();
            let batch = batch(&class, owner, date());
            tasks.spawn(async move { store.insert_submission(&batch).await });
        }

        let mut accepted = 0;
        let mut duplicates = 0;
        while let Some(result) = tasks.join_next().await {
            match result.unwrap() {
                Ok(()) => accepted += 1,
                Err(StoreError::DuplicateSubmission) => duplicates += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        assert_eq!(accepted, 1);
        assert_eq!(duplicates, 15);
        let key = SubmissionKey {
            class_id: class.id,
            date: date(),
            session: Session::Morning,
        };
        assert_eq!(store.find_records(key).await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_clear_empties_everything() {
        let store = MemoryStore::new();
        store.insert_teacher(&teacher("teacher1")).await.unwrap();
        store.clear().await.unwrap();
        assert_eq!(store.count_teachers().await.unwrap(), 0);
    }
}
