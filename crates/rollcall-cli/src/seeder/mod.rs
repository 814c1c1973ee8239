//! Sample-data seeding.
//!
//! Creates two teachers, three classes and 25 students per class, then fills
//! each class roster in student order. Seeding only runs against a store with
//! no teachers, so restarting a seeded server is a no-op.

pub mod models;

use std::collections::HashMap;
use std::time::Instant;

use bcrypt::DEFAULT_COST;

use rollcall_core::hash_password_with_cost;
use rollcall_db::{Store, StoreError};
use rollcall_models::{NewClass, StudentId, TeacherCredentials, TeacherId};
use tracing::info;

use models::{CLASSES, SAMPLE_PASSWORD, STUDENTS_PER_CLASS, TEACHERS, generate_students};

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("failed to hash password: {0}")]
    Password(String),
    #[error("sample class references unknown teacher {0}")]
    UnknownTeacher(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub struct SeedOptions {
    /// bcrypt cost for the sample passwords.
    pub password_cost: u32,
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self {
            password_cost: DEFAULT_COST,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The store already had teachers.
    Skipped,
    Seeded {
        teachers: usize,
        classes: usize,
        students: usize,
    },
}

pub async fn seed_sample_data(
    store: &dyn Store,
    options: SeedOptions,
) -> Result<SeedOutcome, SeedError> {
    if store.count_teachers().await? > 0 {
        info!("Store already has teachers, skipping sample data");
        return Ok(SeedOutcome::Skipped);
    }

    let start = Instant::now();
    let hashed_password = hash_password_with_cost(SAMPLE_PASSWORD, options.password_cost)
        .map_err(|e| SeedError::Password(e.error.to_string()))?;

    let mut teacher_ids: HashMap<&'static str, TeacherId> = HashMap::new();
    for seed in TEACHERS {
        let teacher = TeacherCredentials {
            id: TeacherId::new(),
            username: seed.username.to_string(),
            full_name: seed.full_name.to_string(),
            email: seed.email.to_string(),
            hashed_password: hashed_password.clone(),
        };
        store.insert_teacher(&teacher).await?;
        teacher_ids.insert(seed.username, teacher.id);
    }

    let mut students_total = 0;
    for seed in CLASSES {
        let teacher_id = *teacher_ids
            .get(seed.teacher)
            .ok_or(SeedError::UnknownTeacher(seed.teacher))?;

        let class = NewClass {
            name: seed.name.to_string(),
            level: seed.level,
            stream: seed.stream,
            teacher_id,
        }
        .into_class();
        store.insert_class(&class).await?;

        let students = generate_students(class.id, seed.level, STUDENTS_PER_CLASS);
        store.insert_students(&students).await?;

        let roster: Vec<StudentId> = students.iter().map(|s| s.id).collect();
        store.append_class_students(class.id, &roster).await?;
        students_total += students.len();
    }

    info!(
        teachers = TEACHERS.len(),
        classes = CLASSES.len(),
        students = students_total,
        elapsed = ?start.elapsed(),
        "Seeded sample data"
    );

    Ok(SeedOutcome::Seeded {
        teachers: TEACHERS.len(),
        classes: CLASSES.len(),
        students: students_total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rollcall_core::{Page, verify_password};
    use rollcall_db::{MemoryStore, RosterRepository, TeacherRepository};

    const FAST: SeedOptions = SeedOptions { password_cost: 4 };

    #[tokio::test]
    async fn test_seed_populates_empty_store() {
        let store = MemoryStore::new();

        let outcome = seed_sample_data(&store, FAST).await.unwrap();
        assert_eq!(
            outcome,
            SeedOutcome::Seeded {
                teachers: 2,
                classes: 3,
                students: 75
            }
        );

        let teacher1 = store
            .find_teacher_by_username("teacher1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(teacher1.full_name, "Sarah Johnson");
        assert_eq!(teacher1.email, "teacher1@school.com");
        assert!(verify_password("password123", &teacher1.hashed_password).unwrap());

        let classes = store
            .list_classes_for_teacher(teacher1.id, Page::all())
            .await
            .unwrap();
        let names: Vec<&str> = classes.items.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            ["Mathematics - Common Core", "Physics - 1st Baccalaureate Science"]
        );
        assert!(classes.items.iter().all(|c| c.students.len() == 25));
    }

    #[tokio::test]
    async fn test_roster_matches_student_order() {
        let store = MemoryStore::new();
        seed_sample_data(&store, FAST).await.unwrap();

        let teacher2 = store
            .find_teacher_by_username("teacher2")
            .await
            .unwrap()
            .unwrap();
        let classes = store
            .list_classes_for_teacher(teacher2.id, Page::all())
            .await
            .unwrap();
        let class = &classes.items[0];

        let students = store.list_students(class.id, Page::all()).await.unwrap();
        let ids: Vec<StudentId> = students.items.iter().map(|s| s.id).collect();
        assert_eq!(ids, class.students);
        assert_eq!(students.items[0].full_name, "Student 1 2nd");
        assert_eq!(students.items[24].full_name, "Student 25 2nd");
    }

    #[tokio::test]
    async fn test_seed_skips_non_empty_store() {
        let store = MemoryStore::new();
        seed_sample_data(&store, FAST).await.unwrap();

        let outcome = seed_sample_data(&store, FAST).await.unwrap();
        assert_eq!(outcome, SeedOutcome::Skipped);
        assert_eq!(store.count_teachers().await.unwrap(), 2);
    }
}
