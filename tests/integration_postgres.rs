//! PgStore tests. They need a Postgres server reachable through `DATABASE_URL`,
//! so they are ignored by default: `cargo test -- --ignored`.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use chrono::{NaiveDate, Utc};
use common::{get, login, post_json, send, test_jwt_config};
use rollcall::router::init_router;
use rollcall::state::AppState;
use rollcall_cli::{SeedOptions, seed_sample_data};
use rollcall_config::CorsConfig;
use rollcall_core::Page;
use rollcall_db::{
    AttendanceRepository, PgStore, RosterRepository, Store, StoreError, SubmissionBatch,
    TeacherRepository,
};
use rollcall_models::{
    AttendanceEntry, AttendanceStatus, AttendanceSubmission, Class, Session, SubmissionKey,
};
use serde_json::json;
use sqlx::PgPool;

async fn seeded_store(pool: PgPool) -> PgStore {
    let store = PgStore::new(pool);
    seed_sample_data(&store, SeedOptions { password_cost: 4 })
        .await
        .unwrap();
    store
}

async fn first_class(store: &PgStore, username: &str) -> Class {
    let teacher = store
        .find_teacher_by_username(username)
        .await
        .unwrap()
        .unwrap();
    store
        .list_classes_for_teacher(teacher.id, Page::all())
        .await
        .unwrap()
        .items
        .remove(0)
}

fn batch_for(class: &Class, date: NaiveDate) -> SubmissionBatch {
    let submission = AttendanceSubmission {
        class_id: Some(class.id),
        date,
        session: Session::Morning,
        attendance_data: class
            .students
            .iter()
            .enumerate()
            .map(|(i, id)| AttendanceEntry {
                student_id: *id,
                status: if i % 2 == 0 {
                    AttendanceStatus::Present
                } else {
                    AttendanceStatus::Absent
                },
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
        submitted_by: class.teacher_id,
        submitted_at: now,
        records: submission.into_records(class.id, class.teacher_id, now),
    }
}

#[sqlx::test(migrations = "crates/rollcall-db/migrations")]
#[ignore]
async fn test_seeded_roster_round_trips(pool: PgPool) {
    let store = seeded_store(pool).await;
    assert_eq!(store.count_teachers().await.unwrap(), 2);

    let class = first_class(&store, "teacher1").await;
    assert_eq!(class.name, "Mathematics - Common Core");
    assert_eq!(class.students.len(), 25);

    let students = store.list_students(class.id, Page::all()).await.unwrap();
    assert_eq!(students.total, 25);
    let ids: Vec<_> = students.items.iter().map(|s| s.id).collect();
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
    assert_eq!(window.items.len(), 5);
    assert_eq!(window.total, 25);
}

#[sqlx::test(migrations = "crates/rollcall-db/migrations")]
#[ignore]
async fn test_duplicate_username_rejected(pool: PgPool) {
    let store = seeded_store(pool).await;
    let mut teacher = store
        .find_teacher_by_username("teacher1")
        .await
        .unwrap()
        .unwrap();
    teacher.id = rollcall_models::TeacherId::new();

    let err = store.insert_teacher(&teacher).await.unwrap_err();
    assert!(matches!(err, StoreError::UsernameTaken(_)));
}

#[sqlx::test(migrations = "crates/rollcall-db/migrations")]
#[ignore]
async fn test_submission_is_written_once(pool: PgPool) {
    let store = seeded_store(pool).await;
    let class = first_class(&store, "teacher1").await;
    let date = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();

    let first = batch_for(&class, date);
    store.insert_submission(&first).await.unwrap();

    let err = store
        .insert_submission(&batch_for(&class, date))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::DuplicateSubmission));

    let stored = store.find_records(first.key).await.unwrap();
    assert_eq!(stored.len(), first.records.len());
    for (stored, submitted) in stored.iter().zip(&first.records) {
        assert_eq!(stored.id, submitted.id);
        assert_eq!(stored.student_id, submitted.student_id);
        assert_eq!(stored.status, submitted.status);
    }
}

#[sqlx::test(migrations = "crates/rollcall-db/migrations")]
#[ignore]
async fn test_concurrent_submissions_store_one_batch(pool: PgPool) {
    let store = Arc::new(seeded_store(pool).await);
    let class = first_class(&store, "teacher2").await;
    let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();

    let mut tasks = tokio::task::JoinSet::new();
    for _ in 0..6 {
        let store = store.clone();
        let batch = batch_for(&class, date);
        tasks.spawn(async move { store.insert_submission(&batch).await });
    }

    let mut accepted = 0;
    while let Some(result) = tasks.join_next().await {
        match result.unwrap() {
            Ok(()) => accepted += 1,
            Err(StoreError::DuplicateSubmission) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
    assert_eq!(accepted, 1);

    let key = batch_for(&class, date).key;
    assert_eq!(store.find_records(key).await.unwrap().len(), 25);
}

#[sqlx::test(migrations = "crates/rollcall-db/migrations")]
#[ignore]
async fn test_http_flow_over_postgres(pool: PgPool) {
    let store: Arc<dyn Store> = Arc::new(seeded_store(pool).await);
    let router = init_router(AppState::new(
        store,
        test_jwt_config(),
        CorsConfig {
            allowed_origins: vec!["*".to_string()],
        },
    ));

    let token = login(&router, "teacher1").await;
    let (_, classes) = send(&router, get("/api/classes", &token)).await;
    let class_id = classes[0]["id"].as_str().unwrap().to_string();
    let (_, students) = send(
        &router,
        get(&format!("/api/classes/{}/students", class_id), &token),
    )
    .await;

    let entries: Vec<_> = students
        .as_array()
        .unwrap()
        .iter()
        .map(|s| json!({"student_id": s["id"], "status": "present"}))
        .collect();
    let body = json!({"date": "2026-10-19", "session": "afternoon", "attendance_data": entries});
    let uri = format!("/api/classes/{}/attendance", class_id);

    let (status, response) = send(&router, post_json(&uri, Some(&token), &body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["records_count"], 25);

    let (status, _) = send(&router, post_json(&uri, Some(&token), &body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
