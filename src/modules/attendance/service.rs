//! Attendance reads and submissions.
//!
//! A submission is accepted at most once per `(class, date, session)`. The
//! store enforces this atomically, so two concurrent submissions for the same
//! key cannot both succeed; the loser gets the duplicate-submission error.

use std::collections::HashSet;

use anyhow::anyhow;
use chrono::Utc;
use rollcall_core::AppError;
use rollcall_db::{Store, StoreError, SubmissionBatch};
use rollcall_models::{
    AttendanceQuery, AttendanceRecord, AttendanceSubmission, Class, ClassId, SubmissionKey,
    SubmissionResponse, TeacherId,
};
use rollcall_observability::{track_attendance_submitted, track_duplicate_submission};
use tracing::{info, instrument, warn};

use crate::modules::classes::service::ClassService;
use crate::utils::map_store_error;

pub struct AttendanceService;

impl AttendanceService {
    #[instrument(skip(store))]
    pub async fn get_records(
        store: &dyn Store,
        class_id: ClassId,
        teacher_id: TeacherId,
        query: AttendanceQuery,
    ) -> Result<Vec<AttendanceRecord>, AppError> {
        let class = ClassService::get_owned_class(store, class_id, teacher_id).await?;

        store
            .find_records(SubmissionKey {
                class_id: class.id,
                date: query.date,
                session: query.session,
            })
            .await
            .map_err(map_store_error)
    }

    #[instrument(
        skip(store, submission),
        fields(date = %submission.date, session = %submission.session, entries = submission.attendance_data.len())
    )]
    pub async fn submit(
        store: &dyn Store,
        class_id: ClassId,
        teacher_id: TeacherId,
        submission: AttendanceSubmission,
    ) -> Result<SubmissionResponse, AppError> {
        let class = ClassService::get_owned_class(store, class_id, teacher_id).await?;

        if let Some(body_class_id) = submission.class_id {
            if body_class_id != class.id {
                return Err(AppError::bad_request(anyhow!(
                    "class_id in body does not match the class in the path"
                )));
            }
        }
        check_roster(&class, &submission)?;

        let key = SubmissionKey {
            class_id: class.id,
            date: submission.date,
            session: submission.session,
        };
        let submitted_at = Utc::now();
        let batch = SubmissionBatch {
            key,
            submitted_by: teacher_id,
            submitted_at,
            records: submission.into_records(class.id, teacher_id, submitted_at),
        };
        let records_count = batch.records.len();

        match store.insert_submission(&batch).await {
            Ok(()) => {}
            Err(StoreError::DuplicateSubmission) => {
                warn!(class_id = %class.id, "Attendance already submitted");
                track_duplicate_submission();
                return Err(AppError::duplicate_submission());
            }
            Err(other) => return Err(map_store_error(other)),
        }

        track_attendance_submitted(key.session.as_str(), records_count);
        info!(class_id = %class.id, records_count, "Attendance submitted");

        Ok(SubmissionResponse::accepted(records_count))
    }
}

/// Every entry must name a student on the class roster, at most once.
fn check_roster(class: &Class, submission: &AttendanceSubmission) -> Result<(), AppError> {
    let mut seen = HashSet::with_capacity(submission.attendance_data.len());

    for entry in &submission.attendance_data {
        if !class.has_student(entry.student_id) {
            return Err(AppError::unprocessable(anyhow!(
                "Student {} is not enrolled in this class",
                entry.student_id
            )));
        }
        if !seen.insert(entry.student_id) {
            return Err(AppError::unprocessable(anyhow!(
                "Student {} appears more than once",
                entry.student_id
            )));
        }
    }

    Ok(())
}
