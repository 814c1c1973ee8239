//! Attendance records and submissions.
//!
//! A submission is one batch of statuses for a class on a `(date, session)`
//! pair. The ledger keeps at most one batch per [`SubmissionKey`]; records are
//! never updated or deleted once written.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::enums::{AttendanceStatus, Session};
use crate::ids::{AttendanceRecordId, ClassId, StudentId, TeacherId};

/// The uniqueness key of the attendance ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubmissionKey {
    pub class_id: ClassId,
    pub date: NaiveDate,
    pub session: Session,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AttendanceRecord {
    pub id: AttendanceRecordId,
    pub class_id: ClassId,
    pub student_id: StudentId,
    /// Calendar date, `YYYY-MM-DD`
    pub date: NaiveDate,
    pub session: Session,
    pub status: AttendanceStatus,
    pub recorded_at: DateTime<Utc>,
    /// Teacher who submitted the batch
    pub recorded_by: TeacherId,
}

impl AttendanceRecord {
    pub fn key(&self) -> SubmissionKey {
        SubmissionKey {
            class_id: self.class_id,
            date: self.date,
            session: self.session,
        }
    }
}

/// One student's status inside a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AttendanceEntry {
    pub student_id: StudentId,
    pub status: AttendanceStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AttendanceSubmission {
    /// Optional; must match the class in the path when present
    #[serde(default)]
    pub class_id: Option<ClassId>,
    pub date: NaiveDate,
    pub session: Session,
    #[validate(length(min = 1, message = "attendance_data must not be empty"))]
    pub attendance_data: Vec<AttendanceEntry>,
}

impl AttendanceSubmission {
    /// Materializes one record per entry, all stamped with the same submitter and time.
    pub fn into_records(
        self,
        class_id: ClassId,
        recorded_by: TeacherId,
        recorded_at: DateTime<Utc>,
    ) -> Vec<AttendanceRecord> {
        let date = self.date;
        let session = self.session;
        self.attendance_data
            .into_iter()
            .map(|entry| AttendanceRecord {
                id: AttendanceRecordId::new(),
                class_id,
                student_id: entry.student_id,
                date,
                session,
                status: entry.status,
                recorded_at,
                recorded_by,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AttendanceQuery {
    /// Calendar date, `YYYY-MM-DD`
    pub date: NaiveDate,
    /// `morning` or `afternoon`
    pub session: Session,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubmissionResponse {
    pub message: String,
    pub records_count: usize,
}

impl SubmissionResponse {
    pub fn accepted(records_count: usize) -> Self {
        Self {
            message: "Attendance submitted successfully".to_string(),
            records_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_deserializes_original_shape() {
        let student_id = StudentId::new();
        let class_id = ClassId::new();
        let json = serde_json::json!({
            "class_id": class_id,
            "date": "2026-10-17",
            "session": "morning",
            "attendance_data": [{"student_id": student_id, "status": "absent"}]
        });

        let submission: AttendanceSubmission = serde_json::from_value(json).unwrap();
        assert_eq!(submission.class_id, Some(class_id));
        assert_eq!(submission.date, NaiveDate::from_ymd_opt(2026, 10, 17).unwrap());
        assert_eq!(submission.attendance_data[0].status, AttendanceStatus::Absent);
    }

    #[test]
    fn test_submission_rejects_bad_date() {
        let json = serde_json::json!({
            "date": "17/10/2026",
            "session": "morning",
            "attendance_data": []
        });
        assert!(serde_json::from_value::<AttendanceSubmission>(json).is_err());
    }

    #[test]
    fn test_empty_submission_fails_validation() {
        let submission = AttendanceSubmission {
            class_id: None,
            date: NaiveDate::from_ymd_opt(2026, 10, 17).unwrap(),
            session: Session::Afternoon,
            attendance_data: vec![],
        };
        assert!(submission.validate().is_err());
    }

    #[test]
    fn test_into_records_stamps_every_record() {
        let class_id = ClassId::new();
        let teacher_id = TeacherId::new();
        let now = Utc::now();
        let submission = AttendanceSubmission {
            class_id: None,
            date: NaiveDate::from_ymd_opt(2026, 10, 17).unwrap(),
            session: Session::Morning,
            attendance_data: vec![
                AttendanceEntry {
                    student_id: StudentId::new(),
                    status: AttendanceStatus::Present,
                },
                AttendanceEntry {
                    student_id: StudentId::new(),
                    status: AttendanceStatus::Absent,
                },
            ],
        };

        let records = submission.into_records(class_id, teacher_id, now);

        assert_eq!(records.len(), 2);
        assert_ne!(records[0].id, records[1].id);
        for record in &records {
            assert_eq!(record.class_id, class_id);
            assert_eq!(record.recorded_by, teacher_id);
            assert_eq!(record.recorded_at, now);
            assert_eq!(record.session, Session::Morning);
        }
        assert_eq!(records[1].status, AttendanceStatus::Absent);
    }
}
