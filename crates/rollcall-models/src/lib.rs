//! # Rollcall Models
//!
//! Domain entities and request/response DTOs for the attendance API.
//!
//! - [`ids`]: strongly-typed identifiers
//! - [`enums`]: closed vocabularies (class level, stream, session, status)
//! - [`teachers`]: teacher accounts and credentials
//! - [`classes`]: classes and their ordered rosters
//! - [`students`]: students
//! - [`attendance`]: attendance records and submissions
//! - [`auth`]: login DTOs

pub mod attendance;
pub mod auth;
pub mod classes;
pub mod enums;
pub mod ids;
pub mod students;
pub mod teachers;

pub use attendance::{
    AttendanceEntry, AttendanceQuery, AttendanceRecord, AttendanceSubmission, SubmissionKey,
    SubmissionResponse,
};
pub use auth::{LoginRequest, LoginResponse};
pub use classes::{Class, NewClass};
pub use enums::{AttendanceStatus, Level, Session, Stream};
pub use ids::{AttendanceRecordId, ClassId, StudentId, TeacherId};
pub use students::Student;
pub use teachers::{CreateTeacherDto, Teacher, TeacherCredentials};
