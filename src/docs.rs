use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::controller::ErrorResponse;
use crate::router::HealthResponse;
use rollcall_models::{
    AttendanceEntry, AttendanceRecord, AttendanceStatus, AttendanceSubmission, Class, Level,
    LoginRequest, LoginResponse, Session, Stream, Student, SubmissionResponse, Teacher,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::router::health,
        crate::modules::auth::controller::login,
        crate::modules::teachers::controller::get_profile,
        crate::modules::classes::controller::list_classes,
        crate::modules::classes::controller::get_class,
        crate::modules::classes::controller::list_students,
        crate::modules::attendance::controller::get_attendance,
        crate::modules::attendance::controller::submit_attendance,
    ),
    components(
        schemas(
            Teacher,
            LoginRequest,
            LoginResponse,
            Class,
            Student,
            Level,
            Stream,
            Session,
            AttendanceStatus,
            AttendanceRecord,
            AttendanceEntry,
            AttendanceSubmission,
            SubmissionResponse,
            ErrorResponse,
            HealthResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Teacher login"),
        (name = "Teachers", description = "Teacher profile"),
        (name = "Classes", description = "Classes and rosters owned by the caller"),
        (name = "Attendance", description = "Per-session attendance records"),
        (name = "Health", description = "Liveness probe")
    ),
    info(
        title = "Rollcall API",
        version = "0.1.0",
        description = "Classroom attendance tracking: teachers log in, browse their classes and students, and record attendance per session.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_attendance_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/auth/login"));
        assert!(doc.paths.paths.contains_key("/api/classes/{class_id}/attendance"));

        let components = doc.components.unwrap();
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
