use axum::{Router, routing::get};

use super::controller::{get_attendance, submit_attendance};
use crate::state::AppState;

pub fn init_attendance_router() -> Router<AppState> {
    Router::new().route(
        "/{class_id}/attendance",
        get(get_attendance).post(submit_attendance),
    )
}
