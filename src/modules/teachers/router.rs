use axum::{Router, routing::get};

use super::controller::get_profile;
use crate::state::AppState;

pub fn init_teachers_router() -> Router<AppState> {
    Router::new().route("/profile", get(get_profile))
}
