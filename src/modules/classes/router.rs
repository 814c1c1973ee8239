use axum::{Router, routing::get};

use super::controller::{get_class, list_classes, list_students};
use crate::state::AppState;

pub fn init_classes_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_classes))
        .route("/{class_id}", get(get_class))
        .route("/{class_id}/students", get(list_students))
}
