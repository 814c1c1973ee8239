use anyhow::anyhow;
use rollcall_core::AppError;
use rollcall_db::Store;
use rollcall_models::{Teacher, TeacherId};
use tracing::instrument;

use crate::utils::map_store_error;

pub struct TeacherService;

impl TeacherService {
    #[instrument(skip(store))]
    pub async fn get_profile(store: &dyn Store, teacher_id: TeacherId) -> Result<Teacher, AppError> {
        store
            .find_teacher(teacher_id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| AppError::not_found(anyhow!("Teacher not found")))
    }
}
