use rollcall_core::{AppError, Page};
use rollcall_db::{Listing, Store};
use rollcall_models::{Class, ClassId, Student, TeacherId};
use tracing::instrument;

use crate::utils::map_store_error;

pub struct ClassService;

impl ClassService {
    /// Path ids that are not UUIDs cannot name any class.
    pub fn parse_class_id(raw: &str) -> Result<ClassId, AppError> {
        raw.parse().map_err(|_| AppError::class_not_found())
    }

    #[instrument(skip(store))]
    pub async fn list_classes(
        store: &dyn Store,
        teacher_id: TeacherId,
        page: Page,
    ) -> Result<Listing<Class>, AppError> {
        store
            .list_classes_for_teacher(teacher_id, page)
            .await
            .map_err(map_store_error)
    }

    /// The class if it exists and belongs to `teacher_id`; the same 404 otherwise.
    #[instrument(skip(store))]
    pub async fn get_owned_class(
        store: &dyn Store,
        class_id: ClassId,
        teacher_id: TeacherId,
    ) -> Result<Class, AppError> {
        store
            .find_owned_class(class_id, teacher_id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(AppError::class_not_found)
    }

    #[instrument(skip(store))]
    pub async fn list_students(
        store: &dyn Store,
        class_id: ClassId,
        teacher_id: TeacherId,
        page: Page,
    ) -> Result<Listing<Student>, AppError> {
        let class = Self::get_owned_class(store, class_id, teacher_id).await?;

        store
            .list_students(class.id, page)
            .await
            .map_err(map_store_error)
    }
}
