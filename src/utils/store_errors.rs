use anyhow::anyhow;
use rollcall_core::AppError;
use rollcall_db::StoreError;

/// Translates store failures into HTTP errors.
///
/// `StoreError` cannot use `?` directly: the blanket `From` on `AppError`
/// would turn every variant into a 500.
pub fn map_store_error(err: StoreError) -> AppError {
    match err {
        StoreError::DuplicateSubmission => AppError::duplicate_submission(),
        StoreError::UsernameTaken(username) => {
            AppError::bad_request(anyhow!("Username {} already exists", username))
        }
        StoreError::ClassNotFound(_) => AppError::class_not_found(),
        other => AppError::database(other),
    }
}
