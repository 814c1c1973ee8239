pub mod response;
pub mod store_errors;

pub use response::Paginated;
pub use store_errors::map_store_error;
