pub mod attendance;
pub mod auth;
pub mod classes;
pub mod teachers;
