//! # Rollcall Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`jwt`]: token signing configuration
//! - [`cors`]: allowed origins
//! - [`server`]: bind address and startup behaviour
//! - [`store`]: storage backend selection and Postgres pool settings
//!
//! ```ignore
//! use rollcall_config::{JwtConfig, ServerConfig, StoreConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! let store_config = StoreConfig::from_env();
//! ```

pub mod cors;
pub mod jwt;
pub mod server;
pub mod store;

pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use server::ServerConfig;
pub use store::{StoreBackend, StoreConfig};

/// Parses a boolean flag the way every `*_ENABLED` variable is parsed.
pub(crate) fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "true" | "1" | "yes")
}
