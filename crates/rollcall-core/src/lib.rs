//! # Rollcall Core
//!
//! Core types, errors, and utilities shared by every Rollcall crate:
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`pagination`]: Optional limit/offset pagination for list endpoints
//! - [`password`]: bcrypt password hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use rollcall_core::errors::AppError;
//! use rollcall_core::password::{hash_password_with_cost, verify_password};
//!
//! let error = AppError::class_not_found();
//! let hash = hash_password_with_cost("password123", bcrypt::DEFAULT_COST)?;
//! assert!(verify_password("password123", &hash)?);
//! ```

pub mod errors;
pub mod pagination;
pub mod password;

pub use errors::AppError;
pub use pagination::{Page, PaginationParams};
pub use password::{hash_password_with_cost, verify_password};
