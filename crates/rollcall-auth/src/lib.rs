//! # Rollcall Auth
//!
//! Bearer tokens for the attendance API.
//!
//! - [`claims`]: the claim set embedded in every token
//! - [`jwt`]: issuing and verifying HS256 tokens
//!
//! A token only proves which teacher it was issued to. There is no refresh
//! flow and no revocation; expiry is enforced only when `JWT_ACCESS_EXPIRY`
//! is configured.
//!
//! ```ignore
//! use rollcall_auth::{create_access_token, verify_token};
//!
//! let token = create_access_token(teacher.id, &jwt_config)?;
//! let teacher_id = verify_token(&token, &jwt_config)?.teacher_id()?;
//! ```

pub mod claims;
pub mod jwt;

pub use claims::Claims;
pub use jwt::{create_access_token, verify_token};
