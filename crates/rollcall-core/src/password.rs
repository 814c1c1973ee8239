use anyhow::Context;
use bcrypt::{hash, verify};

use crate::errors::AppError;

/// Hashes with an explicit bcrypt cost. Seeding uses a low cost to stay fast.
pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String, AppError> {
    hash(password, cost)
        .context("Failed to hash password")
        .map_err(AppError::internal)
}

pub fn verify_password(password: &str, hashed: &str) -> Result<bool, AppError> {
    verify(password, hashed)
        .context("Failed to verify password")
        .map_err(AppError::internal)
}
