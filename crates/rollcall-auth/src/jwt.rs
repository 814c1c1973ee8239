//! Issuing and verifying access tokens.
//!
//! Tokens are HS256 JWTs signed with [`JwtConfig::secret`]. Verification
//! checks the signature and that a `teacher_id` claim is present. When
//! [`JwtConfig::access_token_expiry`] is set, tokens carry `exp` and
//! verification requires it; otherwise tokens never expire.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use rollcall_config::JwtConfig;
use rollcall_core::AppError;
use rollcall_models::TeacherId;

use crate::claims::Claims;

pub fn create_access_token(teacher_id: TeacherId, jwt_config: &JwtConfig) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let exp = jwt_config
        .access_token_expiry
        .map(|expiry| now + expiry as usize);

    let claims = Claims {
        teacher_id: teacher_id.to_string(),
        iat: now,
        exp,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
}

/// Decodes a token and returns its claims.
///
/// Any failure (bad signature, malformed token, missing `teacher_id`, expired
/// when expiry is enforced) is reported as the same unauthorized error.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation(jwt_config),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized("Invalid token".to_string()))
}

fn validation(jwt_config: &JwtConfig) -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    if jwt_config.access_token_expiry.is_some() {
        validation.set_required_spec_claims(&["exp"]);
    } else {
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
    }
    validation
}
