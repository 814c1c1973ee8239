use serde::{Deserialize, Serialize};

use rollcall_core::AppError;
use rollcall_models::TeacherId;

/// Claims carried by an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Id of the teacher the token was issued to
    pub teacher_id: String,
    /// Issued-at (Unix timestamp)
    pub iat: usize,
    /// Expiry (Unix timestamp); absent unless token expiry is configured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<usize>,
}

impl Claims {
    pub fn teacher_id(&self) -> Result<TeacherId, AppError> {
        self.teacher_id
            .parse()
            .map_err(|_| AppError::unauthorized("Invalid token".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_without_exp_omit_field() {
        let claims = Claims {
            teacher_id: TeacherId::new().to_string(),
            iat: 1234567800,
            exp: None,
        };
        let serialized = serde_json::to_string(&claims).unwrap();
        assert!(serialized.contains(r#""teacher_id""#));
        assert!(!serialized.contains("exp"));
    }

    #[test]
    fn test_claims_deserialize_without_exp() {
        let json = r#"{"teacher_id":"00000000-0000-0000-0000-000000000001","iat":1}"#;
        let claims: Claims = serde_json::from_str(json).unwrap();
        assert_eq!(claims.exp, None);
        assert!(claims.teacher_id().is_ok());
    }

    #[test]
    fn test_non_uuid_teacher_id_is_unauthorized() {
        let claims = Claims {
            teacher_id: "teacher-1".to_string(),
            iat: 1,
            exp: None,
        };
        let err = claims.teacher_id().unwrap_err();
        assert_eq!(err.status.as_u16(), 401);
    }
}
