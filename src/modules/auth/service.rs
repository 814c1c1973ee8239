use rollcall_auth::create_access_token;
use rollcall_config::JwtConfig;
use rollcall_core::{AppError, verify_password};
use rollcall_db::Store;
use rollcall_models::{LoginRequest, LoginResponse};
use rollcall_observability::{track_login_failure, track_login_success, track_token_issued};
use tracing::{info, instrument, warn};

use crate::utils::map_store_error;

pub struct AuthService;

impl AuthService {
    /// Unknown usernames and wrong passwords fail identically.
    #[instrument(skip(store, dto, jwt_config), fields(username = %dto.username))]
    pub async fn login(
        store: &dyn Store,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let Some(credentials) = store
            .find_teacher_by_username(&dto.username)
            .await
            .map_err(map_store_error)?
        else {
            warn!("Login failed: unknown username");
            track_login_failure("unknown_username");
            return Err(AppError::invalid_credentials());
        };

        if !verify_password(&dto.password, &credentials.hashed_password)? {
            warn!("Login failed: wrong password");
            track_login_failure("wrong_password");
            return Err(AppError::invalid_credentials());
        }

        let access_token = create_access_token(credentials.id, jwt_config)?;
        track_token_issued();
        track_login_success();
        info!(teacher_id = %credentials.id, "Teacher logged in");

        Ok(LoginResponse::bearer(access_token, credentials.into()))
    }
}
