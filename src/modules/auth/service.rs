use anyhow::anyhow;
use learnhub_auth::issue_token;
use learnhub_config::{JwtConfig, PasswordConfig};
use learnhub_core::{AppError, hash_password, verify_password};
use learnhub_db::Stores;
use learnhub_models::auth::{AuthResponse, LoginRequest, RegisterRequest};
use learnhub_models::users::{NewUser, Role, User, UserStatus, normalize_email};
use learnhub_observability::{
    track_login_failure, track_login_success, track_token_issued, track_user_created,
};
use tracing::{info, instrument, warn};

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";
pub const INACTIVE_ACCOUNT_MESSAGE: &str = "Account is inactive. Please contact an administrator.";

pub struct AuthService;

impl AuthService {
    fn session_for(user: User, jwt_config: &JwtConfig) -> Result<AuthResponse, AppError> {
        let token = issue_token(user.id.into_inner(), jwt_config)?;
        track_token_issued();
        Ok(AuthResponse::new(token, user))
    }

    /// Creates a plain `user` identity and signs it in.
    #[instrument(skip(stores, dto, jwt_config, password_config), fields(email = %dto.email))]
    pub async fn register(
        stores: &Stores,
        dto: RegisterRequest,
        jwt_config: &JwtConfig,
        password_config: &PasswordConfig,
    ) -> Result<AuthResponse, AppError> {
        let email = normalize_email(&dto.email);

        if stores.identities.find_user_by_email(&email).await?.is_some() {
            warn!("Registration attempted with an existing email");
            return Err(AppError::validation(anyhow!("Email already registered")));
        }

        let password_hash = hash_password(&dto.password, password_config.cost)?;
        let user = stores
            .identities
            .create_user(NewUser {
                name: dto.name.trim().to_string(),
                email,
                password_hash,
                role: Role::User,
                status: UserStatus::Active,
            })
            .await?;

        info!(user_id = %user.id, "User registered");
        track_user_created(user.role.as_str());

        Self::session_for(user, jwt_config)
    }

    #[instrument(skip(stores, dto, jwt_config), fields(email = %dto.email))]
    pub async fn login(
        stores: &Stores,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<AuthResponse, AppError> {
        let email = normalize_email(&dto.email);

        let Some(user) = stores.identities.find_user_by_email(&email).await? else {
            warn!(reason = "unknown_email", "Login failed");
            track_login_failure("invalid_credentials");
            return Err(AppError::validation(anyhow!(INVALID_CREDENTIALS_MESSAGE)));
        };

        if !verify_password(&dto.password, &user.password_hash)? {
            warn!(user_id = %user.id, reason = "wrong_password", "Login failed");
            track_login_failure("invalid_credentials");
            return Err(AppError::validation(anyhow!(INVALID_CREDENTIALS_MESSAGE)));
        }

        if !user.is_active() {
            warn!(user_id = %user.id, reason = "inactive", "Login failed");
            track_login_failure("inactive");
            return Err(AppError::validation(anyhow!(INACTIVE_ACCOUNT_MESSAGE)));
        }

        info!(user_id = %user.id, role = %user.role, "User logged in");
        track_login_success(user.role.as_str());

        Self::session_for(user, jwt_config)
    }
}
