use anyhow::anyhow;
use learnhub_config::PasswordConfig;
use learnhub_core::{AppError, PaginationMeta, PaginationParams, hash_password};
use learnhub_db::{DUPLICATE_EMAIL_MESSAGE, Stores};
use learnhub_models::UserId;
use learnhub_models::courses::CoursesResponse;
use learnhub_models::users::{
    AdminUpdateUserDto, CreateUserDto, NewUser, Role, UpdateProfileDto, User, UserFilterParams,
    UserStatus, UsersResponse, normalize_email,
};
use learnhub_observability::track_user_created;
use tracing::{info, instrument, warn};

pub const USER_NOT_FOUND_MESSAGE: &str = "User not found";

pub struct UserService;

impl UserService {
    #[instrument(skip(stores, dto))]
    pub async fn update_profile(
        stores: &Stores,
        user_id: UserId,
        dto: UpdateProfileDto,
    ) -> Result<User, AppError> {
        let user = stores
            .identities
            .update_user(user_id, dto.into())
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!(USER_NOT_FOUND_MESSAGE)))?;

        info!(user_id = %user.id, "Profile updated");
        Ok(user)
    }

    pub async fn enrolled_courses(
        stores: &Stores,
        user_id: UserId,
        pagination: PaginationParams,
    ) -> Result<CoursesResponse, AppError> {
        let courses = stores.courses.list_enrolled_courses(user_id).await?;
        Ok(CoursesResponse {
            success: true,
            meta: PaginationMeta::new(courses.len() as i64, &pagination),
            courses: pagination.slice(&courses),
        })
    }

    #[instrument(skip(stores))]
    pub async fn list_users(
        stores: &Stores,
        filters: UserFilterParams,
    ) -> Result<UsersResponse, AppError> {
        let (users, total) = stores.identities.list_users(&filters).await?;
        Ok(UsersResponse {
            success: true,
            users,
            meta: PaginationMeta::new(total, &filters.pagination),
        })
    }

    pub async fn get_user(stores: &Stores, id: UserId) -> Result<User, AppError> {
        stores
            .identities
            .find_user(id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!(USER_NOT_FOUND_MESSAGE)))
    }

    /// Admin-side creation; the role defaults to `user`.
    #[instrument(skip(stores, dto, password_config), fields(email = %dto.email))]
    pub async fn create_user(
        stores: &Stores,
        dto: CreateUserDto,
        password_config: &PasswordConfig,
    ) -> Result<User, AppError> {
        let email = normalize_email(&dto.email);
        if stores.identities.find_user_by_email(&email).await?.is_some() {
            return Err(AppError::validation(anyhow!(DUPLICATE_EMAIL_MESSAGE)));
        }

        let password_hash = hash_password(&dto.password, password_config.cost)?;
        let user = stores
            .identities
            .create_user(NewUser {
                name: dto.name.trim().to_string(),
                email,
                password_hash,
                role: dto.role.unwrap_or(Role::User),
                status: dto.status.unwrap_or(UserStatus::Active),
            })
            .await?;

        info!(user_id = %user.id, role = %user.role, "User created by admin");
        track_user_created(user.role.as_str());
        Ok(user)
    }

    #[instrument(skip(stores, dto))]
    pub async fn update_user(
        stores: &Stores,
        id: UserId,
        dto: AdminUpdateUserDto,
    ) -> Result<User, AppError> {
        let user = stores
            .identities
            .update_user(id, dto.into())
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!(USER_NOT_FOUND_MESSAGE)))?;

        info!(user_id = %user.id, role = %user.role, status = ?user.status, "User updated by admin");
        Ok(user)
    }

    /// Plain delete. Tokens already issued to the identity stay valid until
    /// they expire, but every gated route will answer 404 for them.
    #[instrument(skip(stores))]
    pub async fn delete_user(stores: &Stores, id: UserId, actor: UserId) -> Result<(), AppError> {
        if id == actor {
            warn!(user_id = %id, "Admin attempted to delete their own account");
            return Err(AppError::validation(anyhow!("You cannot delete your own account")));
        }

        if !stores.identities.delete_user(id).await? {
            return Err(AppError::not_found(anyhow!(USER_NOT_FOUND_MESSAGE)));
        }

        info!(user_id = %id, "User deleted");
        Ok(())
    }
}
