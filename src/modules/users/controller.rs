use axum::{
    Json,
    extract::{Path, Query, State},
};
use learnhub_core::{AppError, ErrorResponse, PaginationParams};
use learnhub_models::courses::CoursesResponse;
use learnhub_models::users::{
    AdminUpdateUserDto, CreateUserDto, UpdateProfileDto, UserFilterParams, UserResponse,
    UsersResponse,
};
use learnhub_models::{MessageResponse, UserId};
use tracing::instrument;

use super::service::UserService;
use crate::middleware::role::CurrentUser;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Update the caller's profile
#[utoipa::path(
    put,
    path = "/api/users/profile",
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Updated identity", body = UserResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse),
        (status = 404, description = "Identity no longer exists", body = ErrorResponse)
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, user, dto), fields(user_id = %user.id))]
pub async fn update_profile(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ValidatedJson(dto): ValidatedJson<UpdateProfileDto>,
) -> Result<Json<UserResponse>, AppError> {
    let user = UserService::update_profile(&state.stores, user.id, dto).await?;
    Ok(Json(UserResponse::new(user)))
}

/// Courses the caller is enrolled in, with full content
#[utoipa::path(
    get,
    path = "/api/users/enrolled-courses",
    params(PaginationParams),
    responses(
        (status = 200, description = "Enrolled courses", body = CoursesResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse)
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn enrolled_courses(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<CoursesResponse>, AppError> {
    Ok(Json(
        UserService::enrolled_courses(&state.stores, user.id, pagination).await?,
    ))
}

/// List identities
#[utoipa::path(
    get,
    path = "/api/admin/users",
    params(UserFilterParams),
    responses(
        (status = 200, description = "Page of identities", body = UsersResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse)
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
    Query(filters): Query<UserFilterParams>,
) -> Result<Json<UsersResponse>, AppError> {
    Ok(Json(UserService::list_users(&state.stores, filters).await?))
}

/// Create an identity with any role
#[utoipa::path(
    post,
    path = "/api/admin/users",
    request_body = CreateUserDto,
    responses(
        (status = 200, description = "Created identity", body = UserResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse)
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateUserDto>,
) -> Result<Json<UserResponse>, AppError> {
    let user = UserService::create_user(&state.stores, dto, &state.password_config).await?;
    Ok(Json(UserResponse::new(user)))
}

/// Read one identity
#[utoipa::path(
    get,
    path = "/api/admin/users/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "Identity, or `success: false` when missing", body = UserResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse)
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<Json<UserResponse>, AppError> {
    let user = UserService::get_user(&state.stores, id).await?;
    Ok(Json(UserResponse::new(user)))
}

/// Edit role, status or profile of an identity
#[utoipa::path(
    put,
    path = "/api/admin/users/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = AdminUpdateUserDto,
    responses(
        (status = 200, description = "Updated identity", body = UserResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse)
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
    ValidatedJson(dto): ValidatedJson<AdminUpdateUserDto>,
) -> Result<Json<UserResponse>, AppError> {
    let user = UserService::update_user(&state.stores, id, dto).await?;
    Ok(Json(UserResponse::new(user)))
}

/// Delete an identity
#[utoipa::path(
    delete,
    path = "/api/admin/users/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse)
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, admin), fields(admin_id = %admin.id))]
pub async fn delete_user(
    State(state): State<AppState>,
    CurrentUser(admin): CurrentUser,
    Path(id): Path<UserId>,
) -> Result<Json<MessageResponse>, AppError> {
    UserService::delete_user(&state.stores, id, admin.id).await?;
    Ok(Json(MessageResponse::new("User deleted successfully")))
}
