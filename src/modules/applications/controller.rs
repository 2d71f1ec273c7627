use axum::{
    Json,
    extract::{Path, Query, State},
};
use learnhub_core::{AppError, ErrorResponse, PaginationParams};
use learnhub_models::applications::{
    ApplicationFilterParams, ApplicationResponse, ApplicationsResponse, ApplyDto, ReviewDecision,
    UpdateApplicationDto,
};
use learnhub_models::{ApplicationId, MessageResponse};
use tracing::instrument;

use super::service::ApplicationService;
use crate::middleware::role::CurrentUser;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Apply to become an educator
#[utoipa::path(
    post,
    path = "/api/educator/apply",
    request_body = ApplyDto,
    responses(
        (status = 200, description = "Pending application, or `success: false` for educators, admins and duplicate applications", body = ApplicationResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse)
    ),
    tag = "Educator Applications",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, user, dto), fields(user_id = %user.id))]
pub async fn apply(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ValidatedJson(dto): ValidatedJson<ApplyDto>,
) -> Result<Json<ApplicationResponse>, AppError> {
    let application = ApplicationService::apply(&state.stores, &user, dto).await?;
    Ok(Json(ApplicationResponse::new(application)))
}

/// The caller's own applications, newest first
#[utoipa::path(
    get,
    path = "/api/educator/applications",
    params(PaginationParams),
    responses(
        (status = 200, description = "Caller's applications", body = ApplicationsResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse)
    ),
    tag = "Educator Applications",
    security(("bearer_auth" = []))
)]
pub async fn my_applications(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApplicationsResponse>, AppError> {
    Ok(Json(
        ApplicationService::list_own(&state.stores, user.id, pagination).await?,
    ))
}

/// List applications, optionally by status
#[utoipa::path(
    get,
    path = "/api/admin/educator-applications",
    params(ApplicationFilterParams),
    responses(
        (status = 200, description = "Page of applications", body = ApplicationsResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse)
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
pub async fn list_applications(
    State(state): State<AppState>,
    Query(filters): Query<ApplicationFilterParams>,
) -> Result<Json<ApplicationsResponse>, AppError> {
    Ok(Json(ApplicationService::list(&state.stores, filters).await?))
}

/// Approve a pending application and promote the applicant
#[utoipa::path(
    put,
    path = "/api/admin/educator-applications/{id}/approve",
    params(("id" = Uuid, Path, description = "Application ID")),
    responses(
        (status = 200, description = "Approved application, or `success: false` when already processed", body = ApplicationResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse)
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
pub async fn approve_application(
    State(state): State<AppState>,
    CurrentUser(admin): CurrentUser,
    Path(id): Path<ApplicationId>,
) -> Result<Json<ApplicationResponse>, AppError> {
    let application =
        ApplicationService::review(&state.stores, id, &admin, ReviewDecision::Approve).await?;
    Ok(Json(ApplicationResponse::new(application)))
}

/// Reject a pending application
#[utoipa::path(
    put,
    path = "/api/admin/educator-applications/{id}/reject",
    params(("id" = Uuid, Path, description = "Application ID")),
    responses(
        (status = 200, description = "Rejected application, or `success: false` when already processed", body = ApplicationResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse)
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
pub async fn reject_application(
    State(state): State<AppState>,
    CurrentUser(admin): CurrentUser,
    Path(id): Path<ApplicationId>,
) -> Result<Json<ApplicationResponse>, AppError> {
    let application =
        ApplicationService::review(&state.stores, id, &admin, ReviewDecision::Reject).await?;
    Ok(Json(ApplicationResponse::new(application)))
}

/// Overwrite status and/or message without any state check
#[utoipa::path(
    put,
    path = "/api/admin/educator-applications/{id}",
    params(("id" = Uuid, Path, description = "Application ID")),
    request_body = UpdateApplicationDto,
    responses(
        (status = 200, description = "Edited application", body = ApplicationResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse)
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
pub async fn update_application(
    State(state): State<AppState>,
    Path(id): Path<ApplicationId>,
    ValidatedJson(dto): ValidatedJson<UpdateApplicationDto>,
) -> Result<Json<ApplicationResponse>, AppError> {
    let application = ApplicationService::update(&state.stores, id, dto).await?;
    Ok(Json(ApplicationResponse::new(application)))
}

#[utoipa::path(
    delete,
    path = "/api/admin/educator-applications/{id}",
    params(("id" = Uuid, Path, description = "Application ID")),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse)
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
pub async fn delete_application(
    State(state): State<AppState>,
    Path(id): Path<ApplicationId>,
) -> Result<Json<MessageResponse>, AppError> {
    ApplicationService::delete(&state.stores, id).await?;
    Ok(Json(MessageResponse::new("Application deleted successfully")))
}
