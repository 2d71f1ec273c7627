use axum::{
    Json,
    extract::{Path, Query, State},
};
use learnhub_core::{AppError, ErrorResponse};
use learnhub_models::courses::{
    AdminUpdateCourseDto, CourseFilterParams, CourseResponse, CourseSummariesResponse,
    CoursesResponse, CreateCourseDto, DashboardResponse, UpdateCourseDto,
};
use learnhub_models::{CourseId, MessageResponse};
use tracing::instrument;

use super::service::CourseService;
use crate::middleware::role::CurrentUser;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Published catalogue, outlines omitted
#[utoipa::path(
    get,
    path = "/api/courses",
    params(CourseFilterParams),
    responses(
        (status = 200, description = "Page of published courses", body = CourseSummariesResponse)
    ),
    tag = "Courses"
)]
pub async fn list_courses(
    State(state): State<AppState>,
    Query(filters): Query<CourseFilterParams>,
) -> Result<Json<CourseSummariesResponse>, AppError> {
    Ok(Json(
        CourseService::list_published(&state.stores, filters).await?,
    ))
}

/// Published course with lecture urls kept only for free previews
#[utoipa::path(
    get,
    path = "/api/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course, or `success: false` when missing or unpublished", body = CourseResponse)
    ),
    tag = "Courses"
)]
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<CourseId>,
) -> Result<Json<CourseResponse>, AppError> {
    let course = CourseService::get_published(&state.stores, id).await?;
    Ok(Json(CourseResponse::new(course)))
}

/// Courses owned by the caller, full content
#[utoipa::path(
    get,
    path = "/api/educator/courses",
    params(CourseFilterParams),
    responses(
        (status = 200, description = "Caller's courses", body = CoursesResponse),
        (status = 403, description = "Educator role required", body = ErrorResponse)
    ),
    tag = "Educator Courses",
    security(("bearer_auth" = []))
)]
pub async fn my_courses(
    State(state): State<AppState>,
    CurrentUser(educator): CurrentUser,
    Query(filters): Query<CourseFilterParams>,
) -> Result<Json<CoursesResponse>, AppError> {
    Ok(Json(
        CourseService::list_own(&state.stores, &educator, filters).await?,
    ))
}

#[utoipa::path(
    post,
    path = "/api/educator/courses",
    request_body = CreateCourseDto,
    responses(
        (status = 200, description = "Created course", body = CourseResponse),
        (status = 403, description = "Educator role required", body = ErrorResponse)
    ),
    tag = "Educator Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, educator, dto), fields(educator_id = %educator.id))]
pub async fn create_course(
    State(state): State<AppState>,
    CurrentUser(educator): CurrentUser,
    ValidatedJson(dto): ValidatedJson<CreateCourseDto>,
) -> Result<Json<CourseResponse>, AppError> {
    let course = CourseService::create(&state.stores, &educator, dto).await?;
    Ok(Json(CourseResponse::new(course)))
}

/// Edit a course the caller owns
#[utoipa::path(
    put,
    path = "/api/educator/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    request_body = UpdateCourseDto,
    responses(
        (status = 200, description = "Updated course, or `success: false` for a foreign course", body = CourseResponse),
        (status = 403, description = "Educator role required", body = ErrorResponse)
    ),
    tag = "Educator Courses",
    security(("bearer_auth" = []))
)]
pub async fn update_course(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path(id): Path<CourseId>,
    ValidatedJson(dto): ValidatedJson<UpdateCourseDto>,
) -> Result<Json<CourseResponse>, AppError> {
    let course = CourseService::update_own(&state.stores, &caller, id, dto).await?;
    Ok(Json(CourseResponse::new(course)))
}

/// Delete a course the caller owns; refused while students are enrolled
#[utoipa::path(
    delete,
    path = "/api/educator/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Deleted, or `success: false` for a foreign or enrolled course", body = MessageResponse),
        (status = 403, description = "Educator role required", body = ErrorResponse)
    ),
    tag = "Educator Courses",
    security(("bearer_auth" = []))
)]
pub async fn delete_course(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path(id): Path<CourseId>,
) -> Result<Json<MessageResponse>, AppError> {
    CourseService::delete_own(&state.stores, &caller, id).await?;
    Ok(Json(MessageResponse::new("Course deleted successfully")))
}

#[utoipa::path(
    get,
    path = "/api/educator/dashboard",
    responses(
        (status = 200, description = "Course, enrollment and earnings totals", body = DashboardResponse),
        (status = 403, description = "Educator role required", body = ErrorResponse)
    ),
    tag = "Educator Courses",
    security(("bearer_auth" = []))
)]
pub async fn dashboard(
    State(state): State<AppState>,
    CurrentUser(educator): CurrentUser,
) -> Result<Json<DashboardResponse>, AppError> {
    let dashboard = CourseService::dashboard(&state.stores, &educator).await?;
    Ok(Json(DashboardResponse {
        success: true,
        dashboard,
    }))
}

/// Every course, published or not
#[utoipa::path(
    get,
    path = "/api/admin/courses",
    params(CourseFilterParams),
    responses(
        (status = 200, description = "Page of courses", body = CoursesResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse)
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
pub async fn admin_list_courses(
    State(state): State<AppState>,
    Query(filters): Query<CourseFilterParams>,
) -> Result<Json<CoursesResponse>, AppError> {
    Ok(Json(CourseService::list_all(&state.stores, filters).await?))
}

/// Edit any course, including its enrollment list
#[utoipa::path(
    put,
    path = "/api/admin/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    request_body = AdminUpdateCourseDto,
    responses(
        (status = 200, description = "Updated course", body = CourseResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse)
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
pub async fn admin_update_course(
    State(state): State<AppState>,
    CurrentUser(admin): CurrentUser,
    Path(id): Path<CourseId>,
    ValidatedJson(dto): ValidatedJson<AdminUpdateCourseDto>,
) -> Result<Json<CourseResponse>, AppError> {
    let course = CourseService::admin_update(&state.stores, &admin, id, dto).await?;
    Ok(Json(CourseResponse::new(course)))
}

/// Delete any course, enrolled or not
#[utoipa::path(
    delete,
    path = "/api/admin/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse)
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
pub async fn admin_delete_course(
    State(state): State<AppState>,
    CurrentUser(admin): CurrentUser,
    Path(id): Path<CourseId>,
) -> Result<Json<MessageResponse>, AppError> {
    CourseService::admin_delete(&state.stores, &admin, id).await?;
    Ok(Json(MessageResponse::new("Course deleted successfully")))
}
