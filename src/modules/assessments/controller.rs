use axum::{
    Json,
    extract::{Path, State},
};
use learnhub_core::{AppError, ErrorResponse};
use learnhub_models::assessments::{
    AssessmentResponse, AssessmentsResponse, SubmitAssessmentDto,
};
use learnhub_models::{AssessmentId, CourseId};

use super::service::AssessmentService;
use crate::middleware::role::CurrentUser;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Generate a test for a course the caller is enrolled in
#[utoipa::path(
    post,
    path = "/api/courses/{id}/tests",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "New test with answers hidden, or `success: false` when not enrolled", body = AssessmentResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse),
        (status = 500, description = "Generator failed or replied with an unusable question set", body = ErrorResponse)
    ),
    tag = "Assessments",
    security(("bearer_auth" = []))
)]
pub async fn generate_test(
    State(state): State<AppState>,
    CurrentUser(student): CurrentUser,
    Path(id): Path<CourseId>,
) -> Result<Json<AssessmentResponse>, AppError> {
    let assessment = AssessmentService::generate(
        &state.stores,
        state.test_generator.as_ref(),
        &state.assessment_config,
        &student,
        id,
    )
    .await?;
    Ok(Json(AssessmentResponse::new(&assessment)))
}

/// List the caller's tests for one course
#[utoipa::path(
    get,
    path = "/api/courses/{id}/tests",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Caller's tests for the course, newest first", body = AssessmentsResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse)
    ),
    tag = "Assessments",
    security(("bearer_auth" = []))
)]
pub async fn course_tests(
    State(state): State<AppState>,
    CurrentUser(student): CurrentUser,
    Path(id): Path<CourseId>,
) -> Result<Json<AssessmentsResponse>, AppError> {
    let assessments = AssessmentService::list_own(&state.stores, &student, Some(id)).await?;
    Ok(Json(AssessmentsResponse {
        success: true,
        assessments: assessments.iter().map(|a| a.view()).collect(),
    }))
}

/// List all of the caller's tests
#[utoipa::path(
    get,
    path = "/api/tests",
    responses(
        (status = 200, description = "Caller's tests, newest first", body = AssessmentsResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse)
    ),
    tag = "Assessments",
    security(("bearer_auth" = []))
)]
pub async fn my_tests(
    State(state): State<AppState>,
    CurrentUser(student): CurrentUser,
) -> Result<Json<AssessmentsResponse>, AppError> {
    let assessments = AssessmentService::list_own(&state.stores, &student, None).await?;
    Ok(Json(AssessmentsResponse {
        success: true,
        assessments: assessments.iter().map(|a| a.view()).collect(),
    }))
}

/// Get one of the caller's tests
#[utoipa::path(
    get,
    path = "/api/tests/{id}",
    params(("id" = Uuid, Path, description = "Test ID")),
    responses(
        (status = 200, description = "Test; correct answers appear once submitted", body = AssessmentResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse)
    ),
    tag = "Assessments",
    security(("bearer_auth" = []))
)]
pub async fn get_test(
    State(state): State<AppState>,
    CurrentUser(student): CurrentUser,
    Path(id): Path<AssessmentId>,
) -> Result<Json<AssessmentResponse>, AppError> {
    let assessment = AssessmentService::get_own(&state.stores, &student, id).await?;
    Ok(Json(AssessmentResponse::new(&assessment)))
}

/// Submit answers and receive the score
#[utoipa::path(
    post,
    path = "/api/tests/{id}/submit",
    params(("id" = Uuid, Path, description = "Test ID")),
    request_body = SubmitAssessmentDto,
    responses(
        (status = 200, description = "Scored test with correct answers revealed", body = AssessmentResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse)
    ),
    tag = "Assessments",
    security(("bearer_auth" = []))
)]
pub async fn submit_test(
    State(state): State<AppState>,
    CurrentUser(student): CurrentUser,
    Path(id): Path<AssessmentId>,
    ValidatedJson(dto): ValidatedJson<SubmitAssessmentDto>,
) -> Result<Json<AssessmentResponse>, AppError> {
    let assessment = AssessmentService::submit(&state.stores, &student, id, dto).await?;
    Ok(Json(AssessmentResponse::new(&assessment)))
}
