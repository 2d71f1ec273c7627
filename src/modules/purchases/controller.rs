use axum::{
    Json,
    extract::{Path, State},
};
use learnhub_core::{AppError, ErrorResponse};
use learnhub_models::CourseId;
use learnhub_models::purchases::{CheckoutResponse, PurchaseResponse, VerifyPaymentDto};

use super::service::PurchaseService;
use crate::middleware::role::CurrentUser;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Open a pending purchase for a published course
#[utoipa::path(
    post,
    path = "/api/courses/{id}/purchase",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Pending purchase with checkout details", body = CheckoutResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse)
    ),
    tag = "Purchases",
    security(("bearer_auth" = []))
)]
pub async fn purchase_course(
    State(state): State<AppState>,
    CurrentUser(buyer): CurrentUser,
    Path(id): Path<CourseId>,
) -> Result<Json<CheckoutResponse>, AppError> {
    Ok(Json(
        PurchaseService::checkout(&state.stores, &buyer, id, &state.payment_config).await?,
    ))
}

/// Confirm a payment with the gateway signature
#[utoipa::path(
    post,
    path = "/api/payments/verify",
    request_body = VerifyPaymentDto,
    responses(
        (status = 200, description = "Completed purchase, or `success: false` on a bad signature", body = PurchaseResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse)
    ),
    tag = "Purchases",
    security(("bearer_auth" = []))
)]
pub async fn verify_payment(
    State(state): State<AppState>,
    CurrentUser(buyer): CurrentUser,
    ValidatedJson(dto): ValidatedJson<VerifyPaymentDto>,
) -> Result<Json<PurchaseResponse>, AppError> {
    let purchase =
        PurchaseService::verify(&state.stores, &buyer, dto, &state.payment_config).await?;
    Ok(Json(PurchaseResponse {
        success: true,
        purchase,
    }))
}
