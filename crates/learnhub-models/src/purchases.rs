//! Course purchases and payment verification bodies.

use crate::ids::{CourseId, PurchaseId, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "purchase_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PurchaseStatus {
    #[default]
    Pending,
    Completed,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Purchase {
    pub id: PurchaseId,
    pub course_id: CourseId,
    pub user_id: UserId,
    /// Minor currency units, after discount
    pub amount: i64,
    pub status: PurchaseStatus,
    pub order_id: String,
    pub payment_id: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPurchase {
    pub course_id: CourseId,
    pub user_id: UserId,
    pub amount: i64,
    pub order_id: String,
}

/// Returned when a purchase is opened; carries what the client checkout needs.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CheckoutResponse {
    pub success: bool,
    pub purchase: Purchase,
    pub key_id: String,
    pub currency: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct VerifyPaymentDto {
    #[validate(length(min = 1, message = "order_id is required"))]
    pub order_id: String,
    #[validate(length(min = 1, message = "payment_id is required"))]
    pub payment_id: String,
    /// Hex-encoded HMAC-SHA256 of `"{order_id}|{payment_id}"`
    #[validate(length(min = 1, message = "signature is required"))]
    pub signature: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PurchaseResponse {
    pub success: bool,
    pub purchase: Purchase,
}
