//! Domain models and DTOs for the LearnHub API.
//!
//! Entities derive `sqlx::FromRow` for the Postgres adapter and `ToSchema`
//! for the OpenAPI document. Request DTOs derive `validator::Validate`.

pub mod applications;
pub mod assessments;
pub mod auth;
pub mod courses;
pub mod ids;
pub mod purchases;
pub mod users;

use serde::Serialize;
use utoipa::ToSchema;

pub use ids::{ApplicationId, AssessmentId, CourseId, PurchaseId, UserId};
pub use users::Role;

/// Success body that only carries a human-readable message.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
