//! Educator application models.
//!
//! An application starts `pending` and is moved to `approved` or `rejected`
//! exactly once by a review. The admin generic edit is the only path that
//! can rewrite `status` after that.

use crate::ids::{ApplicationId, UserId};
use learnhub_core::{PaginationMeta, PaginationParams};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

pub const MIN_MESSAGE_CHARS: usize = 20;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "application_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome chosen by an admin when reviewing a pending application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewDecision {
    Approve,
    Reject,
}

impl ReviewDecision {
    pub const fn target_status(self) -> ApplicationStatus {
        match self {
            Self::Approve => ApplicationStatus::Approved,
            Self::Reject => ApplicationStatus::Rejected,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EducatorApplication {
    pub id: ApplicationId,
    pub applicant_id: UserId,
    pub message: String,
    pub status: ApplicationStatus,
    pub reviewed_by: Option<UserId>,
    pub reviewed_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

fn validate_application_message(message: &str) -> Result<(), ValidationError> {
    if message.trim().chars().count() < MIN_MESSAGE_CHARS {
        let mut err = ValidationError::new("message_too_short");
        err.message = Some("Application message must be at least 20 characters".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ApplyDto {
    /// Why the applicant wants to teach (at least 20 characters, trimmed)
    #[validate(custom(function = "validate_application_message"))]
    pub message: String,
}

/// Admin generic edit. Applies the given fields as-is.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateApplicationDto {
    pub status: Option<ApplicationStatus>,
    #[validate(length(min = 1))]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ApplicationFilterParams {
    pub status: Option<ApplicationStatus>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ApplicationResponse {
    pub success: bool,
    pub application: EducatorApplication,
}

impl ApplicationResponse {
    pub fn new(application: EducatorApplication) -> Self {
        Self {
            success: true,
            application,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ApplicationsResponse {
    pub success: bool,
    pub applications: Vec<EducatorApplication>,
    pub meta: PaginationMeta,
}
