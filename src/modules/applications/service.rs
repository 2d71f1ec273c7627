//! Educator application workflow.
//!
//! Approve and reject go through a single conditional transition in the
//! store, so two concurrent reviews of the same application cannot both
//! apply. The admin generic edit deliberately bypasses that path.

use anyhow::anyhow;
use chrono::Utc;
use learnhub_core::{AppError, PaginationMeta, PaginationParams};
use learnhub_db::{DUPLICATE_APPLICATION_MESSAGE, Stores, Transition};
use learnhub_models::applications::{
    ApplicationFilterParams, ApplicationsResponse, ApplyDto, EducatorApplication, ReviewDecision,
    UpdateApplicationDto,
};
use learnhub_models::users::{Role, User};
use learnhub_models::{ApplicationId, UserId};
use learnhub_observability::{track_application_created, track_application_reviewed};
use tracing::{debug, info, instrument, warn};

pub const ALREADY_EDUCATOR_MESSAGE: &str = "You are already an educator";
pub const ALREADY_PROCESSED_MESSAGE: &str = "Application already processed";
pub const APPLICATION_NOT_FOUND_MESSAGE: &str = "Application not found";

pub struct ApplicationService;

impl ApplicationService {
    #[instrument(skip(stores, applicant, dto), fields(applicant_id = %applicant.id))]
    pub async fn apply(
        stores: &Stores,
        applicant: &User,
        dto: ApplyDto,
    ) -> Result<EducatorApplication, AppError> {
        if applicant.role != Role::User {
            debug!(role = %applicant.role, "Application refused for non-user role");
            return Err(AppError::validation(anyhow!(ALREADY_EDUCATOR_MESSAGE)));
        }

        if stores
            .applications
            .find_pending_application(applicant.id)
            .await?
            .is_some()
        {
            warn!("Applicant already has a pending application");
            return Err(AppError::validation(anyhow!(DUPLICATE_APPLICATION_MESSAGE)));
        }

        // The store enforces the same rule, which covers two racing requests.
        let application = stores
            .applications
            .create_application(applicant.id, dto.message.trim().to_string())
            .await?;

        info!(application_id = %application.id, "Educator application submitted");
        track_application_created();
        Ok(application)
    }

    pub async fn list_own(
        stores: &Stores,
        applicant_id: UserId,
        pagination: PaginationParams,
    ) -> Result<ApplicationsResponse, AppError> {
        let applications = stores.applications.list_applications_for(applicant_id).await?;
        Ok(ApplicationsResponse {
            success: true,
            meta: PaginationMeta::new(applications.len() as i64, &pagination),
            applications: pagination.slice(&applications),
        })
    }

    #[instrument(skip(stores))]
    pub async fn list(
        stores: &Stores,
        filters: ApplicationFilterParams,
    ) -> Result<ApplicationsResponse, AppError> {
        let (applications, total) = stores.applications.list_applications(&filters).await?;
        Ok(ApplicationsResponse {
            success: true,
            applications,
            meta: PaginationMeta::new(total, &filters.pagination),
        })
    }

    /// `pending -> approved|rejected`. Approval also promotes the applicant.
    #[instrument(skip(stores, reviewer), fields(reviewer_id = %reviewer.id))]
    pub async fn review(
        stores: &Stores,
        id: ApplicationId,
        reviewer: &User,
        decision: ReviewDecision,
    ) -> Result<EducatorApplication, AppError> {
        let outcome = decision.target_status();

        match stores
            .applications
            .review_application(id, reviewer.id, decision, Utc::now())
            .await?
        {
            Transition::NotFound => Err(AppError::not_found(anyhow!(
                APPLICATION_NOT_FOUND_MESSAGE
            ))),
            Transition::AlreadyProcessed(application) => {
                warn!(
                    application_id = %application.id,
                    status = %application.status,
                    "Review attempted on a processed application"
                );
                Err(AppError::validation(anyhow!(ALREADY_PROCESSED_MESSAGE)))
            }
            Transition::Applied(application) => {
                info!(
                    application_id = %application.id,
                    applicant_id = %application.applicant_id,
                    outcome = %outcome,
                    "Educator application reviewed"
                );
                track_application_reviewed(outcome.as_str());
                Ok(application)
            }
        }
    }

    /// Writes the given fields as-is. No pending guard, no promotion, and the
    /// reviewer fields are left alone.
    #[instrument(skip(stores, dto))]
    pub async fn update(
        stores: &Stores,
        id: ApplicationId,
        dto: UpdateApplicationDto,
    ) -> Result<EducatorApplication, AppError> {
        let application = stores
            .applications
            .update_application(id, dto)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!(APPLICATION_NOT_FOUND_MESSAGE)))?;

        info!(application_id = %application.id, status = %application.status, "Application edited by admin");
        Ok(application)
    }

    #[instrument(skip(stores))]
    pub async fn delete(stores: &Stores, id: ApplicationId) -> Result<(), AppError> {
        if !stores.applications.delete_application(id).await? {
            return Err(AppError::not_found(anyhow!(APPLICATION_NOT_FOUND_MESSAGE)));
        }
        info!(application_id = %id, "Application deleted");
        Ok(())
    }
}
