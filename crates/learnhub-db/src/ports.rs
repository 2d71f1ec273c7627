//! Storage ports.
//!
//! Handlers reach persistence only through these traits. Each method either
//! succeeds, returns `None`/`false` for a missing row, or fails with an
//! [`AppError`] already classified for the response envelope.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use learnhub_core::AppError;
use learnhub_models::assessments::{Assessment, NewAssessment};
use learnhub_models::applications::{
    ApplicationFilterParams, EducatorApplication, ReviewDecision, UpdateApplicationDto,
};
use learnhub_models::courses::{Course, CourseChanges, CourseFilterParams, NewCourse};
use learnhub_models::purchases::{NewPurchase, Purchase};
use learnhub_models::users::{NewUser, User, UserChanges, UserFilterParams};
use learnhub_models::{ApplicationId, AssessmentId, CourseId, UserId};
use std::sync::Arc;

pub const DUPLICATE_EMAIL_MESSAGE: &str = "Email already registered";
pub const DUPLICATE_APPLICATION_MESSAGE: &str = "You already have a pending application";

/// Result of a conditional `pending -> terminal` transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition<T> {
    NotFound,
    /// The row had already left `pending`; it is returned untouched.
    AlreadyProcessed(T),
    Applied(T),
}

#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Fails with a validation error when the email is taken.
    async fn create_user(&self, user: NewUser) -> Result<User, AppError>;

    async fn find_user(&self, id: UserId) -> Result<Option<User>, AppError>;

    /// `email` must already be normalized.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn list_users(&self, filter: &UserFilterParams) -> Result<(Vec<User>, i64), AppError>;

    async fn update_user(&self, id: UserId, changes: UserChanges)
    -> Result<Option<User>, AppError>;

    async fn delete_user(&self, id: UserId) -> Result<bool, AppError>;
}

#[async_trait]
pub trait ApplicationStore: Send + Sync {
    /// Fails with a validation error when the applicant already has a
    /// pending application.
    async fn create_application(
        &self,
        applicant_id: UserId,
        message: String,
    ) -> Result<EducatorApplication, AppError>;

    async fn find_application(
        &self,
        id: ApplicationId,
    ) -> Result<Option<EducatorApplication>, AppError>;

    async fn find_pending_application(
        &self,
        applicant_id: UserId,
    ) -> Result<Option<EducatorApplication>, AppError>;

    async fn list_applications(
        &self,
        filter: &ApplicationFilterParams,
    ) -> Result<(Vec<EducatorApplication>, i64), AppError>;

    async fn list_applications_for(
        &self,
        applicant_id: UserId,
    ) -> Result<Vec<EducatorApplication>, AppError>;

    /// Moves a pending application to the decision's status and records the
    /// reviewer. Approval promotes the applicant to educator in the same
    /// atomic step.
    async fn review_application(
        &self,
        id: ApplicationId,
        reviewer: UserId,
        decision: ReviewDecision,
        reviewed_at: DateTime<Utc>,
    ) -> Result<Transition<EducatorApplication>, AppError>;

    /// Unconditional edit. No status guard and no role side effect.
    async fn update_application(
        &self,
        id: ApplicationId,
        changes: UpdateApplicationDto,
    ) -> Result<Option<EducatorApplication>, AppError>;

    async fn delete_application(&self, id: ApplicationId) -> Result<bool, AppError>;
}

#[async_trait]
pub trait CourseStore: Send + Sync {
    async fn create_course(&self, course: NewCourse) -> Result<Course, AppError>;

    async fn find_course(&self, id: CourseId) -> Result<Option<Course>, AppError>;

    async fn list_published_courses(
        &self,
        filter: &CourseFilterParams,
    ) -> Result<(Vec<Course>, i64), AppError>;

    async fn list_all_courses(
        &self,
        filter: &CourseFilterParams,
    ) -> Result<(Vec<Course>, i64), AppError>;

    async fn list_courses_by_educator(
        &self,
        educator_id: UserId,
        filter: &CourseFilterParams,
    ) -> Result<(Vec<Course>, i64), AppError>;

    async fn list_enrolled_courses(&self, user_id: UserId) -> Result<Vec<Course>, AppError>;

    async fn update_course(
        &self,
        id: CourseId,
        changes: CourseChanges,
    ) -> Result<Option<Course>, AppError>;

    async fn delete_course(&self, id: CourseId) -> Result<bool, AppError>;
}

#[async_trait]
pub trait PurchaseStore: Send + Sync {
    async fn create_purchase(&self, purchase: NewPurchase) -> Result<Purchase, AppError>;

    async fn find_purchase_by_order(&self, order_id: &str) -> Result<Option<Purchase>, AppError>;

    /// `pending -> completed`, recording the payment id and enrolling the
    /// buyer in the course in the same atomic step.
    async fn complete_purchase(
        &self,
        order_id: &str,
        payment_id: &str,
    ) -> Result<Transition<Purchase>, AppError>;

    /// `pending -> failed`.
    async fn fail_purchase(
        &self,
        order_id: &str,
        payment_id: &str,
    ) -> Result<Transition<Purchase>, AppError>;

    /// Sum of completed purchase amounts over the educator's courses.
    async fn earnings_for_educator(&self, educator_id: UserId) -> Result<i64, AppError>;
}

#[async_trait]
pub trait AssessmentStore: Send + Sync {
    async fn create_assessment(&self, assessment: NewAssessment) -> Result<Assessment, AppError>;

    async fn find_assessment(&self, id: AssessmentId) -> Result<Option<Assessment>, AppError>;

    /// Newest first. `course_id` narrows the list to one course.
    async fn list_assessments_for(
        &self,
        student_id: UserId,
        course_id: Option<CourseId>,
    ) -> Result<Vec<Assessment>, AppError>;

    /// Records answers and score on a test that has not been submitted yet.
    async fn submit_assessment(
        &self,
        id: AssessmentId,
        answers: Vec<String>,
        score: i32,
        submitted_at: DateTime<Utc>,
    ) -> Result<Transition<Assessment>, AppError>;
}

/// Every store the HTTP layer needs, shared behind `Arc`s.
#[derive(Clone)]
pub struct Stores {
    pub identities: Arc<dyn IdentityStore>,
    pub applications: Arc<dyn ApplicationStore>,
    pub courses: Arc<dyn CourseStore>,
    pub purchases: Arc<dyn PurchaseStore>,
    pub assessments: Arc<dyn AssessmentStore>,
}

impl Stores {
    /// Wires every port to the same adapter.
    pub fn from_adapter<S>(adapter: Arc<S>) -> Self
    where
        S: IdentityStore
            + ApplicationStore
            + CourseStore
            + PurchaseStore
            + AssessmentStore
            + 'static,
    {
        Self {
            identities: adapter.clone(),
            applications: adapter.clone(),
            courses: adapter.clone(),
            purchases: adapter.clone(),
            assessments: adapter,
        }
    }
}
