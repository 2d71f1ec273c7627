//! In-process adapter used by tests and `--in-memory` runs.
//!
//! All tables sit behind one `RwLock`, so every trait method, including the
//! conditional transitions, runs as a single critical section.

use crate::ports::{
    ApplicationStore, AssessmentStore, CourseStore, DUPLICATE_APPLICATION_MESSAGE, DUPLICATE_EMAIL_MESSAGE,
    IdentityStore, PurchaseStore, Transition,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use learnhub_core::AppError;
use learnhub_models::assessments::{Assessment, NewAssessment};
use learnhub_models::applications::{
    ApplicationFilterParams, ApplicationStatus, EducatorApplication, ReviewDecision,
    UpdateApplicationDto,
};
use learnhub_models::courses::{Course, CourseChanges, CourseFilterParams, NewCourse};
use learnhub_models::purchases::{NewPurchase, Purchase, PurchaseStatus};
use learnhub_models::users::{NewUser, Role, User, UserChanges, UserFilterParams};
use learnhub_models::{ApplicationId, AssessmentId, CourseId, PurchaseId, UserId};
use learnhub_core::PaginationParams;
use tokio::sync::RwLock;

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    applications: Vec<EducatorApplication>,
    courses: Vec<Course>,
    purchases: Vec<Purchase>,
    assessments: Vec<Assessment>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn duplicate(message: &'static str) -> AppError {
    AppError::validation(anyhow::anyhow!(message))
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Newest first, then windowed.
fn page<'a, T: Clone + 'a>(
    rows: impl DoubleEndedIterator<Item = &'a T>,
    pagination: &PaginationParams,
) -> (Vec<T>, i64) {
    let matching: Vec<T> = rows.rev().cloned().collect();
    let total = matching.len() as i64;
    (pagination.slice(&matching), total)
}

fn search_term(search: Option<&str>) -> Option<&str> {
    search.map(str::trim).filter(|s| !s.is_empty())
}

#[async_trait]
impl IdentityStore for MemoryStore {
    async fn create_user(&self, user: NewUser) -> Result<User, AppError> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(duplicate(DUPLICATE_EMAIL_MESSAGE));
        }

        let now = Utc::now();
        let created = User {
            id: UserId::new(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
            status: user.status,
            bio: None,
            avatar_url: None,
            created_at: now,
            updated_at: now,
        };
        tables.users.push(created.clone());
        Ok(created)
    }

    async fn find_user(&self, id: UserId) -> Result<Option<User>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn list_users(&self, filter: &UserFilterParams) -> Result<(Vec<User>, i64), AppError> {
        let tables = self.tables.read().await;
        let search = search_term(filter.search.as_deref());
        let rows = tables.users.iter().filter(|u| {
            filter.role.is_none_or(|r| u.role == r)
                && filter.status.is_none_or(|s| u.status == s)
                && search.is_none_or(|q| contains_ci(&u.name, q) || contains_ci(&u.email, q))
        });
        let rows: Vec<&User> = rows.collect();
        Ok(page(rows.into_iter(), &filter.pagination))
    }

    async fn update_user(
        &self,
        id: UserId,
        changes: UserChanges,
    ) -> Result<Option<User>, AppError> {
        let mut tables = self.tables.write().await;
        if let Some(email) = &changes.email
            && tables.users.iter().any(|u| u.id != id && &u.email == email)
        {
            return Err(duplicate(DUPLICATE_EMAIL_MESSAGE));
        }

        let Some(user) = tables.users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        if let Some(name) = changes.name {
            user.name = name;
        }
        if let Some(email) = changes.email {
            user.email = email;
        }
        if let Some(role) = changes.role {
            user.role = role;
        }
        if let Some(status) = changes.status {
            user.status = status;
        }
        if changes.bio.is_some() {
            user.bio = changes.bio;
        }
        if changes.avatar_url.is_some() {
            user.avatar_url = changes.avatar_url;
        }
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn delete_user(&self, id: UserId) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        let before = tables.users.len();
        tables.users.retain(|u| u.id != id);
        if tables.users.len() == before {
            return Ok(false);
        }

        // Same cascade as the foreign keys in the migration.
        tables.applications.retain(|a| a.applicant_id != id);
        for application in &mut tables.applications {
            if application.reviewed_by == Some(id) {
                application.reviewed_by = None;
            }
        }
        tables.courses.retain(|c| c.educator_id != id);
        let courses: Vec<CourseId> = tables.courses.iter().map(|c| c.id).collect();
        tables
            .purchases
            .retain(|p| p.user_id != id && courses.contains(&p.course_id));
        tables
            .assessments
            .retain(|a| a.student_id != id && courses.contains(&a.course_id));
        Ok(true)
    }
}

#[async_trait]
impl ApplicationStore for MemoryStore {
    async fn create_application(
        &self,
        applicant_id: UserId,
        message: String,
    ) -> Result<EducatorApplication, AppError> {
        let mut tables = self.tables.write().await;
        if tables
            .applications
            .iter()
            .any(|a| a.applicant_id == applicant_id && a.status == ApplicationStatus::Pending)
        {
            return Err(duplicate(DUPLICATE_APPLICATION_MESSAGE));
        }

        let now = Utc::now();
        let application = EducatorApplication {
            id: ApplicationId::new(),
            applicant_id,
            message,
            status: ApplicationStatus::Pending,
            reviewed_by: None,
            reviewed_at: None,
            created_at: now,
            updated_at: now,
        };
        tables.applications.push(application.clone());
        Ok(application)
    }

    async fn find_application(
        &self,
        id: ApplicationId,
    ) -> Result<Option<EducatorApplication>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.applications.iter().find(|a| a.id == id).cloned())
    }

    async fn find_pending_application(
        &self,
        applicant_id: UserId,
    ) -> Result<Option<EducatorApplication>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .applications
            .iter()
            .find(|a| a.applicant_id == applicant_id && a.status == ApplicationStatus::Pending)
            .cloned())
    }

    async fn list_applications(
        &self,
        filter: &ApplicationFilterParams,
    ) -> Result<(Vec<EducatorApplication>, i64), AppError> {
        let tables = self.tables.read().await;
        let rows: Vec<&EducatorApplication> = tables
            .applications
            .iter()
            .filter(|a| filter.status.is_none_or(|s| a.status == s))
            .collect();
        Ok(page(rows.into_iter(), &filter.pagination))
    }

    async fn list_applications_for(
        &self,
        applicant_id: UserId,
    ) -> Result<Vec<EducatorApplication>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .applications
            .iter()
            .rev()
            .filter(|a| a.applicant_id == applicant_id)
            .cloned()
            .collect())
    }

    async fn review_application(
        &self,
        id: ApplicationId,
        reviewer: UserId,
        decision: ReviewDecision,
        reviewed_at: DateTime<Utc>,
    ) -> Result<Transition<EducatorApplication>, AppError> {
        let mut tables = self.tables.write().await;
        let Some(application) = tables.applications.iter_mut().find(|a| a.id == id) else {
            return Ok(Transition::NotFound);
        };
        if application.status != ApplicationStatus::Pending {
            return Ok(Transition::AlreadyProcessed(application.clone()));
        }

        application.status = decision.target_status();
        application.reviewed_by = Some(reviewer);
        application.reviewed_at = Some(reviewed_at);
        application.updated_at = Utc::now();
        let reviewed = application.clone();

        if decision == ReviewDecision::Approve
            && let Some(user) = tables
                .users
                .iter_mut()
                .find(|u| u.id == reviewed.applicant_id)
        {
            user.role = Role::Educator;
            user.updated_at = Utc::now();
        }

        Ok(Transition::Applied(reviewed))
    }

    async fn update_application(
        &self,
        id: ApplicationId,
        changes: UpdateApplicationDto,
    ) -> Result<Option<EducatorApplication>, AppError> {
        let mut tables = self.tables.write().await;
        let Some(applicant_id) = tables
            .applications
            .iter()
            .find(|a| a.id == id)
            .map(|a| a.applicant_id)
        else {
            return Ok(None);
        };

        if changes.status == Some(ApplicationStatus::Pending)
            && tables.applications.iter().any(|a| {
                a.id != id && a.applicant_id == applicant_id && a.status == ApplicationStatus::Pending
            })
        {
            return Err(duplicate(DUPLICATE_APPLICATION_MESSAGE));
        }

        let Some(application) = tables.applications.iter_mut().find(|a| a.id == id) else {
            return Ok(None);
        };
        if let Some(status) = changes.status {
            application.status = status;
        }
        if let Some(message) = changes.message {
            application.message = message;
        }
        application.updated_at = Utc::now();
        Ok(Some(application.clone()))
    }

    async fn delete_application(&self, id: ApplicationId) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        let before = tables.applications.len();
        tables.applications.retain(|a| a.id != id);
        Ok(tables.applications.len() < before)
    }
}

impl MemoryStore {
    async fn list_courses_where(
        &self,
        published: Option<bool>,
        educator_id: Option<UserId>,
        filter: &CourseFilterParams,
    ) -> Result<(Vec<Course>, i64), AppError> {
        let tables = self.tables.read().await;
        let search = search_term(filter.search.as_deref());
        let rows: Vec<&Course> = tables
            .courses
            .iter()
            .filter(|c| {
                published.is_none_or(|p| c.is_published == p)
                    && educator_id.is_none_or(|e| c.educator_id == e)
                    && search.is_none_or(|q| contains_ci(&c.title, q))
            })
            .collect();
        Ok(page(rows.into_iter(), &filter.pagination))
    }

    async fn settle_purchase(
        &self,
        order_id: &str,
        payment_id: &str,
        completed: bool,
    ) -> Result<Transition<Purchase>, AppError> {
        let mut tables = self.tables.write().await;
        let Some(purchase) = tables.purchases.iter_mut().find(|p| p.order_id == order_id) else {
            return Ok(Transition::NotFound);
        };
        if purchase.status != PurchaseStatus::Pending {
            return Ok(Transition::AlreadyProcessed(purchase.clone()));
        }

        purchase.status = if completed {
            PurchaseStatus::Completed
        } else {
            PurchaseStatus::Failed
        };
        purchase.payment_id = Some(payment_id.to_string());
        purchase.updated_at = Utc::now();
        let settled = purchase.clone();

        if completed
            && let Some(course) = tables.courses.iter_mut().find(|c| c.id == settled.course_id)
            && !course.enrolled_students.contains(&settled.user_id)
        {
            course.enrolled_students.push(settled.user_id);
            course.updated_at = Utc::now();
        }

        Ok(Transition::Applied(settled))
    }
}

#[async_trait]
impl CourseStore for MemoryStore {
    async fn create_course(&self, course: NewCourse) -> Result<Course, AppError> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let created = Course {
            id: CourseId::new(),
            educator_id: course.educator_id,
            title: course.title,
            description: course.description,
            thumbnail_url: course.thumbnail_url,
            price: course.price,
            discount: course.discount,
            is_published: course.is_published,
            content: course.content,
            enrolled_students: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        tables.courses.push(created.clone());
        Ok(created)
    }

    async fn find_course(&self, id: CourseId) -> Result<Option<Course>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.courses.iter().find(|c| c.id == id).cloned())
    }

    async fn list_published_courses(
        &self,
        filter: &CourseFilterParams,
    ) -> Result<(Vec<Course>, i64), AppError> {
        self.list_courses_where(Some(true), None, filter).await
    }

    async fn list_all_courses(
        &self,
        filter: &CourseFilterParams,
    ) -> Result<(Vec<Course>, i64), AppError> {
        self.list_courses_where(None, None, filter).await
    }

    async fn list_courses_by_educator(
        &self,
        educator_id: UserId,
        filter: &CourseFilterParams,
    ) -> Result<(Vec<Course>, i64), AppError> {
        self.list_courses_where(None, Some(educator_id), filter).await
    }

    async fn list_enrolled_courses(&self, user_id: UserId) -> Result<Vec<Course>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .courses
            .iter()
            .rev()
            .filter(|c| c.enrolled_students.contains(&user_id))
            .cloned()
            .collect())
    }

    async fn update_course(
        &self,
        id: CourseId,
        changes: CourseChanges,
    ) -> Result<Option<Course>, AppError> {
        let mut tables = self.tables.write().await;
        let Some(course) = tables.courses.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        if let Some(title) = changes.title {
            course.title = title;
        }
        if let Some(description) = changes.description {
            course.description = description;
        }
        if changes.thumbnail_url.is_some() {
            course.thumbnail_url = changes.thumbnail_url;
        }
        if let Some(price) = changes.price {
            course.price = price;
        }
        if let Some(discount) = changes.discount {
            course.discount = discount;
        }
        if let Some(is_published) = changes.is_published {
            course.is_published = is_published;
        }
        if let Some(content) = changes.content {
            course.content = content;
        }
        if let Some(enrolled) = changes.enrolled_students {
            course.enrolled_students = enrolled;
        }
        course.updated_at = Utc::now();
        Ok(Some(course.clone()))
    }

    async fn delete_course(&self, id: CourseId) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        let before = tables.courses.len();
        tables.courses.retain(|c| c.id != id);
        if tables.courses.len() == before {
            return Ok(false);
        }
        tables.purchases.retain(|p| p.course_id != id);
        tables.assessments.retain(|a| a.course_id != id);
        Ok(true)
    }
}

#[async_trait]
impl PurchaseStore for MemoryStore {
    async fn create_purchase(&self, purchase: NewPurchase) -> Result<Purchase, AppError> {
        let mut tables = self.tables.write().await;
        if tables.purchases.iter().any(|p| p.order_id == purchase.order_id) {
            return Err(AppError::internal_error("Duplicate order id"));
        }

        let now = Utc::now();
        let created = Purchase {
            id: PurchaseId::new(),
            course_id: purchase.course_id,
            user_id: purchase.user_id,
            amount: purchase.amount,
            status: PurchaseStatus::Pending,
            order_id: purchase.order_id,
            payment_id: None,
            created_at: now,
            updated_at: now,
        };
        tables.purchases.push(created.clone());
        Ok(created)
    }

    async fn find_purchase_by_order(&self, order_id: &str) -> Result<Option<Purchase>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.purchases.iter().find(|p| p.order_id == order_id).cloned())
    }

    async fn complete_purchase(
        &self,
        order_id: &str,
        payment_id: &str,
    ) -> Result<Transition<Purchase>, AppError> {
        self.settle_purchase(order_id, payment_id, true).await
    }

    async fn fail_purchase(
        &self,
        order_id: &str,
        payment_id: &str,
    ) -> Result<Transition<Purchase>, AppError> {
        self.settle_purchase(order_id, payment_id, false).await
    }

    async fn earnings_for_educator(&self, educator_id: UserId) -> Result<i64, AppError> {
        let tables = self.tables.read().await;
        let owned: Vec<CourseId> = tables
            .courses
            .iter()
            .filter(|c| c.educator_id == educator_id)
            .map(|c| c.id)
            .collect();
        Ok(tables
            .purchases
            .iter()
            .filter(|p| p.status == PurchaseStatus::Completed && owned.contains(&p.course_id))
            .map(|p| p.amount)
            .sum())
    }
}

#[async_trait]
impl AssessmentStore for MemoryStore {
    async fn create_assessment(&self, assessment: NewAssessment) -> Result<Assessment, AppError> {
        let mut tables = self.tables.write().await;
        let created = Assessment {
            id: AssessmentId::new(),
            course_id: assessment.course_id,
            student_id: assessment.student_id,
            questions: assessment.questions,
            answers: None,
            score: None,
            created_at: Utc::now(),
            submitted_at: None,
        };
        tables.assessments.push(created.clone());
        Ok(created)
    }

    async fn find_assessment(&self, id: AssessmentId) -> Result<Option<Assessment>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.assessments.iter().find(|a| a.id == id).cloned())
    }

    async fn list_assessments_for(
        &self,
        student_id: UserId,
        course_id: Option<CourseId>,
    ) -> Result<Vec<Assessment>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .assessments
            .iter()
            .rev()
            .filter(|a| a.student_id == student_id && course_id.is_none_or(|c| a.course_id == c))
            .cloned()
            .collect())
    }

    async fn submit_assessment(
        &self,
        id: AssessmentId,
        answers: Vec<String>,
        score: i32,
        submitted_at: DateTime<Utc>,
    ) -> Result<Transition<Assessment>, AppError> {
        let mut tables = self.tables.write().await;
        let Some(assessment) = tables.assessments.iter_mut().find(|a| a.id == id) else {
            return Ok(Transition::NotFound);
        };
        if assessment.is_submitted() {
            return Ok(Transition::AlreadyProcessed(assessment.clone()));
        }

        assessment.answers = Some(answers);
        assessment.score = Some(score);
        assessment.submitted_at = Some(submitted_at);
        Ok(Transition::Applied(assessment.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use learnhub_core::ErrorKind;
    use learnhub_models::users::UserStatus;
    use std::sync::Arc;

    fn new_user(email: &str, role: Role) -> NewUser {
        NewUser {
            name: "Test".to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            role,
            status: UserStatus::Active,
        }
    }

    fn new_course(educator_id: UserId, published: bool) -> NewCourse {
        NewCourse {
            educator_id,
            title: "Course".to_string(),
            description: "About".to_string(),
            thumbnail_url: None,
            price: 1000,
            discount: 10,
            is_published: published,
            content: vec![],
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_is_validation_failure() {
        let store = MemoryStore::new();
        store.create_user(new_user("a@example.com", Role::User)).await.unwrap();
        let err = store
            .create_user(new_user("a@example.com", Role::User))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationFailure);
    }

    #[tokio::test]
    async fn test_one_pending_application_per_applicant() {
        let store = MemoryStore::new();
        let user = store.create_user(new_user("a@example.com", Role::User)).await.unwrap();

        store.create_application(user.id, "first".into()).await.unwrap();
        let err = store
            .create_application(user.id, "second".into())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationFailure);
    }

    #[tokio::test]
    async fn test_review_is_single_transition() {
        let store = MemoryStore::new();
        let user = store.create_user(new_user("a@example.com", Role::User)).await.unwrap();
        let admin = store.create_user(new_user("b@example.com", Role::Admin)).await.unwrap();
        let app = store.create_application(user.id, "please".into()).await.unwrap();

        let first = store
            .review_application(app.id, admin.id, ReviewDecision::Approve, Utc::now())
            .await
            .unwrap();
        assert!(matches!(first, Transition::Applied(ref a) if a.status == ApplicationStatus::Approved));

        let second = store
            .review_application(app.id, admin.id, ReviewDecision::Reject, Utc::now())
            .await
            .unwrap();
        let Transition::AlreadyProcessed(unchanged) = second else {
            panic!("expected AlreadyProcessed");
        };
        assert_eq!(unchanged.status, ApplicationStatus::Approved);

        let promoted = store.find_user(user.id).await.unwrap().unwrap();
        assert_eq!(promoted.role, Role::Educator);
    }

    #[tokio::test]
    async fn test_concurrent_reviews_apply_once() {
        let store = Arc::new(MemoryStore::new());
        let user = store.create_user(new_user("a@example.com", Role::User)).await.unwrap();
        let admin = store.create_user(new_user("b@example.com", Role::Admin)).await.unwrap();
        let app = store.create_application(user.id, "please".into()).await.unwrap();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                let decision = if i % 2 == 0 {
                    ReviewDecision::Approve
                } else {
                    ReviewDecision::Reject
                };
                tokio::spawn(async move {
                    store
                        .review_application(app.id, admin.id, decision, Utc::now())
                        .await
                        .unwrap()
                })
            })
            .collect();

        let mut applied = 0;
        for handle in handles {
            if matches!(handle.await.unwrap(), Transition::Applied(_)) {
                applied += 1;
            }
        }
        assert_eq!(applied, 1);
    }

    #[tokio::test]
    async fn test_complete_purchase_enrolls_once() {
        let store = MemoryStore::new();
        let educator = store
            .create_user(new_user("e@example.com", Role::Educator))
            .await
            .unwrap();
        let buyer = store.create_user(new_user("u@example.com", Role::User)).await.unwrap();
        let course = store.create_course(new_course(educator.id, true)).await.unwrap();
        store
            .create_purchase(NewPurchase {
                course_id: course.id,
                user_id: buyer.id,
                amount: 900,
                order_id: "order_1".into(),
            })
            .await
            .unwrap();

        let done = store.complete_purchase("order_1", "pay_1").await.unwrap();
        assert!(matches!(done, Transition::Applied(_)));
        let again = store.complete_purchase("order_1", "pay_1").await.unwrap();
        assert!(matches!(again, Transition::AlreadyProcessed(_)));

        let course = store.find_course(course.id).await.unwrap().unwrap();
        assert_eq!(course.enrolled_students, vec![buyer.id]);
        assert_eq!(store.earnings_for_educator(educator.id).await.unwrap(), 900);
    }

    #[tokio::test]
    async fn test_published_listing_filters_and_pages() {
        let store = MemoryStore::new();
        let educator = UserId::new();
        for _ in 0..3 {
            store.create_course(new_course(educator, true)).await.unwrap();
        }
        store.create_course(new_course(educator, false)).await.unwrap();

        let filter = CourseFilterParams {
            search: None,
            pagination: PaginationParams {
                limit: Some(2),
                offset: None,
            },
        };
        let (courses, total) = store.list_published_courses(&filter).await.unwrap();
        assert_eq!(total, 3);
        assert_eq!(courses.len(), 2);
        assert!(courses.iter().all(|c| c.is_published));
    }

    #[tokio::test]
    async fn test_assessment_submits_once_and_cascades_with_course() {
        let store = MemoryStore::new();
        let educator = store
            .create_user(new_user("e@example.com", Role::Educator))
            .await
            .unwrap();
        let student = store.create_user(new_user("s@example.com", Role::User)).await.unwrap();
        let course = store.create_course(new_course(educator.id, true)).await.unwrap();
        let test = store
            .create_assessment(NewAssessment {
                course_id: course.id,
                student_id: student.id,
                questions: vec![],
            })
            .await
            .unwrap();

        let first = store
            .submit_assessment(test.id, vec!["a".into()], 1, Utc::now())
            .await
            .unwrap();
        assert!(matches!(first, Transition::Applied(ref a) if a.score == Some(1)));

        let second = store
            .submit_assessment(test.id, vec!["b".into()], 0, Utc::now())
            .await
            .unwrap();
        assert!(matches!(second, Transition::AlreadyProcessed(ref a) if a.score == Some(1)));

        store.delete_course(course.id).await.unwrap();
        assert!(store.find_assessment(test.id).await.unwrap().is_none());
    }
}
