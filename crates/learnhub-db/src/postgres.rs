//! PostgreSQL adapter.
//!
//! Queries are built at runtime; optional filters are expressed as
//! `($n IS NULL OR column = $n)` so each query keeps a fixed shape.

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
use learnhub_models::users::{NewUser, User, UserChanges, UserFilterParams};
use learnhub_models::{ApplicationId, AssessmentId, CourseId, PurchaseId, UserId};
use sqlx::PgPool;
use sqlx::types::Json;
use tracing::{debug, instrument};

const USER_COLUMNS: &str =
    "id, name, email, password_hash, role, status, bio, avatar_url, created_at, updated_at";

const APPLICATION_COLUMNS: &str =
    "id, applicant_id, message, status, reviewed_by, reviewed_at, created_at, updated_at";

const COURSE_COLUMNS: &str = "id, educator_id, title, description, thumbnail_url, price, discount, \
     is_published, content, enrolled_students, created_at, updated_at";

const PURCHASE_COLUMNS: &str =
    "id, course_id, user_id, amount, status, order_id, payment_id, created_at, updated_at";

const ASSESSMENT_COLUMNS: &str =
    "id, course_id, student_id, questions, answers, score, created_at, submitted_at";

fn map_unique_violation(err: sqlx::Error, message: &'static str) -> AppError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.is_unique_violation()
    {
        return AppError::validation(anyhow::anyhow!(message));
    }
    AppError::database(err)
}

fn like_pattern(search: Option<&str>) -> Option<String> {
    search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| format!("%{}%", s))
}

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn list_courses_where(
        &self,
        published: Option<bool>,
        educator_id: Option<UserId>,
        filter: &CourseFilterParams,
    ) -> Result<(Vec<Course>, i64), AppError> {
        let search = like_pattern(filter.search.as_deref());
        let predicate = "($1::boolean IS NULL OR is_published = $1) \
             AND ($2::uuid IS NULL OR educator_id = $2) \
             AND ($3::text IS NULL OR title ILIKE $3)";

        let total: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM courses WHERE {predicate}"))
                .bind(published)
                .bind(educator_id)
                .bind(&search)
                .fetch_one(&self.pool)
                .await?;

        let courses = sqlx::query_as::<_, Course>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses WHERE {predicate} \
             ORDER BY created_at DESC LIMIT $4 OFFSET $5"
        ))
        .bind(published)
        .bind(educator_id)
        .bind(&search)
        .bind(filter.pagination.limit())
        .bind(filter.pagination.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok((courses, total))
    }

    async fn settle_purchase(
        &self,
        order_id: &str,
        payment_id: &str,
        completed: bool,
    ) -> Result<Transition<Purchase>, AppError> {
        let mut tx = self.pool.begin().await?;

        let status = if completed {
            PurchaseStatus::Completed
        } else {
            PurchaseStatus::Failed
        };
        let settled = sqlx::query_as::<_, Purchase>(&format!(
            "UPDATE purchases SET status = $3, payment_id = $2, updated_at = NOW() \
             WHERE order_id = $1 AND status = 'pending' RETURNING {PURCHASE_COLUMNS}"
        ))
        .bind(order_id)
        .bind(payment_id)
        .bind(status)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(purchase) = settled else {
            tx.rollback().await?;
            return Ok(match self.find_purchase_by_order(order_id).await? {
                Some(existing) => Transition::AlreadyProcessed(existing),
                None => Transition::NotFound,
            });
        };

        if completed {
            sqlx::query(
                "UPDATE courses SET enrolled_students = array_append(enrolled_students, $1), \
                 updated_at = NOW() WHERE id = $2 AND NOT ($1 = ANY(enrolled_students))",
            )
            .bind(purchase.user_id)
            .bind(purchase.course_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(Transition::Applied(purchase))
    }
}

#[async_trait]
impl IdentityStore for PgStore {
    #[instrument(skip(self, user), fields(email = %user.email))]
    async fn create_user(&self, user: NewUser) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (id, name, email, password_hash, role, status) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {USER_COLUMNS}"
        ))
        .bind(UserId::new())
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role)
        .bind(user.status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, DUPLICATE_EMAIL_MESSAGE))
    }

    async fn find_user(&self, id: UserId) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn list_users(&self, filter: &UserFilterParams) -> Result<(Vec<User>, i64), AppError> {
        let search = like_pattern(filter.search.as_deref());
        let predicate = "($1::user_role IS NULL OR role = $1) \
             AND ($2::user_status IS NULL OR status = $2) \
             AND ($3::text IS NULL OR name ILIKE $3 OR email ILIKE $3)";

        let total: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM users WHERE {predicate}"))
                .bind(filter.role)
                .bind(filter.status)
                .bind(&search)
                .fetch_one(&self.pool)
                .await?;

        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE {predicate} \
             ORDER BY created_at DESC LIMIT $4 OFFSET $5"
        ))
        .bind(filter.role)
        .bind(filter.status)
        .bind(&search)
        .bind(filter.pagination.limit())
        .bind(filter.pagination.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok((users, total))
    }

    #[instrument(skip(self, changes))]
    async fn update_user(
        &self,
        id: UserId,
        changes: UserChanges,
    ) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET \
                name = COALESCE($2, name), \
                email = COALESCE($3, email), \
                role = COALESCE($4, role), \
                status = COALESCE($5, status), \
                bio = COALESCE($6, bio), \
                avatar_url = COALESCE($7, avatar_url), \
                updated_at = NOW() \
             WHERE id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(changes.name)
        .bind(changes.email)
        .bind(changes.role)
        .bind(changes.status)
        .bind(changes.bio)
        .bind(changes.avatar_url)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, DUPLICATE_EMAIL_MESSAGE))
    }

    #[instrument(skip(self))]
    async fn delete_user(&self, id: UserId) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl ApplicationStore for PgStore {
    #[instrument(skip(self, message))]
    async fn create_application(
        &self,
        applicant_id: UserId,
        message: String,
    ) -> Result<EducatorApplication, AppError> {
        sqlx::query_as::<_, EducatorApplication>(&format!(
            "INSERT INTO educator_applications (id, applicant_id, message) \
             VALUES ($1, $2, $3) RETURNING {APPLICATION_COLUMNS}"
        ))
        .bind(ApplicationId::new())
        .bind(applicant_id)
        .bind(message)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, DUPLICATE_APPLICATION_MESSAGE))
    }

    async fn find_application(
        &self,
        id: ApplicationId,
    ) -> Result<Option<EducatorApplication>, AppError> {
        let application = sqlx::query_as::<_, EducatorApplication>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM educator_applications WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(application)
    }

    async fn find_pending_application(
        &self,
        applicant_id: UserId,
    ) -> Result<Option<EducatorApplication>, AppError> {
        let application = sqlx::query_as::<_, EducatorApplication>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM educator_applications \
             WHERE applicant_id = $1 AND status = 'pending'"
        ))
        .bind(applicant_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(application)
    }

    async fn list_applications(
        &self,
        filter: &ApplicationFilterParams,
    ) -> Result<(Vec<EducatorApplication>, i64), AppError> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM educator_applications \
             WHERE ($1::application_status IS NULL OR status = $1)",
        )
        .bind(filter.status)
        .fetch_one(&self.pool)
        .await?;

        let applications = sqlx::query_as::<_, EducatorApplication>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM educator_applications \
             WHERE ($1::application_status IS NULL OR status = $1) \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3"
        ))
        .bind(filter.status)
        .bind(filter.pagination.limit())
        .bind(filter.pagination.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok((applications, total))
    }

    async fn list_applications_for(
        &self,
        applicant_id: UserId,
    ) -> Result<Vec<EducatorApplication>, AppError> {
        let applications = sqlx::query_as::<_, EducatorApplication>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM educator_applications \
             WHERE applicant_id = $1 ORDER BY created_at DESC"
        ))
        .bind(applicant_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(applications)
    }

    #[instrument(skip(self))]
    async fn review_application(
        &self,
        id: ApplicationId,
        reviewer: UserId,
        decision: ReviewDecision,
        reviewed_at: DateTime<Utc>,
    ) -> Result<Transition<EducatorApplication>, AppError> {
        let mut tx = self.pool.begin().await?;

        let reviewed = sqlx::query_as::<_, EducatorApplication>(&format!(
            "UPDATE educator_applications \
             SET status = $2, reviewed_by = $3, reviewed_at = $4, updated_at = NOW() \
             WHERE id = $1 AND status = 'pending' RETURNING {APPLICATION_COLUMNS}"
        ))
        .bind(id)
        .bind(decision.target_status())
        .bind(reviewer)
        .bind(reviewed_at)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(application) = reviewed else {
            tx.rollback().await?;
            debug!(application_id = %id, "Application not pending, nothing to review");
            return Ok(match self.find_application(id).await? {
                Some(existing) => Transition::AlreadyProcessed(existing),
                None => Transition::NotFound,
            });
        };

        if application.status == ApplicationStatus::Approved {
            sqlx::query("UPDATE users SET role = 'educator', updated_at = NOW() WHERE id = $1")
                .bind(application.applicant_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(Transition::Applied(application))
    }

    #[instrument(skip(self, changes))]
    async fn update_application(
        &self,
        id: ApplicationId,
        changes: UpdateApplicationDto,
    ) -> Result<Option<EducatorApplication>, AppError> {
        sqlx::query_as::<_, EducatorApplication>(&format!(
            "UPDATE educator_applications SET \
                status = COALESCE($2, status), \
                message = COALESCE($3, message), \
                updated_at = NOW() \
             WHERE id = $1 RETURNING {APPLICATION_COLUMNS}"
        ))
        .bind(id)
        .bind(changes.status)
        .bind(changes.message)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, DUPLICATE_APPLICATION_MESSAGE))
    }

    async fn delete_application(&self, id: ApplicationId) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM educator_applications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl CourseStore for PgStore {
    #[instrument(skip(self, course), fields(educator_id = %course.educator_id))]
    async fn create_course(&self, course: NewCourse) -> Result<Course, AppError> {
        let created = sqlx::query_as::<_, Course>(&format!(
            "INSERT INTO courses \
                (id, educator_id, title, description, thumbnail_url, price, discount, \
                 is_published, content) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING {COURSE_COLUMNS}"
        ))
        .bind(CourseId::new())
        .bind(course.educator_id)
        .bind(&course.title)
        .bind(&course.description)
        .bind(&course.thumbnail_url)
        .bind(course.price)
        .bind(course.discount)
        .bind(course.is_published)
        .bind(Json(&course.content))
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn find_course(&self, id: CourseId) -> Result<Option<Course>, AppError> {
        let course = sqlx::query_as::<_, Course>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(course)
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
        let courses = sqlx::query_as::<_, Course>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses WHERE $1 = ANY(enrolled_students) \
             ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(courses)
    }

    #[instrument(skip(self, changes))]
    async fn update_course(
        &self,
        id: CourseId,
        changes: CourseChanges,
    ) -> Result<Option<Course>, AppError> {
        let course = sqlx::query_as::<_, Course>(&format!(
            "UPDATE courses SET \
                title = COALESCE($2, title), \
                description = COALESCE($3, description), \
                thumbnail_url = COALESCE($4, thumbnail_url), \
                price = COALESCE($5, price), \
                discount = COALESCE($6, discount), \
                is_published = COALESCE($7, is_published), \
                content = COALESCE($8, content), \
                enrolled_students = COALESCE($9, enrolled_students), \
                updated_at = NOW() \
             WHERE id = $1 RETURNING {COURSE_COLUMNS}"
        ))
        .bind(id)
        .bind(changes.title)
        .bind(changes.description)
        .bind(changes.thumbnail_url)
        .bind(changes.price)
        .bind(changes.discount)
        .bind(changes.is_published)
        .bind(changes.content.map(Json))
        .bind(changes.enrolled_students)
        .fetch_optional(&self.pool)
        .await?;
        Ok(course)
    }

    #[instrument(skip(self))]
    async fn delete_course(&self, id: CourseId) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl PurchaseStore for PgStore {
    #[instrument(skip(self, purchase), fields(order_id = %purchase.order_id))]
    async fn create_purchase(&self, purchase: NewPurchase) -> Result<Purchase, AppError> {
        let created = sqlx::query_as::<_, Purchase>(&format!(
            "INSERT INTO purchases (id, course_id, user_id, amount, order_id) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {PURCHASE_COLUMNS}"
        ))
        .bind(PurchaseId::new())
        .bind(purchase.course_id)
        .bind(purchase.user_id)
        .bind(purchase.amount)
        .bind(&purchase.order_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn find_purchase_by_order(&self, order_id: &str) -> Result<Option<Purchase>, AppError> {
        let purchase = sqlx::query_as::<_, Purchase>(&format!(
            "SELECT {PURCHASE_COLUMNS} FROM purchases WHERE order_id = $1"
        ))
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(purchase)
    }

    #[instrument(skip(self))]
    async fn complete_purchase(
        &self,
        order_id: &str,
        payment_id: &str,
    ) -> Result<Transition<Purchase>, AppError> {
        self.settle_purchase(order_id, payment_id, true).await
    }

    #[instrument(skip(self))]
    async fn fail_purchase(
        &self,
        order_id: &str,
        payment_id: &str,
    ) -> Result<Transition<Purchase>, AppError> {
        self.settle_purchase(order_id, payment_id, false).await
    }

    async fn earnings_for_educator(&self, educator_id: UserId) -> Result<i64, AppError> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(p.amount), 0)::BIGINT FROM purchases p \
             JOIN courses c ON c.id = p.course_id \
             WHERE c.educator_id = $1 AND p.status = 'completed'",
        )
        .bind(educator_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }
}

#[async_trait]
impl AssessmentStore for PgStore {
    #[instrument(skip(self, assessment), fields(course_id = %assessment.course_id))]
    async fn create_assessment(&self, assessment: NewAssessment) -> Result<Assessment, AppError> {
        let created = sqlx::query_as::<_, Assessment>(&format!(
            "INSERT INTO assessments (id, course_id, student_id, questions) \
             VALUES ($1, $2, $3, $4) RETURNING {ASSESSMENT_COLUMNS}"
        ))
        .bind(AssessmentId::new())
        .bind(assessment.course_id)
        .bind(assessment.student_id)
        .bind(Json(&assessment.questions))
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn find_assessment(&self, id: AssessmentId) -> Result<Option<Assessment>, AppError> {
        let assessment = sqlx::query_as::<_, Assessment>(&format!(
            "SELECT {ASSESSMENT_COLUMNS} FROM assessments WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(assessment)
    }

    async fn list_assessments_for(
        &self,
        student_id: UserId,
        course_id: Option<CourseId>,
    ) -> Result<Vec<Assessment>, AppError> {
        let assessments = sqlx::query_as::<_, Assessment>(&format!(
            "SELECT {ASSESSMENT_COLUMNS} FROM assessments \
             WHERE student_id = $1 AND ($2::uuid IS NULL OR course_id = $2) \
             ORDER BY created_at DESC"
        ))
        .bind(student_id)
        .bind(course_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(assessments)
    }

    #[instrument(skip(self, answers))]
    async fn submit_assessment(
        &self,
        id: AssessmentId,
        answers: Vec<String>,
        score: i32,
        submitted_at: DateTime<Utc>,
    ) -> Result<Transition<Assessment>, AppError> {
        let submitted = sqlx::query_as::<_, Assessment>(&format!(
            "UPDATE assessments SET answers = $2, score = $3, submitted_at = $4 \
             WHERE id = $1 AND submitted_at IS NULL RETURNING {ASSESSMENT_COLUMNS}"
        ))
        .bind(id)
        .bind(&answers)
        .bind(score)
        .bind(submitted_at)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(assessment) = submitted {
            return Ok(Transition::Applied(assessment));
        }
        debug!(assessment_id = %id, "Assessment already submitted or missing");
        Ok(match self.find_assessment(id).await? {
            Some(existing) => Transition::AlreadyProcessed(existing),
            None => Transition::NotFound,
        })
    }
}
