//! Course catalogue and authoring.
//!
//! Self-service routes load the course, apply
//! `AuthorizationPolicy::OwnerOrRole(Admin)` and, on delete, refuse while
//! students are enrolled. Admin routes use `RoleOnly(Admin)` and skip the
//! enrollment guard.

use anyhow::anyhow;
use learnhub_core::pagination::MAX_LIMIT;
use learnhub_core::{AppError, PaginationMeta, PaginationParams};
use learnhub_db::Stores;
use learnhub_models::CourseId;
use learnhub_models::courses::{
    AdminUpdateCourseDto, Course, CourseChanges, CourseFilterParams, CourseSummariesResponse,
    CoursesResponse, CreateCourseDto, EducatorDashboard, UpdateCourseDto,
};
use learnhub_models::users::{Role, User};
use tracing::{info, instrument, warn};

use crate::middleware::policy::{AuthorizationPolicy, ensure_no_dependents};

pub const COURSE_NOT_FOUND_MESSAGE: &str = "Course not found";
pub const ENROLLED_STUDENTS_MESSAGE: &str =
    "Cannot delete a course with enrolled students. Please contact an administrator.";

const SELF_SERVICE: AuthorizationPolicy = AuthorizationPolicy::OwnerOrRole(Role::Admin);
const ADMIN_ONLY: AuthorizationPolicy = AuthorizationPolicy::RoleOnly(Role::Admin);

pub struct CourseService;

impl CourseService {
    async fn load(stores: &Stores, id: CourseId) -> Result<Course, AppError> {
        stores
            .courses
            .find_course(id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!(COURSE_NOT_FOUND_MESSAGE)))
    }

    async fn apply_changes(
        stores: &Stores,
        id: CourseId,
        changes: CourseChanges,
    ) -> Result<Course, AppError> {
        stores
            .courses
            .update_course(id, changes)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!(COURSE_NOT_FOUND_MESSAGE)))
    }

    // Public catalogue

    pub async fn list_published(
        stores: &Stores,
        filters: CourseFilterParams,
    ) -> Result<CourseSummariesResponse, AppError> {
        let (courses, total) = stores.courses.list_published_courses(&filters).await?;
        Ok(CourseSummariesResponse {
            success: true,
            courses: courses.iter().map(Course::summary).collect(),
            meta: PaginationMeta::new(total, &filters.pagination),
        })
    }

    /// Unpublished courses are reported as missing.
    pub async fn get_published(stores: &Stores, id: CourseId) -> Result<Course, AppError> {
        let course = Self::load(stores, id).await?;
        if !course.is_published {
            return Err(AppError::not_found(anyhow!(COURSE_NOT_FOUND_MESSAGE)));
        }
        Ok(course.redacted_preview())
    }

    // Educator self-service

    pub async fn list_own(
        stores: &Stores,
        educator: &User,
        filters: CourseFilterParams,
    ) -> Result<CoursesResponse, AppError> {
        let (courses, total) = stores
            .courses
            .list_courses_by_educator(educator.id, &filters)
            .await?;
        Ok(CoursesResponse {
            success: true,
            courses,
            meta: PaginationMeta::new(total, &filters.pagination),
        })
    }

    #[instrument(skip(stores, educator, dto), fields(educator_id = %educator.id, title = %dto.title))]
    pub async fn create(
        stores: &Stores,
        educator: &User,
        dto: CreateCourseDto,
    ) -> Result<Course, AppError> {
        let course = stores
            .courses
            .create_course(dto.into_new_course(educator.id))
            .await?;

        info!(course_id = %course.id, published = course.is_published, "Course created");
        Ok(course)
    }

    #[instrument(skip(stores, caller, dto), fields(caller_id = %caller.id))]
    pub async fn update_own(
        stores: &Stores,
        caller: &User,
        id: CourseId,
        dto: UpdateCourseDto,
    ) -> Result<Course, AppError> {
        let course = Self::load(stores, id).await?;
        if let Err(err) = SELF_SERVICE.authorize(caller, &course) {
            warn!(course_id = %id, owner_id = %course.educator_id, "Course edit refused");
            return Err(err);
        }

        let course = Self::apply_changes(stores, id, dto.into()).await?;
        info!(course_id = %course.id, "Course updated");
        Ok(course)
    }

    #[instrument(skip(stores, caller), fields(caller_id = %caller.id))]
    pub async fn delete_own(stores: &Stores, caller: &User, id: CourseId) -> Result<(), AppError> {
        let course = Self::load(stores, id).await?;
        if let Err(err) = SELF_SERVICE.authorize(caller, &course) {
            warn!(course_id = %id, owner_id = %course.educator_id, "Course delete refused");
            return Err(err);
        }
        if let Err(err) = ensure_no_dependents(&course, ENROLLED_STUDENTS_MESSAGE) {
            warn!(
                course_id = %id,
                enrolled = course.enrolled_students.len(),
                "Course delete blocked by enrollments"
            );
            return Err(err);
        }

        Self::remove(stores, id).await
    }

    /// Figures over every course the educator owns.
    #[instrument(skip(stores, educator), fields(educator_id = %educator.id))]
    pub async fn dashboard(stores: &Stores, educator: &User) -> Result<EducatorDashboard, AppError> {
        let mut courses = Vec::new();
        let mut offset = 0;
        loop {
            let filters = CourseFilterParams {
                search: None,
                pagination: PaginationParams {
                    limit: Some(MAX_LIMIT),
                    offset: Some(offset),
                },
            };
            let (page, total) = stores
                .courses
                .list_courses_by_educator(educator.id, &filters)
                .await?;
            let fetched = page.len() as i64;
            courses.extend(page);
            offset += fetched;
            if fetched == 0 || offset >= total {
                break;
            }
        }

        let total_earnings = stores.purchases.earnings_for_educator(educator.id).await?;

        Ok(EducatorDashboard {
            total_courses: courses.len(),
            published_courses: courses.iter().filter(|c| c.is_published).count(),
            total_enrollments: courses.iter().map(|c| c.enrolled_students.len()).sum(),
            total_earnings,
        })
    }

    // Admin

    pub async fn list_all(
        stores: &Stores,
        filters: CourseFilterParams,
    ) -> Result<CoursesResponse, AppError> {
        let (courses, total) = stores.courses.list_all_courses(&filters).await?;
        Ok(CoursesResponse {
            success: true,
            courses,
            meta: PaginationMeta::new(total, &filters.pagination),
        })
    }

    #[instrument(skip(stores, admin, dto), fields(admin_id = %admin.id))]
    pub async fn admin_update(
        stores: &Stores,
        admin: &User,
        id: CourseId,
        dto: AdminUpdateCourseDto,
    ) -> Result<Course, AppError> {
        let course = Self::load(stores, id).await?;
        ADMIN_ONLY.authorize(admin, &course)?;

        let course = Self::apply_changes(stores, id, dto.into()).await?;
        info!(course_id = %course.id, enrolled = course.enrolled_students.len(), "Course updated by admin");
        Ok(course)
    }

    /// No enrollment guard on this path.
    #[instrument(skip(stores, admin), fields(admin_id = %admin.id))]
    pub async fn admin_delete(stores: &Stores, admin: &User, id: CourseId) -> Result<(), AppError> {
        let course = Self::load(stores, id).await?;
        ADMIN_ONLY.authorize(admin, &course)?;

        Self::remove(stores, id).await
    }

    async fn remove(stores: &Stores, id: CourseId) -> Result<(), AppError> {
        if !stores.courses.delete_course(id).await? {
            return Err(AppError::not_found(anyhow!(COURSE_NOT_FOUND_MESSAGE)));
        }
        info!(course_id = %id, "Course deleted");
        Ok(())
    }
}
