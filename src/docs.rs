use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use learnhub_core::{ErrorResponse, PaginationMeta, PaginationParams};
use learnhub_models::MessageResponse;
use learnhub_models::applications::{
    ApplicationResponse, ApplicationStatus, ApplicationsResponse, ApplyDto, EducatorApplication,
    UpdateApplicationDto,
};
use learnhub_models::assessments::{
    AssessmentResponse, AssessmentView, AssessmentsResponse, Question, QuestionView,
    SubmitAssessmentDto,
};
use learnhub_models::auth::{AuthResponse, LoginRequest, RegisterRequest};
use learnhub_models::courses::{
    AdminUpdateCourseDto, Chapter, ChapterInput, Course, CourseResponse, CourseSummariesResponse,
    CourseSummary, CoursesResponse, CreateCourseDto, DashboardResponse, EducatorDashboard,
    Lecture, LectureInput, UpdateCourseDto,
};
use learnhub_models::purchases::{
    CheckoutResponse, Purchase, PurchaseResponse, PurchaseStatus, VerifyPaymentDto,
};
use learnhub_models::users::{
    AdminUpdateUserDto, CreateUserDto, Role, UpdateProfileDto, User, UserResponse, UserStatus,
    UsersResponse,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register,
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::me,
        crate::modules::users::controller::update_profile,
        crate::modules::users::controller::enrolled_courses,
        crate::modules::users::controller::list_users,
        crate::modules::users::controller::create_user,
        crate::modules::users::controller::get_user,
        crate::modules::users::controller::update_user,
        crate::modules::users::controller::delete_user,
        crate::modules::applications::controller::apply,
        crate::modules::applications::controller::my_applications,
        crate::modules::applications::controller::list_applications,
        crate::modules::applications::controller::approve_application,
        crate::modules::applications::controller::reject_application,
        crate::modules::applications::controller::update_application,
        crate::modules::applications::controller::delete_application,
        crate::modules::courses::controller::list_courses,
        crate::modules::courses::controller::get_course,
        crate::modules::courses::controller::my_courses,
        crate::modules::courses::controller::create_course,
        crate::modules::courses::controller::update_course,
        crate::modules::courses::controller::delete_course,
        crate::modules::courses::controller::dashboard,
        crate::modules::courses::controller::admin_list_courses,
        crate::modules::courses::controller::admin_update_course,
        crate::modules::courses::controller::admin_delete_course,
        crate::modules::purchases::controller::purchase_course,
        crate::modules::purchases::controller::verify_payment,
        crate::modules::assessments::controller::generate_test,
        crate::modules::assessments::controller::course_tests,
        crate::modules::assessments::controller::my_tests,
        crate::modules::assessments::controller::get_test,
        crate::modules::assessments::controller::submit_test,
    ),
    components(
        schemas(
            ErrorResponse,
            MessageResponse,
            PaginationMeta,
            PaginationParams,
            Role,
            UserStatus,
            User,
            UserResponse,
            UsersResponse,
            CreateUserDto,
            AdminUpdateUserDto,
            UpdateProfileDto,
            RegisterRequest,
            LoginRequest,
            AuthResponse,
            ApplicationStatus,
            EducatorApplication,
            ApplyDto,
            UpdateApplicationDto,
            ApplicationResponse,
            ApplicationsResponse,
            Lecture,
            Chapter,
            LectureInput,
            ChapterInput,
            Course,
            CourseSummary,
            CreateCourseDto,
            UpdateCourseDto,
            AdminUpdateCourseDto,
            CourseResponse,
            CoursesResponse,
            CourseSummariesResponse,
            EducatorDashboard,
            DashboardResponse,
            PurchaseStatus,
            Purchase,
            CheckoutResponse,
            VerifyPaymentDto,
            PurchaseResponse,
            Question,
            QuestionView,
            AssessmentView,
            SubmitAssessmentDto,
            AssessmentResponse,
            AssessmentsResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login and the current identity"),
        (name = "Users", description = "Self-service profile and enrollments"),
        (name = "Courses", description = "Public course catalogue"),
        (name = "Purchases", description = "Checkout and payment verification"),
        (name = "Assessments", description = "Generated tests for enrolled students"),
        (name = "Educator Applications", description = "Applying to become an educator"),
        (name = "Educator Courses", description = "Course authoring for educators"),
        (name = "Admin", description = "Identity, application and course administration")
    ),
    info(
        title = "LearnHub API",
        version = "0.1.0",
        description = "Learning platform backend built with Rust, Axum and PostgreSQL, with JWT bearer authentication and role-gated routes.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
