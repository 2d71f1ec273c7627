#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{DateTime, Utc};
use http_body_util::BodyExt;
use learnhub::modules::assessments::generator::GeneratorError;
use learnhub::modules::assessments::{OutlineGenerator, TestGenerator, TestPrompt};
use learnhub::router::init_router;
use learnhub::state::AppState;
use learnhub_auth::{issue_token, issue_token_at};
use learnhub_config::{AssessmentConfig, CorsConfig, JwtConfig, PasswordConfig, PaymentConfig};
use learnhub_core::hash_password;
use learnhub_core::password::MIN_COST;
use learnhub_db::Stores;
use learnhub_models::courses::{
    ChapterInput, Course, CourseChanges, LectureInput, NewCourse, build_content,
};
use learnhub_models::users::{NewUser, Role, UserStatus};
use learnhub_models::UserId;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_JWT_SECRET: &str = "test-secret-key-at-least-32-characters-long";
pub const TEST_PAYMENT_SECRET: &str = "test-payment-secret";
pub const TEST_PASSWORD: &str = "password123";
pub const TEST_QUESTION_COUNT: usize = 3;

/// Generator that answers every prompt with a fixed reply.
pub struct ScriptedGenerator(pub String);

#[async_trait]
impl TestGenerator for ScriptedGenerator {
    async fn generate(&self, _prompt: &TestPrompt) -> Result<String, GeneratorError> {
        Ok(self.0.clone())
    }
}

/// Generator whose upstream is always down.
pub struct FailingGenerator;

#[async_trait]
impl TestGenerator for FailingGenerator {
    async fn generate(&self, _prompt: &TestPrompt) -> Result<String, GeneratorError> {
        Err(GeneratorError::Upstream {
            status: 503,
            body: "unavailable".to_string(),
        })
    }
}

pub struct TestUser {
    pub id: UserId,
    pub email: String,
    pub password: String,
    pub token: String,
}

/// Router over a fresh in-memory store, plus direct store access for setup
/// and assertions.
pub struct TestApp {
    pub router: Router,
    pub stores: Stores,
    pub jwt_config: JwtConfig,
    pub payment_config: PaymentConfig,
}

/// State over a fresh in-memory store with fixed secrets and the cheapest
/// bcrypt cost.
pub fn test_state() -> AppState {
    AppState {
        stores: Stores::in_memory(),
        jwt_config: JwtConfig::new(TEST_JWT_SECRET),
        password_config: PasswordConfig { cost: MIN_COST },
        payment_config: PaymentConfig {
            key_id: "key_test_learnhub".to_string(),
            key_secret: TEST_PAYMENT_SECRET.to_string(),
            currency: "INR".to_string(),
        },
        cors_config: CorsConfig::parse("http://localhost:3000"),
        assessment_config: AssessmentConfig {
            question_count: TEST_QUESTION_COUNT,
            ..Default::default()
        },
        test_generator: Arc::new(OutlineGenerator),
        metrics: None,
    }
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_router(test_state(), init_router)
    }

    /// Default router, with tests produced by `generator`.
    pub fn with_generator(generator: impl TestGenerator + 'static) -> Self {
        let state = AppState {
            test_generator: Arc::new(generator),
            ..test_state()
        };
        Self::with_router(state, init_router)
    }

    /// Wraps a custom router built over the same kind of state.
    pub fn with_router(state: AppState, build: impl FnOnce(AppState) -> Router) -> Self {
        let stores = state.stores.clone();
        let jwt_config = state.jwt_config.clone();
        let payment_config = state.payment_config.clone();

        Self {
            router: build(state),
            stores,
            jwt_config,
            payment_config,
        }
    }

    pub async fn create_user(&self, role: Role) -> TestUser {
        let email = generate_unique_email();
        let user = self
            .stores
            .identities
            .create_user(NewUser {
                name: "Test User".to_string(),
                email: email.clone(),
                password_hash: hash_password(TEST_PASSWORD, MIN_COST).unwrap(),
                role,
                status: UserStatus::Active,
            })
            .await
            .unwrap();

        TestUser {
            id: user.id,
            email,
            password: TEST_PASSWORD.to_string(),
            token: self.token_for(user.id),
        }
    }

    pub fn token_for(&self, id: UserId) -> String {
        issue_token(id.into_inner(), &self.jwt_config).unwrap()
    }

    pub fn token_issued_at(&self, id: UserId, issued_at: DateTime<Utc>) -> String {
        issue_token_at(id.into_inner(), issued_at, &self.jwt_config).unwrap()
    }

    /// Published course with one free preview lecture and one paid lecture.
    pub async fn create_course(&self, educator_id: UserId, price: i64, discount: i32) -> Course {
        let content = build_content(vec![ChapterInput {
            title: "Getting started".to_string(),
            lectures: vec![
                LectureInput {
                    title: "Welcome".to_string(),
                    duration_minutes: 5,
                    url: "https://videos.example.com/welcome".to_string(),
                    is_preview_free: true,
                },
                LectureInput {
                    title: "Deep dive".to_string(),
                    duration_minutes: 40,
                    url: "https://videos.example.com/deep-dive".to_string(),
                    is_preview_free: false,
                },
            ],
        }]);

        self.stores
            .courses
            .create_course(NewCourse {
                educator_id,
                title: "Rust for the Web".to_string(),
                description: "Build APIs with Axum".to_string(),
                thumbnail_url: None,
                price,
                discount,
                is_published: true,
                content,
            })
            .await
            .unwrap()
    }

    pub async fn enroll(&self, course: &Course, student_id: UserId) -> Course {
        let mut enrolled = course.enrolled_students.clone();
        enrolled.push(student_id);
        self.stores
            .courses
            .update_course(
                course.id,
                CourseChanges {
                    enrolled_students: Some(enrolled),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap()
    }

    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }

        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request("GET", uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request("POST", uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request("PUT", uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request("DELETE", uri, token, None).await
    }
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

/// A 25-character application message.
pub fn application_message() -> &'static str {
    "I want to teach Rust here"
}
