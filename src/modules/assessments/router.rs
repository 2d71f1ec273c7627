use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{course_tests, generate_test, get_test, my_tests, submit_test};
use crate::state::AppState;

/// Mounted under `/courses`.
pub fn init_course_tests_router() -> Router<AppState> {
    Router::new().route("/{id}/tests", get(course_tests).post(generate_test))
}

/// Mounted under `/tests`.
pub fn init_tests_router() -> Router<AppState> {
    Router::new()
        .route("/", get(my_tests))
        .route("/{id}", get(get_test))
        .route("/{id}/submit", post(submit_test))
}
