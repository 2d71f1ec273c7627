use axum::{
    Router,
    routing::{get, put},
};

use super::controller::{
    admin_delete_course, admin_list_courses, admin_update_course, create_course, dashboard,
    delete_course, get_course, list_courses, my_courses, update_course,
};
use crate::state::AppState;

pub fn init_public_courses_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_courses))
        .route("/{id}", get(get_course))
}

/// Mounted under `/educator` behind the educator gate.
pub fn init_educator_courses_router() -> Router<AppState> {
    Router::new()
        .route("/courses", get(my_courses).post(create_course))
        .route("/courses/{id}", put(update_course).delete(delete_course))
        .route("/dashboard", get(dashboard))
}

pub fn init_admin_courses_router() -> Router<AppState> {
    Router::new()
        .route("/", get(admin_list_courses))
        .route("/{id}", put(admin_update_course).delete(admin_delete_course))
}
