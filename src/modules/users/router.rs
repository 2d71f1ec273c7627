use axum::{
    Router,
    routing::{get, put},
};

use super::controller::{
    create_user, delete_user, enrolled_courses, get_user, list_users, update_profile, update_user,
};
use crate::state::AppState;

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/profile", put(update_profile))
        .route("/enrolled-courses", get(enrolled_courses))
}

pub fn init_admin_users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/{id}", get(get_user).put(update_user).delete(delete_user))
}
