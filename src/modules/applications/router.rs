use axum::{
    Router,
    routing::{get, post, put},
};

use super::controller::{
    apply, approve_application, delete_application, list_applications, my_applications,
    reject_application, update_application,
};
use crate::state::AppState;

/// Applicant side, mounted under `/educator`.
pub fn init_educator_applications_router() -> Router<AppState> {
    Router::new()
        .route("/apply", post(apply))
        .route("/applications", get(my_applications))
}

pub fn init_admin_applications_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_applications))
        .route("/{id}/approve", put(approve_application))
        .route("/{id}/reject", put(reject_application))
        .route(
            "/{id}",
            put(update_application).delete(delete_application),
        )
}
