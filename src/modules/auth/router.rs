use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{login, me, register};
use crate::state::AppState;

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Routes that need a resolved identity.
pub fn init_session_router() -> Router<AppState> {
    Router::new().route("/me", get(me))
}
