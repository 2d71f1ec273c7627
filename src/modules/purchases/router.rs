use axum::{Router, routing::post};

use super::controller::{purchase_course, verify_payment};
use crate::state::AppState;

/// Mounted under `/courses`.
pub fn init_checkout_router() -> Router<AppState> {
    Router::new().route("/{id}/purchase", post(purchase_course))
}

/// Mounted under `/payments`.
pub fn init_payments_router() -> Router<AppState> {
    Router::new().route("/verify", post(verify_payment))
}
