//! Role authorization gate.
//!
//! Runs after authentication, reloads the identity on every request and
//! checks its role against the route's permitted set. On success the loaded
//! identity is stored as [`CurrentUser`] so handlers need no second lookup.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};
use learnhub_core::AppError;
use learnhub_models::users::{Role, User};
use learnhub_observability::{GateRejection, track_gate_rejection};
use tracing::warn;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;

pub const ANY_ROLE: &[Role] = &[Role::User, Role::Educator, Role::Admin];

/// Identity loaded by the role gate for the current request.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(|| AppError::internal_error("CurrentUser read on a route without a role gate"))
    }
}

fn describe(roles: &[Role]) -> String {
    roles.iter().map(Role::as_str).collect::<Vec<_>>().join(", ")
}

/// Middleware body shared by every role gate.
///
/// ```rust,ignore
/// Router::new()
///     .route("/reports", get(handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), |state, req, next| {
///         require_roles(state, req, next, &[Role::Admin, Role::Educator])
///     }));
/// ```
pub async fn require_roles(
    State(state): State<AppState>,
    req: Request,
    next: Next,
    allowed_roles: &'static [Role],
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await?;

    let Some(user) = state.stores.identities.find_user(auth_user.subject_id).await? else {
        warn!(
            reason = "identity_not_found",
            user_id = %auth_user.subject_id,
            "Request rejected by role gate"
        );
        track_gate_rejection(GateRejection::IdentityNotFound);
        return Err(AppError::identity_not_found("User not found"));
    };

    if !allowed_roles.contains(&user.role) {
        warn!(
            reason = "forbidden",
            user_id = %user.id,
            role = %user.role,
            "Request rejected by role gate"
        );
        track_gate_rejection(GateRejection::Forbidden);
        return Err(AppError::forbidden(format!(
            "Access denied. Required role: {}",
            describe(allowed_roles)
        )));
    }

    parts.extensions.insert(CurrentUser(user));
    Ok(next.run(Request::from_parts(parts, body)).await)
}

async fn gate(state: AppState, req: Request, next: Next, roles: &'static [Role]) -> Response {
    match require_roles(State(state), req, next, roles).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

/// Any authenticated identity that still exists.
pub async fn require_identity(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    gate(state, req, next, ANY_ROLE).await
}

pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    gate(state, req, next, &[Role::Admin]).await
}

pub async fn require_educator(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    gate(state, req, next, &[Role::Educator]).await
}

/// Plain users only; educators and admins are turned away.
pub async fn require_user(State(state): State<AppState>, req: Request, next: Next) -> Response {
    gate(state, req, next, &[Role::User]).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_roles() {
        assert_eq!(describe(&[Role::Admin]), "admin");
        assert_eq!(describe(ANY_ROLE), "user, educator, admin");
    }
}
