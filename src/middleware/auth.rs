//! Authentication gate.
//!
//! Reads `Authorization: Bearer <token>`, verifies it and exposes the token
//! subject as [`AuthUser`]. Storage is never consulted here.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use learnhub_auth::{Claims, verify_token};
use learnhub_core::{AppError, ErrorKind};
use learnhub_models::UserId;
use learnhub_observability::{GateRejection, track_gate_rejection};
use tracing::warn;

use crate::state::AppState;

pub const NOT_AUTHORIZED_MESSAGE: &str = "Not authorized. Please login again.";

/// The verified token subject.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub subject_id: UserId,
    pub claims: Claims,
}

impl AuthUser {
    fn authenticate(parts: &Parts, state: &AppState) -> Result<Self, AppError> {
        let Some(token) = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
        else {
            warn!(reason = "missing_token", "Request rejected by authentication gate");
            track_gate_rejection(GateRejection::MissingToken);
            return Err(AppError::unauthenticated(NOT_AUTHORIZED_MESSAGE));
        };

        match verify_token(token, &state.jwt_config) {
            Ok(claims) => Ok(AuthUser {
                subject_id: UserId::from(claims.sub),
                claims,
            }),
            Err(err) => {
                if err.kind() == ErrorKind::ExpiredToken {
                    warn!(reason = "expired_token", "Request rejected by authentication gate");
                    track_gate_rejection(GateRejection::ExpiredToken);
                } else {
                    warn!(reason = "invalid_token", "Request rejected by authentication gate");
                    track_gate_rejection(GateRejection::InvalidToken);
                }
                Err(err)
            }
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(auth_user) = parts.extensions.get::<AuthUser>() {
            return Ok(auth_user.clone());
        }

        let auth_user = Self::authenticate(parts, state)?;
        parts.extensions.insert(auth_user.clone());
        Ok(auth_user)
    }
}

/// Layer form of the gate for routes that only need a valid token.
pub async fn require_auth(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let (mut parts, body) = req.into_parts();
    match AuthUser::from_request_parts(&mut parts, &state).await {
        Ok(_) => next.run(Request::from_parts(parts, body)).await,
        Err(err) => err.into_response(),
    }
}
