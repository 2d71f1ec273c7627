//! Application error type with HTTP response conversion.
//!
//! Every failure leaves the API as `{"success": false, "message": "..."}`.
//! The HTTP status depends on where the failure was raised:
//!
//! - Gate failures (authentication, role checks) carry real status codes
//!   (401, 403, 404).
//! - Business-rule failures raised inside handlers (missing resource,
//!   ownership mismatch, conflicts, validation) answer `200 OK` and rely on
//!   the `success` flag. Existing clients depend on this envelope.
//! - Malformed request bodies are rejected with 400 and storage failures
//!   with 500.

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use utoipa::ToSchema;

/// Classification of an [`AppError`], independent of its HTTP rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No credential was presented.
    Unauthenticated,
    /// Signature mismatch, malformed token or unusable subject.
    InvalidToken,
    /// Token is past its expiry.
    ExpiredToken,
    /// Token is valid but its subject no longer resolves.
    IdentityNotFound,
    /// Role or ownership mismatch.
    Forbidden,
    /// Target resource is missing.
    ResourceNotFound,
    /// Operation blocked by the current state of the resource.
    Conflict,
    /// Input failed a data-quality or business rule.
    ValidationFailure,
    /// Request could not be parsed.
    BadRequest,
    Internal,
}

#[derive(Debug)]
pub struct AppError {
    pub kind: ErrorKind,
    pub status: StatusCode,
    pub error: Error,
}

/// Failure body, documented for OpenAPI.
#[derive(Debug, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

impl AppError {
    pub fn new<E>(kind: ErrorKind, status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            kind,
            status,
            error: err.into(),
        }
    }

    // Gate failures: real status codes.

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::gate(ErrorKind::Unauthenticated, StatusCode::UNAUTHORIZED, message)
    }

    pub fn invalid_token(message: impl Into<String>) -> Self {
        Self::gate(ErrorKind::InvalidToken, StatusCode::UNAUTHORIZED, message)
    }

    pub fn expired_token(message: impl Into<String>) -> Self {
        Self::gate(ErrorKind::ExpiredToken, StatusCode::UNAUTHORIZED, message)
    }

    pub fn identity_not_found(message: impl Into<String>) -> Self {
        Self::gate(ErrorKind::IdentityNotFound, StatusCode::NOT_FOUND, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::gate(ErrorKind::Forbidden, StatusCode::FORBIDDEN, message)
    }

    // Business-rule failures: 200 with `success: false`.

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::ResourceNotFound, StatusCode::OK, err)
    }

    /// Ownership mismatch detected inside a handler.
    pub fn not_owner(message: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::Forbidden,
            StatusCode::OK,
            anyhow::anyhow!(message.into()),
        )
    }

    pub fn conflict<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Conflict, StatusCode::OK, err)
    }

    pub fn validation<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::ValidationFailure, StatusCode::OK, err)
    }

    // Framework and infrastructure failures.

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::BadRequest, StatusCode::BAD_REQUEST, err)
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Internal, StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::internal(anyhow::anyhow!(message.into()))
    }

    pub fn database<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::internal(err)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> String {
        self.error.to_string()
    }

    fn gate(kind: ErrorKind, status: StatusCode, message: impl Into<String>) -> Self {
        Self::new(kind, status, anyhow::anyhow!(message.into()))
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.error)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = if self.status.is_server_error() {
            tracing::error!(error = ?self.error, "Request failed with internal error");
            "Internal server error".to_string()
        } else {
            self.error.to_string()
        };

        let body = Json(json!({
            "success": false,
            "message": message,
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}
