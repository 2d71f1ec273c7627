//! Token creation and verification.

use chrono::{DateTime, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind as JwtErrorKind,
};
use uuid::Uuid;

use learnhub_config::JwtConfig;
use learnhub_core::AppError;

use crate::claims::Claims;

pub const INVALID_TOKEN_MESSAGE: &str = "Invalid token. Please login again.";
pub const EXPIRED_TOKEN_MESSAGE: &str = "Token expired. Please login again.";

/// Issues an access token for `subject`, valid for the configured lifetime.
pub fn issue_token(subject: Uuid, jwt_config: &JwtConfig) -> Result<String, AppError> {
    issue_token_at(subject, Utc::now(), jwt_config)
}

/// Issues an access token as if it had been created at `issued_at`.
///
/// Tests use this as a clock injection point to produce expired tokens.
pub fn issue_token_at(
    subject: Uuid,
    issued_at: DateTime<Utc>,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let iat = issued_at.timestamp().max(0);
    let exp = (iat + jwt_config.token_lifetime).max(0);

    let claims = Claims {
        sub: subject,
        exp: exp as usize,
        iat: iat as usize,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
}

/// Verifies signature and expiry, returning the embedded claims.
///
/// Expiry is checked with zero leeway.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        JwtErrorKind::ExpiredSignature => AppError::expired_token(EXPIRED_TOKEN_MESSAGE),
        _ => AppError::invalid_token(INVALID_TOKEN_MESSAGE),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use learnhub_core::ErrorKind;

    fn get_test_jwt_config() -> JwtConfig {
        JwtConfig::new("test-secret-key-at-least-32-characters-long")
    }

    #[test]
    fn test_round_trip() {
        let config = get_test_jwt_config();
        let user_id = Uuid::new_v4();

        let token = issue_token(user_id, &config).unwrap();
        let claims = verify_token(&token, &config).unwrap();

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.exp - claims.iat, 604_800);
    }

    #[test]
    fn test_verify_garbage_is_invalid() {
        let config = get_test_jwt_config();
        let err = verify_token("invalid-token", &config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidToken);
    }

    #[test]
    fn test_verify_wrong_secret_is_invalid() {
        let token = issue_token(Uuid::new_v4(), &get_test_jwt_config()).unwrap();
        let wrong_config = JwtConfig::new("different-secret-key-at-least-32-characters");

        let err = verify_token(&token, &wrong_config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidToken);
        assert_eq!(err.message(), INVALID_TOKEN_MESSAGE);
    }

    #[test]
    fn test_verify_expired_token() {
        let config = get_test_jwt_config();
        let issued_at = Utc::now() - Duration::days(8);

        let token = issue_token_at(Uuid::new_v4(), issued_at, &config).unwrap();
        let err = verify_token(&token, &config).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ExpiredToken);
        assert_eq!(err.message(), EXPIRED_TOKEN_MESSAGE);
    }

    #[test]
    fn test_token_valid_until_expiry() {
        let config = get_test_jwt_config();
        let issued_at = Utc::now() - Duration::days(6);
        let user_id = Uuid::new_v4();

        let token = issue_token_at(user_id, issued_at, &config).unwrap();
        assert_eq!(verify_token(&token, &config).unwrap().sub, user_id);
    }

    #[test]
    fn test_zero_lifetime_expires_immediately() {
        let mut config = get_test_jwt_config();
        config.token_lifetime = -1;

        let token = issue_token(Uuid::new_v4(), &config).unwrap();
        let err = verify_token(&token, &config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ExpiredToken);
    }

    #[test]
    fn test_tampered_payload_is_invalid() {
        let config = get_test_jwt_config();
        let token = issue_token(Uuid::new_v4(), &config).unwrap();
        let other = issue_token(Uuid::new_v4(), &config).unwrap();

        let parts: Vec<&str> = token.split('.').collect();
        let other_parts: Vec<&str> = other.split('.').collect();
        let forged = format!("{}.{}.{}", parts[0], other_parts[1], parts[2]);

        let err = verify_token(&forged, &config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidToken);
    }
}
