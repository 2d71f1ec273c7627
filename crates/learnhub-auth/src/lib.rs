//! # LearnHub Auth
//!
//! Access token issuing and verification.
//!
//! A token is an HS256 JWT carrying only the identity id (`sub`) and a
//! fixed 7-day expiry. Roles are deliberately absent: authorization always
//! re-reads the identity from storage, so a promotion or demotion applies
//! on the very next request.
//!
//! Verification distinguishes two failures:
//!
//! - [`ErrorKind::InvalidToken`](learnhub_core::ErrorKind::InvalidToken):
//!   bad signature, malformed token or unusable subject
//! - [`ErrorKind::ExpiredToken`](learnhub_core::ErrorKind::ExpiredToken):
//!   past `exp`
//!
//! # Example
//!
//! ```ignore
//! use learnhub_auth::{issue_token, verify_token};
//! use learnhub_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = issue_token(user_id, &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.sub, user_id);
//! ```

pub mod claims;
pub mod jwt;

pub use claims::Claims;
pub use jwt::{issue_token, issue_token_at, verify_token};
