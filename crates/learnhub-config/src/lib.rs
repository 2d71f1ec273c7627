//! # LearnHub Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`jwt`]: Token signing configuration
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`server`]: Bind address
//! - [`password`]: bcrypt work factor
//! - [`payment`]: Payment gateway credentials used for signature checks
//! - [`assessment`]: Course test generation
//!
//! # Example
//!
//! ```ignore
//! use learnhub_config::{JwtConfig, CorsConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let cors_config = CorsConfig::from_env();
//! ```

pub mod assessment;
pub mod cors;
pub mod jwt;
pub mod password;
pub mod payment;
pub mod server;

pub use assessment::AssessmentConfig;
pub use cors::CorsConfig;
pub use jwt::{JwtConfig, TOKEN_LIFETIME_SECS};
pub use password::PasswordConfig;
pub use payment::PaymentConfig;
pub use server::ServerConfig;

pub(crate) fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
