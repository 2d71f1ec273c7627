use tracing::warn;

/// Lifetime of every access token: 7 days. Deliberately not configurable.
pub const TOKEN_LIFETIME_SECS: i64 = 7 * 24 * 60 * 60;

const DEV_SECRET: &str = "learnhub-dev-secret-change-in-production";

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub token_lifetime: i64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            token_lifetime: TOKEN_LIFETIME_SECS,
        }
    }

    pub fn from_env() -> Self {
        let secret = crate::env_or("JWT_SECRET", DEV_SECRET);
        if secret == DEV_SECRET {
            warn!("JWT_SECRET not set, using the development secret");
        }
        Self::new(secret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifetime_is_seven_days() {
        let config = JwtConfig::new("s");
        assert_eq!(config.token_lifetime, 604_800);
    }
}
