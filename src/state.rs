use std::sync::Arc;

use learnhub_config::{AssessmentConfig, CorsConfig, JwtConfig, PasswordConfig, PaymentConfig};
use learnhub_db::{Stores, init_db_pool, run_migrations};
use learnhub_observability::PrometheusHandle;

use crate::modules::assessments::{TestGenerator, init_test_generator};

#[derive(Clone)]
pub struct AppState {
    pub stores: Stores,
    pub jwt_config: JwtConfig,
    pub password_config: PasswordConfig,
    pub payment_config: PaymentConfig,
    pub cors_config: CorsConfig,
    pub assessment_config: AssessmentConfig,
    pub test_generator: Arc<dyn TestGenerator>,
    /// `None` when no recorder is installed; `/metrics` then answers 404.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// State over the given stores with every config read from the environment.
    /// Fails when the configured question generator cannot be built.
    pub fn from_env(stores: Stores) -> anyhow::Result<Self> {
        let assessment_config = AssessmentConfig::from_env();
        let test_generator = init_test_generator(&assessment_config)?;
        Ok(Self {
            stores,
            jwt_config: JwtConfig::from_env(),
            password_config: PasswordConfig::from_env(),
            payment_config: PaymentConfig::from_env(),
            cors_config: CorsConfig::from_env(),
            assessment_config,
            test_generator,
            metrics: None,
        })
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Connects to Postgres and applies migrations, or keeps everything in
/// process when `in_memory` is set.
pub async fn init_app_state(in_memory: bool) -> anyhow::Result<AppState> {
    let stores = if in_memory {
        tracing::warn!("Using in-memory storage, data will not survive a restart");
        Stores::in_memory()
    } else {
        let pool = init_db_pool().await?;
        run_migrations(&pool).await?;
        Stores::postgres(pool)
    };

    AppState::from_env(stores)
}
