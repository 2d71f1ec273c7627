//! # LearnHub DB
//!
//! Storage ports and their adapters.
//!
//! - [`ports`] defines one trait per aggregate plus the [`Stores`] bundle
//!   held in application state.
//! - [`PgStore`] is the PostgreSQL adapter.
//! - [`MemoryStore`] keeps everything in process and backs the test suite.

pub mod memory;
pub mod ports;
pub mod postgres;

use std::env;
use std::sync::Arc;

pub use memory::MemoryStore;
pub use ports::{
    ApplicationStore, AssessmentStore, CourseStore, DUPLICATE_APPLICATION_MESSAGE,
    DUPLICATE_EMAIL_MESSAGE, IdentityStore, PurchaseStore, Stores, Transition,
};
pub use postgres::PgStore;
pub use sqlx::PgPool;

/// Connects to the database named by `DATABASE_URL`.
pub async fn init_db_pool() -> anyhow::Result<PgPool> {
    let database_url = env::var("DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await?;
    Ok(pool)
}

/// Applies the migrations embedded from the workspace `migrations/` directory.
pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("../../migrations").run(pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}

impl Stores {
    pub fn postgres(pool: PgPool) -> Self {
        Self::from_adapter(Arc::new(PgStore::new(pool)))
    }

    pub fn in_memory() -> Self {
        Self::from_adapter(Arc::new(MemoryStore::new()))
    }
}
