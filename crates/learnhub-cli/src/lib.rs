//! # LearnHub CLI
//!
//! Administrative commands and development seeding.
//!
//! Everything goes through the storage ports in `learnhub-db`, so the same
//! code runs against Postgres or the in-memory store.
//!
//! ```ignore
//! use learnhub_cli::seeder::{seed_all, SeedConfig};
//!
//! let stores = Stores::postgres(pool);
//! seed_all(&stores, SeedConfig::default(), 12).await?;
//! ```

pub mod admin;
pub mod seeder;
