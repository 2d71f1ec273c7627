//! Development data seeding.

mod courses;
mod models;
mod users;

pub use courses::{generate_courses, seed_courses};
pub use models::{SEED_EMAIL_DOMAIN, SEED_PASSWORD, SeedConfig};
pub use users::{generate_users, seed_users};

use learnhub_core::{PaginationParams, hash_password};
use learnhub_db::Stores;
use learnhub_models::users::{Role, UserFilterParams};
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub educators: usize,
    pub users: usize,
    pub courses: usize,
}

pub async fn seed_all(
    stores: &Stores,
    config: SeedConfig,
    bcrypt_cost: u32,
) -> anyhow::Result<SeedSummary> {
    let start_time = Instant::now();
    println!("🌱 Starting database seeding...");
    println!("   - Educators: {}", config.educators);
    println!("   - Users: {}", config.users);
    println!("   - Courses: {}", config.total_courses());

    let password_hash =
        hash_password(SEED_PASSWORD, bcrypt_cost).map_err(|e| anyhow::anyhow!(e.message()))?;

    let educators = seed_users(stores, Role::Educator, config.educators, &password_hash).await?;
    let users = seed_users(stores, Role::User, config.users, &password_hash).await?;
    let educator_ids: Vec<_> = educators.iter().map(|e| e.id).collect();
    let courses = seed_courses(stores, &educator_ids, config.courses_per_educator).await?;

    println!("\n✅ Seeding complete in {:?}", start_time.elapsed());
    println!("   Seeded accounts use the password '{}'", SEED_PASSWORD);

    Ok(SeedSummary {
        educators: educators.len(),
        users: users.len(),
        courses: courses.len(),
    })
}

/// Deletes every account on the seed domain. Their courses, applications
/// and purchases go with them.
pub async fn clear_all(stores: &Stores) -> anyhow::Result<u64> {
    let start_time = Instant::now();
    println!("🗑️  Clearing seeded data...");

    let filter = UserFilterParams {
        search: Some(format!("@{}", SEED_EMAIL_DOMAIN)),
        pagination: PaginationParams {
            limit: Some(learnhub_core::pagination::MAX_LIMIT),
            offset: Some(0),
        },
        ..Default::default()
    };

    let mut removed = 0u64;
    loop {
        let (batch, _) = stores
            .identities
            .list_users(&filter)
            .await
            .map_err(|e| anyhow::anyhow!(e.message()))?;

        let mut deleted_in_batch = 0u64;
        for user in batch.iter().filter(|u| u.email.ends_with(SEED_EMAIL_DOMAIN)) {
            if stores
                .identities
                .delete_user(user.id)
                .await
                .map_err(|e| anyhow::anyhow!(e.message()))?
            {
                deleted_in_batch += 1;
            }
        }

        removed += deleted_in_batch;
        if deleted_in_batch == 0 {
            break;
        }
    }

    println!(
        "   ✓ Removed {} seeded accounts in {:?}",
        removed,
        start_time.elapsed()
    );
    Ok(removed)
}
