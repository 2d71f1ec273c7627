//! Fake identities.

use super::models::SEED_EMAIL_DOMAIN;
use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};
use learnhub_db::Stores;
use learnhub_models::users::{NewUser, Role, User, UserStatus};
use std::time::Instant;

pub fn generate_users(role: Role, count: usize, password_hash: &str) -> Vec<NewUser> {
    (0..count)
        .map(|idx| {
            let first_name: String = FirstName().fake();
            let last_name: String = LastName().fake();
            NewUser {
                email: format!(
                    "{}.{}+{}{}@{}",
                    first_name.to_lowercase(),
                    last_name.to_lowercase(),
                    role,
                    idx,
                    SEED_EMAIL_DOMAIN
                ),
                name: format!("{} {}", first_name, last_name),
                password_hash: password_hash.to_string(),
                role,
                status: UserStatus::Active,
            }
        })
        .collect()
}

pub async fn seed_users(
    stores: &Stores,
    role: Role,
    count: usize,
    password_hash: &str,
) -> anyhow::Result<Vec<User>> {
    let start_time = Instant::now();
    println!("👤 Seeding {} {} accounts...", count, role);

    let mut created = Vec::with_capacity(count);
    for user in generate_users(role, count, password_hash) {
        let user = stores
            .identities
            .create_user(user)
            .await
            .map_err(|e| anyhow::anyhow!(e.message()))?;
        created.push(user);
    }

    println!(
        "   ✓ Created {} {} accounts in {:?}",
        created.len(),
        role,
        start_time.elapsed()
    );
    Ok(created)
}
