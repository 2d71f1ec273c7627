use learnhub_core::hash_password;
use learnhub_db::Stores;
use learnhub_models::users::{NewUser, Role, User, UserStatus, normalize_email};

/// Inserts an active admin identity.
pub async fn create_admin(
    stores: &Stores,
    name: &str,
    email: &str,
    password: &str,
    bcrypt_cost: u32,
) -> anyhow::Result<User> {
    if password.len() < 8 {
        anyhow::bail!("Password must be at least 8 characters");
    }

    let password_hash =
        hash_password(password, bcrypt_cost).map_err(|e| anyhow::anyhow!(e.message()))?;
    let admin = stores
        .identities
        .create_user(NewUser {
            name: name.trim().to_string(),
            email: normalize_email(email),
            password_hash,
            role: Role::Admin,
            status: UserStatus::Active,
        })
        .await
        .map_err(|e| anyhow::anyhow!(e.message()))?;

    Ok(admin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use learnhub_core::password::MIN_COST;

    #[tokio::test]
    async fn test_create_admin_normalizes_email() {
        let stores = Stores::in_memory();
        let admin = create_admin(&stores, " Root ", "Root@Example.com", "supersecret", MIN_COST)
            .await
            .unwrap();
        assert_eq!(admin.role, Role::Admin);
        assert_eq!(admin.email, "root@example.com");
        assert_eq!(admin.name, "Root");
    }

    #[tokio::test]
    async fn test_create_admin_rejects_short_password() {
        let stores = Stores::in_memory();
        let result = create_admin(&stores, "Root", "root@example.com", "short", MIN_COST).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_create_admin_rejects_duplicate_email() {
        let stores = Stores::in_memory();
        create_admin(&stores, "Root", "root@example.com", "supersecret", MIN_COST)
            .await
            .unwrap();
        let err = create_admin(&stores, "Root", "root@example.com", "supersecret", MIN_COST)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("already registered"));
    }
}
