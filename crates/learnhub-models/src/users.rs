//! Identity models and DTOs.
//!
//! An identity carries exactly one [`Role`]. Registration always produces a
//! plain `user`; only admins can hand out other roles.

use crate::ids::UserId;
use learnhub_core::{PaginationMeta, PaginationParams};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Educator,
    Admin,
}

impl Role {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Educator => "educator",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "user_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
}

/// A stored identity.
///
/// `password_hash` is loaded from storage but never leaves the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub role: Role,
    pub status: UserStatus,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }
}

/// Emails are compared and stored lower-cased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Fields needed to insert an identity. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub status: UserStatus,
}

/// Partial update applied by the identity store. `None` leaves a field alone.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
    pub status: Option<UserStatus>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

/// Admin-side identity creation.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUserDto {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    /// Defaults to `user`
    pub role: Option<Role>,
    pub status: Option<UserStatus>,
}

/// Admin-side identity edit. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct AdminUpdateUserDto {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    pub role: Option<Role>,
    pub status: Option<UserStatus>,
    #[validate(length(max = 2000))]
    pub bio: Option<String>,
    #[validate(url(message = "Invalid avatar URL"))]
    pub avatar_url: Option<String>,
}

impl From<AdminUpdateUserDto> for UserChanges {
    fn from(dto: AdminUpdateUserDto) -> Self {
        Self {
            name: dto.name,
            email: dto.email.as_deref().map(normalize_email),
            role: dto.role,
            status: dto.status,
            bio: dto.bio,
            avatar_url: dto.avatar_url,
        }
    }
}

/// Self-service profile edit. Role and status are not reachable from here.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileDto {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(max = 2000))]
    pub bio: Option<String>,
    #[validate(url(message = "Invalid avatar URL"))]
    pub avatar_url: Option<String>,
}

impl From<UpdateProfileDto> for UserChanges {
    fn from(dto: UpdateProfileDto) -> Self {
        Self {
            name: dto.name,
            bio: dto.bio,
            avatar_url: dto.avatar_url,
            ..Default::default()
        }
    }
}

/// Query parameters for the admin identity listing.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserFilterParams {
    pub role: Option<Role>,
    pub status: Option<UserStatus>,
    /// Case-insensitive match on name or email
    pub search: Option<String>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    pub success: bool,
    pub user: User,
}

impl UserResponse {
    pub fn new(user: User) -> Self {
        Self {
            success: true,
            user,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UsersResponse {
    pub success: bool,
    pub users: Vec<User>,
    pub meta: PaginationMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        let now = chrono::Utc::now();
        User {
            id: UserId::new(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password_hash: "$2b$04$secret".to_string(),
            role: Role::Educator,
            status: UserStatus::Active,
            bio: None,
            avatar_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_password_hash_is_never_serialized() {
        let json = serde_json::to_value(sample_user()).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["role"], "educator");
        assert_eq!(json["status"], "active");
    }

    #[test]
    fn test_role_wire_values() {
        let role: Role = serde_json::from_str(r#""admin""#).unwrap();
        assert_eq!(role, Role::Admin);
        assert!(serde_json::from_str::<Role>(r#""superuser""#).is_err());
        assert_eq!(Role::User.to_string(), "user");
    }

    #[test]
    fn test_base_role_is_spelled_user() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), r#""user""#);
        assert!(serde_json::from_str::<Role>(r#""plain-user""#).is_err());
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Ada@Example.COM "), "ada@example.com");
    }

    #[test]
    fn test_profile_update_cannot_change_role() {
        let dto = UpdateProfileDto {
            name: Some("New".into()),
            ..Default::default()
        };
        let changes: UserChanges = dto.into();
        assert!(changes.role.is_none());
        assert!(changes.status.is_none());
        assert_eq!(changes.name.as_deref(), Some("New"));
    }
}
