//! Resource ownership checks.
//!
//! Each route picks its [`AuthorizationPolicy`] explicitly. Self-service
//! routes use `OwnerOrRole(Role::Admin)`; admin routes use
//! `RoleOnly(Role::Admin)` and never look at ownership.

use learnhub_core::AppError;
use learnhub_models::UserId;
use learnhub_models::courses::Course;
use learnhub_models::users::{Role, User};

/// Something with a single owning identity.
pub trait OwnedResource {
    /// Noun used in error messages, e.g. "course".
    const KIND: &'static str;

    fn owner_id(&self) -> UserId;
}

/// Something that must not be deleted by its owner while others depend on it.
pub trait DependentGuard {
    fn has_dependents(&self) -> bool;
}

impl OwnedResource for Course {
    const KIND: &'static str = "course";

    fn owner_id(&self) -> UserId {
        self.educator_id
    }
}

impl DependentGuard for Course {
    fn has_dependents(&self) -> bool {
        !self.enrolled_students.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationPolicy {
    /// The owner, or anyone holding the role.
    OwnerOrRole(Role),
    /// Anyone holding the role; ownership is ignored.
    RoleOnly(Role),
}

impl AuthorizationPolicy {
    pub fn allows<R: OwnedResource>(&self, caller: &User, resource: &R) -> bool {
        match *self {
            Self::OwnerOrRole(role) => caller.id == resource.owner_id() || caller.role == role,
            Self::RoleOnly(role) => caller.role == role,
        }
    }

    /// Ownership mismatch is reported in the 200 envelope as `Forbidden`.
    pub fn authorize<R: OwnedResource>(&self, caller: &User, resource: &R) -> Result<(), AppError> {
        if self.allows(caller, resource) {
            return Ok(());
        }
        Err(AppError::not_owner(format!(
            "You can only edit your own {}",
            R::KIND
        )))
    }
}

/// Fails with `Conflict` when the resource still has dependents.
pub fn ensure_no_dependents<R: DependentGuard>(resource: &R, message: &str) -> Result<(), AppError> {
    if resource.has_dependents() {
        return Err(AppError::conflict(anyhow::anyhow!(message.to_string())));
    }
    Ok(())
}
