//! Request gates and authorization helpers.
//!
//! - [`auth`]: token verification, the [`auth::AuthUser`] extractor
//! - [`role`]: identity reload and role check, the [`role::CurrentUser`] extractor
//! - [`policy`]: per-route ownership policy and deletion guard
//!
//! Gates short-circuit with real status codes (401, 403, 404). Ownership
//! and deletion-guard failures happen inside handlers and use the 200
//! envelope like every other business rule.

pub mod auth;
pub mod policy;
pub mod role;
