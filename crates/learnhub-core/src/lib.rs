//! # LearnHub Core
//!
//! Core types, errors, and utilities shared by every LearnHub crate.
//!
//! - [`errors`]: Application error type and the `success:false` envelope
//! - [`pagination`]: Offset pagination for list endpoints
//! - [`password`]: bcrypt password hashing and verification

pub mod errors;
pub mod pagination;
pub mod password;

pub use errors::{AppError, ErrorKind, ErrorResponse};
pub use pagination::{PaginationMeta, PaginationParams};
pub use password::{hash_password, verify_password};
