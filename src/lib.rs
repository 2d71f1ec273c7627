//! # LearnHub API
//!
//! REST backend for a learning platform built with Axum and PostgreSQL.
//! Plain users browse and buy courses and may apply to become educators,
//! educators author the courses they own, and admins manage identities,
//! applications and every course.
//!
//! ## Layout
//!
//! ```text
//! src/
//! ├── middleware/       # Authentication gate, role gates, ownership policy
//! ├── modules/          # Feature modules
//! │   ├── auth/         # Register, login, current identity
//! │   ├── users/        # Profile, enrollments, admin identity management
//! │   ├── applications/ # Educator application workflow
//! │   ├── courses/      # Catalogue, authoring, dashboard, admin courses
//! │   ├── purchases/    # Checkout and payment verification
//! │   └── assessments/  # Generated course tests
//! └── utils/            # Payment signatures
//! ```
//!
//! Each feature module has a `controller.rs` (handlers), a `service.rs`
//! (business rules over the [`learnhub_db::Stores`] ports) and a
//! `router.rs`. Entities and DTOs live in the `learnhub-models` crate.
//!
//! ## Access control
//!
//! 1. [`middleware::auth`] verifies the bearer token and attaches the subject.
//! 2. [`middleware::role`] reloads the identity on every request and checks
//!    its role against the route's permitted set.
//! 3. [`middleware::policy`] decides ownership inside handlers, per route.
//!
//! Gate failures answer 401/403/404. Business-rule failures answer 200 with
//! `{"success": false, "message": ...}`.
//!
//! ## API documentation
//!
//! - Swagger UI: `http://localhost:3000/swagger-ui`
//! - Scalar: `http://localhost:3000/scalar`

pub mod docs;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod utils;
pub mod validator;

// Re-export workspace crates for convenience
pub use learnhub_auth;
pub use learnhub_config;
pub use learnhub_core;
pub use learnhub_db;
pub use learnhub_models;
