pub mod controller;
pub mod router;
pub mod service;

pub use router::{init_admin_applications_router, init_educator_applications_router};
