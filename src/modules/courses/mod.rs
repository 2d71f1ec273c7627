pub mod controller;
pub mod router;
pub mod service;

pub use router::{
    init_admin_courses_router, init_educator_courses_router, init_public_courses_router,
};
