pub mod controller;
pub mod generator;
pub mod prompt;
pub mod router;
pub mod service;

pub use generator::{OutlineGenerator, TestGenerator, TestPrompt, init_test_generator};
pub use router::{init_course_tests_router, init_tests_router};
