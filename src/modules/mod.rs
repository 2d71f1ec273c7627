pub mod applications;
pub mod assessments;
pub mod auth;
pub mod courses;
pub mod purchases;
pub mod users;
