pub mod dashboard;
pub mod types;
pub mod user;
