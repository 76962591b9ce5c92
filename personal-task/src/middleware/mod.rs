// personal-task/src/middleware/mod.rs
pub mod auth;
