// personal-task/src/api/handlers/mod.rs
pub mod stats_handler;
pub mod system_handler;
