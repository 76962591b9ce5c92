// personal-task/src/repository/mod.rs
pub mod stats_query;
pub mod stats_repository;
