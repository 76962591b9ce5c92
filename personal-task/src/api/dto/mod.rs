// personal-task/src/api/dto/mod.rs
pub mod stats_dto;
pub mod stats_query_dto;
