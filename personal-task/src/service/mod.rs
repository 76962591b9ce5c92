// personal-task/src/service/mod.rs
pub mod clock;
pub mod metric_aggregator;
pub mod rate;
pub mod stats_service;
pub mod time_bucket;
