// personal-task/src/domain/mod.rs
pub mod category_model;
pub mod project_model;
pub mod project_status;
pub mod task_model;
pub mod task_priority;
pub mod task_status;
