// personal-task/src/api/handlers/system_handler.rs

use crate::types::ApiResponse;
use axum::{routing::get, Router};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

pub async fn health_handler() -> ApiResponse<HealthResponse> {
    ApiResponse::success(HealthResponse {
        status: "ok".to_string(),
        message: "personal-task is running".to_string(),
    })
}

pub fn system_router() -> Router {
    Router::new().route("/health", get(health_handler))
}
