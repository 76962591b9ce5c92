// personal-task/src/api/mod.rs
use crate::api::handlers::{stats_handler::stats_router, system_handler::system_router};
use crate::config::AppConfig;
use crate::logging::{inject_request_context, logging_middleware};
use crate::middleware::auth::cors_layer;
use crate::service::clock::Clock;
use crate::service::stats_service::StatsService;
use crate::utils::jwt::JwtManager;
use axum::{middleware::from_fn, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod dto;
pub mod handlers;

/// 統一されたアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub stats_service: Arc<StatsService>,
    pub jwt_manager: Arc<JwtManager>,
    /// レポートの基準時刻
    pub clock: Arc<dyn Clock>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(
        stats_service: Arc<StatsService>,
        jwt_manager: Arc<JwtManager>,
        clock: Arc<dyn Clock>,
        config: Arc<AppConfig>,
    ) -> Self {
        Self {
            stats_service,
            jwt_manager,
            clock,
            config,
        }
    }
}

/// アプリケーション全体のルーター
pub fn app_router(app_state: AppState) -> Router {
    let cors = cors_layer(&app_state.config);

    Router::new()
        .merge(system_router())
        .nest("/api/stats", stats_router(app_state))
        .layer(from_fn(logging_middleware))
        .layer(from_fn(inject_request_context))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
