// personal-task/src/api/handlers/stats_handler.rs

use crate::api::dto::stats_dto::{
    CategoryStatsDto, DailyStatsDto, MonthlyReportDto, OverviewStatsDto, ProductivityStatsDto,
    ProjectStatsDto, WeeklyStatsDto,
};
use crate::api::dto::stats_query_dto::{DailyStatsQuery, MonthlyStatsQuery, WeeklyStatsQuery};
use crate::api::AppState;
use crate::error::AppResult;
use crate::middleware::auth::{jwt_auth_middleware, AuthenticatedUser};
use crate::types::ApiResponse;
use axum::{
    extract::{Path, Query, State},
    middleware::from_fn_with_state,
    routing::get,
    Router,
};
use uuid::Uuid;

// --- Handler Functions ---

pub async fn get_overview_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> AppResult<ApiResponse<OverviewStatsDto>> {
    let stats = app_state.stats_service.overview(user.user_id()).await?;
    Ok(ApiResponse::success(stats))
}

pub async fn get_daily_stats_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<DailyStatsQuery>,
) -> AppResult<ApiResponse<Vec<DailyStatsDto>>> {
    let stats = app_state
        .stats_service
        .daily(user.user_id(), query.days(), app_state.clock.now())
        .await?;
    Ok(ApiResponse::success(stats))
}

pub async fn get_weekly_stats_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<WeeklyStatsQuery>,
) -> AppResult<ApiResponse<Vec<WeeklyStatsDto>>> {
    let stats = app_state
        .stats_service
        .weekly(user.user_id(), query.weeks(), app_state.clock.now())
        .await?;
    Ok(ApiResponse::success(stats))
}

pub async fn get_productivity_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> AppResult<ApiResponse<ProductivityStatsDto>> {
    let stats = app_state
        .stats_service
        .productivity(user.user_id(), app_state.clock.now())
        .await?;
    Ok(ApiResponse::success(stats))
}

pub async fn get_monthly_report_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<MonthlyStatsQuery>,
) -> AppResult<ApiResponse<MonthlyReportDto>> {
    let report = app_state
        .stats_service
        .monthly(user.user_id(), query.month(), app_state.clock.now())
        .await?;
    Ok(ApiResponse::success(report))
}

pub async fn get_category_stats_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(category_id): Path<Uuid>,
) -> AppResult<ApiResponse<CategoryStatsDto>> {
    let stats = app_state
        .stats_service
        .category_detail(user.user_id(), category_id)
        .await?;
    Ok(ApiResponse::success(stats))
}

pub async fn get_project_stats_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(project_id): Path<Uuid>,
) -> AppResult<ApiResponse<ProjectStatsDto>> {
    let stats = app_state
        .stats_service
        .project_detail(user.user_id(), project_id)
        .await?;
    Ok(ApiResponse::success(stats))
}

/// `/api/stats` 以下のルーター（すべて認証必須）
pub fn stats_router(app_state: AppState) -> Router {
    Router::new()
        .route("/overview", get(get_overview_handler))
        .route("/daily", get(get_daily_stats_handler))
        .route("/weekly", get(get_weekly_stats_handler))
        .route("/productivity", get(get_productivity_handler))
        .route("/monthly", get(get_monthly_report_handler))
        .route("/categories/{id}", get(get_category_stats_handler))
        .route("/projects/{id}", get(get_project_stats_handler))
        .route_layer(from_fn_with_state(
            app_state.jwt_manager.clone(),
            jwt_auth_middleware,
        ))
        .with_state(app_state)
}
