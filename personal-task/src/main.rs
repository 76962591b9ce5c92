// src/main.rs
use personal_task::api::{app_router, AppState};
use personal_task::config::AppConfig;
use personal_task::db::{create_db_pool, run_migrations};
use personal_task::repository::stats_repository::StatsRepository;
use personal_task::service::clock::SystemClock;
use personal_task::service::stats_service::StatsService;
use personal_task::utils::jwt::JwtManager;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // トレーシングの設定
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "personal_task=info,tower_http=info".into()),
        )
        .with(fmt::layer())
        .init();

    tracing::info!("Starting personal-task server...");

    // 設定を読み込む
    let app_config = Arc::new(AppConfig::from_env()?);
    tracing::info!(
        environment = %app_config.environment,
        report_offset = %app_config.report_offset,
        "Configuration loaded"
    );

    // データベース接続とマイグレーション
    let db_pool = create_db_pool(&app_config).await?;
    tracing::info!("Database connection established");
    run_migrations(&db_pool).await?;
    tracing::info!("Migrations applied");

    let stats_service = Arc::new(StatsService::new(Arc::new(StatsRepository::new(db_pool))));
    let jwt_manager = Arc::new(JwtManager::new(&app_config.jwt_secret)?);
    let clock = Arc::new(SystemClock::new(app_config.report_offset));

    let app_state = AppState::new(stats_service, jwt_manager, clock, app_config.clone());
    let router = app_router(app_state);

    let listener = TcpListener::bind(app_config.server_addr()).await?;
    tracing::info!("Server listening on {}", app_config.server_addr());

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}
