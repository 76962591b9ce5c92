// personal-task/src/db.rs
use crate::config::AppConfig;
use migration::Migrator;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use std::time::Duration;

pub type DbPool = DatabaseConnection;

pub async fn create_db_pool(config: &AppConfig) -> Result<DbPool, DbErr> {
    let mut opt = ConnectOptions::new(config.database_url.clone());

    // 接続オプションを設定
    opt.max_connections(config.database.max_connections)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(config.database.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(config.database.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(60))
        .max_lifetime(Duration::from_secs(30 * 60))
        .sqlx_logging(!config.is_production());

    Database::connect(opt).await
}

// 起動時に未適用のマイグレーションを適用する
pub async fn run_migrations(conn: &DbPool) -> Result<(), DbErr> {
    Migrator::up(conn, None).await
}
