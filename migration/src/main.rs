// migration/src/main.rs

use migration::Migrator;
use sea_orm_migration::prelude::*;

// マイグレーション CLI は async-std ランタイムで動かす
#[async_std::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
