// migration/src/lib.rs
pub use sea_orm_migration::prelude::*;

// 統計対象となる基本テーブル
mod m20250801_000001_create_categories_table;
mod m20250801_000002_create_projects_table;
mod m20250801_000003_create_tasks_table;

// 集計クエリ用インデックス
mod m20250801_000004_add_task_stats_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            // 1. 依存関係のないテーブル
            Box::new(m20250801_000001_create_categories_table::Migration),
            Box::new(m20250801_000002_create_projects_table::Migration),
            // 2. categories / projects を参照するテーブル
            Box::new(m20250801_000003_create_tasks_table::Migration),
            // 3. インデックス
            Box::new(m20250801_000004_add_task_stats_indexes::Migration),
        ]
    }
}
