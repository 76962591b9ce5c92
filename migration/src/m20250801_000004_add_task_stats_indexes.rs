use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ユーザー別のステータス集計用複合インデックス
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(Tasks::Table)
                    .name("idx_tasks_user_status")
                    .col(Tasks::UserId)
                    .col(Tasks::Status)
                    .to_owned(),
            )
            .await?;

        // 日次・週次・月次の作成数集計用
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(Tasks::Table)
                    .name("idx_tasks_user_created_at")
                    .col(Tasks::UserId)
                    .col(Tasks::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // 完了数集計用
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(Tasks::Table)
                    .name("idx_tasks_user_completed_at")
                    .col(Tasks::UserId)
                    .col(Tasks::CompletedAt)
                    .to_owned(),
            )
            .await?;

        // 期限切れ・本日期限の集計用
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(Tasks::Table)
                    .name("idx_tasks_user_due_date")
                    .col(Tasks::UserId)
                    .col(Tasks::DueDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(Tasks::Table)
                    .name("idx_tasks_user_priority")
                    .col(Tasks::UserId)
                    .col(Tasks::Priority)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(Tasks::Table)
                    .name("idx_tasks_category_id")
                    .col(Tasks::CategoryId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(Tasks::Table)
                    .name("idx_tasks_project_id")
                    .col(Tasks::ProjectId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            "idx_tasks_project_id",
            "idx_tasks_category_id",
            "idx_tasks_user_priority",
            "idx_tasks_user_due_date",
            "idx_tasks_user_completed_at",
            "idx_tasks_user_created_at",
            "idx_tasks_user_status",
        ] {
            manager
                .drop_index(Index::drop().name(name).table(Tasks::Table).to_owned())
                .await?;
        }
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Tasks {
    Table,
    UserId,
    Status,
    Priority,
    CreatedAt,
    CompletedAt,
    DueDate,
    CategoryId,
    ProjectId,
}
