// personal-task/src/repository/stats_repository.rs
use crate::domain::category_model::{self, Entity as CategoryEntity};
use crate::domain::project_model::{self, Entity as ProjectEntity};
use crate::domain::task_model::{self, Entity as TaskEntity};
use crate::domain::task_status::TaskStatus;
use crate::repository::stats_query::{
    CompletionSpan, CountQuery, OwnedKind, OwnedRecord, ProjectPredicate, StatsQuery,
    TaskPredicate,
};
use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, Condition, DbBackend, DbConn, DbErr, EntityTrait, FromQueryResult,
    PaginatorTrait, QueryFilter, QueryOrder, Statement,
};
use uuid::Uuid;

/// PostgreSQL 上の統計クエリ実装
#[derive(Clone)]
pub struct StatsRepository {
    db: DbConn,
}

#[derive(Debug, FromQueryResult)]
struct CompletionSpanRow {
    samples: i64,
    total_seconds: f64,
}

impl StatsRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    fn task_condition(owner: Uuid, predicate: &TaskPredicate) -> Condition {
        let mut conditions = Condition::all().add(task_model::Column::UserId.eq(owner));

        // ステータス・優先度・分類・プロジェクト
        if let Some(status) = predicate.status {
            conditions = conditions.add(task_model::Column::Status.eq(status.as_str()));
        }
        if let Some(status) = predicate.status_not {
            conditions = conditions.add(task_model::Column::Status.ne(status.as_str()));
        }
        if let Some(priority) = predicate.priority {
            conditions = conditions.add(task_model::Column::Priority.eq(priority.as_str()));
        }
        if let Some(category_id) = predicate.category_id {
            conditions = conditions.add(task_model::Column::CategoryId.eq(category_id));
        }
        if let Some(project_id) = predicate.project_id {
            conditions = conditions.add(task_model::Column::ProjectId.eq(project_id));
        }

        // 期間（両端を含む）。NULL は BETWEEN に一致しない
        if let Some(range) = predicate.created_within {
            conditions =
                conditions.add(task_model::Column::CreatedAt.between(range.start, range.end));
        }
        if let Some(range) = predicate.completed_within {
            conditions =
                conditions.add(task_model::Column::CompletedAt.between(range.start, range.end));
        }
        if let Some(range) = predicate.due_within {
            conditions = conditions.add(task_model::Column::DueDate.between(range.start, range.end));
        }
        if let Some(instant) = predicate.due_before {
            conditions = conditions
                .add(task_model::Column::DueDate.is_not_null())
                .add(task_model::Column::DueDate.lt(instant));
        }

        conditions
    }

    async fn count_projects(&self, owner: Uuid, predicate: &ProjectPredicate) -> Result<u64, DbErr> {
        let mut query = ProjectEntity::find().filter(project_model::Column::UserId.eq(owner));
        if let Some(status) = predicate.status {
            query = query.filter(project_model::Column::Status.eq(status.as_str()));
        }
        query.count(&self.db).await
    }
}

impl From<category_model::Model> for OwnedRecord {
    fn from(model: category_model::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            color: Some(model.color),
            status: None,
        }
    }
}

impl From<project_model::Model> for OwnedRecord {
    fn from(model: project_model::Model) -> Self {
        let status = model.project_status();
        Self {
            id: model.id,
            name: model.name,
            color: None,
            status: Some(status),
        }
    }
}

#[async_trait]
impl StatsQuery for StatsRepository {
    async fn count(&self, owner: Uuid, query: &CountQuery) -> Result<u64, DbErr> {
        match query {
            CountQuery::Tasks(predicate) => {
                TaskEntity::find()
                    .filter(Self::task_condition(owner, predicate))
                    .count(&self.db)
                    .await
            }
            CountQuery::Projects(predicate) => self.count_projects(owner, predicate).await,
            CountQuery::Categories => {
                CategoryEntity::find()
                    .filter(category_model::Column::UserId.eq(owner))
                    .count(&self.db)
                    .await
            }
        }
    }

    async fn list_owned(&self, owner: Uuid, kind: OwnedKind) -> Result<Vec<OwnedRecord>, DbErr> {
        let records = match kind {
            OwnedKind::Category => CategoryEntity::find()
                .filter(category_model::Column::UserId.eq(owner))
                .order_by_asc(category_model::Column::CreatedAt)
                .all(&self.db)
                .await?
                .into_iter()
                .map(Into::into)
                .collect(),
            OwnedKind::Project => ProjectEntity::find()
                .filter(project_model::Column::UserId.eq(owner))
                .order_by_asc(project_model::Column::CreatedAt)
                .all(&self.db)
                .await?
                .into_iter()
                .map(Into::into)
                .collect(),
        };
        Ok(records)
    }

    async fn find_owned(
        &self,
        owner: Uuid,
        kind: OwnedKind,
        id: Uuid,
    ) -> Result<Option<OwnedRecord>, DbErr> {
        let record = match kind {
            OwnedKind::Category => CategoryEntity::find_by_id(id)
                .filter(category_model::Column::UserId.eq(owner))
                .one(&self.db)
                .await?
                .map(Into::into),
            OwnedKind::Project => ProjectEntity::find_by_id(id)
                .filter(project_model::Column::UserId.eq(owner))
                .one(&self.db)
                .await?
                .map(Into::into),
        };
        Ok(record)
    }

    async fn completion_span(&self, owner: Uuid) -> Result<CompletionSpan, DbErr> {
        let row = CompletionSpanRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            r#"SELECT COUNT(*)::BIGINT AS samples,
                      COALESCE(SUM(EXTRACT(EPOCH FROM (completed_at - created_at))), 0)::DOUBLE PRECISION
                          AS total_seconds
               FROM tasks
               WHERE user_id = $1 AND status = $2 AND completed_at IS NOT NULL"#,
            [owner.into(), TaskStatus::Completed.as_str().into()],
        ))
        .one(&self.db)
        .await?;

        Ok(row.map_or_else(CompletionSpan::default, |row| CompletionSpan {
            samples: u64::try_from(row.samples).unwrap_or_default(),
            total_seconds: row.total_seconds,
        }))
    }
}
