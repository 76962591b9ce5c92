// tests/common/memory_store.rs
//
// Postgres を使わずにレポートを検証するための StatsQuery 実装。

use async_trait::async_trait;
use personal_task::domain::{category_model, project_model, task_model};
use personal_task::repository::stats_query::{
    CompletionSpan, CountQuery, OwnedKind, OwnedRecord, StatsQuery,
};
use sea_orm::DbErr;
use uuid::Uuid;

#[derive(Default)]
pub struct InMemoryStatsQuery {
    pub tasks: Vec<task_model::Model>,
    pub categories: Vec<category_model::Model>,
    pub projects: Vec<project_model::Model>,
    /// true なら全クエリが失敗する
    pub fail: bool,
}

impl InMemoryStatsQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn with_tasks(mut self, tasks: impl IntoIterator<Item = task_model::Model>) -> Self {
        self.tasks.extend(tasks);
        self
    }

    pub fn with_categories(
        mut self,
        categories: impl IntoIterator<Item = category_model::Model>,
    ) -> Self {
        self.categories.extend(categories);
        self
    }

    pub fn with_projects(
        mut self,
        projects: impl IntoIterator<Item = project_model::Model>,
    ) -> Self {
        self.projects.extend(projects);
        self
    }

    fn check(&self) -> Result<(), DbErr> {
        if self.fail {
            Err(DbErr::Custom("store unavailable".to_string()))
        } else {
            Ok(())
        }
    }

    fn owned(&self, owner: Uuid, kind: OwnedKind) -> Vec<OwnedRecord> {
        match kind {
            OwnedKind::Category => {
                let mut categories: Vec<_> = self
                    .categories
                    .iter()
                    .filter(|c| c.user_id == owner)
                    .cloned()
                    .collect();
                categories.sort_by_key(|c| c.created_at);
                categories.into_iter().map(OwnedRecord::from).collect()
            }
            OwnedKind::Project => {
                let mut projects: Vec<_> = self
                    .projects
                    .iter()
                    .filter(|p| p.user_id == owner)
                    .cloned()
                    .collect();
                projects.sort_by_key(|p| p.created_at);
                projects.into_iter().map(OwnedRecord::from).collect()
            }
        }
    }
}

#[async_trait]
impl StatsQuery for InMemoryStatsQuery {
    async fn count(&self, owner: Uuid, query: &CountQuery) -> Result<u64, DbErr> {
        self.check()?;

        let count = match query {
            CountQuery::Tasks(predicate) => self
                .tasks
                .iter()
                .filter(|t| t.user_id == owner && predicate.matches(t))
                .count(),
            CountQuery::Projects(predicate) => self
                .projects
                .iter()
                .filter(|p| p.user_id == owner)
                .filter(|p| predicate.status.map_or(true, |s| p.project_status() == s))
                .count(),
            CountQuery::Categories => self
                .categories
                .iter()
                .filter(|c| c.user_id == owner)
                .count(),
        };
        Ok(count as u64)
    }

    async fn list_owned(&self, owner: Uuid, kind: OwnedKind) -> Result<Vec<OwnedRecord>, DbErr> {
        self.check()?;
        Ok(self.owned(owner, kind))
    }

    async fn find_owned(
        &self,
        owner: Uuid,
        kind: OwnedKind,
        id: Uuid,
    ) -> Result<Option<OwnedRecord>, DbErr> {
        self.check()?;
        Ok(self.owned(owner, kind).into_iter().find(|r| r.id == id))
    }

    async fn completion_span(&self, owner: Uuid) -> Result<CompletionSpan, DbErr> {
        self.check()?;
        Ok(self
            .tasks
            .iter()
            .filter(|t| t.user_id == owner && t.task_status().is_completed())
            .filter_map(|t| t.completed_at.map(|done| done - t.created_at))
            .fold(CompletionSpan::default(), |mut span, elapsed| {
                span.samples += 1;
                span.total_seconds += elapsed.num_milliseconds() as f64 / 1000.0;
                span
            }))
    }
}
