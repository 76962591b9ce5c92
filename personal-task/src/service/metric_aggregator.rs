// personal-task/src/service/metric_aggregator.rs

use crate::domain::project_status::ProjectStatus;
use crate::domain::task_priority::{PriorityTable, TaskPriority};
use crate::domain::task_status::TaskStatus;
use crate::error::AppResult;
use crate::repository::stats_query::{
    CompletionSpan, CountQuery, OwnedKind, OwnedRecord, ProjectPredicate, StatsQuery,
    TaskPredicate,
};
use crate::service::time_bucket::Window;
use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// 追加の絞り込み条件（すべて任意、AND結合）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskFilters {
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub category_id: Option<Uuid>,
    pub project_id: Option<Uuid>,
}

impl TaskFilters {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_category(mut self, category_id: Uuid) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_project(mut self, project_id: Uuid) -> Self {
        self.project_id = Some(project_id);
        self
    }

    fn predicate(&self) -> TaskPredicate {
        TaskPredicate {
            status: self.status,
            priority: self.priority,
            category_id: self.category_id,
            project_id: self.project_id,
            ..TaskPredicate::default()
        }
    }
}

/// ウィンドウ内の作成数・完了数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricBucket {
    pub created: u64,
    pub completed: u64,
}

/// ある切り口（優先度・分類・プロジェクト）の総数と完了数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DimensionCount {
    pub total: u64,
    pub completed: u64,
}

/// 所有者単位でタスク件数を数える
///
/// 個々の件数は独立した読み取りクエリなので、まとめて並行に発行する。
#[derive(Clone)]
pub struct MetricAggregator {
    query: Arc<dyn StatsQuery>,
}

impl MetricAggregator {
    pub fn new(query: Arc<dyn StatsQuery>) -> Self {
        Self { query }
    }

    pub async fn count_tasks(&self, owner: Uuid, predicate: TaskPredicate) -> AppResult<u64> {
        Ok(self
            .query
            .count(owner, &CountQuery::Tasks(predicate))
            .await?)
    }

    /// 絞り込み条件のみ（期間なし）で数える
    pub async fn count_filtered(&self, owner: Uuid, filters: &TaskFilters) -> AppResult<u64> {
        self.count_tasks(owner, filters.predicate()).await
    }

    pub async fn count_created(
        &self,
        owner: Uuid,
        window: &Window,
        filters: &TaskFilters,
    ) -> AppResult<u64> {
        self.count_tasks(owner, filters.predicate().created_within(window.range()))
            .await
    }

    /// `completed_at` がウィンドウ内のタスク数（未完了タスクは含まれない）
    pub async fn count_completed(
        &self,
        owner: Uuid,
        window: &Window,
        filters: &TaskFilters,
    ) -> AppResult<u64> {
        self.count_tasks(owner, filters.predicate().completed_within(window.range()))
            .await
    }

    /// 期限がウィンドウ内（暦日一致）のタスク数
    pub async fn count_due_within(
        &self,
        owner: Uuid,
        window: &Window,
        filters: &TaskFilters,
    ) -> AppResult<u64> {
        self.count_tasks(owner, filters.predicate().due_within(window.range()))
            .await
    }

    /// 未完了かつ期限が `now` より前のタスク数
    pub async fn count_overdue(&self, owner: Uuid, now: DateTime<Utc>) -> AppResult<u64> {
        self.count_tasks(
            owner,
            TaskPredicate::all()
                .status_not(TaskStatus::Completed)
                .due_before(now),
        )
        .await
    }

    pub async fn bucket(&self, owner: Uuid, window: &Window) -> AppResult<MetricBucket> {
        let filters = TaskFilters::none();
        let (created, completed) = tokio::try_join!(
            self.count_created(owner, window, &filters),
            self.count_completed(owner, window, &filters),
        )?;
        Ok(MetricBucket { created, completed })
    }

    /// ウィンドウ列に対応するバケット列（順序はウィンドウと同じ）
    pub async fn buckets(&self, owner: Uuid, windows: &[Window]) -> AppResult<Vec<MetricBucket>> {
        try_join_all(windows.iter().map(|window| self.bucket(owner, window))).await
    }

    /// 条件に一致する総数と、そのうち status = completed の数
    pub async fn dimension_count(
        &self,
        owner: Uuid,
        filters: TaskFilters,
    ) -> AppResult<DimensionCount> {
        let completed_only = filters.with_status(TaskStatus::Completed);
        let (total, completed) = tokio::try_join!(
            self.count_filtered(owner, &filters),
            self.count_filtered(owner, &completed_only),
        )?;
        Ok(DimensionCount { total, completed })
    }

    pub async fn count_by_priority(&self, owner: Uuid) -> AppResult<PriorityTable<DimensionCount>> {
        let counts = try_join_all(TaskPriority::ALL.map(|priority| {
            self.dimension_count(owner, TaskFilters::none().with_priority(priority))
        }))
        .await?;
        let by_priority: HashMap<TaskPriority, DimensionCount> =
            TaskPriority::ALL.into_iter().zip(counts).collect();

        Ok(PriorityTable::from_fn(|priority| {
            by_priority.get(&priority).copied().unwrap_or_default()
        }))
    }

    /// 所有者のすべての分類について総数・完了数を返す（タスク0件の分類も含む）
    pub async fn count_by_category(
        &self,
        owner: Uuid,
    ) -> AppResult<Vec<(OwnedRecord, DimensionCount)>> {
        self.count_by_owned(owner, OwnedKind::Category).await
    }

    /// 所有者のすべてのプロジェクトについて総数・完了数を返す
    pub async fn count_by_project(
        &self,
        owner: Uuid,
    ) -> AppResult<Vec<(OwnedRecord, DimensionCount)>> {
        self.count_by_owned(owner, OwnedKind::Project).await
    }

    async fn count_by_owned(
        &self,
        owner: Uuid,
        kind: OwnedKind,
    ) -> AppResult<Vec<(OwnedRecord, DimensionCount)>> {
        let records = self.query.list_owned(owner, kind).await?;
        let counts = try_join_all(records.iter().map(|record| {
            let filters = match kind {
                OwnedKind::Category => TaskFilters::none().with_category(record.id),
                OwnedKind::Project => TaskFilters::none().with_project(record.id),
            };
            self.dimension_count(owner, filters)
        }))
        .await?;
        Ok(records.into_iter().zip(counts).collect())
    }

    pub async fn count_projects(
        &self,
        owner: Uuid,
        status: Option<ProjectStatus>,
    ) -> AppResult<u64> {
        Ok(self
            .query
            .count(owner, &CountQuery::Projects(ProjectPredicate { status }))
            .await?)
    }

    pub async fn count_categories(&self, owner: Uuid) -> AppResult<u64> {
        Ok(self.query.count(owner, &CountQuery::Categories).await?)
    }

    pub async fn find_owned(
        &self,
        owner: Uuid,
        kind: OwnedKind,
        id: Uuid,
    ) -> AppResult<Option<OwnedRecord>> {
        Ok(self.query.find_owned(owner, kind, id).await?)
    }

    pub async fn completion_span(&self, owner: Uuid) -> AppResult<CompletionSpan> {
        Ok(self.query.completion_span(owner).await?)
    }
}
