// personal-task/src/repository/stats_query.rs
//
// 統計エンジンが利用する読み取り専用クエリインターフェース。
// すべてのクエリは単一の所有者に絞り込まれる。

use crate::domain::project_status::ProjectStatus;
use crate::domain::task_model;
use crate::domain::task_priority::TaskPriority;
use crate::domain::task_status::TaskStatus;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::DbErr;
use uuid::Uuid;

/// 両端を含む時間範囲
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        self.start <= ts && ts <= self.end
    }
}

/// タスク件数のAND条件
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPredicate {
    pub status: Option<TaskStatus>,
    pub status_not: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub category_id: Option<Uuid>,
    pub project_id: Option<Uuid>,
    pub created_within: Option<TimeRange>,
    pub completed_within: Option<TimeRange>,
    pub due_within: Option<TimeRange>,
    pub due_before: Option<DateTime<Utc>>,
}

impl TaskPredicate {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn status_not(mut self, status: TaskStatus) -> Self {
        self.status_not = Some(status);
        self
    }

    pub fn priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn category(mut self, category_id: Uuid) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn created_within(mut self, range: TimeRange) -> Self {
        self.created_within = Some(range);
        self
    }

    pub fn completed_within(mut self, range: TimeRange) -> Self {
        self.completed_within = Some(range);
        self
    }

    pub fn due_within(mut self, range: TimeRange) -> Self {
        self.due_within = Some(range);
        self
    }

    pub fn due_before(mut self, instant: DateTime<Utc>) -> Self {
        self.due_before = Some(instant);
        self
    }

    /// 1件のタスクが条件を満たすか（所有者の判定は含まない）
    ///
    /// NULL の日時は範囲条件・期限条件のどちらにも一致しない。
    pub fn matches(&self, task: &task_model::Model) -> bool {
        let status = task.task_status();
        let in_range = |range: &Option<TimeRange>, ts: Option<DateTime<Utc>>| match range {
            Some(range) => ts.is_some_and(|ts| range.contains(ts)),
            None => true,
        };

        self.status.map_or(true, |s| s == status)
            && self.status_not.map_or(true, |s| s != status)
            && self.priority.map_or(true, |p| p == task.task_priority())
            && self.category_id.map_or(true, |id| task.category_id == Some(id))
            && self.project_id.map_or(true, |id| task.project_id == Some(id))
            && in_range(&self.created_within, Some(task.created_at))
            && in_range(&self.completed_within, task.completed_at)
            && in_range(&self.due_within, task.due_date)
            && self
                .due_before
                .map_or(true, |instant| task.due_date.is_some_and(|due| due < instant))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectPredicate {
    pub status: Option<ProjectStatus>,
}

/// 件数を数える対象と条件
#[derive(Debug, Clone, PartialEq)]
pub enum CountQuery {
    Tasks(TaskPredicate),
    Projects(ProjectPredicate),
    Categories,
}

/// 所有者ごとに列挙できるエンティティ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnedKind {
    Category,
    Project,
}

/// 分類・プロジェクトの集計に必要な最小限の情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedRecord {
    pub id: Uuid,
    pub name: String,
    /// 分類のみ
    pub color: Option<String>,
    /// プロジェクトのみ
    pub status: Option<ProjectStatus>,
}

/// 完了済みタスクの所要時間の合計とサンプル数
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CompletionSpan {
    pub samples: u64,
    pub total_seconds: f64,
}

#[async_trait]
pub trait StatsQuery: Send + Sync {
    async fn count(&self, owner: Uuid, query: &CountQuery) -> Result<u64, DbErr>;

    /// 所有者の分類・プロジェクトを作成順に返す
    async fn list_owned(&self, owner: Uuid, kind: OwnedKind) -> Result<Vec<OwnedRecord>, DbErr>;

    async fn find_owned(
        &self,
        owner: Uuid,
        kind: OwnedKind,
        id: Uuid,
    ) -> Result<Option<OwnedRecord>, DbErr>;

    /// `completed_at - created_at` の合計（完了済みかつ両方の日時があるタスクのみ）
    async fn completion_span(&self, owner: Uuid) -> Result<CompletionSpan, DbErr>;
}
