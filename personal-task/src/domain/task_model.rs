// personal-task/src/domain/task_model.rs
use super::task_priority::TaskPriority;
use super::task_status::TaskStatus;
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, DbErr, Set};
use serde::{Deserialize, Serialize};

/// タスクエンティティ
///
/// `completed_at` は `status = completed` のときだけ値を持つ。
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tasks")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    #[sea_orm(nullable)]
    pub due_date: Option<DateTime<Utc>>,
    #[sea_orm(nullable)]
    pub completed_at: Option<DateTime<Utc>>,
    pub user_id: Uuid,
    #[sea_orm(nullable)]
    pub category_id: Option<Uuid>,
    #[sea_orm(nullable)]
    pub project_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::category_model::Entity",
        from = "Column::CategoryId",
        to = "super::category_model::Column::Id"
    )]
    Category,
    #[sea_orm(
        belongs_to = "super::project_model::Entity",
        from = "Column::ProjectId",
        to = "super::project_model::Column::Id"
    )]
    Project,
}

impl Related<super::category_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::project_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl Model {
    /// 保存されている文字列から状態を取得（未知の値は pending 扱い）
    pub fn task_status(&self) -> TaskStatus {
        TaskStatus::from_str(&self.status).unwrap_or_default()
    }

    pub fn task_priority(&self) -> TaskPriority {
        TaskPriority::from_str(&self.priority).unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        Self {
            id: Set(Uuid::new_v4()),
            status: Set(TaskStatus::Pending.to_string()),
            priority: Set(TaskPriority::Medium.to_string()),
            created_at: Set(Utc::now()),
            updated_at: Set(Utc::now()),
            ..ActiveModelTrait::default()
        }
    }

    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if !insert {
            self.updated_at = Set(Utc::now());
        }
        Ok(self)
    }
}
