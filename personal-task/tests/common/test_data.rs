// tests/common/test_data.rs

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use personal_task::domain::project_status::ProjectStatus;
use personal_task::domain::task_priority::TaskPriority;
use personal_task::domain::task_status::TaskStatus;
use personal_task::domain::{category_model, project_model, task_model};
use uuid::Uuid;

/// テストの基準時刻: 2024-03-13 (水) 12:00 UTC
pub fn reference_now() -> DateTime<FixedOffset> {
    FixedOffset::east_opt(0)
        .unwrap()
        .with_ymd_and_hms(2024, 3, 13, 12, 0, 0)
        .unwrap()
}

pub fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

/// 作成日時だけを指定した pending タスク
pub fn task(owner: Uuid, created_at: DateTime<Utc>) -> task_model::Model {
    task_model::Model {
        id: Uuid::new_v4(),
        title: "Test task".to_string(),
        description: None,
        status: TaskStatus::Pending.to_string(),
        priority: TaskPriority::Medium.to_string(),
        due_date: None,
        completed_at: None,
        user_id: owner,
        category_id: None,
        project_id: None,
        created_at,
        updated_at: created_at,
    }
}

/// `completed_at` を伴う完了済みタスク
pub fn completed_task(
    owner: Uuid,
    created_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
) -> task_model::Model {
    let mut model = task(owner, created_at);
    model.status = TaskStatus::Completed.to_string();
    model.completed_at = Some(completed_at);
    model.updated_at = completed_at;
    model
}

pub fn with_status(mut model: task_model::Model, status: TaskStatus) -> task_model::Model {
    model.status = status.to_string();
    model
}

pub fn with_priority(mut model: task_model::Model, priority: TaskPriority) -> task_model::Model {
    model.priority = priority.to_string();
    model
}

pub fn with_due(mut model: task_model::Model, due: DateTime<Utc>) -> task_model::Model {
    model.due_date = Some(due);
    model
}

pub fn in_category(mut model: task_model::Model, category_id: Uuid) -> task_model::Model {
    model.category_id = Some(category_id);
    model
}

pub fn in_project(mut model: task_model::Model, project_id: Uuid) -> task_model::Model {
    model.project_id = Some(project_id);
    model
}

pub fn category(owner: Uuid, name: &str, created_at: DateTime<Utc>) -> category_model::Model {
    category_model::Model {
        id: Uuid::new_v4(),
        name: name.to_string(),
        description: None,
        color: "#007bff".to_string(),
        user_id: owner,
        created_at,
        updated_at: created_at,
    }
}

pub fn project(
    owner: Uuid,
    name: &str,
    status: ProjectStatus,
    created_at: DateTime<Utc>,
) -> project_model::Model {
    project_model::Model {
        id: Uuid::new_v4(),
        name: name.to_string(),
        description: None,
        status: status.to_string(),
        start_date: None,
        end_date: None,
        user_id: owner,
        created_at,
        updated_at: created_at,
    }
}
