// personal-task/src/domain/task_priority.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// タスクの優先度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl TaskPriority {
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::Urgent];

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            "urgent" => Some(Self::Urgent),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TaskPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str(s).ok_or_else(|| format!("Invalid task priority: '{}'", s))
    }
}

impl From<TaskPriority> for String {
    fn from(priority: TaskPriority) -> Self {
        priority.as_str().to_string()
    }
}

/// 優先度ごとに1フィールドを持つ固定テーブル
///
/// 文字列キーのマップではなく優先度enumで網羅性を保証する。
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PriorityTable<T> {
    pub low: T,
    pub medium: T,
    pub high: T,
    pub urgent: T,
}

impl<T> PriorityTable<T> {
    /// 各優先度に対して関数を適用してテーブルを構築
    pub fn from_fn(mut f: impl FnMut(TaskPriority) -> T) -> Self {
        Self {
            low: f(TaskPriority::Low),
            medium: f(TaskPriority::Medium),
            high: f(TaskPriority::High),
            urgent: f(TaskPriority::Urgent),
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> PriorityTable<U> {
        PriorityTable {
            low: f(&self.low),
            medium: f(&self.medium),
            high: f(&self.high),
            urgent: f(&self.urgent),
        }
    }
}
