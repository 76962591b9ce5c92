// personal-task/src/api/dto/stats_dto.rs

use crate::domain::project_status::ProjectStatus;
use crate::domain::task_priority::PriorityTable;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// --- Overview ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverviewStatsDto {
    pub total_tasks: u64,
    pub pending_tasks: u64,
    pub in_progress_tasks: u64,
    pub completed_tasks: u64,
    pub total_projects: u64,
    pub active_projects: u64,
    pub total_categories: u64,
}

// --- Daily / Weekly ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyStatsDto {
    /// `YYYY-MM-DD`
    pub date: String,
    pub tasks_created: u64,
    pub tasks_completed: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyStatsDto {
    /// `YYYY-MM-DD to YYYY-MM-DD`
    pub week_label: String,
    pub tasks_created: u64,
    pub tasks_completed: u64,
}

// --- Productivity ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductivityOverviewDto {
    pub total_tasks: u64,
    pub completed_tasks: u64,
    pub completion_rate: f64,
    pub overdue_tasks: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyEfficiencyDto {
    pub date: String,
    pub created: u64,
    pub completed: u64,
    pub efficiency: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryEfficiencyDto {
    pub category_id: Uuid,
    pub category_name: String,
    pub total_tasks: u64,
    pub completed_tasks: u64,
    pub completion_rate: f64,
}

/// 期限が今日のタスク
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodayStatsDto {
    pub total_tasks: u64,
    pub completed_tasks: u64,
    pub completion_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductivityStatsDto {
    pub overview: ProductivityOverviewDto,
    pub priority_distribution: PriorityTable<u64>,
    pub priority_completion_rates: PriorityTable<f64>,
    /// 完了タスクが無い場合は 0.0（`completed_sample_size` で判別する）
    pub avg_completion_time_hours: f64,
    pub completed_sample_size: u64,
    pub recent_productivity: Vec<DailyEfficiencyDto>,
    pub category_efficiency: Vec<CategoryEfficiencyDto>,
    pub today: TodayStatsDto,
}

// --- Monthly ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummaryDto {
    pub tasks_created: u64,
    pub tasks_completed: u64,
    pub tasks_in_progress: u64,
    pub completion_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTrendDto {
    /// 月内の日（1始まり）
    pub day: u32,
    pub created: u64,
    pub completed: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectProgressDto {
    pub project_id: Uuid,
    pub project_name: String,
    pub total_tasks: u64,
    pub completed: u64,
    pub progress: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyReportDto {
    /// `YYYY-MM`
    pub month: String,
    pub summary: MonthlySummaryDto,
    pub daily_trends: Vec<MonthlyTrendDto>,
    pub project_progress: Vec<ProjectProgressDto>,
}

// --- Category / Project detail ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummaryDto {
    pub id: Uuid,
    pub name: String,
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryStatsDto {
    pub category: CategorySummaryDto,
    pub total_tasks: u64,
    pub pending_tasks: u64,
    pub in_progress_tasks: u64,
    pub completed_tasks: u64,
    pub completion_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSummaryDto {
    pub id: Uuid,
    pub name: String,
    pub status: ProjectStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectStatsDto {
    pub project: ProjectSummaryDto,
    pub total_tasks: u64,
    pub pending_tasks: u64,
    pub in_progress_tasks: u64,
    pub completed_tasks: u64,
    pub completion_rate: f64,
    pub priority_stats: PriorityTable<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_priority_tables_serialize_with_enum_keys() {
        let dto = ProductivityStatsDto {
            overview: ProductivityOverviewDto {
                total_tasks: 4,
                completed_tasks: 1,
                completion_rate: 25.0,
                overdue_tasks: 0,
            },
            priority_distribution: PriorityTable {
                low: 1,
                medium: 2,
                high: 1,
                urgent: 0,
            },
            priority_completion_rates: PriorityTable {
                low: 100.0,
                medium: 0.0,
                high: 0.0,
                urgent: 0.0,
            },
            avg_completion_time_hours: 0.0,
            completed_sample_size: 0,
            recent_productivity: vec![],
            category_efficiency: vec![],
            today: TodayStatsDto {
                total_tasks: 0,
                completed_tasks: 0,
                completion_rate: 0.0,
            },
        };

        let value = serde_json::to_value(&dto).unwrap();
        assert_eq!(
            value["priority_distribution"],
            json!({"low": 1, "medium": 2, "high": 1, "urgent": 0})
        );
        assert_eq!(value["priority_completion_rates"]["low"], json!(100.0));
    }

    #[test]
    fn test_weekly_uses_week_label_key() {
        let value = serde_json::to_value(WeeklyStatsDto {
            week_label: "2024-03-04 to 2024-03-10".to_string(),
            tasks_created: 3,
            tasks_completed: 2,
        })
        .unwrap();
        assert_eq!(value["week_label"], "2024-03-04 to 2024-03-10");
    }

    #[test]
    fn test_project_status_is_lowercase() {
        let value = serde_json::to_value(ProjectSummaryDto {
            id: Uuid::nil(),
            name: "Launch".to_string(),
            status: ProjectStatus::Archived,
        })
        .unwrap();
        assert_eq!(value["status"], "archived");
    }
}
