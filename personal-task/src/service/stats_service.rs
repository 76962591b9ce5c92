// personal-task/src/service/stats_service.rs

use crate::api::dto::stats_dto::{
    CategoryEfficiencyDto, CategoryStatsDto, CategorySummaryDto, DailyEfficiencyDto,
    DailyStatsDto, MonthlyReportDto, MonthlySummaryDto, MonthlyTrendDto, OverviewStatsDto,
    ProductivityOverviewDto, ProductivityStatsDto, ProjectProgressDto, ProjectStatsDto,
    ProjectSummaryDto, TodayStatsDto, WeeklyStatsDto,
};
use crate::domain::project_status::ProjectStatus;
use crate::domain::task_priority::{PriorityTable, TaskPriority};
use crate::domain::task_status::TaskStatus;
use crate::error::{AppError, AppResult};
use crate::repository::stats_query::{OwnedKind, StatsQuery, TaskPredicate};
use crate::service::metric_aggregator::{DimensionCount, MetricAggregator, TaskFilters};
use crate::service::rate::{avg_completion_hours, efficiency, rate};
use crate::service::time_bucket::{
    daily_windows, monthly_window, weekly_windows, Window, DEFAULT_DAILY_WINDOWS,
};
use chrono::{DateTime, FixedOffset, Utc};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// 所有者単位の統計レポートを組み立てる
///
/// すべての操作は読み取り専用で、基準時刻 `now` は呼び出し側が渡す。
pub struct StatsService {
    metrics: MetricAggregator,
}

/// ステータス別の件数（分類・プロジェクトの詳細レポート用）
struct StatusBreakdown {
    total: u64,
    pending: u64,
    in_progress: u64,
    completed: u64,
}

impl StatusBreakdown {
    fn completion_rate(&self) -> f64 {
        rate(self.completed, self.total)
    }
}

impl StatsService {
    pub fn new(query: Arc<dyn StatsQuery>) -> Self {
        Self {
            metrics: MetricAggregator::new(query),
        }
    }

    // --- Overview ---

    pub async fn overview(&self, owner: Uuid) -> AppResult<OverviewStatsDto> {
        let count_status =
            |status| self.metrics.count_tasks(owner, TaskPredicate::all().status(status));

        let (
            total_tasks,
            pending_tasks,
            in_progress_tasks,
            completed_tasks,
            total_projects,
            active_projects,
            total_categories,
        ) = tokio::try_join!(
            self.metrics.count_tasks(owner, TaskPredicate::all()),
            count_status(TaskStatus::Pending),
            count_status(TaskStatus::InProgress),
            count_status(TaskStatus::Completed),
            self.metrics.count_projects(owner, None),
            self.metrics.count_projects(owner, Some(ProjectStatus::Active)),
            self.metrics.count_categories(owner),
        )?;

        info!(user_id = %owner, total_tasks, "Overview stats generated");

        Ok(OverviewStatsDto {
            total_tasks,
            pending_tasks,
            in_progress_tasks,
            completed_tasks,
            total_projects,
            active_projects,
            total_categories,
        })
    }

    // --- Daily / Weekly ---

    pub async fn daily(
        &self,
        owner: Uuid,
        days: Option<i64>,
        now: DateTime<FixedOffset>,
    ) -> AppResult<Vec<DailyStatsDto>> {
        let windows = daily_windows(days, now);
        if windows.len() as i64 != days.unwrap_or_default() {
            debug!(requested = ?days, used = windows.len(), "Daily window count defaulted");
        }

        let buckets = self.metrics.buckets(owner, &windows).await?;
        info!(user_id = %owner, days = windows.len(), "Daily stats generated");

        Ok(windows
            .into_iter()
            .zip(buckets)
            .map(|(window, bucket)| DailyStatsDto {
                date: window.label,
                tasks_created: bucket.created,
                tasks_completed: bucket.completed,
            })
            .collect())
    }

    pub async fn weekly(
        &self,
        owner: Uuid,
        weeks: Option<i64>,
        now: DateTime<FixedOffset>,
    ) -> AppResult<Vec<WeeklyStatsDto>> {
        let windows = weekly_windows(weeks, now);
        if windows.len() as i64 != weeks.unwrap_or_default() {
            debug!(requested = ?weeks, used = windows.len(), "Weekly window count defaulted");
        }

        let buckets = self.metrics.buckets(owner, &windows).await?;
        info!(user_id = %owner, weeks = windows.len(), "Weekly stats generated");

        Ok(windows
            .into_iter()
            .zip(buckets)
            .map(|(window, bucket)| WeeklyStatsDto {
                week_label: window.label,
                tasks_created: bucket.created,
                tasks_completed: bucket.completed,
            })
            .collect())
    }

    // --- Productivity ---

    pub async fn productivity(
        &self,
        owner: Uuid,
        now: DateTime<FixedOffset>,
    ) -> AppResult<ProductivityStatsDto> {
        let now_utc = now.with_timezone(&Utc);
        let recent_windows = daily_windows(Some(i64::from(DEFAULT_DAILY_WINDOWS)), now);
        let today = Window::for_day(now.date_naive(), *now.offset(), "today");

        let (totals, overdue_tasks, by_priority, span, recent, by_category, due_today) = tokio::try_join!(
            self.metrics.dimension_count(owner, TaskFilters::none()),
            self.metrics.count_overdue(owner, now_utc),
            self.metrics.count_by_priority(owner),
            self.metrics.completion_span(owner),
            self.metrics.buckets(owner, &recent_windows),
            self.metrics.count_by_category(owner),
            self.due_on(owner, &today),
        )?;

        let recent_productivity = recent_windows
            .into_iter()
            .zip(recent)
            .map(|(window, bucket)| DailyEfficiencyDto {
                date: window.label,
                created: bucket.created,
                completed: bucket.completed,
                efficiency: efficiency(bucket.created, bucket.completed),
            })
            .collect();

        let category_efficiency = by_category
            .into_iter()
            .map(|(category, count)| CategoryEfficiencyDto {
                category_id: category.id,
                category_name: category.name,
                total_tasks: count.total,
                completed_tasks: count.completed,
                completion_rate: rate(count.completed, count.total),
            })
            .collect();

        info!(
            user_id = %owner,
            total_tasks = totals.total,
            overdue_tasks,
            "Productivity stats generated"
        );

        Ok(ProductivityStatsDto {
            overview: ProductivityOverviewDto {
                total_tasks: totals.total,
                completed_tasks: totals.completed,
                completion_rate: rate(totals.completed, totals.total),
                overdue_tasks,
            },
            priority_distribution: by_priority.map(|count| count.total),
            priority_completion_rates: by_priority.map(|count| rate(count.completed, count.total)),
            avg_completion_time_hours: avg_completion_hours(&span),
            completed_sample_size: span.samples,
            recent_productivity,
            category_efficiency,
            today: TodayStatsDto {
                total_tasks: due_today.total,
                completed_tasks: due_today.completed,
                completion_rate: rate(due_today.completed, due_today.total),
            },
        })
    }

    /// 期限が指定日のタスク数と、そのうち完了済みの数
    async fn due_on(&self, owner: Uuid, day: &Window) -> AppResult<DimensionCount> {
        let all = TaskFilters::none();
        let completed = all.with_status(TaskStatus::Completed);
        let (total, completed) = tokio::try_join!(
            self.metrics.count_due_within(owner, day, &all),
            self.metrics.count_due_within(owner, day, &completed),
        )?;
        Ok(DimensionCount { total, completed })
    }

    // --- Monthly ---

    pub async fn monthly(
        &self,
        owner: Uuid,
        month: Option<&str>,
        now: DateTime<FixedOffset>,
    ) -> AppResult<MonthlyReportDto> {
        let month = monthly_window(month, now)?;
        let in_progress = TaskFilters::none().with_status(TaskStatus::InProgress);

        let (whole, tasks_in_progress, days, projects) = tokio::try_join!(
            self.metrics.bucket(owner, &month.whole),
            self.metrics
                .count_created(owner, &month.whole, &in_progress),
            self.metrics.buckets(owner, &month.days),
            self.metrics.count_by_project(owner),
        )?;

        let daily_trends = days
            .into_iter()
            .zip(1u32..)
            .map(|(bucket, day)| MonthlyTrendDto {
                day,
                created: bucket.created,
                completed: bucket.completed,
            })
            .collect::<Vec<_>>();

        let project_progress = projects
            .into_iter()
            .map(|(project, count)| ProjectProgressDto {
                project_id: project.id,
                project_name: project.name,
                total_tasks: count.total,
                completed: count.completed,
                progress: rate(count.completed, count.total),
            })
            .collect();

        info!(
            user_id = %owner,
            month = %month.key,
            days = daily_trends.len(),
            "Monthly report generated"
        );

        Ok(MonthlyReportDto {
            summary: MonthlySummaryDto {
                tasks_created: whole.created,
                tasks_completed: whole.completed,
                tasks_in_progress,
                completion_rate: rate(whole.completed, whole.created),
            },
            month: month.key,
            daily_trends,
            project_progress,
        })
    }

    // --- Category / Project detail ---

    pub async fn category_detail(
        &self,
        owner: Uuid,
        category_id: Uuid,
    ) -> AppResult<CategoryStatsDto> {
        let category = self
            .metrics
            .find_owned(owner, OwnedKind::Category, category_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category {} not found", category_id)))?;

        let breakdown = self
            .status_breakdown(owner, TaskFilters::none().with_category(category_id))
            .await?;

        info!(user_id = %owner, category_id = %category_id, "Category stats generated");

        Ok(CategoryStatsDto {
            completion_rate: breakdown.completion_rate(),
            category: CategorySummaryDto {
                id: category.id,
                name: category.name,
                color: category.color,
            },
            total_tasks: breakdown.total,
            pending_tasks: breakdown.pending,
            in_progress_tasks: breakdown.in_progress,
            completed_tasks: breakdown.completed,
        })
    }

    pub async fn project_detail(&self, owner: Uuid, project_id: Uuid) -> AppResult<ProjectStatsDto> {
        let project = self
            .metrics
            .find_owned(owner, OwnedKind::Project, project_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Project {} not found", project_id)))?;

        let filters = TaskFilters::none().with_project(project_id);
        let count_priority = |priority: TaskPriority| async move {
            self.metrics
                .count_filtered(owner, &filters.with_priority(priority))
                .await
        };
        let (breakdown, low, medium, high, urgent) = tokio::try_join!(
            self.status_breakdown(owner, filters),
            count_priority(TaskPriority::Low),
            count_priority(TaskPriority::Medium),
            count_priority(TaskPriority::High),
            count_priority(TaskPriority::Urgent),
        )?;

        info!(user_id = %owner, project_id = %project_id, "Project stats generated");

        Ok(ProjectStatsDto {
            completion_rate: breakdown.completion_rate(),
            project: ProjectSummaryDto {
                id: project.id,
                name: project.name,
                status: project.status.unwrap_or_default(),
            },
            total_tasks: breakdown.total,
            pending_tasks: breakdown.pending,
            in_progress_tasks: breakdown.in_progress,
            completed_tasks: breakdown.completed,
            priority_stats: PriorityTable {
                low,
                medium,
                high,
                urgent,
            },
        })
    }

    async fn status_breakdown(
        &self,
        owner: Uuid,
        filters: TaskFilters,
    ) -> AppResult<StatusBreakdown> {
        let count_status = |status: TaskStatus| async move {
            self.metrics
                .count_filtered(owner, &filters.with_status(status))
                .await
        };
        let (total, pending, in_progress, completed) = tokio::try_join!(
            self.metrics.count_filtered(owner, &filters),
            count_status(TaskStatus::Pending),
            count_status(TaskStatus::InProgress),
            count_status(TaskStatus::Completed),
        )?;
        Ok(StatusBreakdown {
            total,
            pending,
            in_progress,
            completed,
        })
    }
}
