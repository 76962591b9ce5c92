// personal-task/src/api/dto/stats_query_dto.rs
//
// レポートのクエリパラメータ。
// `days` / `weeks` は数値として解釈できなければ未指定扱いにする（400にはしない）。

use serde::{Deserialize, Serialize};

fn lenient_count(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
}

/// `GET /api/stats/daily?days=N`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DailyStatsQuery {
    pub days: Option<String>,
}

impl DailyStatsQuery {
    pub fn days(&self) -> Option<i64> {
        lenient_count(self.days.as_deref())
    }
}

/// `GET /api/stats/weekly?weeks=N`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WeeklyStatsQuery {
    pub weeks: Option<String>,
}

impl WeeklyStatsQuery {
    pub fn weeks(&self) -> Option<i64> {
        lenient_count(self.weeks.as_deref())
    }
}

/// `GET /api/stats/monthly?month=YYYY-MM`
///
/// 形式の検証はサービス側で行う。空文字も不正な値として扱う。
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MonthlyStatsQuery {
    pub month: Option<String>,
}

impl MonthlyStatsQuery {
    pub fn month(&self) -> Option<&str> {
        self.month.as_deref()
    }
}
