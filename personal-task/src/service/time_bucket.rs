// personal-task/src/service/time_bucket.rs
//
// 日・週・月単位の集計ウィンドウを生成する。
// 日付の境界は呼び出し側が渡す `now` のオフセットで判定し、UTCの瞬間に変換して保持する。

use crate::error::{AppError, AppResult};
use crate::repository::stats_query::TimeRange;
use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};

pub const DEFAULT_DAILY_WINDOWS: u32 = 7;
pub const MAX_DAILY_WINDOWS: u32 = 30;
pub const DEFAULT_WEEKLY_WINDOWS: u32 = 4;
pub const MAX_WEEKLY_WINDOWS: u32 = 12;

/// ラベル付きの集計区間（`start <= ts <= end`）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub label: String,
}

impl Window {
    /// ある暦日の 00:00:00 から 23:59:59.999999 まで
    pub fn for_day(date: NaiveDate, offset: FixedOffset, label: impl Into<String>) -> Self {
        Self::for_dates(date, date, offset, label)
    }

    /// `first` の開始から `last` の終了までを覆うウィンドウ
    pub fn for_dates(
        first: NaiveDate,
        last: NaiveDate,
        offset: FixedOffset,
        label: impl Into<String>,
    ) -> Self {
        Self {
            start: local_midnight(first, offset),
            end: local_midnight(last + Duration::days(1), offset) - Duration::microseconds(1),
            label: label.into(),
        }
    }

    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        self.start <= ts && ts <= self.end
    }

    pub fn range(&self) -> TimeRange {
        TimeRange::new(self.start, self.end)
    }
}

/// 月次レポート用: 月全体のウィンドウと日ごとのサブウィンドウ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthWindow {
    /// `YYYY-MM`
    pub key: String,
    pub whole: Window,
    /// 1日から月末までの日次ウィンドウ（ラベルは日付の数値）
    pub days: Vec<Window>,
}

impl MonthWindow {
    pub fn day_count(&self) -> usize {
        self.days.len()
    }
}

/// 指定範囲外・未指定の件数はデフォルト値に置き換える（エラーにはしない）
pub fn resolve_window_count(requested: Option<i64>, max: u32, default: u32) -> u32 {
    match requested {
        Some(count) if (1..=i64::from(max)).contains(&count) => count as u32,
        _ => default,
    }
}

/// 直近 `requested` 日分の日次ウィンドウ（古い順、最後が今日）
pub fn daily_windows(requested: Option<i64>, now: DateTime<FixedOffset>) -> Vec<Window> {
    let count = resolve_window_count(requested, MAX_DAILY_WINDOWS, DEFAULT_DAILY_WINDOWS);
    let offset = *now.offset();
    let today = now.date_naive();

    (0..i64::from(count))
        .rev()
        .map(|days_back| {
            let date = today - Duration::days(days_back);
            Window::for_day(date, offset, date.format("%Y-%m-%d").to_string())
        })
        .collect()
}

/// 直近 `requested` 週分の週次ウィンドウ（月曜始まり・日曜終わり、古い順）
pub fn weekly_windows(requested: Option<i64>, now: DateTime<FixedOffset>) -> Vec<Window> {
    let count = resolve_window_count(requested, MAX_WEEKLY_WINDOWS, DEFAULT_WEEKLY_WINDOWS);
    let offset = *now.offset();
    let today = now.date_naive();
    let weekday_offset = i64::from(today.weekday().num_days_from_monday());

    (0..i64::from(count))
        .rev()
        .map(|weeks_back| {
            let monday = today - Duration::days(weekday_offset + 7 * weeks_back);
            let sunday = monday + Duration::days(6);
            let label = format!(
                "{} to {}",
                monday.format("%Y-%m-%d"),
                sunday.format("%Y-%m-%d")
            );
            Window::for_dates(monday, sunday, offset, label)
        })
        .collect()
}

/// `YYYY-MM` の月ウィンドウを生成する。未指定なら `now` の月。
///
/// 形式が不正な場合は `InvalidInput` を返す（日数・週数と違い補正しない）。
pub fn monthly_window(
    month_key: Option<&str>,
    now: DateTime<FixedOffset>,
) -> AppResult<MonthWindow> {
    let (year, month) = match month_key {
        Some(key) => parse_month_key(key)?,
        None => (now.year(), now.month()),
    };
    let offset = *now.offset();

    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| invalid_month(year, month))?;
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let next_first = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .ok_or_else(|| invalid_month(next_year, next_month))?;
    let last = next_first - Duration::days(1);

    let days = first
        .iter_days()
        .take_while(|date| *date <= last)
        .map(|date| Window::for_day(date, offset, date.day().to_string()))
        .collect();

    let key = format!("{:04}-{:02}", year, month);
    Ok(MonthWindow {
        whole: Window::for_dates(first, last, offset, key.clone()),
        key,
        days,
    })
}

/// `YYYY-MM` を (年, 月) に変換
pub fn parse_month_key(key: &str) -> AppResult<(i32, u32)> {
    let invalid = || {
        AppError::InvalidInput(format!(
            "Invalid month format '{}', expected YYYY-MM",
            key
        ))
    };

    let (year, month) = key.split_once('-').ok_or_else(invalid)?;
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if year.len() != 4 || month.len() != 2 || !all_digits(year) || !all_digits(month) {
        return Err(invalid());
    }

    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
        return Err(invalid());
    }

    Ok((year, month))
}

fn invalid_month(year: i32, month: u32) -> AppError {
    AppError::InvalidInput(format!("Month {:04}-{:02} is out of range", year, month))
}

fn local_midnight(date: NaiveDate, offset: FixedOffset) -> DateTime<Utc> {
    let local = date.and_time(NaiveTime::MIN);
    Utc.from_utc_datetime(&(local - Duration::seconds(i64::from(offset.local_minus_utc()))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn jst() -> FixedOffset {
        FixedOffset::east_opt(9 * 3600).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32, offset: FixedOffset) -> DateTime<FixedOffset> {
        offset.with_ymd_and_hms(y, m, d, h, 30, 0).unwrap()
    }

    #[test]
    fn test_daily_windows_end_today_oldest_first() {
        let now = at(2024, 3, 5, 10, jst());
        let windows = daily_windows(Some(3), now);

        let labels: Vec<&str> = windows.iter().map(|w| w.label.as_str()).collect();
        assert_eq!(labels, vec!["2024-03-03", "2024-03-04", "2024-03-05"]);
    }

    #[test]
    fn test_daily_windows_use_local_midnight() {
        let now = at(2024, 3, 5, 10, jst());
        let today = daily_windows(Some(1), now).pop().unwrap();

        // JST 0:00 は UTC の前日 15:00
        assert_eq!(
            today.start,
            Utc.with_ymd_and_hms(2024, 3, 4, 15, 0, 0).unwrap()
        );
        assert_eq!(
            today.end,
            Utc.with_ymd_and_hms(2024, 3, 5, 14, 59, 59).unwrap() + Duration::microseconds(999_999)
        );
        assert!(today.contains(today.start));
        assert!(today.contains(today.end));
        assert!(!today.contains(today.end + Duration::microseconds(1)));
    }

    #[test]
    fn test_daily_count_falls_back_to_default() {
        let now = at(2024, 3, 5, 10, jst());
        assert_eq!(daily_windows(Some(0), now).len(), 7);
        assert_eq!(daily_windows(Some(999), now).len(), 7);
        assert_eq!(daily_windows(Some(-3), now).len(), 7);
        assert_eq!(daily_windows(None, now).len(), 7);
        assert_eq!(daily_windows(Some(30), now).len(), 30);
        assert_eq!(daily_windows(Some(1), now).len(), 1);
    }

    #[test]
    fn test_weekly_windows_are_monday_to_sunday() {
        // 2024-03-06 は水曜日
        let now = at(2024, 3, 6, 8, jst());
        let windows = weekly_windows(Some(12), now);
        assert_eq!(windows.len(), 12);

        for window in &windows {
            let start = window.start.with_timezone(&jst());
            let end = window.end.with_timezone(&jst());
            assert_eq!(start.weekday(), Weekday::Mon);
            assert_eq!(end.weekday(), Weekday::Sun);
            assert_eq!((end.date_naive() - start.date_naive()).num_days(), 6);
        }
        for pair in windows.windows(2) {
            assert!(pair[0].end < pair[1].start);
        }

        let current = windows.last().unwrap();
        assert_eq!(current.label, "2024-03-04 to 2024-03-10");
        assert!(current.contains(now.with_timezone(&Utc)));
    }

    #[test]
    fn test_weekly_windows_on_sunday_and_monday() {
        let sunday = at(2024, 3, 10, 23, jst());
        assert_eq!(
            weekly_windows(Some(1), sunday)[0].label,
            "2024-03-04 to 2024-03-10"
        );

        let monday = at(2024, 3, 11, 0, jst());
        assert_eq!(
            weekly_windows(Some(1), monday)[0].label,
            "2024-03-11 to 2024-03-17"
        );
    }

    #[test]
    fn test_weekly_count_falls_back_to_default() {
        let now = at(2024, 3, 6, 8, jst());
        assert_eq!(weekly_windows(Some(0), now).len(), 4);
        assert_eq!(weekly_windows(Some(13), now).len(), 4);
        assert_eq!(weekly_windows(Some(12), now).len(), 12);
    }

    #[test]
    fn test_monthly_window_day_counts() {
        let now = at(2024, 3, 6, 8, jst());
        assert_eq!(monthly_window(Some("2024-02"), now).unwrap().day_count(), 29);
        assert_eq!(monthly_window(Some("2023-02"), now).unwrap().day_count(), 28);
        assert_eq!(monthly_window(Some("2024-04"), now).unwrap().day_count(), 30);
        assert_eq!(monthly_window(Some("2024-12"), now).unwrap().day_count(), 31);
    }

    #[test]
    fn test_monthly_window_bounds() {
        let utc = FixedOffset::east_opt(0).unwrap();
        let month = monthly_window(Some("2024-12"), at(2024, 3, 6, 8, utc)).unwrap();

        assert_eq!(month.key, "2024-12");
        assert_eq!(
            month.whole.start,
            Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(
            month.whole.end + Duration::microseconds(1),
            Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(month.days.first().unwrap().label, "1");
        assert_eq!(month.days.last().unwrap().label, "31");
        assert_eq!(month.days.last().unwrap().end, month.whole.end);
    }

    #[test]
    fn test_monthly_window_defaults_to_current_month() {
        let month = monthly_window(None, at(2023, 2, 14, 8, jst())).unwrap();
        assert_eq!(month.key, "2023-02");
        assert_eq!(month.day_count(), 28);
    }

    #[test]
    fn test_monthly_window_rejects_malformed_keys() {
        let now = at(2024, 3, 6, 8, jst());
        for key in ["2024-13", "bad", "2024-00", "2024-1", "24-01", "2024/01", "", "2024-01-01"] {
            assert!(
                matches!(monthly_window(Some(key), now), Err(AppError::InvalidInput(_))),
                "{key} should be rejected"
            );
        }
    }
}
