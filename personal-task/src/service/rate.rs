// personal-task/src/service/rate.rs
//
// 件数から割合（0〜100）を導出する。分母が0のときは常に 0.0。

use crate::repository::stats_query::CompletionSpan;

const SECONDS_PER_HOUR: f64 = 3600.0;

/// `numerator / denominator * 100`、分母0なら 0.0
pub fn rate(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    (numerator as f64 / denominator as f64 * 100.0).clamp(0.0, 100.0)
}

/// 日次の効率: 作成0件で完了があれば 100.0、それ以外は完了数/作成数
pub fn efficiency(created: u64, completed: u64) -> f64 {
    if created == 0 && completed > 0 {
        100.0
    } else {
        rate(completed, created)
    }
}

/// 平均完了時間（時間単位）。サンプルが無ければ 0.0
pub fn avg_completion_hours(span: &CompletionSpan) -> f64 {
    if span.samples == 0 {
        return 0.0;
    }
    span.total_seconds / span.samples as f64 / SECONDS_PER_HOUR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_with_zero_denominator() {
        assert_eq!(rate(0, 0), 0.0);
        assert_eq!(rate(5, 0), 0.0);
    }

    #[test]
    fn test_rate_is_not_rounded() {
        assert_eq!(rate(1, 4), 25.0);
        assert!((rate(1, 3) - 33.333_333_333_333_336).abs() < 1e-9);
        assert_eq!(rate(7, 7), 100.0);
    }

    #[test]
    fn test_rate_stays_within_bounds() {
        for denominator in 1..=20u64 {
            for numerator in 0..=denominator {
                let value = rate(numerator, denominator);
                assert!((0.0..=100.0).contains(&value));
            }
        }
        assert_eq!(rate(12, 4), 100.0);
    }

    #[test]
    fn test_efficiency_override() {
        assert_eq!(efficiency(0, 5), 100.0);
        assert_eq!(efficiency(0, 0), 0.0);
        assert_eq!(efficiency(10, 5), 50.0);
        assert_eq!(efficiency(4, 0), 0.0);
    }

    #[test]
    fn test_avg_completion_hours() {
        assert_eq!(avg_completion_hours(&CompletionSpan::default()), 0.0);

        let span = CompletionSpan {
            samples: 2,
            total_seconds: 3.0 * 3600.0 + 5.0 * 3600.0,
        };
        assert_eq!(avg_completion_hours(&span), 4.0);
    }
}
