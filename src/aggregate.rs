use std::collections::BTreeMap;

use chrono::Duration;

use crate::error::{ReportError, Result};
use crate::model::{PageViewRecord, RankingEntry, RankingResult, TrendScore};

/// Rank paths by total views summed over the whole window.
///
/// Sorted descending by views, ties broken ascending by path; truncated to
/// `limit` entries with positional ranks 1..N.
pub fn aggregate(records: &[PageViewRecord], limit: usize) -> RankingResult {
    let mut totals: BTreeMap<&str, u64> = BTreeMap::new();
    for record in records {
        *totals.entry(record.path.as_str()).or_insert(0) += record.views;
    }

    let mut ranked: Vec<(&str, u64)> = totals.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked.truncate(limit);

    RankingResult {
        entries: ranked
            .into_iter()
            .enumerate()
            .map(|(i, (path, views))| RankingEntry {
                rank: i as u32 + 1,
                path: path.to_string(),
                views,
                delta: None,
            })
            .collect(),
    }
}

/// Rank paths by view growth in the most recent `recent_days` relative to the
/// `baseline_days` immediately before.
///
/// The recent period ends at the latest date present in `records`. Paths with
/// no recent views are excluded; paths with recent views but a zero baseline
/// score as `New` and rank above every finite ratio. Empty input is valid and
/// yields an empty ranking.
pub fn aggregate_trend(
    records: &[PageViewRecord],
    recent_days: u32,
    baseline_days: u32,
    limit: usize,
) -> Result<RankingResult> {
    if recent_days == 0 || baseline_days == 0 {
        return Err(ReportError::InvalidWindow(format!(
            "sub-periods must be positive (recent = {}, baseline = {})",
            recent_days, baseline_days
        )));
    }

    let dates = || records.iter().map(|r| r.date);
    let (min_date, max_date) = match (dates().min(), dates().max()) {
        (Some(lo), Some(hi)) => (lo, hi),
        _ => return Ok(RankingResult::default()),
    };

    let span_days = (max_date - min_date).num_days() + 1;
    let needed_days = i64::from(recent_days) + i64::from(baseline_days);
    if needed_days > span_days {
        return Err(ReportError::InvalidWindow(format!(
            "recent + baseline = {} days exceeds the {} day data span",
            needed_days, span_days
        )));
    }

    let recent_start = max_date - Duration::days(i64::from(recent_days) - 1);
    let baseline_start = recent_start - Duration::days(i64::from(baseline_days));

    // Per path: (recent, baseline) sums. Dates before the baseline start are
    // outside both sub-periods and do not count.
    let mut sums: BTreeMap<&str, (u64, u64)> = BTreeMap::new();
    for record in records {
        let entry = sums.entry(record.path.as_str()).or_insert((0, 0));
        if record.date >= recent_start {
            entry.0 += record.views;
        } else if record.date >= baseline_start {
            entry.1 += record.views;
        }
    }

    let mut ranked: Vec<(&str, u64, TrendScore)> = sums
        .into_iter()
        .filter(|(_, (recent, _))| *recent > 0)
        .map(|(path, (recent, baseline))| {
            let score = if baseline == 0 {
                TrendScore::New
            } else {
                TrendScore::Ratio((recent as f64 - baseline as f64) / baseline as f64)
            };
            (path, recent, score)
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.2.partial_cmp(&a.2)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(b.0))
    });
    ranked.truncate(limit);

    Ok(RankingResult {
        entries: ranked
            .into_iter()
            .enumerate()
            .map(|(i, (path, views, score))| RankingEntry {
                rank: i as u32 + 1,
                path: path.to_string(),
                views,
                delta: Some(score),
            })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, d).unwrap()
    }

    fn record(path: &str, date: NaiveDate, views: u64) -> PageViewRecord {
        PageViewRecord {
            path: path.to_string(),
            date,
            views,
        }
    }

    #[test]
    fn test_aggregate_sums_across_days() {
        // Worked example: /a gets 5 + 10, /b gets 3.
        let records = vec![
            record("/a", day(1), 5),
            record("/a", day(2), 10),
            record("/b", day(1), 3),
        ];
        let result = aggregate(&records, 10);
        assert_eq!(result.len(), 2);
        assert_eq!(result.entries[0].rank, 1);
        assert_eq!(result.entries[0].path, "/a");
        assert_eq!(result.entries[0].views, 15);
        assert_eq!(result.entries[1].rank, 2);
        assert_eq!(result.entries[1].path, "/b");
        assert_eq!(result.entries[1].views, 3);
    }

    #[test]
    fn test_aggregate_ties_break_by_ascending_path() {
        let records = vec![
            record("/z/", day(1), 7),
            record("/a/", day(1), 7),
            record("/m/", day(1), 7),
        ];
        let result = aggregate(&records, 10);
        let paths: Vec<&str> = result.entries.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["/a/", "/m/", "/z/"]);
        let ranks: Vec<u32> = result.entries.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn test_aggregate_truncates_to_limit() {
        let records: Vec<PageViewRecord> = (0..15)
            .map(|i| record(&format!("/p{:02}/", i), day(1), 100 - i))
            .collect();
        let result = aggregate(&records, 10);
        assert_eq!(result.len(), 10);
    }

    #[test]
    fn test_aggregate_fewer_paths_than_limit_is_not_an_error() {
        let records = vec![record("/a/", day(1), 1)];
        let result = aggregate(&records, 10);
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_aggregate_empty_input_yields_empty_ranking() {
        assert!(aggregate(&[], 10).is_empty());
    }

    // Trend fixtures span days 1..=28: baseline days 1-21, recent days 22-28.

    #[test]
    fn test_trend_ratio_is_recent_over_baseline_growth() {
        let records = vec![
            record("/a/", day(1), 8),
            record("/a/", day(25), 10),
            record("/span/", day(28), 1),
        ];
        let result = aggregate_trend(&records, 7, 21, 10).unwrap();
        let a = result.entries.iter().find(|e| e.path == "/a/").unwrap();
        assert_eq!(a.views, 10);
        assert_eq!(a.delta, Some(TrendScore::Ratio(0.25)));
    }

    #[test]
    fn test_trend_new_path_ranks_above_finite_ratios() {
        let records = vec![
            // /hot/ doubled its baseline views.
            record("/hot/", day(5), 10),
            record("/hot/", day(25), 20),
            // /c/ has no baseline at all.
            record("/c/", day(26), 4),
            record("/span/", day(1), 1),
        ];
        let result = aggregate_trend(&records, 7, 21, 10).unwrap();
        assert_eq!(result.entries[0].path, "/c/");
        assert_eq!(result.entries[0].delta, Some(TrendScore::New));
        assert_eq!(result.entries[1].path, "/hot/");
    }

    #[test]
    fn test_trend_excludes_paths_without_recent_views() {
        let records = vec![
            record("/stale/", day(2), 500),
            record("/live/", day(28), 1),
            record("/span/", day(1), 1),
        ];
        let result = aggregate_trend(&records, 7, 21, 10).unwrap();
        assert!(result.entries.iter().all(|e| e.path != "/stale/"));
    }

    #[test]
    fn test_trend_sub_period_boundaries() {
        // Day 22 is the first recent day; day 21 is the last baseline day.
        let records = vec![
            record("/a/", day(21), 3),
            record("/a/", day(22), 6),
            record("/span/", day(1), 1),
            record("/span/", day(28), 1),
        ];
        let result = aggregate_trend(&records, 7, 21, 10).unwrap();
        let a = result.entries.iter().find(|e| e.path == "/a/").unwrap();
        assert_eq!(a.views, 6);
        assert_eq!(a.delta, Some(TrendScore::Ratio(1.0)));
    }

    #[test]
    fn test_trend_zero_sub_period_is_invalid() {
        let records = vec![record("/a/", day(1), 1)];
        let err = aggregate_trend(&records, 0, 21, 10).unwrap_err();
        assert!(matches!(err, ReportError::InvalidWindow(_)));
    }

    #[test]
    fn test_trend_window_exceeding_data_span_is_invalid() {
        // Only 10 days of data for a 28-day trend window.
        let records = vec![record("/a/", day(1), 1), record("/a/", day(10), 1)];
        let err = aggregate_trend(&records, 7, 21, 10).unwrap_err();
        assert!(matches!(err, ReportError::InvalidWindow(_)));
    }

    #[test]
    fn test_trend_empty_input_yields_empty_ranking() {
        let result = aggregate_trend(&[], 7, 21, 10).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_trend_ties_break_by_ascending_path() {
        let records = vec![
            record("/b/", day(25), 4),
            record("/a/", day(26), 4),
            record("/span/", day(1), 1),
        ];
        let result = aggregate_trend(&records, 7, 21, 10).unwrap();
        // Both are New with equal scores.
        assert_eq!(result.entries[0].path, "/a/");
        assert_eq!(result.entries[1].path, "/b/");
    }
}
