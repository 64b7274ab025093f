use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::error::{ReportError, Result};
use crate::ignore::IgnoreSet;
use crate::model::{PageViewRecord, RawHit};

/// Convert raw provider rows into validated per-(path, day) records.
///
/// Hits matching the ignore set are dropped before aggregation and duplicate
/// (path, date) pairs are summed. Output is sorted by (path, date) so every
/// downstream stage sees a deterministic order.
pub fn normalize(hits: &[RawHit], ignore: &IgnoreSet) -> Result<Vec<PageViewRecord>> {
    let mut totals: BTreeMap<(String, NaiveDate), u64> = BTreeMap::new();

    for hit in hits {
        if hit.views < 0 {
            return Err(ReportError::InvalidRecord {
                path: hit.path.clone(),
                date: hit.date,
                views: hit.views,
            });
        }

        if ignore.matches(&hit.path) {
            continue;
        }

        *totals.entry((hit.path.clone(), hit.date)).or_insert(0) += hit.views as u64;
    }

    Ok(totals
        .into_iter()
        .map(|((path, date), views)| PageViewRecord { path, date, views })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, d).unwrap()
    }

    fn hit(path: &str, date: NaiveDate, views: i64) -> RawHit {
        RawHit {
            path: path.to_string(),
            date,
            views,
        }
    }

    #[test]
    fn test_duplicate_path_day_pairs_are_summed() {
        let hits = vec![hit("/a/", day(1), 5), hit("/a/", day(1), 10)];
        let records = normalize(&hits, &IgnoreSet::default()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].views, 15);
    }

    #[test]
    fn test_ignored_paths_are_dropped() {
        let ignore = IgnoreSet::from_entries(["/tags/"]);
        let hits = vec![
            hit("/tags/rust/", day(1), 50),
            hit("/posts/a/", day(1), 3),
        ];
        let records = normalize(&hits, &ignore).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].path, "/posts/a/");
    }

    #[test]
    fn test_negative_views_fail_with_invalid_record() {
        let hits = vec![hit("/a/", day(1), -1)];
        let err = normalize(&hits, &IgnoreSet::default()).unwrap_err();
        assert!(matches!(err, ReportError::InvalidRecord { .. }));
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        let records = normalize(&[], &IgnoreSet::default()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_view_counts_are_conserved_per_path() {
        let hits = vec![
            hit("/a/", day(1), 5),
            hit("/a/", day(2), 10),
            hit("/a/", day(2), 2),
            hit("/b/", day(1), 3),
        ];
        let records = normalize(&hits, &IgnoreSet::default()).unwrap();
        let total_a: u64 = records
            .iter()
            .filter(|r| r.path == "/a/")
            .map(|r| r.views)
            .sum();
        assert_eq!(total_a, 17);
    }

    #[test]
    fn test_output_is_sorted_by_path_then_date() {
        let hits = vec![
            hit("/b/", day(2), 1),
            hit("/a/", day(3), 1),
            hit("/a/", day(1), 1),
        ];
        let records = normalize(&hits, &IgnoreSet::default()).unwrap();
        let keys: Vec<(&str, NaiveDate)> = records
            .iter()
            .map(|r| (r.path.as_str(), r.date))
            .collect();
        assert_eq!(
            keys,
            vec![("/a/", day(1)), ("/a/", day(3)), ("/b/", day(2))]
        );
    }
}
