use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::Deserialize;

/// A single provider-returned row before any validation or aggregation.
///
/// `views` is signed so a malformed export surfaces as an `InvalidRecord`
/// error during normalization instead of a deserialization failure.
#[derive(Debug, Clone, Deserialize)]
pub struct RawHit {
    pub path: String,
    pub date: NaiveDate,
    pub views: i64,
}

/// One path's validated view count for a single day.
///
/// The date is kept so the same normalized records feed both the
/// accumulative and the trend aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageViewRecord {
    pub path: String,
    pub date: NaiveDate,
    pub views: u64,
}

/// Rise score for the trend ranking.
///
/// A path with no baseline views but recent activity is `New` and ranks
/// above every path with a finite ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrendScore {
    New,
    Ratio(f64),
}

impl TrendScore {
    fn ord_value(&self) -> f64 {
        match self {
            TrendScore::New => f64::INFINITY,
            TrendScore::Ratio(r) => *r,
        }
    }
}

impl PartialOrd for TrendScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.ord_value().total_cmp(&other.ord_value()))
    }
}

/// One line of a ranking. Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingEntry {
    /// Positional rank, 1..N with no gaps.
    pub rank: u32,
    pub path: String,
    pub views: u64,
    /// Populated only by the trend aggregator.
    pub delta: Option<TrendScore>,
}

/// An ordered Top-N list produced by one of the aggregators.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankingResult {
    pub entries: Vec<RankingEntry>,
}

impl RankingResult {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Header metadata carried verbatim into the rendered report.
///
/// `generated_on` is supplied by the caller so rendering is deterministic
/// for identical input.
#[derive(Debug, Clone)]
pub struct ReportMeta {
    pub window_days: u32,
    pub recent_days: u32,
    pub baseline_days: u32,
    pub limit: usize,
    pub generated_on: NaiveDate,
}

/// The assembled report: ordered sections, accumulative ranking first.
#[derive(Debug, Clone)]
pub struct ReportDocument {
    pub meta: ReportMeta,
    pub accumulative: RankingResult,
    pub trending: RankingResult,
}

/// Configuration consumed by the pipeline, passed explicitly at call time.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Full date range the input rows cover, in days.
    pub window_days: u32,
    /// Recent sub-period for the trend ranking.
    pub recent_days: u32,
    /// Baseline sub-period immediately preceding the recent one.
    pub baseline_days: u32,
    /// Maximum entries per ranking.
    pub limit: usize,
    pub ignore: crate::ignore::IgnoreSet,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            window_days: 28,
            recent_days: 7,
            baseline_days: 21,
            limit: 10,
            ignore: crate::ignore::IgnoreSet::default(),
        }
    }
}
