use std::time::Instant;

use chrono::NaiveDate;
use tracing::info;

use crate::error::Result;
use crate::export;
use crate::model::{RankingResult, RawHit, ReportConfig, ReportDocument, ReportMeta};
use crate::{aggregate, normalize};

/// Both rendered artifacts of one run.
#[derive(Debug, Clone)]
pub struct ReportOutput {
    pub markdown: String,
    pub csv: String,
}

/// Merge the two rankings and the run metadata into one ordered document.
pub fn assemble(
    accumulative: RankingResult,
    trending: RankingResult,
    meta: ReportMeta,
) -> ReportDocument {
    ReportDocument {
        meta,
        accumulative,
        trending,
    }
}

/// Run the full pipeline: normalize, rank, assemble, render.
///
/// Returns both rendered texts; any stage failure aborts the run before
/// anything is rendered, so a failed run never yields partial output.
pub fn run_report(
    hits: &[RawHit],
    config: &ReportConfig,
    generated_on: NaiveDate,
) -> Result<ReportOutput> {
    let total_start_time = Instant::now();
    info!(
        action = "start",
        component = "report_pipeline",
        hit_count = hits.len(),
        window_days = config.window_days,
        limit = config.limit,
        "Starting report pipeline"
    );

    let records = normalize::normalize(hits, &config.ignore)?;
    info!(
        action = "normalize",
        component = "report_pipeline",
        record_count = records.len(),
        "Normalized provider rows"
    );

    let accumulative = aggregate::aggregate(&records, config.limit);
    info!(
        action = "aggregate",
        component = "report_pipeline",
        entry_count = accumulative.len(),
        "Built accumulative ranking"
    );

    let trending = aggregate::aggregate_trend(
        &records,
        config.recent_days,
        config.baseline_days,
        config.limit,
    )?;
    info!(
        action = "aggregate_trend",
        component = "report_pipeline",
        entry_count = trending.len(),
        "Built trending ranking"
    );

    let meta = ReportMeta {
        window_days: config.window_days,
        recent_days: config.recent_days,
        baseline_days: config.baseline_days,
        limit: config.limit,
        generated_on,
    };
    let document = assemble(accumulative, trending, meta);

    let csv = export::to_csv(&document.accumulative)?;
    let markdown = export::to_markdown(&document);

    let total_time = total_start_time.elapsed();
    info!(
        action = "complete",
        component = "report_pipeline",
        duration_ms = total_time.as_millis(),
        "Report pipeline completed"
    );

    Ok(ReportOutput { markdown, csv })
}
