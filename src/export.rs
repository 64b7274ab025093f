use std::fmt::Write as _;

use anyhow::Context;

use crate::error::Result;
use crate::model::{RankingResult, ReportDocument, TrendScore};
use crate::utils::format_number;

/// Render a trend score for display: signed percentage with one decimal
/// place, or `new` for paths with no baseline views.
fn format_delta(score: &TrendScore) -> String {
    match score {
        TrendScore::New => "new".to_string(),
        TrendScore::Ratio(r) => format!("{:+.1}%", r * 100.0),
    }
}

/// Render the assembled report as Markdown.
///
/// Identical input always yields byte-identical text.
pub fn to_markdown(document: &ReportDocument) -> String {
    let meta = &document.meta;
    let mut out = String::new();

    // String formatting cannot fail; discard the Infallible results.
    let _ = writeln!(out, "# Top pages");
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Window: last {} days (generated {})",
        meta.window_days, meta.generated_on
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "## Most viewed (top {})", meta.limit);
    let _ = writeln!(out);
    if document.accumulative.is_empty() {
        let _ = writeln!(out, "_No page views recorded in this window._");
    } else {
        let _ = writeln!(out, "| rank | path | views |");
        let _ = writeln!(out, "| ---: | :--- | ---: |");
        for entry in &document.accumulative.entries {
            let _ = writeln!(
                out,
                "| {} | {} | {} |",
                entry.rank,
                entry.path,
                format_number(entry.views)
            );
        }
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "## Trending (top {})", meta.limit);
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Last {} days compared to the {} days before.",
        meta.recent_days, meta.baseline_days
    );
    let _ = writeln!(out);
    if document.trending.is_empty() {
        let _ = writeln!(out, "_No trending pages in this window._");
    } else {
        let _ = writeln!(out, "| rank | path | views | change |");
        let _ = writeln!(out, "| ---: | :--- | ---: | ---: |");
        for entry in &document.trending.entries {
            let change = entry
                .delta
                .as_ref()
                .map(format_delta)
                .unwrap_or_default();
            let _ = writeln!(
                out,
                "| {} | {} | {} | {} |",
                entry.rank,
                entry.path,
                format_number(entry.views),
                change
            );
        }
    }

    out
}

/// Render a ranking as CSV with columns `rank,path,views`.
///
/// Paths containing commas or quotes are quoted per standard CSV rules.
pub fn to_csv(ranking: &RankingResult) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["rank", "path", "views"])?;
    for entry in &ranking.entries {
        writer.write_record([
            entry.rank.to_string(),
            entry.path.clone(),
            entry.views.to_string(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV buffer: {}", e))?;
    let text = String::from_utf8(bytes).context("CSV output was not valid UTF-8")?;
    Ok(text)
}
