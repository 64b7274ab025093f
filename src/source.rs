use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

use crate::model::RawHit;

/// Load raw page-view rows from a JSON export file.
///
/// The file is the hand-off format of the analytics fetch step: a JSON array
/// of `{path, date, views}` objects, one per path per day, already scoped to
/// the requested property and date window.
pub fn load_raw_hits(input_path: &Path) -> Result<Vec<RawHit>> {
    let start_time = Instant::now();
    info!(action = "start", component = "metrics_source", file_path = ?input_path, "Loading page-view export");

    if !input_path.exists() {
        anyhow::bail!("Page-view export not found at {:?}", input_path);
    }

    let content = fs::read_to_string(input_path)
        .with_context(|| format!("Failed to read page-view export {:?}", input_path))?;
    let hits: Vec<RawHit> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse page-view export {:?}", input_path))?;

    if hits.is_empty() {
        warn!(action = "load", component = "metrics_source", file_path = ?input_path, "Page-view export contains no rows");
    }

    let load_time = start_time.elapsed();
    info!(
        action = "complete",
        component = "metrics_source",
        row_count = hits.len(),
        duration_ms = load_time.as_millis(),
        "Page-view export loaded"
    );
    Ok(hits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;

    #[test]
    fn test_load_parses_rows() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"path": "/posts/a/", "date": "2026-08-01", "views": 12}},
                {{"path": "/posts/b/", "date": "2026-08-02", "views": 0}}
            ]"#
        )
        .unwrap();

        let hits = load_raw_hits(file.path()).unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].path, "/posts/a/");
        assert_eq!(hits[0].date, NaiveDate::from_ymd_opt(2026, 8, 1).unwrap());
        assert_eq!(hits[1].views, 0);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = load_raw_hits(Path::new("/nonexistent/views.json"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_malformed_json_fails_with_context() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();

        let err = load_raw_hits(file.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse page-view export"));
    }
}
