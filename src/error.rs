use thiserror::Error;

/// All errors produced by the ranking pipeline.
#[derive(Error, Debug)]
pub enum ReportError {
    /// A provider row carried a malformed view count.
    #[error("Invalid record for {path} on {date}: views = {views}")]
    InvalidRecord {
        path: String,
        date: chrono::NaiveDate,
        views: i64,
    },

    /// Trend sub-periods are non-positive or do not fit the data span.
    #[error("Invalid trend window: {0}")]
    InvalidWindow(String),

    /// A ranking could not be rendered as CSV.
    #[error("Failed to render CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ReportError>;
