pub mod aggregate;
pub mod args;
pub mod error;
pub mod export;
pub mod ignore;
pub mod model;
pub mod normalize;
pub mod report;
pub mod source;
pub mod utils;

pub use args::Args;
pub use error::{ReportError, Result};
pub use ignore::{init_default_ignore_list, load_ignore_list, IgnoreSet};
pub use model::{PageViewRecord, RankingEntry, RankingResult, RawHit, ReportConfig, TrendScore};
pub use report::{run_report, ReportOutput};
