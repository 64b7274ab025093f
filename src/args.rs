use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "blogrank",
    about = "Rank blog pages by total views and by trend from an analytics export",
    version,
    long_about = None
)]
pub struct Args {
    /// Path to the JSON page-view export
    #[arg(short, long, default_value = "page_views.json")]
    pub input: PathBuf,

    /// Directory the report files are written to
    #[arg(short, long, default_value = "out")]
    pub out_dir: PathBuf,

    /// Full window covered by the export, in days
    #[arg(long, default_value_t = 28)]
    pub window_days: u32,

    /// Recent sub-period for the trend ranking, in days
    #[arg(long, default_value_t = 7)]
    pub recent_days: u32,

    /// Baseline sub-period preceding the recent one, in days
    #[arg(long, default_value_t = 21)]
    pub baseline_days: u32,

    /// Number of entries per ranking
    #[arg(short, long, default_value_t = 10)]
    pub limit: usize,

    /// Path to a custom ignore list file
    #[arg(long)]
    pub ignore_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Initialize ignored_paths.txt with the default ignore list
    #[arg(long)]
    pub init: bool,
}
