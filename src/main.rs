use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use std::fs;
use tracing::{error, info};

use blogrank::model::ReportConfig;
use blogrank::{ignore, report, source, utils, Args};

fn run(args: &Args) -> Result<()> {
    let ignore_set = ignore::load_ignore_list(args.ignore_file.as_deref())?;
    let hits = source::load_raw_hits(&args.input)?;

    let config = ReportConfig {
        window_days: args.window_days,
        recent_days: args.recent_days,
        baseline_days: args.baseline_days,
        limit: args.limit,
        ignore: ignore_set,
    };

    let output = report::run_report(&hits, &config, Local::now().date_naive())?;

    // Both artifacts are fully rendered before the first write, so a failed
    // run leaves no partial output behind.
    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("Failed to create output directory {:?}", args.out_dir))?;

    let markdown_path = args.out_dir.join("top.md");
    let csv_path = args.out_dir.join("top.csv");
    fs::write(&markdown_path, &output.markdown)
        .with_context(|| format!("Failed to write {:?}", markdown_path))?;
    fs::write(&csv_path, &output.csv)
        .with_context(|| format!("Failed to write {:?}", csv_path))?;

    info!(
        action = "complete",
        component = "main",
        markdown_path = ?markdown_path,
        csv_path = ?csv_path,
        "Report written"
    );
    println!("Wrote {} and {}", markdown_path.display(), csv_path.display());
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    utils::setup_logging(args.verbose);

    if args.init {
        return ignore::init_default_ignore_list();
    }

    utils::validate_args(&args)?;

    match run(&args) {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
