use time::macros::format_description;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::EnvFilter;

pub fn setup_logging(verbose: bool) {
    let default_filter = if verbose { "blogrank=info" } else { "blogrank=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let timer = LocalTime::new(format_description!("[hour]:[minute]:[second]"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(timer)
        .init();
}

pub fn format_number(num: u64) -> String {
    num.to_string()
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap())
        .collect::<Vec<_>>()
        .join(",")
}

pub fn validate_args(args: &crate::args::Args) -> anyhow::Result<()> {
    if args.limit == 0 {
        anyhow::bail!("--limit must be greater than 0");
    }

    if args.window_days == 0 {
        anyhow::bail!("--window-days must be greater than 0");
    }

    if args.recent_days == 0 {
        anyhow::bail!("--recent-days must be greater than 0");
    }

    if args.baseline_days == 0 {
        anyhow::bail!("--baseline-days must be greater than 0");
    }

    if args.recent_days + args.baseline_days > args.window_days {
        anyhow::bail!(
            "--recent-days plus --baseline-days ({}) must fit inside --window-days ({})",
            args.recent_days + args.baseline_days,
            args.window_days
        );
    }

    Ok(())
}
