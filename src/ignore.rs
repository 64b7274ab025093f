use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::info;

// Include default ignore list at compile time
const DEFAULT_IGNORE_BYTES: &[u8] = include_bytes!("../default_ignored_paths.txt");

/// Paths excluded from all rankings.
///
/// Entries are prefix rules: a hit is dropped when its path starts with any
/// entry. The bare root `/` is the one exception and only matches the root
/// path itself, since every path would otherwise match it.
#[derive(Debug, Clone, Default)]
pub struct IgnoreSet {
    entries: Vec<String>,
}

impl IgnoreSet {
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `path` is excluded by any entry.
    pub fn matches(&self, path: &str) -> bool {
        self.entries.iter().any(|entry| {
            if entry == "/" {
                path == "/"
            } else {
                path.starts_with(entry.as_str())
            }
        })
    }
}

fn parse_ignore_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Load the ignore list: an explicit file, else `ignored_paths.txt` in the
/// working directory, else the embedded defaults.
pub fn load_ignore_list(ignore_file_path: Option<&Path>) -> Result<IgnoreSet> {
    let start_time = Instant::now();
    info!(
        action = "start",
        component = "ignore_loading",
        "Starting ignore list loading"
    );

    let mut entries = Vec::new();

    if let Some(path) = ignore_file_path {
        info!(action = "load", component = "ignore_file", file_path = ?path, "Loading ignore list from specified file");
        if !path.exists() {
            anyhow::bail!("Ignore file not found: {:?}", path);
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read ignore file {:?}", path))?;
        entries = parse_ignore_list(&content);
        info!(action = "loaded", component = "ignore_file", entry_count = entries.len(), file_path = ?path, "Loaded ignore list from file");
    } else {
        // Try default file
        let default_file = Path::new("ignored_paths.txt");
        if default_file.exists() {
            info!(action = "load", component = "default_ignore_file", file_path = ?default_file, "Loading ignore list from default file");
            let content = fs::read_to_string(default_file)
                .with_context(|| format!("Failed to read ignore file {:?}", default_file))?;
            entries = parse_ignore_list(&content);
            info!(action = "loaded", component = "default_ignore_file", entry_count = entries.len(), file_path = ?default_file, "Loaded ignore list from default file");
        }

        // If nothing loaded, use embedded defaults
        if entries.is_empty() {
            info!(
                action = "load",
                component = "embedded_ignore_list",
                "Using embedded default ignore list"
            );
            let default_content = std::str::from_utf8(DEFAULT_IGNORE_BYTES)
                .context("Failed to decode embedded default ignore list")?;
            entries = parse_ignore_list(default_content);
            info!(
                action = "loaded",
                component = "embedded_ignore_list",
                entry_count = entries.len(),
                "Loaded embedded default ignore list"
            );
        }
    }

    let load_time = start_time.elapsed();
    info!(
        action = "complete",
        component = "ignore_loading",
        entry_count = entries.len(),
        duration_ms = load_time.as_millis(),
        "Ignore list ready"
    );
    Ok(IgnoreSet { entries })
}

pub fn init_default_ignore_list() -> Result<()> {
    let default_file = Path::new("ignored_paths.txt");

    if default_file.exists() {
        anyhow::bail!(
            "ignored_paths.txt already exists. Remove it first if you want to reinitialize."
        );
    }

    let default_content = std::str::from_utf8(DEFAULT_IGNORE_BYTES)
        .context("Failed to decode embedded default ignore list")?;

    fs::write(default_file, default_content)?;
    println!("Created ignored_paths.txt with the default ignore list");

    Ok(())
}
