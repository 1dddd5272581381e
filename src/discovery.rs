//! Finding the log files to monitor.

use crate::error::Result;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Lists entries of `root` whose suffix is in `suffixes`, sorted by name.
///
/// The suffix is everything after the first dot, so `app.log` has suffix
/// `log` and `app.2024.log` has suffix `2024.log`. Names starting with a dot
/// never match.
pub async fn discover_log_files(root: &Path, suffixes: &[String]) -> Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(root).await?;
    let mut found = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if suffix_matches(name.trim(), suffixes) {
            found.push(entry.path());
        }
    }

    found.sort();
    Ok(found)
}

fn suffix_matches(name: &str, suffixes: &[String]) -> bool {
    match name.find('.') {
        Some(dot) if dot > 0 => {
            let suffix = &name[dot + 1..];
            suffixes.iter().any(|wanted| wanted == suffix)
        }
        _ => false,
    }
}
