//! Command line arguments.

use crate::config::MonitorConfig;
use clap::{CommandFactory, Parser};
use std::path::PathBuf;

/// Tail every matching log file in a directory and report error lines.
#[derive(Debug, Parser)]
#[command(
    name = "log-monitor",
    version,
    about,
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Cli {
    /// Directory to monitor
    #[arg(allow_hyphen_values = true)]
    pub root: Option<PathBuf>,

    /// Space-separated file suffixes without the dot, e.g. "log traces data"
    #[arg(allow_hyphen_values = true)]
    pub suffixes: Option<String>,

    // Anything past the second argument only triggers usage.
    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub extra: Vec<String>,
}

impl Cli {
    /// More than two positional arguments means the caller wants usage.
    pub fn wants_usage(&self) -> bool {
        !self.extra.is_empty()
    }

    pub fn usage() -> String {
        Self::command().render_help().to_string()
    }

    pub fn into_config(self) -> MonitorConfig {
        let mut config = MonitorConfig::default();
        if let Some(root) = self.root {
            config.root = root;
        }
        if let Some(suffixes) = self.suffixes {
            config.suffixes = suffixes.split(' ').map(str::to_string).collect();
        }
        config
    }
}
