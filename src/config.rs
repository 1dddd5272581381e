//! Runtime settings for the tailers and the supervisor.

use std::path::PathBuf;
use std::time::Duration;

/// Default pause between two polls of the same file.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Number of polls made against one open handle before it is released and
/// the path is validated again.
pub const DEFAULT_BURST_LEN: usize = 15;

/// Settings for a single tailer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TailConfig {
    pub poll_interval: Duration,
    pub burst_len: usize,
}

impl Default for TailConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            burst_len: DEFAULT_BURST_LEN,
        }
    }
}

/// Settings for a whole monitoring run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorConfig {
    /// Directory scanned for log files.
    pub root: PathBuf,
    /// Accepted file suffixes, without the leading dot.
    pub suffixes: Vec<String>,
    pub tail: TailConfig,
    /// How often the supervisor checks whether its units are still alive.
    pub liveness_interval: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            suffixes: vec!["log".to_string()],
            tail: TailConfig::default(),
            liveness_interval: Duration::from_secs(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MonitorConfig::default();

        assert_eq!(config.root, PathBuf::from("."));
        assert_eq!(config.suffixes, vec!["log"]);
        assert_eq!(config.tail.poll_interval, Duration::from_secs(1));
        assert_eq!(config.tail.burst_len, 15);
        assert_eq!(config.liveness_interval, Duration::from_secs(1));
    }
}
