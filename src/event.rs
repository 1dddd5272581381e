//! Classified log events.

use chrono::{DateTime, Local};
use std::fmt;
use std::path::{Path, PathBuf};

/// The category a classifier assigned to a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Normal,
    Error,
    Stat,
}

/// A line that a classifier decided to report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    source: PathBuf,
    line: String,
    captured_at: DateTime<Local>,
    kind: EventKind,
    info: String,
}

impl Event {
    /// Creates an event stamped with the current local time.
    pub fn new(
        source: impl Into<PathBuf>,
        line: impl Into<String>,
        kind: EventKind,
        info: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            line: line.into(),
            captured_at: Local::now(),
            kind,
            info: info.into(),
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn line(&self) -> &str {
        &self.line
    }

    pub fn captured_at(&self) -> DateTime<Local> {
        self.captured_at
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn info(&self) -> &str {
        &self.info
    }
}

impl fmt::Display for Event {
    /// Renders `<basename> [<info>] <line>`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self
            .source
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_else(|| self.source.to_string_lossy());
        write!(f, "{} [{}] {}", name, self.info, self.line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_basename() {
        let event = Event::new(
            "/var/log/app.log",
            "2024 ERROR disk full",
            EventKind::Error,
            "ERROR",
        );

        assert_eq!(event.to_string(), "app.log [ERROR] 2024 ERROR disk full");
    }

    #[test]
    fn test_display_relative_path() {
        let event = Event::new("./logs/db.log", "slow query", EventKind::Stat, "STAT");
        assert_eq!(event.to_string(), "db.log [STAT] slow query");
    }

    #[test]
    fn test_accessors() {
        let before = Local::now();
        let event = Event::new("app.log", "hello", EventKind::Normal, "");

        assert_eq!(event.source(), Path::new("app.log"));
        assert_eq!(event.line(), "hello");
        assert_eq!(event.kind(), EventKind::Normal);
        assert_eq!(event.info(), "");
        assert!(event.captured_at() >= before);
        assert!(event.captured_at() <= Local::now());
    }
}
