//! Test utilities for temporary log files and capturing rendered output.

use crate::event::Event;
use crate::sink::EventSink;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

pub struct TempLogFile {
    pub path: PathBuf,
    _temp_dir: tempfile::TempDir,
}

impl TempLogFile {
    /// Create a new empty log file in its own temporary directory
    pub fn new() -> std::io::Result<Self> {
        let temp_dir = tempfile::tempdir()?;
        let path = temp_dir.path().join("test.log");

        File::create(&path)?;

        Ok(Self {
            path,
            _temp_dir: temp_dir,
        })
    }

    /// Create a temporary log file with an initial line
    pub fn with_content(content: &str) -> std::io::Result<Self> {
        let temp_file = Self::new()?;
        temp_file.append_content(content)?;
        Ok(temp_file)
    }

    /// Append one newline-terminated line
    pub fn append_content(&self, content: &str) -> std::io::Result<()> {
        self.append_raw(&format!("{content}\n"))
    }

    /// Append bytes exactly as given, without adding a newline
    pub fn append_raw(&self, content: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        file.write_all(content.as_bytes())?;
        file.flush()
    }

    /// Truncate the file in place
    pub fn truncate(&self) -> std::io::Result<()> {
        File::create(&self.path)?;
        Ok(())
    }

    pub fn remove(&self) -> std::io::Result<()> {
        std::fs::remove_file(&self.path)
    }

    /// Create the file again with the given content (simulates rotation)
    pub fn recreate(&self, content: &str) -> std::io::Result<()> {
        std::fs::write(&self.path, content)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Sink that keeps rendered lines in memory.
#[derive(Clone, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

impl EventSink for MemorySink {
    fn write_event(&mut self, event: &Event) -> std::io::Result<()> {
        self.lines.lock().unwrap().push(event.to_string());
        Ok(())
    }
}

/// Writer whose bytes can be read back after being handed off.
#[derive(Clone, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.lock().unwrap()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.bytes.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventKind;

    #[test]
    fn test_temp_log_file_creation() {
        let temp_file = TempLogFile::new().unwrap();
        assert!(temp_file.path().exists());
    }

    #[test]
    fn test_append_and_raw() {
        let temp_file = TempLogFile::new().unwrap();
        temp_file.append_content("line 1").unwrap();
        temp_file.append_raw("partial").unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert_eq!(content, "line 1\npartial");
    }

    #[test]
    fn test_remove_and_recreate() {
        let temp_file = TempLogFile::with_content("initial").unwrap();
        temp_file.remove().unwrap();
        assert!(!temp_file.path().exists());

        temp_file.recreate("again\n").unwrap();
        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert_eq!(content, "again\n");
    }

    #[test]
    fn test_memory_sink_shares_lines() {
        let sink = MemorySink::default();
        let mut writer = sink.clone();
        writer
            .write_event(&Event::new("a.log", "boom", EventKind::Error, "ERROR"))
            .unwrap();

        assert_eq!(sink.lines(), vec!["a.log [ERROR] boom"]);
    }
}
