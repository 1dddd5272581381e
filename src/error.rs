//! Error types for the log monitor.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for log monitor operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The file to tail does not exist at construction time.
    #[error("File '{}' does not exist", .path.display())]
    NotFound { path: PathBuf },

    /// The file exists but the process may not read it.
    #[error("File '{}' not readable: {source}", .path.display())]
    NotReadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The path names a directory rather than a file.
    #[error("File '{}' is a directory", .path.display())]
    IsDirectory { path: PathBuf },

    /// I/O errors while scanning directories or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenient Result type for log monitor operations.
pub type Result<T> = std::result::Result<T, Error>;
