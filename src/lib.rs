//! A lightweight agent that tails a directory of growing log files.
//!
//! Every matching file gets its own watcher task that polls for appended
//! lines and runs them through a classifier chain. Classifiers push events
//! onto one shared queue, drained by a single consumer that renders them.
//!
//! # Example
//!
//! ```rust,no_run
//! use log_monitor::{ClassifierChain, MonitorConfig, StdoutSink, Supervisor};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let shutdown = CancellationToken::new();
//!     let supervisor = Supervisor::new(
//!         MonitorConfig::default(),
//!         ClassifierChain::errors(),
//!         StdoutSink::default(),
//!     );
//!
//!     supervisor.run(shutdown).await?;
//!     Ok(())
//! }
//! ```

mod classifier;
mod cli;
mod config;
mod consumer;
mod discovery;
mod error;
mod event;
mod logging;
mod queue;
mod sink;
mod supervisor;
mod tailer;
mod watcher;

#[cfg(test)]
mod test_helpers;

pub use classifier::{Classifier, ClassifierChain, DefaultClassifier, ErrorClassifier};
pub use cli::Cli;
pub use config::{DEFAULT_BURST_LEN, DEFAULT_POLL_INTERVAL, MonitorConfig, TailConfig};
pub use consumer::Consumer;
pub use discovery::discover_log_files;
pub use error::{Error, Result};
pub use event::{Event, EventKind};
pub use logging::init_logging;
pub use queue::{EventReceiver, EventSender, Popped, event_queue};
pub use sink::{EventSink, StdoutSink, WriterSink};
pub use supervisor::{RunSummary, Supervisor, shutdown_signal};
pub use tailer::{TailItem, Tailer};
pub use watcher::{Watcher, WatcherHandle, WatcherState};

use futures::Stream;
use std::path::Path;
use tokio_util::sync::CancellationToken;

/// Follows a single file, yielding lines appended after the first poll.
///
/// # Example
///
/// ```rust,no_run
/// use log_monitor::{TailConfig, TailItem, follow_file};
/// use tokio_stream::StreamExt;
/// use tokio_util::sync::CancellationToken;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let stream = follow_file("app.log", TailConfig::default(), CancellationToken::new()).await?;
///     tokio::pin!(stream);
///
///     while let Some(item) = stream.next().await {
///         if let TailItem::Line(line) = item {
///             println!("{}", line);
///         }
///     }
///
///     Ok(())
/// }
/// ```
pub async fn follow_file<P: AsRef<Path>>(
    path: P,
    config: TailConfig,
    cancel: CancellationToken,
) -> Result<impl Stream<Item = TailItem> + Send> {
    let tailer = Tailer::open(path).await?;
    Ok(tailer.follow(config, cancel))
}
