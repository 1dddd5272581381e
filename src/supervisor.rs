//! Starts one watcher per discovered file plus the consumer, and waits for
//! all of them to finish.

use crate::classifier::ClassifierChain;
use crate::config::MonitorConfig;
use crate::consumer::Consumer;
use crate::discovery::discover_log_files;
use crate::error::Result;
use crate::queue::event_queue;
use crate::sink::EventSink;
use crate::watcher::Watcher;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// What a finished run looked like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    /// Files that were monitored.
    pub watched: usize,
    /// Files that matched but could not be tailed.
    pub skipped: usize,
}

pub struct Supervisor<S> {
    config: MonitorConfig,
    chain: Arc<ClassifierChain>,
    sink: S,
}

impl<S: EventSink + 'static> Supervisor<S> {
    pub fn new(config: MonitorConfig, chain: ClassifierChain, sink: S) -> Self {
        Self {
            config,
            chain: Arc::new(chain),
            sink,
        }
    }

    /// Runs until `shutdown` fires and every unit has exited, or until all
    /// units exit on their own.
    pub async fn run(self, shutdown: CancellationToken) -> Result<RunSummary> {
        let Supervisor {
            config,
            chain,
            sink,
        } = self;

        let files = discover_log_files(&config.root, &config.suffixes).await?;
        if files.is_empty() {
            warn!(
                root = %config.root.display(),
                suffixes = ?config.suffixes,
                "no matching log files found"
            );
        }

        let (tx, rx) = event_queue();
        let mut summary = RunSummary::default();
        let mut units: Vec<JoinHandle<()>> = Vec::new();
        let mut watchers = Vec::new();

        for path in files {
            match Watcher::new(&path, chain.clone(), tx.clone(), config.tail).await {
                Ok(watcher) => {
                    watchers.push(watcher.start(&shutdown));
                    summary.watched += 1;
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping file");
                    summary.skipped += 1;
                }
            }
        }
        // The consumer sees the queue close once the last watcher is gone.
        drop(tx);

        let consumer = Consumer::new(rx, sink).with_wait(config.tail.poll_interval);
        units.push(consumer.start(shutdown.clone()));

        let mut ticker = tokio::time::interval(config.liveness_interval);
        loop {
            ticker.tick().await;
            watchers.retain(|w| !w.is_finished());
            units.retain(|u| !u.is_finished());
            if watchers.is_empty() && units.is_empty() {
                break;
            }
        }

        info!(watched = summary.watched, skipped = summary.skipped, "all monitors stopped");
        Ok(summary)
    }
}

/// Resolves on SIGINT, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "cannot listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
