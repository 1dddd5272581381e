//! A tailer bound to a classifier chain, running as its own task.

use crate::classifier::ClassifierChain;
use crate::config::TailConfig;
use crate::error::Result;
use crate::queue::EventSender;
use crate::tailer::{TailItem, Tailer};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_stream::StreamExt;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Lifecycle of one watcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatcherState {
    Created,
    Running,
    /// The file is missing; polling continues until it reappears.
    Waiting,
    Stopped,
}

/// Monitors one file and routes its lines through a classifier chain.
pub struct Watcher {
    tailer: Tailer,
    chain: Arc<ClassifierChain>,
    queue: EventSender,
    config: TailConfig,
}

impl Watcher {
    /// Fails if the file cannot be tailed; such a watcher is never started.
    pub async fn new(
        path: impl AsRef<Path>,
        chain: Arc<ClassifierChain>,
        queue: EventSender,
        config: TailConfig,
    ) -> Result<Self> {
        let tailer = Tailer::open(path).await?;
        Ok(Self {
            tailer,
            chain,
            queue,
            config,
        })
    }

    pub fn path(&self) -> &Path {
        self.tailer.path()
    }

    /// Spawns the watcher. It stops when `shutdown` fires or when
    /// [`WatcherHandle::stop`] is called.
    pub fn start(self, shutdown: &CancellationToken) -> WatcherHandle {
        let cancel = shutdown.child_token();
        let (state_tx, state_rx) = watch::channel(WatcherState::Created);
        let path = self.path().to_path_buf();

        let task = tokio::spawn(self.run(cancel.clone(), state_tx));

        WatcherHandle {
            path,
            cancel,
            state: state_rx,
            task,
        }
    }

    async fn run(self, cancel: CancellationToken, state: watch::Sender<WatcherState>) {
        let Watcher {
            tailer,
            chain,
            queue,
            config,
        } = self;
        let path = tailer.path().to_path_buf();
        info!(path = %path.display(), "starting monitor");

        let stream = tailer.follow(config, cancel);
        tokio::pin!(stream);

        while let Some(item) = stream.next().await {
            match item {
                TailItem::Attached => {
                    debug!(path = %path.display(), "monitoring file");
                    state.send_replace(WatcherState::Running);
                }
                TailItem::Missing => {
                    warn!(
                        path = %path.display(),
                        "file does not exist, retrying in {:?}",
                        config.poll_interval
                    );
                    state.send_replace(WatcherState::Waiting);
                }
                TailItem::Line(line) => {
                    chain.dispatch(&line, &path, &queue);
                }
            }
        }

        state.send_replace(WatcherState::Stopped);
        info!(path = %path.display(), "monitor stopped");
    }
}

/// Handle returned by [`Watcher::start`].
#[derive(Debug)]
pub struct WatcherHandle {
    path: PathBuf,
    cancel: CancellationToken,
    state: watch::Receiver<WatcherState>,
    task: JoinHandle<()>,
}

impl WatcherHandle {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn state(&self) -> WatcherState {
        *self.state.borrow()
    }

    /// Resolves once the watcher reaches `wanted`. Returns false if the
    /// watcher task went away first.
    pub async fn wait_for_state(&self, wanted: WatcherState) -> bool {
        let mut state = self.state.clone();
        state.wait_for(|current| *current == wanted).await.is_ok()
    }

    /// Asks this watcher alone to stop; takes effect within one poll interval.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    pub async fn join(self) {
        if let Err(e) = self.task.await {
            warn!(path = %self.path.display(), error = %e, "watcher task failed");
        }
    }
}
