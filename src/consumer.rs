//! The single loop that drains the event queue into a sink.

use crate::error::Result;
use crate::queue::{EventReceiver, Popped};
use crate::sink::EventSink;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Renders queued events until shutdown or until every producer is gone.
pub struct Consumer<S> {
    queue: EventReceiver,
    sink: S,
    wait: Duration,
}

impl<S: EventSink + 'static> Consumer<S> {
    pub fn new(queue: EventReceiver, sink: S) -> Self {
        Self {
            queue,
            sink,
            wait: Duration::from_secs(1),
        }
    }

    /// Upper bound on a single wait for the next event.
    pub fn with_wait(mut self, wait: Duration) -> Self {
        self.wait = wait;
        self
    }

    /// Returns the number of events written.
    pub async fn run(mut self, cancel: CancellationToken) -> Result<u64> {
        info!("event console started");
        let mut written = 0u64;

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                popped = self.queue.pop_timeout(self.wait) => match popped {
                    Popped::Event(event) => {
                        self.sink.write_event(&event)?;
                        written += 1;
                    }
                    Popped::Empty => continue,
                    Popped::Closed => break,
                },
            }
        }

        info!(events = written, "event console stopped");
        Ok(written)
    }

    /// Spawns [`Consumer::run`] as its own task.
    pub fn start(self, cancel: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(async move {
            if let Err(e) = self.run(cancel).await {
                error!(error = %e, "event console failed");
            }
        })
    }
}
