//! Unbounded FIFO shared by all watchers and the single consumer.

use crate::event::Event;
use std::time::Duration;
use tokio::sync::mpsc;

/// Creates a connected producer/consumer pair.
pub fn event_queue() -> (EventSender, EventReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (EventSender { tx }, EventReceiver { rx })
}

/// Producer half. Cloned into every watcher.
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: mpsc::UnboundedSender<Event>,
}

impl EventSender {
    /// Enqueues an event. Returns false if the consumer is gone.
    pub fn push(&self, event: Event) -> bool {
        self.tx.send(event).is_ok()
    }
}

/// Outcome of a bounded wait on the queue.
#[derive(Debug, PartialEq, Eq)]
pub enum Popped {
    Event(Event),
    /// Nothing arrived within the wait.
    Empty,
    /// Every producer has been dropped and the queue is drained.
    Closed,
}

/// Consumer half.
#[derive(Debug)]
pub struct EventReceiver {
    rx: mpsc::UnboundedReceiver<Event>,
}

impl EventReceiver {
    /// Waits until an event is available, or returns None once closed.
    pub async fn pop(&mut self) -> Option<Event> {
        self.rx.recv().await
    }

    /// Like [`EventReceiver::pop`], but gives up after `wait`.
    pub async fn pop_timeout(&mut self, wait: Duration) -> Popped {
        match tokio::time::timeout(wait, self.rx.recv()).await {
            Ok(Some(event)) => Popped::Event(event),
            Ok(None) => Popped::Closed,
            Err(_) => Popped::Empty,
        }
    }
}
