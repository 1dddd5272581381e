//! Line classifiers and the ordered chain that runs them.

use crate::event::{Event, EventKind};
use crate::queue::EventSender;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, PoisonError};
use tracing::debug;

/// Inspects one line and optionally turns it into an [`Event`].
pub trait Classifier: Send + Sync {
    fn process(&self, line: &str, source: &Path) -> Option<Event>;
}

/// Echoes every line as `<path> , <line>` and never produces an event.
pub struct DefaultClassifier {
    out: Mutex<Box<dyn Write + Send>>,
}

impl DefaultClassifier {
    pub fn with_writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            out: Mutex::new(Box::new(writer)),
        }
    }
}

impl Default for DefaultClassifier {
    fn default() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Classifier for DefaultClassifier {
    fn process(&self, line: &str, source: &Path) -> Option<Event> {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        let echoed = writeln!(out, "{} , {}", source.display(), line).and_then(|()| out.flush());
        if let Err(e) = echoed {
            debug!(error = %e, "echo failed");
        }
        None
    }
}

const ERROR_MARKERS: [&str; 3] = ["error", "exception", " fail"];

/// Flags lines that look like failures.
#[derive(Debug, Default, Clone, Copy)]
pub struct ErrorClassifier;

impl Classifier for ErrorClassifier {
    fn process(&self, line: &str, source: &Path) -> Option<Event> {
        let lower = line.to_lowercase();
        ERROR_MARKERS
            .iter()
            .any(|marker| lower.contains(marker))
            .then(|| Event::new(source, line, EventKind::Error, "ERROR"))
    }
}

/// Classifiers applied in a fixed order to every line of a file.
#[derive(Default)]
pub struct ClassifierChain {
    classifiers: Vec<Box<dyn Classifier>>,
}

impl ClassifierChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a classifier to the end of the chain.
    pub fn with(mut self, classifier: impl Classifier + 'static) -> Self {
        self.classifiers.push(Box::new(classifier));
        self
    }

    /// The chain used when nothing richer is configured.
    pub fn echo() -> Self {
        Self::new().with(DefaultClassifier::default())
    }

    /// Only error events reach the queue.
    pub fn errors() -> Self {
        Self::new().with(ErrorClassifier)
    }

    pub fn len(&self) -> usize {
        self.classifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classifiers.is_empty()
    }

    /// Runs every classifier on `line` and pushes what they emit onto `queue`.
    /// Returns how many events were queued.
    pub fn dispatch(&self, line: &str, source: &Path, queue: &EventSender) -> usize {
        self.classifiers
            .iter()
            .filter_map(|classifier| classifier.process(line, source))
            .map(|event| queue.push(event))
            .filter(|&queued| queued)
            .count()
    }
}
