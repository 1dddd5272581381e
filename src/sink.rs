//! Where the consumer writes rendered events.

use crate::event::Event;
use std::io::{self, Write};

/// Destination for rendered events.
pub trait EventSink: Send {
    fn write_event(&mut self, event: &Event) -> io::Result<()>;
}

/// Writes one `Display`-rendered event per line to any writer.
#[derive(Debug)]
pub struct WriterSink<W> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> EventSink for WriterSink<W> {
    fn write_event(&mut self, event: &Event) -> io::Result<()> {
        writeln!(self.writer, "{event}")?;
        self.writer.flush()
    }
}

pub type StdoutSink = WriterSink<io::Stdout>;

impl Default for StdoutSink {
    fn default() -> Self {
        WriterSink::new(io::stdout())
    }
}
