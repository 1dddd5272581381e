//! Polling tail of a single growing file.
//!
//! A [`Tailer`] only ever reports lines appended after it attached to the
//! file. Each poll reads whatever complete lines are available since the
//! last offset; an unterminated tail is left in place until its newline
//! arrives. After a burst of polls the handle is dropped and the path is
//! opened again, which picks up rotated or truncated files at their new end.
//! A line left unfinished at the end of a burst is resumed from its start;
//! attaching in the middle of a foreign line drops that fragment.

use crate::config::TailConfig;
use crate::error::{Error, Result};
use futures::Stream;
use std::collections::VecDeque;
use std::io::{self, ErrorKind, SeekFrom};
use std::path::{Path, PathBuf};
use tokio::fs::{self, File};
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// What a tailer observed during one step of its polling loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TailItem {
    /// The file was opened after being absent, or for the first time.
    Attached,
    /// A complete line with trailing whitespace removed.
    Line(String),
    /// The file does not exist right now; polling continues.
    Missing,
}

/// Follows one file path.
#[derive(Debug)]
pub struct Tailer {
    path: PathBuf,
    handle: Option<File>,
    offset: u64,
    /// Bytes past `offset` that do not yet end in a newline.
    has_partial: bool,
    /// Where to continue after a burst ended in the middle of a line.
    resume_at: Option<u64>,
    /// The handle was attached mid-line; drop bytes up to the next newline.
    skip_fragment: bool,
}

impl Tailer {
    /// Validates that `path` is an existing, readable, regular file.
    ///
    /// The file is not kept open; [`Tailer::follow`] attaches to it lazily
    /// so content written before the first poll is skipped.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let metadata = match fs::metadata(&path).await {
            Ok(metadata) => metadata,
            Err(e) => return Err(construction_error(path, e)),
        };
        if metadata.is_dir() {
            return Err(Error::IsDirectory { path });
        }
        if let Err(e) = File::open(&path).await {
            return Err(construction_error(path, e));
        }

        Ok(Self {
            path,
            handle: None,
            offset: 0,
            has_partial: false,
            resume_at: None,
            skip_fragment: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Turns the tailer into an endless stream of [`TailItem`]s.
    ///
    /// The stream ends only once `cancel` fires, which is observed within
    /// one poll interval.
    pub fn follow(
        self,
        config: TailConfig,
        cancel: CancellationToken,
    ) -> impl Stream<Item = TailItem> + Send {
        let state = Follow {
            tailer: self,
            config,
            cancel,
            pending: VecDeque::new(),
            polls: 0,
            attached: false,
            backoff: false,
        };

        futures::stream::unfold(state, |mut state| async move {
            let item = state.next_item().await?;
            Some((item, state))
        })
    }

    async fn reopen(&mut self) -> io::Result<()> {
        self.handle = None;
        self.has_partial = false;
        self.skip_fragment = false;
        let resume_at = self.resume_at.take();

        let mut file = File::open(&self.path).await?;
        let metadata = file.metadata().await?;
        if metadata.is_dir() {
            return Err(io::Error::new(ErrorKind::InvalidInput, "path is a directory"));
        }
        let size = metadata.len();

        // Finish a line cut by the burst, if its start is still a line boundary.
        let mut resumed = None;
        if let Some(offset) = resume_at {
            if offset <= size && !ends_mid_line(&mut file, offset).await? {
                resumed = Some(offset);
            }
        }

        match resumed {
            Some(offset) => {
                self.offset = offset;
                debug!(path = %self.path.display(), offset, "resumed unfinished line");
            }
            None => {
                self.offset = size;
                self.skip_fragment = ends_mid_line(&mut file, size).await?;
                debug!(path = %self.path.display(), offset = size, "attached to file end");
            }
        }

        self.handle = Some(file);
        Ok(())
    }

    fn release(&mut self) {
        self.resume_at = self.has_partial.then_some(self.offset);
        self.has_partial = false;
        self.handle = None;
    }

    /// Read complete lines appended since the last poll into `out`.
    async fn read_new_lines(&mut self, out: &mut VecDeque<String>) -> io::Result<()> {
        let Some(file) = self.handle.as_mut() else {
            return Ok(());
        };

        let current_size = file.metadata().await?.len();

        if detect_file_truncation(current_size, self.offset) {
            debug!(path = %self.path.display(), "file shrank, continuing from its new end");
            self.offset = current_size;
            self.has_partial = false;
            self.skip_fragment = ends_mid_line(file, current_size).await?;
            return Ok(());
        }

        let bytes_to_read = match calculate_bytes_to_read(current_size, self.offset) {
            Some(bytes) => bytes,
            None => return Ok(()),
        };

        file.seek(SeekFrom::Start(self.offset)).await?;
        let mut buf = Vec::new();
        (&mut *file).take(bytes_to_read).read_to_end(&mut buf).await?;

        let mut start = 0;
        if self.skip_fragment {
            match buf.iter().position(|&b| b == b'\n') {
                Some(newline) => {
                    start = newline + 1;
                    self.skip_fragment = false;
                }
                None => {
                    self.has_partial = true;
                    return Ok(());
                }
            }
        }

        // Only consume up to the last newline; a partial line is re-read next poll.
        let consumed = start + split_complete_lines(&buf[start..], out);
        self.offset += consumed as u64;
        self.has_partial = consumed < buf.len();
        Ok(())
    }
}

/// True if the byte just before `position` is not a newline.
async fn ends_mid_line(file: &mut File, position: u64) -> io::Result<bool> {
    if position == 0 {
        return Ok(false);
    }
    file.seek(SeekFrom::Start(position - 1)).await?;
    Ok(file.read_u8().await? != b'\n')
}

struct Follow {
    tailer: Tailer,
    config: TailConfig,
    cancel: CancellationToken,
    pending: VecDeque<String>,
    polls: usize,
    attached: bool,
    backoff: bool,
}

impl Follow {
    async fn next_item(&mut self) -> Option<TailItem> {
        loop {
            if let Some(line) = self.pending.pop_front() {
                return Some(TailItem::Line(line));
            }
            if self.cancel.is_cancelled() {
                return None;
            }
            if self.backoff {
                self.backoff = false;
                if !self.pause().await {
                    return None;
                }
            }

            if self.tailer.handle.is_none() {
                match self.tailer.reopen().await {
                    Ok(()) => {
                        self.polls = 0;
                        if !self.attached {
                            self.attached = true;
                            return Some(TailItem::Attached);
                        }
                    }
                    Err(e) if e.kind() == ErrorKind::NotFound => {
                        self.attached = false;
                        self.backoff = true;
                        return Some(TailItem::Missing);
                    }
                    Err(e) => {
                        warn!(path = %self.tailer.path.display(), error = %e, "cannot open file");
                        self.attached = false;
                        self.backoff = true;
                        continue;
                    }
                }
            }

            if !self.pause().await {
                return None;
            }

            if let Err(e) = self.tailer.read_new_lines(&mut self.pending).await {
                warn!(path = %self.tailer.path.display(), error = %e, "read failed, releasing handle");
                self.tailer.release();
                self.backoff = true;
                continue;
            }

            self.polls += 1;
            if self.polls >= self.config.burst_len.max(1) {
                self.tailer.release();
            }
        }
    }

    /// Sleep one poll interval. Returns false if cancelled meanwhile.
    async fn pause(&self) -> bool {
        tokio::select! {
            _ = self.cancel.cancelled() => false,
            _ = tokio::time::sleep(self.config.poll_interval) => true,
        }
    }
}

fn construction_error(path: PathBuf, error: io::Error) -> Error {
    match error.kind() {
        ErrorKind::NotFound => Error::NotFound { path },
        ErrorKind::PermissionDenied => Error::NotReadable {
            path,
            source: error,
        },
        _ => Error::Io(error),
    }
}

/// Push every newline-terminated line in `buf` onto `out`, returning the
/// number of bytes consumed. Bytes after the last newline are left alone.
fn split_complete_lines(buf: &[u8], out: &mut VecDeque<String>) -> usize {
    let Some(last_newline) = buf.iter().rposition(|&b| b == b'\n') else {
        return 0;
    };

    for line in buf[..last_newline].split(|&b| b == b'\n') {
        out.push_back(String::from_utf8_lossy(line).trim_end().to_string());
    }

    last_newline + 1
}

fn detect_file_truncation(current_size: u64, last_position: u64) -> bool {
    current_size < last_position
}

fn calculate_bytes_to_read(current_size: u64, last_position: u64) -> Option<u64> {
    if current_size <= last_position {
        None
    } else {
        Some(current_size - last_position)
    }
}
