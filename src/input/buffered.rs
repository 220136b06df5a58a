//! Buffered source for sequential line reads.

use std::{
    fmt::{self, Display, Formatter},
    fs::{self, File},
    io::{self, BufRead, BufReader, Read},
    path::{Path, PathBuf},
};

use memchr::memchr;

use super::{
    LineSource, Metadata, RawLine, display_path, open_file_with_error_context,
    trim_carriage_return,
};
use crate::ListReaderError;

/// Sequential line source over any byte stream.
///
/// Reads through a read-ahead buffer of a fixed capacity. A line longer
/// than the buffer is assembled across refills, so lines are never split or
/// dropped at buffer boundaries. Only the current line is held in memory.
#[derive(Debug)]
pub struct BufferedLineSource<R = File> {
    /// File path, if file-based.
    path: Option<PathBuf>,
    /// Read-ahead buffer over the stream.
    reader: BufReader<R>,
    /// The line being assembled.
    line: Vec<u8>,
    /// Ordinal of the next line.
    ordinal: u64,
    /// Bytes consumed from the stream so far.
    offset: u64,
    /// Set at end of input or after an error.
    finished: bool,
}

impl BufferedLineSource<File> {
    /// Opens a file for buffered line reads.
    ///
    /// # Errors
    ///
    /// Returns `ListReaderError::FileAccess` if the file cannot be opened.
    pub fn open(path: &Path, capacity: usize) -> Result<Self, ListReaderError> {
        let file = open_file_with_error_context(path)?;
        let mut source = Self::new(file, capacity);
        source.path = Some(path.to_path_buf());

        Ok(source)
    }
}

impl<R: Read> BufferedLineSource<R> {
    /// Creates a line source over `reader` with a read-ahead buffer of `capacity` bytes.
    pub fn new(reader: R, capacity: usize) -> Self {
        Self {
            path: None,
            reader: BufReader::with_capacity(capacity.max(1), reader),
            line: Vec::new(),
            ordinal: 0,
            offset: 0,
            finished: false,
        }
    }

    /// Builds the `IoRead` error for a failed refill and stops the source.
    fn read_error(&mut self, source: io::Error) -> ListReaderError {
        self.finished = true;
        ListReaderError::IoRead {
            path: display_path(self.path.as_deref()),
            offset: self.offset,
            source,
        }
    }
}

impl<R: Read> LineSource for BufferedLineSource<R> {
    fn next_line(&mut self) -> Result<Option<RawLine<'_>>, ListReaderError> {
        if self.finished {
            return Ok(None);
        }

        self.line.clear();
        let start = self.offset;

        loop {
            let available = match self.reader.fill_buf() {
                Ok(available) => available,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(self.read_error(e)),
            };

            if available.is_empty() {
                self.finished = true;
                if self.offset == start {
                    return Ok(None);
                }
                break;
            }

            if let Some(newline) = memchr(b'\n', available) {
                self.line.extend_from_slice(&available[..newline]);
                self.reader.consume(newline + 1);
                self.offset += newline as u64 + 1;
                break;
            }

            // No terminator in this refill: keep the bytes and read on
            let consumed = available.len();
            self.line.extend_from_slice(available);
            self.reader.consume(consumed);
            self.offset += consumed as u64;
            log::trace!(
                "{}: line {} spans a refill at byte {}",
                display_path(self.path.as_deref()),
                self.ordinal,
                self.offset
            );
        }

        let ordinal = self.ordinal;
        self.ordinal += 1;

        Ok(Some(RawLine {
            ordinal,
            offset: start,
            bytes: trim_carriage_return(&self.line),
        }))
    }
}

impl<R> Display for BufferedLineSource<R> {
    /// Shows the file path or "-" for a plain stream.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", display_path(self.path.as_deref()))
    }
}

impl<R> Metadata for BufferedLineSource<R> {
    /// Returns the file path for file sources, `None` for plain streams.
    fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Returns the file size in bytes for file sources, `None` for plain streams.
    fn size(&self) -> Option<u64> {
        self.path()
            .and_then(|path| fs::metadata(path).ok().map(|metadata| metadata.len()))
    }
}
