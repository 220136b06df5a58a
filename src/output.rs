//! Write trait abstractions for stdout and file output.

use anyhow::{Context, Result};
use std::fmt::{self, Debug, Formatter};
use std::fs::File;
use std::io::{self, ErrorKind::BrokenPipe, LineWriter, Write};
use std::path::Path;

use list_reader::{LineRecord, ListReaderError};

use crate::args::Format;

/// `Writer` dynamic dispatches the `Write` trait.
pub(crate) type Writer = Box<dyn Write>;

/// `Output` writes to either a file or stream like stdout or stderr.
pub(crate) struct Output {
    writer: Writer,
}

impl Debug for Output {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Output")
            .field("writer", &"<dyn Write>")
            .finish()
    }
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl Output {
    /// Creates an `Output` from optional arguments, choosing between file or stdout.
    pub(crate) fn new(output: Option<&Path>) -> Result<Self> {
        match output {
            Some(path) if path == Path::new("-") => Ok(Self::stdout()),
            Some(path) => Self::file(path),
            None => Ok(Self::stdout()),
        }
    }

    /// Creates an `Output` that writes to a file with error context.
    pub(crate) fn file(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .map(|file| -> Writer { Box::new(LineWriter::new(file)) })
            .with_context(|| format!("failed to create output file: {}", path.display()))?;

        Ok(Self { writer: file })
    }

    /// Creates an `Output` that writes to stdout.
    pub(crate) fn stdout() -> Self {
        Self {
            writer: Box::new(io::stdout().lock()),
        }
    }

    /// Creates an `Output` that writes to stderr.
    pub(crate) fn stderr() -> Self {
        Self {
            writer: Box::new(io::stderr().lock()),
        }
    }

    /// Writes a chunk to the writer, handling `BrokenPipe` errors gracefully.
    pub(crate) fn write_chunk(&mut self, chunk: &str) -> Result<()> {
        Self::handle_broken_pipe(self.writer.write_all(chunk.as_bytes()))
    }

    /// Flushes the writer, ensuring all output is written.
    pub(crate) fn flush(&mut self) -> Result<()> {
        Self::handle_broken_pipe(self.writer.flush())
    }

    /// Streams records in `format`, returning how many were written.
    ///
    /// Records are written as they arrive. If the iterator yields an error,
    /// everything before it has already been written.
    pub(crate) fn write_records<I>(
        &mut self,
        records: I,
        format: Format,
        numbered: bool,
    ) -> Result<u64>
    where
        I: Iterator<Item = Result<LineRecord, ListReaderError>>,
    {
        let mut count = 0;

        match format {
            Format::Text => {
                for record in records {
                    let record = record?;
                    if numbered {
                        self.write_chunk(&format!("{}\t{}\n", record.index(), record.text()))?;
                    } else {
                        self.write_chunk(&format!("{}\n", record.text()))?;
                    }
                    count += 1;
                }
            }
            Format::Json => {
                self.write_chunk("[")?;
                for record in records {
                    let record = record?;
                    let json = if numbered {
                        serde_json::to_string(&record)
                    } else {
                        serde_json::to_string(record.text())
                    }
                    .context("failed to serialize line to JSON")?;
                    let separator = if count == 0 { "" } else { "," };
                    self.write_chunk(&format!("{separator}{json}"))?;
                    count += 1;
                }
                self.write_chunk("]\n")?;
            }
            Format::Csv => {
                let mut wtr = csv::Writer::from_writer(&mut *self);
                let header: &[&str] = if numbered { &["index", "line"] } else { &["line"] };
                Self::handle_csv_broken_pipe(wtr.write_record(header))?;
                for record in records {
                    let record = record?;
                    let result = if numbered {
                        wtr.write_record([record.index().to_string().as_str(), record.text()])
                    } else {
                        wtr.write_record([record.text()])
                    };
                    Self::handle_csv_broken_pipe(result)?;
                    count += 1;
                }
                Self::handle_broken_pipe(wtr.flush())?;
            }
        }

        self.flush()?;

        Ok(count)
    }

    /// Processes the result of a write, handling `BrokenPipe` errors gracefully.
    fn handle_broken_pipe(result: io::Result<()>) -> Result<()> {
        match result {
            Ok(()) => Ok(()),
            Err(err) => match err.kind() {
                BrokenPipe => Ok(()),
                _ => Err(err.into()),
            },
        }
    }

    /// Like `handle_broken_pipe`, for errors surfaced through the CSV writer.
    fn handle_csv_broken_pipe(result: csv::Result<()>) -> Result<()> {
        match result {
            Ok(()) => Ok(()),
            Err(err) => match err.kind() {
                csv::ErrorKind::Io(io_err) if io_err.kind() == BrokenPipe => Ok(()),
                _ => Err(err.into()),
            },
        }
    }
}
