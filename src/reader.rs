//! The list file reader facade.

use std::{
    fmt::{self, Display, Formatter},
    fs::File,
    iter::FusedIterator,
    path::{Path, PathBuf},
};

use crate::codec::LineCodec;
use crate::input::{BufferedLineSource, LineSource, MappedLineSource, RawLine};
use crate::options::{ReadConfig, reader_type::ReaderType};
use crate::selector::{Strategy, StrategySelector};
use crate::{LineRecord, ListReaderError};

/// The line source selected for a reader.
#[derive(Debug)]
enum Source {
    Buffered(BufferedLineSource<File>),
    Mapped(MappedLineSource),
}

impl Source {
    fn next_line(&mut self) -> Result<Option<RawLine<'_>>, ListReaderError> {
        match self {
            Self::Buffered(source) => source.next_line(),
            Self::Mapped(source) => source.next_line(),
        }
    }
}

/// Reads a list file line by line with a strategy chosen once at construction.
///
/// The file is opened (or mapped) eagerly by the constructor and released
/// when the reader, or the iterator it was turned into, is dropped. Reading
/// consumes the reader, so a file is read at most once per reader.
///
/// # Examples
///
/// ```no_run
/// use list_reader::{ListFileReader, ReadConfig};
///
/// # fn example() -> Result<(), list_reader::ListReaderError> {
/// let config = ReadConfig::default()
///     .with_strip_lines(true)
///     .with_skip_empty_lines(true)
///     .with_comment_prefix("#");
/// let lines = ListFileReader::new("hosts.list", config)?.read()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ListFileReader {
    path: PathBuf,
    config: ReadConfig,
    strategy: Strategy,
    file_size: u64,
    codec: LineCodec,
    source: Source,
    emitted: u64,
    exhausted: bool,
}

impl ListFileReader {
    /// Opens `path` with the strategy `config` asks for.
    ///
    /// # Errors
    ///
    /// - `ListReaderError::Config` if the configuration is invalid (checked before any I/O)
    /// - `ListReaderError::FileAccess` if the file cannot be stat'ed or opened
    /// - `ListReaderError::Mapping` if the mapped strategy was selected and mapping fails
    pub fn new<P: AsRef<Path>>(path: P, config: ReadConfig) -> Result<Self, ListReaderError> {
        config.validate()?;

        let path = path.as_ref();
        let performance = config.performance();
        let selector = StrategySelector::new(performance.mmap_threshold());
        let (strategy, file_size) = selector.select_for_path(path, config.reader_type())?;

        let source = match strategy {
            Strategy::Buffered => {
                Source::Buffered(BufferedLineSource::open(path, performance.buffer_size())?)
            }
            Strategy::Mapped => Source::Mapped(MappedLineSource::open(path)?),
        };

        Ok(Self {
            path: path.to_path_buf(),
            codec: LineCodec::new(&config, path.display().to_string()),
            config,
            strategy,
            file_size,
            source,
            emitted: 0,
            exhausted: false,
        })
    }

    /// Opens `path` with buffered reads regardless of size.
    ///
    /// # Errors
    ///
    /// See [`ListFileReader::new`].
    pub fn buffered<P: AsRef<Path>>(path: P, config: ReadConfig) -> Result<Self, ListReaderError> {
        Self::new(path, config.with_reader_type(ReaderType::Buffered))
    }

    /// Opens `path` with a memory mapping regardless of size.
    ///
    /// # Errors
    ///
    /// See [`ListFileReader::new`].
    pub fn mapped<P: AsRef<Path>>(path: P, config: ReadConfig) -> Result<Self, ListReaderError> {
        Self::new(path, config.with_reader_type(ReaderType::Mmap))
    }

    /// Gets the selected strategy.
    #[must_use]
    pub const fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Gets the file size observed at construction.
    #[must_use]
    pub const fn file_size(&self) -> u64 {
        self.file_size
    }

    /// Gets the file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gets a reference to the configuration.
    #[must_use]
    pub const fn config(&self) -> &ReadConfig {
        &self.config
    }

    /// Produces the next line that survives filtering.
    ///
    /// # Errors
    ///
    /// Returns read, decode and line-length errors as they occur.
    pub fn next_record(&mut self) -> Result<Option<LineRecord>, ListReaderError> {
        while let Some(raw) = self.source.next_line()? {
            if let Some(record) = self.codec.decode(raw)? {
                self.emitted += 1;
                return Ok(Some(record));
            }
        }

        if !self.exhausted {
            self.exhausted = true;
            log::debug!(
                "{}: {} lines emitted from {} bytes via {} source",
                self.path.display(),
                self.emitted,
                self.file_size,
                self.strategy
            );
        }

        Ok(None)
    }

    /// Reads every remaining line into memory, in file order.
    ///
    /// # Errors
    ///
    /// Returns the first read, decode or line-length error.
    pub fn read(self) -> Result<Vec<String>, ListReaderError> {
        self.records()
            .map(|record| record.map(LineRecord::into_text))
            .collect()
    }

    /// Reads every remaining line with its line number.
    ///
    /// # Errors
    ///
    /// Returns the first read, decode or line-length error.
    pub fn read_records(self) -> Result<Vec<LineRecord>, ListReaderError> {
        self.records().collect()
    }

    /// Turns the reader into a lazy iterator over records.
    ///
    /// The iterator ends after the first error. Dropping it releases the file.
    #[must_use]
    pub const fn records(self) -> Records {
        Records {
            reader: self,
            failed: false,
        }
    }

    /// Streams lines to `callback` in batches of at most `chunk_lines`.
    ///
    /// Only one batch is held in memory at a time. The final batch may be
    /// shorter; an empty file calls `callback` zero times.
    ///
    /// # Errors
    ///
    /// - `ListReaderError::Config` if `chunk_lines` is zero
    /// - any read, decode or line-length error
    /// - the first error returned by `callback`, which stops iteration
    pub fn for_each_chunk<F, E>(mut self, chunk_lines: usize, mut callback: F) -> Result<(), E>
    where
        F: FnMut(&[String]) -> Result<(), E>,
        E: From<ListReaderError>,
    {
        if chunk_lines == 0 {
            return Err(ListReaderError::Config("chunk size must be positive".to_string()).into());
        }

        // Grows with the input; `chunk_lines` may be far larger than the file
        let mut chunk = Vec::new();
        while let Some(record) = self.next_record()? {
            chunk.push(record.into_text());
            if chunk.len() == chunk_lines {
                callback(&chunk)?;
                chunk.clear();
            }
        }

        if !chunk.is_empty() {
            callback(&chunk)?;
        }

        Ok(())
    }
}

impl Display for ListFileReader {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.path.display(), self.strategy)
    }
}

/// Lazy, finite, non-restartable iterator over a reader's records.
#[derive(Debug)]
pub struct Records {
    reader: ListFileReader,
    failed: bool,
}

impl Iterator for Records {
    type Item = Result<LineRecord, ListReaderError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        match self.reader.next_record() {
            Ok(record) => record.map(Ok),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

impl FusedIterator for Records {}

/// Creates a reader for `path` with default transforms and the given strategy.
///
/// # Errors
///
/// See [`ListFileReader::new`].
pub fn create_list_reader<P: AsRef<Path>>(
    path: P,
    reader_type: ReaderType,
) -> Result<ListFileReader, ListReaderError> {
    ListFileReader::new(path, ReadConfig::default().with_reader_type(reader_type))
}
