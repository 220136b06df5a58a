//! One-time choice between buffered and memory-mapped line sources.

use core::fmt::{self, Display, Formatter};
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ListReaderError;
use crate::options::reader_type::ReaderType;
use crate::platform::Platform;

/// The line source a reader was built on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// `BufferedLineSource`
    Buffered,
    /// `MappedLineSource`
    Mapped,
}

impl Display for Strategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buffered => write!(f, "buffered"),
            Self::Mapped => write!(f, "mapped"),
        }
    }
}

/// Decides which line source to build for a file.
///
/// # Examples
///
/// ```
/// use list_reader::{ReaderType, Strategy, StrategySelector};
///
/// let selector = StrategySelector::new(1024);
/// assert_eq!(selector.select(1023, ReaderType::Auto), Strategy::Buffered);
/// assert_eq!(selector.select(1024, ReaderType::Auto), Strategy::Mapped);
/// assert_eq!(selector.select(1 << 30, ReaderType::Buffered), Strategy::Buffered);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StrategySelector {
    threshold: u64,
    platform: Platform,
}

impl StrategySelector {
    /// Creates a selector that maps files of at least `threshold` bytes under `auto`.
    #[must_use]
    pub fn new(threshold: u64) -> Self {
        Self::with_platform(threshold, Platform::current())
    }

    /// Creates a selector for an explicit capability set.
    #[must_use]
    pub const fn with_platform(threshold: u64, platform: Platform) -> Self {
        Self {
            threshold,
            platform,
        }
    }

    /// Get the size threshold.
    #[must_use]
    pub const fn threshold(&self) -> u64 {
        self.threshold
    }

    /// Picks a strategy for a file of `file_size` bytes.
    ///
    /// Explicit requests are honored as given. Under `auto`, empty files and
    /// platforms without memory mapping always get `Buffered`.
    #[must_use]
    pub const fn select(&self, file_size: u64, requested: ReaderType) -> Strategy {
        match requested {
            ReaderType::Buffered => Strategy::Buffered,
            ReaderType::Mmap => Strategy::Mapped,
            ReaderType::Auto if file_size == 0 || !self.platform.mmap => Strategy::Buffered,
            ReaderType::Auto if file_size >= self.threshold => Strategy::Mapped,
            ReaderType::Auto => Strategy::Buffered,
        }
    }

    /// Stats `path` and picks a strategy for it, returning the strategy and the file size.
    ///
    /// # Errors
    ///
    /// Returns `ListReaderError::FileAccess` if the file does not exist, cannot
    /// be stat'ed, or is a directory.
    pub fn select_for_path(
        &self,
        path: &Path,
        requested: ReaderType,
    ) -> Result<(Strategy, u64), ListReaderError> {
        let metadata =
            fs::metadata(path).map_err(|source| ListReaderError::file_access(path, source))?;

        if metadata.is_dir() {
            return Err(ListReaderError::file_access(
                path,
                io::Error::from(io::ErrorKind::IsADirectory),
            ));
        }

        let file_size = metadata.len();
        let strategy = self.select(file_size, requested);
        log::debug!(
            "{}: {file_size} bytes, requested {requested}, threshold {}, selected {strategy}",
            path.display(),
            self.threshold
        );

        Ok((strategy, file_size))
    }
}
