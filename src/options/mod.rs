//! Configuration options for reading list files.
//!
//! This module provides the [`ReadConfig`] struct, a unified container for all
//! list-reader configuration settings.
//!
//! # Structure
//!
//! - **Encoding** ([`Encoding`]): How raw bytes become text (UTF-8, ASCII, Latin-1)
//! - **Line transforms**: `strip_lines`, `skip_empty_lines`, `comment_prefix`
//! - **Length limit**: `max_line_length` with an [`Overflow`] policy
//! - **Reader type** ([`ReaderType`]): Line source strategy (buffered, mmap, auto)
//! - **Performance** ([`Performance`]): Memory-mapping threshold and read-ahead buffer size
//!
//! # Usage
//!
//! ```
//! use list_reader::{ReadConfig, ReaderType};
//!
//! let config = ReadConfig::default()
//!     .with_strip_lines(true)
//!     .with_skip_empty_lines(true)
//!     .with_comment_prefix("#")
//!     .with_reader_type(ReaderType::Mmap);
//! assert!(config.validate().is_ok());
//! assert_eq!(config.reader_type(), ReaderType::Mmap);
//! ```
//!
//! # Environment Variables
//!
//! - `LIST_READER_TYPE`: `buffered`, `mmap` or `auto` (default: auto)
//! - `LIST_READER_MMAP_THRESHOLD`: Size in bytes at which `auto` maps files (default: 16777216)
//! - `LIST_READER_BUFFER_SIZE`: Buffered read-ahead size in bytes (default: 65536)

pub mod encoding;
pub mod overflow;
pub mod performance;
pub mod reader_type;

use core::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use self::encoding::Encoding;
use self::overflow::Overflow;
use self::performance::Performance;
use self::reader_type::{ReaderType, parse_reader_type_from_env};
use crate::ListReaderError;

/// Immutable configuration for one list file reader.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadConfig {
    /// Character encoding of the file.
    encoding: Encoding,

    /// Trim leading and trailing whitespace from each line.
    strip_lines: bool,

    /// Drop lines that are empty after any stripping.
    skip_empty_lines: bool,

    /// Drop lines starting with this prefix.
    comment_prefix: Option<String>,

    /// Maximum raw line length in bytes.
    max_line_length: Option<usize>,

    /// Policy for lines over `max_line_length`.
    overflow: Overflow,

    /// Requested line source strategy.
    reader_type: ReaderType,

    /// I/O sizing.
    performance: Performance,
}

impl ReadConfig {
    /// Creates a configuration with the reader type and sizing taken from the environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default()
            .with_reader_type(parse_reader_type_from_env())
            .with_performance(Performance::from_env())
    }

    /// Checks the configuration for invalid combinations.
    ///
    /// # Errors
    ///
    /// Returns `ListReaderError::Config` if:
    /// - `max_line_length` is set to zero
    /// - `comment_prefix` is set to an empty string
    /// - the read-ahead buffer size is zero or above `Performance::MAX_BUFFER_SIZE`
    pub fn validate(&self) -> Result<(), ListReaderError> {
        if self.max_line_length == Some(0) {
            return Err(ListReaderError::Config(
                "max_line_length must be positive".to_string(),
            ));
        }

        if self.comment_prefix.as_deref() == Some("") {
            return Err(ListReaderError::Config(
                "comment_prefix must not be empty".to_string(),
            ));
        }

        if self.performance.buffer_size == 0 {
            return Err(ListReaderError::Config(
                "buffer_size must be positive".to_string(),
            ));
        }

        if self.performance.buffer_size > Performance::MAX_BUFFER_SIZE {
            return Err(ListReaderError::Config(format!(
                "buffer_size must be at most {} bytes",
                Performance::MAX_BUFFER_SIZE
            )));
        }

        Ok(())
    }

    /// Set the character encoding.
    #[must_use]
    pub const fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Set whether lines are stripped of surrounding whitespace.
    #[must_use]
    pub const fn with_strip_lines(mut self, strip_lines: bool) -> Self {
        self.strip_lines = strip_lines;
        self
    }

    /// Set whether empty lines are skipped.
    #[must_use]
    pub const fn with_skip_empty_lines(mut self, skip_empty_lines: bool) -> Self {
        self.skip_empty_lines = skip_empty_lines;
        self
    }

    /// Set the comment prefix.
    #[must_use]
    pub fn with_comment_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.comment_prefix = Some(prefix.into());
        self
    }

    /// Set or clear the maximum line length.
    #[must_use]
    pub const fn with_max_line_length(mut self, max_line_length: Option<usize>) -> Self {
        self.max_line_length = max_line_length;
        self
    }

    /// Set the overflow policy for over-long lines.
    #[must_use]
    pub const fn with_overflow(mut self, overflow: Overflow) -> Self {
        self.overflow = overflow;
        self
    }

    /// Set the reader type.
    #[must_use]
    pub const fn with_reader_type(mut self, reader_type: ReaderType) -> Self {
        self.reader_type = reader_type;
        self
    }

    /// Set performance configuration while preserving other options.
    #[must_use]
    pub const fn with_performance(mut self, performance: Performance) -> Self {
        self.performance = performance;
        self
    }

    /// Set the memory-mapping size threshold.
    #[must_use]
    pub const fn with_mmap_threshold(mut self, threshold: u64) -> Self {
        self.performance = self.performance.with_mmap_threshold(threshold);
        self
    }

    /// Set the buffered read-ahead size.
    #[must_use]
    pub const fn with_buffer_size(mut self, size: usize) -> Self {
        self.performance = self.performance.with_buffer_size(size);
        self
    }

    /// Get the encoding.
    #[must_use]
    pub const fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Get the strip setting.
    #[must_use]
    pub const fn strip_lines(&self) -> bool {
        self.strip_lines
    }

    /// Get the skip-empty setting.
    #[must_use]
    pub const fn skip_empty_lines(&self) -> bool {
        self.skip_empty_lines
    }

    /// Get the comment prefix.
    #[must_use]
    pub fn comment_prefix(&self) -> Option<&str> {
        self.comment_prefix.as_deref()
    }

    /// Get the maximum line length.
    #[must_use]
    pub const fn max_line_length(&self) -> Option<usize> {
        self.max_line_length
    }

    /// Get the overflow policy.
    #[must_use]
    pub const fn overflow(&self) -> Overflow {
        self.overflow
    }

    /// Get the reader type.
    #[must_use]
    pub const fn reader_type(&self) -> ReaderType {
        self.reader_type
    }

    /// Get a reference to the performance configuration.
    #[must_use]
    pub const fn performance(&self) -> &Performance {
        &self.performance
    }
}

impl Display for ReadConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ReadConfig {{ encoding: {}, strip_lines: {}, skip_empty_lines: {}, comment_prefix: {:?}, max_line_length: {:?}, overflow: {}, reader_type: {} }}",
            self.encoding,
            self.strip_lines,
            self.skip_empty_lines,
            self.comment_prefix,
            self.max_line_length,
            self.overflow,
            self.reader_type
        )
    }
}
