//! Line sources over buffered and mapped input.
//!
//! This module provides two interchangeable line sources:
//!
//! - **Buffered** ([`BufferedLineSource`]):
//!   - Sequential reads through a fixed-size read-ahead buffer
//!   - Works over any byte stream; used for files below the mapping threshold
//!
//! - **Mapped** ([`MappedLineSource`]):
//!   - Zero-copy line slices out of a read-only memory mapping
//!   - Used for files at or above the mapping threshold
//!
//! Both split on `\n`, drop a `\r` directly before it, never include the
//! terminator in a [`RawLine`], and emit a final unterminated line. For the
//! same bytes they yield the same sequence of raw lines.

pub mod buffered;
pub mod mapped;

use std::{fs::File, path::Path};

pub use self::{buffered::BufferedLineSource, mapped::MappedLineSource};
use crate::ListReaderError;

/// One line of undecoded bytes, terminator excluded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawLine<'a> {
    /// 0-based physical line number.
    pub ordinal: u64,
    /// Byte offset of the line's first byte within the file.
    pub offset: u64,
    /// Line content.
    pub bytes: &'a [u8],
}

/// A sequential, non-restartable producer of raw lines.
pub trait LineSource {
    /// Advances to the next line.
    ///
    /// Returns `Ok(None)` at end of input. After an error no further lines are produced.
    ///
    /// # Errors
    ///
    /// Returns `ListReaderError::IoRead` if the underlying read fails.
    fn next_line(&mut self) -> Result<Option<RawLine<'_>>, ListReaderError>;
}

/// Provides metadata for data sources.
pub trait Metadata {
    /// Returns the file path, if file-based.
    fn path(&self) -> Option<&Path>;

    /// Returns the size in bytes, if known.
    fn size(&self) -> Option<u64>;
}

/// Removes a single trailing `\r` left over from a `\r\n` terminator.
#[inline]
pub(crate) fn trim_carriage_return(bytes: &[u8]) -> &[u8] {
    bytes.strip_suffix(b"\r").unwrap_or(bytes)
}

/// Formats an optional path for error messages.
pub(crate) fn display_path(path: Option<&Path>) -> String {
    path.map_or_else(|| "-".to_string(), |path| path.display().to_string())
}

/// Opens a file with enhanced error context.
///
/// # Errors
///
/// Returns `ListReaderError::FileAccess` with specific messages for:
/// - File not found
/// - Permission denied
/// - Other I/O errors
pub(crate) fn open_file_with_error_context(path: &Path) -> Result<File, ListReaderError> {
    File::open(path).map_err(|source| ListReaderError::file_access(path, source))
}
