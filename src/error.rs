//! Error types for list-reader.

use std::io;
use std::path::Path;

use thiserror::Error;

use crate::options::encoding::Encoding;

/// Structured error types for list-reader.
///
/// Every variant carries enough context (file path, line ordinal, byte offset)
/// to reproduce the failure. Nothing is retried internally.
#[derive(Error, Debug)]
pub enum Error {
    /// The file could not be stat'ed or opened.
    #[error("{message}: {path}")]
    FileAccess {
        /// File path where error occurred.
        path: String,
        /// Error description.
        message: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Memory mapping setup failed.
    #[error("failed to memory map file: {path}")]
    Mapping {
        /// File path where error occurred.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A read failed part way through the file.
    #[error("read failed at byte {offset}: {path}")]
    IoRead {
        /// File path where error occurred.
        path: String,
        /// Byte offset of the first byte that could not be read.
        offset: u64,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Bytes invalid under the configured encoding.
    #[error("invalid {encoding} at line {line}, byte {offset}: {path}")]
    Decode {
        /// File path where error occurred.
        path: String,
        /// 0-based line ordinal.
        line: u64,
        /// Byte offset of the offending byte within the file.
        offset: u64,
        /// The encoding the line was decoded under.
        encoding: Encoding,
    },

    /// A line exceeded `max_line_length` under the reject policy.
    #[error("line {line} is {length} bytes, exceeding the limit of {limit}: {path}")]
    LineTooLong {
        /// File path where error occurred.
        path: String,
        /// 0-based line ordinal.
        line: u64,
        /// Raw byte length of the line.
        length: usize,
        /// Configured maximum.
        limit: usize,
    },

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Builds a `FileAccess` error with a message matched to the I/O error kind.
    pub(crate) fn file_access(path: &Path, source: io::Error) -> Self {
        let message = match source.kind() {
            io::ErrorKind::NotFound => "no such file",
            io::ErrorKind::PermissionDenied => "permission denied",
            io::ErrorKind::IsADirectory => "is a directory",
            _ => "failed to open file",
        };

        Self::FileAccess {
            path: path.display().to_string(),
            message: message.to_string(),
            source,
        }
    }

    /// Whether this error describes bad input data rather than an I/O fault.
    #[must_use]
    pub const fn is_data_error(&self) -> bool {
        matches!(self, Self::Decode { .. } | Self::LineTooLong { .. })
    }
}
