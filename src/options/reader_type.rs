//! Configuration for the line source strategy.

use core::fmt::{self, Display, Formatter};
use std::env;
use std::sync::OnceLock;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Requested line source strategy.
///
/// - **Buffered**: Reads sequentially through a fixed-size read-ahead buffer.
///   Suited to small and medium files and one-pass streaming.
///
/// - **Mmap**: Maps the whole file read-only and slices lines directly out of
///   the mapping. Suited to large files.
///
/// - **Auto**: Picks `Mmap` for files at or above the size threshold and
///   `Buffered` otherwise.
///
/// # Examples
///
/// ```
/// use list_reader::ReaderType;
///
/// assert_eq!(ReaderType::default(), ReaderType::Auto);
/// assert_eq!(ReaderType::Mmap.to_string(), "mmap");
/// ```
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ReaderType {
    /// Sequential buffered reads
    Buffered,

    /// Memory-mapped reads
    #[value(alias = "memory-mapped")]
    Mmap,

    /// Choose by file size
    #[default]
    Auto,
}

impl Display for ReaderType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buffered => write!(f, "buffered"),
            Self::Mmap => write!(f, "mmap"),
            Self::Auto => write!(f, "auto"),
        }
    }
}

/// Environment variable name for reader type configuration
pub const ENV_READER_TYPE: &str = "LIST_READER_TYPE";

/// Parse the reader type from the `LIST_READER_TYPE` environment variable.
///
/// The variable is read once per process; unrecognized values mean `auto`.
pub fn parse_reader_type_from_env() -> ReaderType {
    static READER_TYPE: OnceLock<ReaderType> = OnceLock::new();

    *READER_TYPE.get_or_init(|| match env::var(ENV_READER_TYPE).ok().as_deref() {
        Some(s) if s.eq_ignore_ascii_case("buffered") => ReaderType::Buffered,
        Some(s) if s.eq_ignore_ascii_case("mmap") || s.eq_ignore_ascii_case("memory-mapped") => {
            ReaderType::Mmap
        }
        _ => ReaderType::default(),
    })
}
