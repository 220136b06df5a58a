//! Line-oriented reading of large list files.
//!
//! A list file is a plain-text file whose unit of data is one line. `ListFileReader`
//! reads one either through a sequential read-ahead buffer or through a read-only
//! memory mapping, choosing once, at construction, from the file size. Both
//! strategies feed the same decoding and filtering pipeline and yield the same
//! lines for the same bytes, so callers can switch strategies without seeing a
//! difference in output.
//!
//! ## Module structure
//!
//! - `codec.rs`: Decoding and line transforms (strip, comments, empty lines, length limit)
//! - `error.rs`: Error taxonomy
//! - `exit_code.rs`: Exit code definitions and handling
//! - `input/`: Line sources
//!   - `input/buffered.rs`: Sequential reads through a read-ahead buffer
//!   - `input/mapped.rs`: Zero-copy reads from a memory mapping
//! - `options/`: Configuration
//!   - `options/encoding.rs`: Character encodings
//!   - `options/overflow.rs`: Policy for over-long lines
//!   - `options/performance.rs`: Mapping threshold and buffer sizing
//!   - `options/reader_type.rs`: Requested strategy
//! - `platform.rs`: Process-wide platform capabilities
//! - `reader.rs`: The `ListFileReader` facade
//! - `record.rs`: Decoded lines
//! - `selector.rs`: Strategy selection
//!
//! # Strategies
//!
//! * [`ReaderType::Buffered`]: sequential reads, any size, one pass
//! * [`ReaderType::Mmap`]: zero-copy line slices over a memory mapping
//! * [`ReaderType::Auto`]: `Mmap` for files at or above
//!   [`Performance::mmap_threshold`], `Buffered` below it and for empty files
//!
//! A failure after selection is reported as is; a reader never retries with
//! the other strategy.
//!
//! # Transforms
//!
//! Applied in order by [`LineCodec`], each only when enabled:
//!
//! 1. decode under [`Encoding`]; invalid bytes are a [`ListReaderError::Decode`]
//! 2. `strip_lines`: trim leading and trailing whitespace
//! 3. `comment_prefix`: drop lines starting with the prefix
//! 4. `skip_empty_lines`: drop empty lines
//! 5. `max_line_length`: truncate or reject (see [`Overflow`]) lines whose raw
//!    byte length is over the limit
//!
//! # Examples
//!
//! ```
//! use list_reader::{ListFileReader, ReadConfig, ReaderType, Strategy};
//! # use std::io::Write;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! # let mut file = tempfile::NamedTempFile::new()?;
//! # file.write_all(b"# comment\n\n  hello  \nworld")?;
//! # let path = file.path();
//! let config = ReadConfig::default()
//!     .with_strip_lines(true)
//!     .with_skip_empty_lines(true)
//!     .with_comment_prefix("#");
//!
//! let buffered = ListFileReader::new(path, config.clone().with_reader_type(ReaderType::Buffered))?;
//! assert_eq!(buffered.strategy(), Strategy::Buffered);
//!
//! let mapped = ListFileReader::new(path, config.with_reader_type(ReaderType::Mmap))?;
//! assert_eq!(mapped.strategy(), Strategy::Mapped);
//!
//! assert_eq!(buffered.read()?, mapped.read()?);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! # Concurrency
//!
//! A reader is synchronous and owns its file handle or mapping. Separate
//! readers share nothing and can run on separate threads.

pub mod codec;
pub mod error;
pub mod exit_code;
pub mod input;
pub mod options;
pub mod platform;
pub mod reader;
pub mod record;
pub mod selector;

pub use codec::LineCodec;
pub use error::Error as ListReaderError;
pub use exit_code::ExitCode;
pub use input::{BufferedLineSource, LineSource, MappedLineSource, Metadata, RawLine};
pub use options::{
    ReadConfig, encoding::Encoding, overflow::Overflow, performance::Performance,
    reader_type::ReaderType,
};
pub use platform::Platform;
pub use reader::{ListFileReader, Records, create_list_reader};
pub use record::LineRecord;
pub use selector::{Strategy, StrategySelector};
