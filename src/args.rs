//! Command-line arguments for `list-reader`.

use clap::{Parser, ValueEnum};
use core::fmt::{self, Display, Formatter};
use std::path::PathBuf;

use list_reader::{Encoding, Overflow, ReadConfig, ReaderType};

/// Output format for lines and the verbose report.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum Format {
    /// One line per line
    #[default]
    Text,
    /// A JSON array
    Json,
    /// CSV with a header row
    Csv,
}

impl Display for Format {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Parser)]
#[command(about, version)]
pub(crate) struct Args {
    /// List file to read.
    #[arg(value_name = "PATH")]
    pub(crate) input: PathBuf,

    /// Line source strategy [default: $LIST_READER_TYPE or auto].
    #[arg(short = 't', long, value_enum, value_name = "TYPE")]
    pub(crate) reader_type: Option<ReaderType>,

    /// Trim leading and trailing whitespace from lines.
    #[arg(short, long)]
    pub(crate) strip: bool,

    /// Skip lines that are empty after stripping.
    #[arg(short = 'e', long)]
    pub(crate) skip_empty: bool,

    /// Skip lines starting with this prefix.
    #[arg(short, long, value_name = "PREFIX")]
    pub(crate) comment_prefix: Option<String>,

    /// Character encoding of the file.
    #[arg(short = 'E', long, default_value_t, value_enum, ignore_case = true, value_name = "NAME")]
    pub(crate) encoding: Encoding,

    /// Maximum raw line length in bytes.
    #[arg(short, long, value_name = "BYTES")]
    pub(crate) max_line_length: Option<usize>,

    /// What to do with lines over the maximum length.
    #[arg(long, default_value_t, value_enum, value_name = "POLICY")]
    pub(crate) overflow: Overflow,

    /// Size in bytes at which `auto` memory-maps the file.
    #[arg(long, value_name = "BYTES")]
    pub(crate) mmap_threshold: Option<u64>,

    /// Read-ahead buffer size in bytes for buffered reads.
    #[arg(long, value_name = "BYTES")]
    pub(crate) buffer_size: Option<usize>,

    /// Prefix each line with its 0-based line number.
    #[arg(short, long)]
    pub(crate) numbered: bool,

    /// Output format.
    #[arg(short, long, default_value_t, value_enum, value_name = "FORMAT")]
    pub(crate) format: Format,

    /// Write output to file rather than stdout.
    #[arg(short, long, value_name = "PATH")]
    pub(crate) output: Option<PathBuf>,

    /// Print a run report to stderr.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl Args {
    /// Builds the read configuration, layering arguments over environment defaults.
    pub(crate) fn to_config(&self) -> ReadConfig {
        let env = ReadConfig::from_env();
        let mut performance = *env.performance();

        if let Some(threshold) = self.mmap_threshold {
            performance = performance.with_mmap_threshold(threshold);
        }
        if let Some(size) = self.buffer_size {
            performance = performance.with_buffer_size(size);
        }

        let config = ReadConfig::default()
            .with_encoding(self.encoding)
            .with_strip_lines(self.strip)
            .with_skip_empty_lines(self.skip_empty)
            .with_max_line_length(self.max_line_length)
            .with_overflow(self.overflow)
            .with_reader_type(self.reader_type.unwrap_or_else(|| env.reader_type()))
            .with_performance(performance);

        match &self.comment_prefix {
            Some(prefix) => config.with_comment_prefix(prefix.as_str()),
            None => config,
        }
    }
}
