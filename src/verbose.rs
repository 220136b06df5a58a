//! Verbose run report for list reads.

use anyhow::{Context, Result};
use serde::Serialize;

use list_reader::{ListFileReader, Strategy};

use crate::args::Format;
use crate::output::Output;

/// Handles verbose output formatting and display of a read's details.
#[derive(Debug)]
pub(crate) struct Verbose {
    output: Output,
}

impl Default for Verbose {
    /// Default verbose logger writes to stderr.
    fn default() -> Self {
        Self {
            output: Output::stderr(),
        }
    }
}

/// Verbose data that can be serialized to JSON and CSV.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VerboseData {
    source: String,
    strategy: Strategy,
    reader_type: String,
    file_size: u64,
    mmap_threshold: u64,
    buffer_size: usize,
    encoding: String,
    strip_lines: bool,
    skip_empty_lines: bool,
    comment_prefix: Option<String>,
    max_line_length: Option<usize>,
    overflow: String,
    lines: u64,
}

impl VerboseData {
    /// Captures the reader's settings before it is consumed.
    pub(crate) fn from_reader(reader: &ListFileReader) -> Self {
        let config = reader.config();
        let performance = config.performance();

        Self {
            source: reader.path().display().to_string(),
            strategy: reader.strategy(),
            reader_type: config.reader_type().to_string(),
            file_size: reader.file_size(),
            mmap_threshold: performance.mmap_threshold(),
            buffer_size: performance.buffer_size(),
            encoding: config.encoding().to_string(),
            strip_lines: config.strip_lines(),
            skip_empty_lines: config.skip_empty_lines(),
            comment_prefix: config.comment_prefix().map(str::to_string),
            max_line_length: config.max_line_length(),
            overflow: config.overflow().to_string(),
            lines: 0,
        }
    }

    /// Records how many lines were written.
    pub(crate) const fn with_lines(mut self, lines: u64) -> Self {
        self.lines = lines;
        self
    }

    /// Get all fields as name-value pairs.
    fn field_pairs(&self) -> Vec<(&str, String)> {
        vec![
            ("source", self.source.clone()),
            ("strategy", self.strategy.to_string()),
            ("reader-type", self.reader_type.clone()),
            ("file-size", self.file_size.to_string()),
            ("mmap-threshold", self.mmap_threshold.to_string()),
            ("buffer-size", self.buffer_size.to_string()),
            ("encoding", self.encoding.clone()),
            ("strip-lines", self.strip_lines.to_string()),
            ("skip-empty-lines", self.skip_empty_lines.to_string()),
            (
                "comment-prefix",
                self.comment_prefix
                    .as_ref()
                    .map_or_else(|| "none".to_string(), |prefix| format!("{prefix:?}")),
            ),
            (
                "max-line-length",
                self.max_line_length
                    .map_or_else(|| "none".to_string(), |limit| limit.to_string()),
            ),
            ("overflow", self.overflow.clone()),
            ("lines", self.lines.to_string()),
        ]
    }
}

impl Verbose {
    /// Writes the report in `format`.
    pub(crate) fn write_verbose_info(&mut self, data: &VerboseData, format: Format) -> Result<()> {
        match format {
            Format::Json => self.write_json(data),
            Format::Csv => self.write_csv(data),
            Format::Text => self.write_text(data),
        }
    }

    /// Write verbose info in JSON format.
    fn write_json(&mut self, data: &VerboseData) -> Result<()> {
        let json = serde_json::to_string(data).context("failed to serialize verbose report")?;

        self.output
            .write_chunk(&format!("{json}\n"))
            .context("failed to write JSON output")
    }

    /// Write verbose info in CSV format.
    fn write_csv(&mut self, data: &VerboseData) -> Result<()> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        let field_pairs = data.field_pairs();

        // Write headers directly from iterator
        writer.write_record(field_pairs.iter().map(|(name, _)| *name))?;

        // Write data values directly from iterator
        writer.write_record(field_pairs.iter().map(|(_, value)| value))?;

        let output = String::from_utf8(writer.into_inner()?)
            .context("failed to convert output to UTF-8")?;

        self.output
            .write_chunk(&output)
            .context("failed to write output")
    }

    /// Write verbose info in text format.
    fn write_text(&mut self, data: &VerboseData) -> Result<()> {
        data.field_pairs()
            .into_iter()
            .try_for_each(|(field_name, value)| {
                self.output.write_chunk(&format!("{field_name} {value}\n"))
            })?;

        self.output.flush()
    }
}
