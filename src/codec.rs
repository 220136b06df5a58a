//! Decoding and line-shape transforms applied to raw lines.

use crate::input::RawLine;
use crate::options::{ReadConfig, encoding::Encoding, overflow::Overflow};
use crate::{LineRecord, ListReaderError};

/// Turns raw lines into [`LineRecord`]s under a [`ReadConfig`].
///
/// Stages, in order, each only when enabled:
/// 1. decode the whole raw line under the configured encoding
/// 2. strip leading and trailing whitespace with `str::trim` (Unicode `White_Space`)
/// 3. drop lines starting with the comment prefix
/// 4. drop empty lines
/// 5. enforce `max_line_length` against the raw byte length, which excludes
///    the line terminator
///
/// The codec holds no state between lines, so every line source fed the
/// same bytes produces the same records.
#[derive(Clone, Debug)]
pub struct LineCodec {
    path: String,
    encoding: Encoding,
    strip_lines: bool,
    skip_empty_lines: bool,
    comment_prefix: Option<String>,
    max_line_length: Option<usize>,
    overflow: Overflow,
}

impl LineCodec {
    /// Creates a codec for lines of the file at `path`.
    #[must_use]
    pub fn new(config: &ReadConfig, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            encoding: config.encoding(),
            strip_lines: config.strip_lines(),
            skip_empty_lines: config.skip_empty_lines(),
            comment_prefix: config.comment_prefix().map(str::to_string),
            max_line_length: config.max_line_length(),
            overflow: config.overflow(),
        }
    }

    /// Decodes one raw line.
    ///
    /// Returns `Ok(None)` when the line is filtered out.
    ///
    /// # Errors
    ///
    /// - `ListReaderError::Decode` if the bytes are invalid under the encoding
    /// - `ListReaderError::LineTooLong` if the line is over the limit and the
    ///   overflow policy is `Reject`
    pub fn decode(&self, raw: RawLine<'_>) -> Result<Option<LineRecord>, ListReaderError> {
        let decoded = self
            .encoding
            .decode(raw.bytes)
            .map_err(|index| ListReaderError::Decode {
                path: self.path.clone(),
                line: raw.ordinal,
                offset: raw.offset + index as u64,
                encoding: self.encoding,
            })?;

        let mut text: &str = &decoded;

        if self.strip_lines {
            text = text.trim();
        }

        if self
            .comment_prefix
            .as_deref()
            .is_some_and(|prefix| text.starts_with(prefix))
        {
            return Ok(None);
        }

        if self.skip_empty_lines && text.is_empty() {
            return Ok(None);
        }

        let over_limit = self
            .max_line_length
            .filter(|&limit| raw.bytes.len() > limit);

        match (over_limit, self.overflow) {
            (Some(limit), Overflow::Reject) => {
                return Err(ListReaderError::LineTooLong {
                    path: self.path.clone(),
                    line: raw.ordinal,
                    length: raw.bytes.len(),
                    limit,
                });
            }
            (Some(limit), Overflow::Truncate) => text = truncate_to_boundary(text, limit),
            (None, _) => {}
        }

        Ok(Some(LineRecord::new(raw.ordinal, text.to_string())))
    }
}

/// Cuts `text` to at most `limit` bytes without splitting a character.
fn truncate_to_boundary(text: &str, limit: usize) -> &str {
    if text.len() <= limit {
        return text;
    }

    let mut end = limit;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
