//! Decoded lines.

use core::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// A decoded line and its 0-based physical line number in the file.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineRecord {
    index: u64,
    text: String,
}

impl LineRecord {
    #[must_use]
    pub const fn new(index: u64, text: String) -> Self {
        Self { index, text }
    }

    /// Gets the line number.
    #[must_use]
    pub const fn index(&self) -> u64 {
        self.index
    }

    /// Gets the decoded text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Consumes the record, returning the decoded text.
    #[must_use]
    pub fn into_text(self) -> String {
        self.text
    }
}

impl Display for LineRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<LineRecord> for String {
    fn from(record: LineRecord) -> Self {
        record.into_text()
    }
}
