//! Mapped source for zero-copy line reads.
//!
//! The mapping is created once, read-only, when the source is opened and is
//! unmapped when the source is dropped. Lines are slices into the mapping.
//!
//! Known hazard: if another process modifies or truncates the file while it
//! is mapped, the bytes seen are undefined, and on Unix a read past a
//! truncated end can raise `SIGBUS`. Only files that are not concurrently
//! rewritten get consistent results.

use std::{
    fmt::{self, Display, Formatter},
    path::{Path, PathBuf},
};

use memchr::memchr;
use memmap2::Mmap;

use super::{LineSource, Metadata, RawLine, open_file_with_error_context, trim_carriage_return};
use crate::ListReaderError;

/// Line source over a read-only memory mapping of a whole file.
#[derive(Debug)]
pub struct MappedLineSource {
    /// File path.
    path: PathBuf,
    /// `None` for empty files, which are never mapped.
    mmap: Option<Mmap>,
    /// Cursor for sequential reads.
    position: usize,
    /// Ordinal of the next sequential line.
    ordinal: u64,
}

impl MappedLineSource {
    /// Maps `path` read-only.
    ///
    /// Zero-length files are not mapped and yield no lines.
    ///
    /// # Errors
    ///
    /// Returns `ListReaderError::FileAccess` if the file cannot be opened or
    /// stat'ed, or `ListReaderError::Mapping` if the mapping cannot be created.
    pub fn open(path: &Path) -> Result<Self, ListReaderError> {
        let file = open_file_with_error_context(path)?;
        let len = file
            .metadata()
            .map_err(|source| ListReaderError::file_access(path, source))?
            .len();

        let mmap = if len == 0 {
            None
        } else {
            // Safety: the mapping is read-only and private to this source. Concurrent
            // modification of the file by other processes is a documented hazard.
            #[allow(unsafe_code)]
            let mmap = unsafe { Mmap::map(&file) }.map_err(|source| ListReaderError::Mapping {
                path: path.display().to_string(),
                source,
            })?;
            log::debug!("{}: mapped {} bytes", path.display(), mmap.len());
            Some(mmap)
        };

        Ok(Self {
            path: path.to_path_buf(),
            mmap,
            position: 0,
            ordinal: 0,
        })
    }

    /// The whole mapped region.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.mmap.as_deref().unwrap_or_default()
    }

    /// Length of the mapped region in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    /// Whether the file is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// An independent iterator over every line, from the start of the file.
    ///
    /// Unlike [`LineSource::next_line`] this does not move the source's cursor.
    #[must_use]
    pub fn lines(&self) -> MappedLines<'_> {
        MappedLines {
            bytes: self.as_bytes(),
            position: 0,
            ordinal: 0,
        }
    }
}

impl LineSource for MappedLineSource {
    fn next_line(&mut self) -> Result<Option<RawLine<'_>>, ListReaderError> {
        let bytes = self.mmap.as_deref().unwrap_or_default();

        Ok(split_line(bytes, &mut self.position, &mut self.ordinal))
    }
}

/// Iterator over zero-copy lines of a mapped file.
#[allow(missing_copy_implementations)]
#[derive(Clone, Debug)]
pub struct MappedLines<'a> {
    bytes: &'a [u8],
    position: usize,
    ordinal: u64,
}

impl<'a> Iterator for MappedLines<'a> {
    type Item = RawLine<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        split_line(self.bytes, &mut self.position, &mut self.ordinal)
    }
}

/// Slices the line starting at `position` and advances past its terminator.
#[inline]
fn split_line<'a>(bytes: &'a [u8], position: &mut usize, ordinal: &mut u64) -> Option<RawLine<'a>> {
    let start = *position;
    if start >= bytes.len() {
        return None;
    }

    let rest = &bytes[start..];
    let (line, advance) = match memchr(b'\n', rest) {
        Some(newline) => (&rest[..newline], newline + 1),
        None => (rest, rest.len()),
    };

    *position = start + advance;
    let line_ordinal = *ordinal;
    *ordinal += 1;

    Some(RawLine {
        ordinal: line_ordinal,
        offset: start as u64,
        bytes: trim_carriage_return(line),
    })
}

impl Display for MappedLineSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

impl Metadata for MappedLineSource {
    fn path(&self) -> Option<&Path> {
        Some(&self.path)
    }

    fn size(&self) -> Option<u64> {
        Some(self.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn mapped(content: &[u8]) -> (NamedTempFile, MappedLineSource) {
        let mut file = NamedTempFile::new().expect("create temp file");
        file.write_all(content).expect("write test content");
        file.flush().expect("flush test file");
        let source = MappedLineSource::open(file.path()).expect("map test file");
        (file, source)
    }

    #[test]
    fn test_lines_are_slices_of_the_mapping() {
        let (_file, source) = mapped(b"first\r\nsecond\nthird");
        let lines: Vec<RawLine<'_>> = source.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].bytes, b"first");
        assert_eq!(lines[1].offset, 7);
        assert_eq!(lines[2].bytes, b"third");

        let mapping = source.as_bytes().as_ptr_range();
        assert!(lines.iter().all(|line| mapping.contains(&line.bytes.as_ptr())));
    }

    #[test]
    fn test_empty_file_is_not_mapped() {
        let (_file, mut source) = mapped(b"");
        assert!(source.is_empty());
        assert!(source.next_line().expect("empty read").is_none());
        assert_eq!(source.size(), Some(0));
    }

    #[test]
    fn test_next_line_matches_lines_iterator() {
        let (_file, mut source) = mapped(b"a\n\nb\n");
        let expected: Vec<Vec<u8>> = source.lines().map(|line| line.bytes.to_vec()).collect();

        let mut sequential = Vec::new();
        while let Some(line) = source.next_line().expect("read line") {
            sequential.push(line.bytes.to_vec());
        }

        assert_eq!(sequential, expected);
        assert_eq!(sequential, vec![b"a".to_vec(), Vec::new(), b"b".to_vec()]);
    }

    #[test]
    fn test_missing_file_is_file_access_error() {
        let result = MappedLineSource::open(Path::new("/this/file/does/not/exist.list"));
        assert!(matches!(result, Err(ListReaderError::FileAccess { .. })));
    }
}
