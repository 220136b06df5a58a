//! Shared benchmark utilities.

use std::io::Write;
use std::time::Duration;

use criterion::{BenchmarkGroup, Criterion, measurement::WallTime};
use fake::Fake;
use fake::faker::lorem::en::Words;
use tempfile::NamedTempFile;

/// Generate random list lines, with a comment and a blank line every so often.
#[must_use]
pub fn generate_list_text(lines: usize, words_per_line: std::ops::Range<usize>) -> String {
    (0..lines)
        .map(|i| match i % 50 {
            0 => "# section".to_string(),
            25 => String::new(),
            _ => Words(words_per_line.clone()).fake::<Vec<String>>().join(" "),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Standard Criterion configuration.
#[must_use]
pub fn standard_criterion_config() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(15)
        .measurement_time(Duration::from_secs(3))
        .warm_up_time(Duration::from_secs(1))
}

/// Create a list file of roughly `size_kb` kilobytes.
///
/// # Panics
///
/// Panics if the temporary file cannot be created or written.
#[must_use]
pub fn create_list_file(size_kb: usize) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().expect("create temp file");

    let approx_chars_per_line = 60;
    let lines = size_kb * 1024 / approx_chars_per_line;
    let content = generate_list_text(lines, 4..10);

    temp_file
        .write_all(content.as_bytes())
        .expect("write to temp file");
    temp_file.flush().expect("flush temp file");
    temp_file
}

/// Create named benchmark group.
pub fn create_bench_group<'a>(c: &'a mut Criterion, name: &str) -> BenchmarkGroup<'a, WallTime> {
    c.benchmark_group(name)
}
