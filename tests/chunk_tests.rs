//! Tests for chunked streaming.

use std::io::Write;

use anyhow::anyhow;
use tempfile::NamedTempFile;

use list_reader::{ListFileReader, ListReaderError, ReadConfig, ReaderType};

fn list_file(lines: usize) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    for i in 0..lines {
        writeln!(file, "line {i}").expect("write test line");
    }
    file.flush().expect("flush test file");
    file
}

fn chunk_sizes(file: &NamedTempFile, reader_type: ReaderType, chunk_lines: usize) -> Vec<usize> {
    let config = ReadConfig::default().with_reader_type(reader_type);
    let mut sizes = Vec::new();

    ListFileReader::new(file.path(), config)
        .expect("open reader")
        .for_each_chunk(chunk_lines, |chunk| {
            sizes.push(chunk.len());
            Ok::<_, ListReaderError>(())
        })
        .expect("stream chunks");

    sizes
}

#[test]
fn test_chunks_cover_every_line_in_order() {
    let file = list_file(10);

    for reader_type in [ReaderType::Buffered, ReaderType::Mmap] {
        let config = ReadConfig::default().with_reader_type(reader_type);
        let mut seen = Vec::new();

        ListFileReader::new(file.path(), config)
            .expect("open reader")
            .for_each_chunk(4, |chunk| {
                seen.extend_from_slice(chunk);
                Ok::<_, ListReaderError>(())
            })
            .expect("stream chunks");

        let expected: Vec<String> = (0..10).map(|i| format!("line {i}")).collect();
        assert_eq!(seen, expected);
    }
}

#[test]
fn test_last_chunk_may_be_short() {
    let file = list_file(10);
    assert_eq!(chunk_sizes(&file, ReaderType::Buffered, 4), vec![4, 4, 2]);
    assert_eq!(chunk_sizes(&file, ReaderType::Mmap, 5), vec![5, 5]);
}

#[test]
fn test_empty_file_calls_nothing() {
    let file = list_file(0);
    assert!(chunk_sizes(&file, ReaderType::Auto, 3).is_empty());
}

#[test]
fn test_zero_chunk_size_is_config_error() {
    let file = list_file(1);
    let result = ListFileReader::new(file.path(), ReadConfig::default())
        .expect("open reader")
        .for_each_chunk(0, |_| Ok::<_, ListReaderError>(()));
    assert!(matches!(result, Err(ListReaderError::Config(_))));
}

#[test]
fn test_callback_error_stops_iteration() {
    let file = list_file(10);
    let mut calls = 0;

    let result: anyhow::Result<()> = ListFileReader::new(file.path(), ReadConfig::default())
        .expect("open reader")
        .for_each_chunk(2, |_| {
            calls += 1;
            if calls == 2 {
                return Err(anyhow!("downstream full"));
            }
            Ok(())
        });

    assert_eq!(result.expect_err("callback error").to_string(), "downstream full");
    assert_eq!(calls, 2);
}

#[test]
fn test_chunk_size_larger_than_file() {
    let file = list_file(2);
    assert_eq!(chunk_sizes(&file, ReaderType::Buffered, usize::MAX), vec![2]);
    assert_eq!(chunk_sizes(&file, ReaderType::Mmap, usize::MAX), vec![2]);
}
