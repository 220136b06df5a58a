use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::{self, contains};
use std::fs;
use std::io::Write;
use tempfile::NamedTempFile;

fn list_reader() -> Command {
    let mut cmd = Command::cargo_bin("list-reader").expect("list-reader binary");
    cmd.env_remove("LIST_READER_TYPE")
        .env_remove("LIST_READER_MMAP_THRESHOLD")
        .env_remove("LIST_READER_BUFFER_SIZE");
    cmd
}

fn list_file(content: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(content).expect("write test content");
    file.flush().expect("flush test file");
    file
}

const SAMPLE: &[u8] = b"# hosts\n  alpha  \n\nbeta\n";

#[test]
fn version() {
    let assert = list_reader().arg("-V").assert();
    assert.success().stdout(str::starts_with("list-reader "));
}

#[test]
fn help() {
    let assert = list_reader().arg("-h").assert();
    assert.success().stdout(contains("\nUsage"));
}

#[test]
fn missing_path_argument_is_usage_error() {
    list_reader().assert().code(64).stderr(contains("PATH"));
}

#[test]
fn lines_verbatim_by_default() {
    let file = list_file(SAMPLE);
    let assert = list_reader().arg(file.path()).assert();
    assert.success().stdout("# hosts\n  alpha  \n\nbeta\n");
}

#[test]
fn strip_skip_and_comment() {
    let file = list_file(SAMPLE);
    let assert = list_reader()
        .arg(file.path())
        .args(["-s", "-e", "-c", "#"])
        .assert();
    assert.success().stdout("alpha\nbeta\n");
}

#[test]
fn same_output_under_every_reader_type() {
    let file = list_file(SAMPLE);

    for reader_type in ["buffered", "mmap", "auto"] {
        let assert = list_reader()
            .arg(file.path())
            .args(["--strip", "--skip-empty", "--comment-prefix=#"])
            .arg(format!("--reader-type={reader_type}"))
            .assert();
        assert.success().stdout("alpha\nbeta\n");
    }
}

#[test]
fn numbered_text_uses_line_ordinals() {
    let file = list_file(SAMPLE);
    let assert = list_reader()
        .arg(file.path())
        .args(["-s", "-e", "-c", "#", "-n"])
        .assert();
    assert.success().stdout("1\talpha\n3\tbeta\n");
}

#[test]
fn json_output() {
    let file = list_file(SAMPLE);
    let assert = list_reader()
        .arg(file.path())
        .args(["-s", "-e", "-c", "#", "--format=json"])
        .assert();
    assert.success().stdout("[\"alpha\",\"beta\"]\n");
}

#[test]
fn numbered_json_output() {
    let file = list_file(SAMPLE);
    let assert = list_reader()
        .arg(file.path())
        .args(["-s", "-e", "-c", "#", "-n", "-f", "json"])
        .assert();
    assert
        .success()
        .stdout("[{\"index\":1,\"text\":\"alpha\"},{\"index\":3,\"text\":\"beta\"}]\n");
}

#[test]
fn json_output_for_empty_file() {
    let file = list_file(b"");
    let assert = list_reader().arg(file.path()).arg("--format=json").assert();
    assert.success().stdout("[]\n");
}

#[test]
fn csv_output() {
    let file = list_file(b"plain\nwith,comma\n");
    let assert = list_reader().arg(file.path()).arg("--format=csv").assert();
    assert.success().stdout("line\nplain\n\"with,comma\"\n");
}

#[test]
fn numbered_csv_output() {
    let file = list_file(b"a\nb\n");
    let assert = list_reader()
        .arg(file.path())
        .args(["--format=csv", "--numbered"])
        .assert();
    assert.success().stdout("index,line\n0,a\n1,b\n");
}

#[test]
fn output_to_file() {
    let file = list_file(b"one\ntwo\n");
    let dir = tempfile::tempdir().expect("create temp dir");
    let out = dir.path().join("lines.txt");

    let assert = list_reader()
        .arg(file.path())
        .arg("-o")
        .arg(&out)
        .assert();
    assert.success().stdout("");

    assert_eq!(fs::read_to_string(&out).expect("read output file"), "one\ntwo\n");
}

#[test]
fn truncates_long_lines_by_default() {
    let file = list_file("héllo\nok\n".as_bytes());
    let assert = list_reader().arg(file.path()).arg("-m4").assert();
    assert.success().stdout("hél\nok\n");
}

#[test]
fn rejects_long_lines_with_data_error() {
    let file = list_file(b"ok\nwaytoolong\n");
    let assert = list_reader()
        .arg(file.path())
        .args(["--max-line-length=4", "--overflow=reject"])
        .assert();
    assert
        .code(65)
        .stderr(contains("line 1 is 10 bytes, exceeding the limit of 4"));
}

#[test]
fn latin1_encoding() {
    let file = list_file(b"caf\xe9\n");
    let assert = list_reader().arg(file.path()).arg("--encoding=latin-1").assert();
    assert.success().stdout("café\n");
}

#[test]
fn encoding_name_is_case_insensitive() {
    let file = list_file(b"plain\n");
    let assert = list_reader().arg(file.path()).arg("-E").arg("UTF-8").assert();
    assert.success().stdout("plain\n");
}

#[test]
fn unknown_encoding_is_usage_error() {
    let file = list_file(b"plain\n");
    let assert = list_reader().arg(file.path()).arg("--encoding=ebcdic").assert();
    assert.code(64).stdout("");
}

#[test]
fn invalid_utf8_is_data_error() {
    let file = list_file(b"good\nba\xffd\n");
    let assert = list_reader().arg(file.path()).assert();
    assert
        .code(65)
        .stderr(contains("invalid utf-8 at line 1, byte 7"));
}

#[test]
fn non_ascii_under_ascii_is_data_error() {
    let file = list_file("abc\nnaïve\n".as_bytes());
    let assert = list_reader().arg(file.path()).arg("--encoding=ascii").assert();
    assert
        .code(65)
        .stderr(contains("invalid ascii at line 1, byte 6"));
}

#[test]
fn missing_file_is_no_input() {
    let assert = list_reader().arg("/no/such/dir/hosts.list").assert();
    assert
        .code(66)
        .stderr(contains("no such file").and(contains("hosts.list")))
        .stdout("");
}

#[test]
fn directory_is_no_input() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let assert = list_reader().arg(dir.path()).assert();
    assert.code(66).stderr(contains("is a directory"));
}

#[test]
fn zero_max_line_length_is_config_error() {
    let file = list_file(b"a\n");
    let assert = list_reader().arg(file.path()).arg("--max-line-length=0").assert();
    assert.code(78).stderr(contains("invalid configuration"));
}

#[test]
fn empty_comment_prefix_is_config_error() {
    let file = list_file(b"a\n");
    let assert = list_reader().arg(file.path()).arg("--comment-prefix=").assert();
    assert.code(78);
}

#[test]
fn verbose_text_report() {
    let file = list_file(b"a\nb\n");
    let assert = list_reader().arg(file.path()).arg("-v").assert();
    let expected = format!(
        "source {}\nstrategy buffered\nreader-type auto\nfile-size 4\nmmap-threshold 16777216\nbuffer-size 65536\nencoding utf-8\nstrip-lines false\nskip-empty-lines false\ncomment-prefix none\nmax-line-length none\noverflow truncate\nlines 2\n",
        file.path().display()
    );
    assert.success().stdout("a\nb\n").stderr(expected);
}

#[test]
fn verbose_reports_mapped_strategy_past_threshold() {
    let file = list_file(b"a\nb\n");
    let assert = list_reader()
        .arg(file.path())
        .args(["-v", "--mmap-threshold=4"])
        .assert();
    assert
        .success()
        .stderr(contains("strategy mapped\n").and(contains("mmap-threshold 4\n")));
}

#[test]
fn verbose_json_report() {
    let file = list_file(b"a\n");
    let assert = list_reader()
        .arg(file.path())
        .args(["-v", "-f", "json", "-t", "mmap", "-c", "//"])
        .assert();
    assert.success().stdout("[\"a\"]\n").stderr(
        contains("\"strategy\":\"mapped\"")
            .and(contains("\"readerType\":\"mmap\""))
            .and(contains("\"commentPrefix\":\"//\""))
            .and(contains("\"lines\":1")),
    );
}

#[test]
fn verbose_csv_report() {
    let file = list_file(b"a\n");
    let assert = list_reader().arg(file.path()).args(["-v", "-f", "csv"]).assert();
    assert
        .success()
        .stderr(str::starts_with("source,strategy,reader-type,file-size,"));
}

#[test]
fn env_reader_type_is_used_when_flag_absent() {
    let file = list_file(b"a\n");
    let assert = list_reader()
        .env("LIST_READER_TYPE", "mmap")
        .arg(file.path())
        .arg("-v")
        .assert();
    assert.success().stderr(contains("strategy mapped\n"));
}

#[test]
fn flag_overrides_env_reader_type() {
    let file = list_file(b"a\n");
    let assert = list_reader()
        .env("LIST_READER_TYPE", "mmap")
        .arg(file.path())
        .args(["-v", "-t", "buffered"])
        .assert();
    assert.success().stderr(contains("strategy buffered\n"));
}

#[test]
fn env_buffer_size_is_reported() {
    let file = list_file(b"a\n");
    let assert = list_reader()
        .env("LIST_READER_BUFFER_SIZE", "1024")
        .arg(file.path())
        .arg("-v")
        .assert();
    assert.success().stderr(contains("buffer-size 1024\n"));
}

#[test]
fn huge_buffer_size_is_config_error() {
    let file = list_file(b"a\n");
    let assert = list_reader()
        .arg(file.path())
        .args(["--buffer-size", "1000000000000000", "-t", "buffered"])
        .assert();
    assert
        .code(78)
        .stderr(contains("buffer_size must be at most 1073741824 bytes"))
        .stdout("");
}

#[test]
fn env_mmap_threshold_selects_mapping() {
    let file = list_file(b"a\nb\n");
    let assert = list_reader()
        .env("LIST_READER_MMAP_THRESHOLD", "4")
        .arg(file.path())
        .arg("-v")
        .assert();
    assert
        .success()
        .stdout("a\nb\n")
        .stderr(contains("strategy mapped\n").and(contains("mmap-threshold 4\n")));
}

#[test]
fn env_mmap_threshold_above_file_size_stays_buffered() {
    let file = list_file(b"a\nb\n");
    let assert = list_reader()
        .env("LIST_READER_MMAP_THRESHOLD", "5")
        .arg(file.path())
        .arg("-v")
        .assert();
    assert.success().stderr(contains("strategy buffered\n"));
}
