//! End-to-end runs of the compiled binary on small fixture corpora.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

const CORPUS: &str = "4\nthe quick brown fox\nthe quick brown dog\nlazy dog sleeps\nQUICK QUICK quick\n";

fn fixture(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

fn run(documents: &Path, queries: &Path, extra: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tfrank"))
        .arg("--documents")
        .arg(documents)
        .arg("--queries")
        .arg(queries)
        .arg("--workers")
        .arg("2")
        .args(extra)
        .output()
        .expect("binary runs")
}

#[test]
fn test_answers_queries_with_ranked_blocks() {
    let dir = tempfile::tempdir().expect("tempdir");
    let documents = fixture(dir.path(), "documents.txt", CORPUS);
    let queries = fixture(
        dir.path(),
        "queries.txt",
        "3\n1 5 lazy\n3 1 zzz\n4 10 quick\n",
    );

    let output = run(&documents, &queries, &[]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("utf8 stdout");
    assert!(stdout.contains("Top-5 results for query 1"));
    assert!(stdout.contains("1: doc=2"));
    assert!(stdout.contains("no results found"));
    assert!(stdout.contains("1: doc=3"), "saturated doc ranks first");
}

#[test]
fn test_malformed_query_line_is_skipped() {
    let dir = tempfile::tempdir().expect("tempdir");
    let documents = fixture(dir.path(), "documents.txt", CORPUS);
    let queries = fixture(dir.path(), "queries.txt", "2\nbogus line\n1 5 lazy\n");

    let output = run(&documents, &queries, &[]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("utf8 stdout");
    assert!(stdout.contains("query 1"));
    assert!(!stdout.contains("bogus"));
}

#[test]
fn test_json_mode_emits_parseable_lines() {
    let dir = tempfile::tempdir().expect("tempdir");
    let documents = fixture(dir.path(), "documents.txt", CORPUS);
    let queries = fixture(dir.path(), "queries.txt", "2\n1 5 lazy\n3 1 zzz\n");

    let output = run(&documents, &queries, &["--json"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("utf8 stdout");
    let blocks: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).expect("json line"))
        .collect();
    assert_eq!(blocks.len(), 2);

    let lazy = blocks
        .iter()
        .find(|b| b["query_id"] == 1)
        .expect("query 1 present");
    assert_eq!(lazy["hits"][0]["doc_id"], 2);
}

#[test]
fn test_malformed_document_count_is_fatal() {
    let dir = tempfile::tempdir().expect("tempdir");
    let documents = fixture(dir.path(), "documents.txt", "four\na b c\n");
    let queries = fixture(dir.path(), "queries.txt", "0\n");

    let output = run(&documents, &queries, &[]);
    assert!(!output.status.success());
}

#[test]
fn test_missing_input_file_is_fatal() {
    let dir = tempfile::tempdir().expect("tempdir");
    let queries = fixture(dir.path(), "queries.txt", "0\n");
    let missing = dir.path().join("nope.txt");

    let output = run(&missing, &queries, &[]);
    assert!(!output.status.success());
}
