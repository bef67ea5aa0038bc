//! Test generated fixture scripts run cleanly from disk.

use std::collections::BTreeSet;

use tempfile::tempdir;

use crate::e2e_tests::helpers::*;
use crate::fixtures::{DEFAULT_VOCABULARY, produce, random_words};

#[test]
fn test_fixture_scripts() {
    let dir = tempdir().expect("create temp dir");
    let words = random_words(2017, 90, &DEFAULT_VOCABULARY);
    let fixtures = produce(&words);

    let inserts_path = dir.path().join("outfile");
    let queries_path = dir.path().join("queries");
    std::fs::write(&inserts_path, &fixtures.inserts).expect("write outfile");
    std::fs::write(
        &queries_path,
        format!("{}{}", fixtures.inserts, fixtures.queries),
    )
    .expect("write queries");

    let transcript = run_file(&inserts_path);
    assert_eq!(transcript.invalid_count(), 0);
    assert_eq!(transcript.summary.records, 30);

    let printed = transcript.stdout_lines();
    let mut sorted = printed.clone();
    sorted.sort_unstable();
    assert_eq!(printed, sorted);

    // Every query finds at least the file inserted for its triplet.
    let transcript = run_file(&queries_path);
    let query_lines = &transcript.stdout_lines()[30..];
    assert_eq!(query_lines.len(), 30);
    for (n, line) in query_lines.iter().enumerate() {
        let files: BTreeSet<&str> = line.split(' ').collect();
        assert!(
            files.contains(format!("file{}", n + 1).as_str()),
            "query {n} missing its own file: {line}"
        );
    }
}
