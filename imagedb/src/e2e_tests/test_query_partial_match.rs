//! Test queries that match only part of a stored path.

use crate::e2e_tests::helpers::*;

#[test]
fn test_query_partial_match() {
    let script = [
        insert("a", "x", "1", "f1.jpg"),
        insert("a", "x", "2", "f2.jpg"),
        query("a", "x", "1"),
        query("a", "y", "1"),
        query("b", "x", "1"),
        query("a", "x", "3"),
    ]
    .concat();

    let transcript = run_script(&script);

    assert_eq!(
        transcript.stdout_lines(),
        vec!["f1.jpg", "(NULL)", "(NULL)", "(NULL)"]
    );
}

#[test]
fn test_query_returns_all_files_sorted() {
    let script = [
        insert("cat", "tabby", "small", "z.jpg"),
        insert("cat", "tabby", "small", "m.jpg"),
        insert("cat", "tabby", "small", "a.jpg"),
        query("cat", "tabby", "small"),
    ]
    .concat();

    let transcript = run_script(&script);

    assert_eq!(transcript.stdout, "a.jpg m.jpg z.jpg\n");
}

#[test]
fn test_query_is_case_sensitive() {
    let script = [insert("Cat", "x", "1", "f.jpg"), query("cat", "x", "1")].concat();

    let transcript = run_script(&script);

    assert_eq!(transcript.stdout, "(NULL)\n");
}
