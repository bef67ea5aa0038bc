//! Test querying and printing an empty database returns the no-match marker.

use crate::e2e_tests::helpers::*;

#[test]
fn test_query_empty_database() {
    let transcript = run_script(&query("cat", "tabby", "small"));

    assert_eq!(transcript.stdout, "(NULL)\n");
    assert_eq!(transcript.invalid_count(), 0);
}

#[test]
fn test_print_empty_database() {
    let transcript = run_script(&print());

    assert_eq!(transcript.stdout, "(NULL)\n");
    assert_eq!(transcript.summary.records, 0);
}
