//! Test that inserting the same record twice stores it once.

use crate::e2e_tests::helpers::*;

#[test]
fn test_duplicate_insert() {
    let script = [
        insert("b", "x", "1", "f2.jpg"),
        insert("a", "x", "1", "f1.jpg"),
        insert("a", "x", "1", "f1.jpg"),
        print(),
    ]
    .concat();

    let transcript = run_script(&script);

    assert_eq!(transcript.stdout, "a x 1 f1.jpg\nb x 1 f2.jpg\n");
    assert_eq!(transcript.summary.records, 2);
    assert_eq!(transcript.summary.commands, 4);
}

#[test]
fn test_duplicate_filename_under_other_triplet_is_kept() {
    let script = [
        insert("a", "x", "1", "same.jpg"),
        insert("a", "x", "2", "same.jpg"),
        query("a", "x", "1"),
        query("a", "x", "2"),
    ]
    .concat();

    let transcript = run_script(&script);

    assert_eq!(transcript.stdout_lines(), vec!["same.jpg", "same.jpg"]);
    assert_eq!(transcript.summary.records, 2);
}
