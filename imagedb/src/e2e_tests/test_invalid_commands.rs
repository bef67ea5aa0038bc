//! Test that malformed lines are reported and skipped.

use crate::e2e_tests::helpers::*;

#[test]
fn test_invalid_commands() {
    let script = [
        "\n".to_string(),
        "hello\n".to_string(),
        "i a b c\n".to_string(),
        "i a b c d e\n".to_string(),
        "q a b\n".to_string(),
        "p p\n".to_string(),
        "iq a b c d\n".to_string(),
        insert("a", "b", "c", "d"),
        print(),
    ]
    .concat();

    let transcript = run_script(&script);

    assert_eq!(transcript.invalid_count(), 7);
    assert_eq!(transcript.summary.invalid, 7);
    assert_eq!(transcript.stdout, "a b c d\n");
}

#[test]
fn test_invalid_insert_leaves_index_untouched() {
    let script = ["i a b c\n".to_string(), print()].concat();

    let transcript = run_script(&script);

    assert_eq!(transcript.stdout, "(NULL)\n");
    assert_eq!(transcript.stderr, "Invalid command.\n");
}
