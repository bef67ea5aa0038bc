//! Test that print lists records ordered at every level.

use crate::e2e_tests::helpers::*;

#[test]
fn test_print_sorted() {
    let script = [
        insert("dog", "pug", "small", "d2.jpg"),
        insert("cat", "tabby", "small", "c2.jpg"),
        insert("dog", "beagle", "large", "d1.jpg"),
        insert("cat", "tabby", "small", "c1.jpg"),
        insert("cat", "siamese", "large", "c3.jpg"),
        insert("cat", "tabby", "large", "c4.jpg"),
        print(),
    ]
    .concat();

    let transcript = run_script(&script);

    assert_eq!(
        transcript.stdout_lines(),
        vec![
            "cat siamese large c3.jpg",
            "cat tabby large c4.jpg",
            "cat tabby small c1.jpg",
            "cat tabby small c2.jpg",
            "dog beagle large d1.jpg",
            "dog pug small d2.jpg",
        ]
    );
}

#[test]
fn test_print_between_inserts_reflects_state() {
    let script = [
        insert("b", "b", "b", "b"),
        print(),
        insert("a", "a", "a", "a"),
        print(),
    ]
    .concat();

    let transcript = run_script(&script);

    assert_eq!(transcript.stdout, "b b b b\na a a a\nb b b b\n");
}
