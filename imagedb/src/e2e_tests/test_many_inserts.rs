//! Test a larger script of generated records.

use crate::e2e_tests::helpers::*;

#[test]
fn test_many_inserts() {
    let mut script = String::new();
    let mut expected = Vec::new();
    for first in 0..5 {
        for second in 0..4 {
            for file in 0..3 {
                let (a, b, c, f) = (
                    format!("a{first}"),
                    format!("b{second}"),
                    "c".to_string(),
                    format!("f{file}"),
                );
                expected.push(format!("{a} {b} {c} {f}"));
                // Insert in reverse order so every chain needs sorting.
                script.insert_str(0, &insert(&a, &b, &c, &f));
            }
        }
    }
    script.push_str(&print());
    script.push_str(&query("a3", "b2", "c"));

    let transcript = run_script(&script);
    let lines = transcript.stdout_lines();

    assert_eq!(transcript.summary.records, 60);
    assert_eq!(lines[..60], expected[..]);
    assert_eq!(lines[60], "f0 f1 f2");
}
