//! Test fixture generation.
//!
//! Turns a plain word list into command scripts for the session binary:
//! every three consecutive words become the attributes of one image, and a
//! matching query script asks for each of those triplets again.
//!
//! Word lists can also be generated from a seed, so the same seed always
//! produces the same scripts.

use std::fmt::Write;
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::command::Command;
use crate::index::ATTRIBUTE_COUNT;

/// A vocabulary for [`random_words`].
///
/// Kept small so that generated records share attribute prefixes.
pub const DEFAULT_VOCABULARY: [&str; 16] = [
    "black", "white", "red", "green", "cat", "dog", "bird", "fish", "small", "large", "indoor",
    "outdoor", "day", "night", "portrait", "landscape",
];

/// File the insert script is written to.
pub const INSERTS_FILE: &str = "outfile";

/// File the query script is written to.
pub const QUERIES_FILE: &str = "queries";

/// A pair of generated command scripts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixtures {
    /// `i` commands, one per triplet, followed by a final `p`.
    pub inserts: String,
    /// `q` commands, one per triplet, in the same order.
    pub queries: String,
}

/// Build the insert and query scripts for `words`.
///
/// The n-th complete group of three words is filed as `file<n>`, counting
/// from 1. Words left over after the last complete group are ignored.
#[must_use]
pub fn produce<S: AsRef<str>>(words: &[S]) -> Fixtures {
    let mut inserts = String::new();
    let mut queries = String::new();

    for (n, group) in words.chunks_exact(ATTRIBUTE_COUNT).enumerate() {
        let (first, second, third) = (group[0].as_ref(), group[1].as_ref(), group[2].as_ref());
        let file_number = n + 1;

        // Writing to a String cannot fail.
        let _ = writeln!(
            inserts,
            "{} {first} {second} {third} file{file_number}",
            Command::INSERT
        );
        let _ = writeln!(queries, "{} {first} {second} {third}", Command::QUERY);
    }
    let _ = writeln!(inserts, "{}", Command::PRINT);

    Fixtures { inserts, queries }
}

/// Draw `count` words from `vocabulary` with a generator seeded by `seed`.
///
/// Returns an empty list when the vocabulary is empty.
#[must_use]
pub fn random_words(seed: u64, count: usize, vocabulary: &[&str]) -> Vec<String> {
    if vocabulary.is_empty() {
        return Vec::new();
    }

    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| vocabulary[rng.random_range(0..vocabulary.len())].to_string())
        .collect()
}

/// Read a whitespace-separated word list.
pub fn read_words(path: &Path) -> Result<Vec<String>, FixtureError> {
    let contents = std::fs::read_to_string(path).map_err(|source| FixtureError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(contents.split_whitespace().map(str::to_string).collect())
}

/// Generate the scripts for `words` and write them into `dir` as
/// [`INSERTS_FILE`] and [`QUERIES_FILE`].
///
/// Returns the scripts that were written.
pub fn write_scripts<S: AsRef<str>>(dir: &Path, words: &[S]) -> Result<Fixtures, FixtureError> {
    let fixtures = produce(words);

    for (name, contents) in [
        (INSERTS_FILE, &fixtures.inserts),
        (QUERIES_FILE, &fixtures.queries),
    ] {
        let path = dir.join(name);
        std::fs::write(&path, contents)
            .map_err(|source| FixtureError::Write { path, source })?;
    }

    Ok(fixtures)
}

/// Errors that can occur while reading word lists or writing scripts.
#[derive(Debug)]
pub enum FixtureError {
    /// The word list could not be read.
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// A script could not be written.
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl std::fmt::Display for FixtureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            Self::Write { path, source } => {
                write!(f, "failed to write {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for FixtureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } | Self::Write { source, .. } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_produce_groups_words_in_threes() {
        let fixtures = produce(&["cat", "tabby", "small", "dog", "pug", "large"]);

        assert_eq!(
            fixtures.inserts,
            "i cat tabby small file1\ni dog pug large file2\np\n"
        );
        assert_eq!(fixtures.queries, "q cat tabby small\nq dog pug large\n");
    }

    #[test]
    fn test_produce_drops_incomplete_group() {
        let fixtures = produce(&["a", "b", "c", "d", "e"]);

        assert_eq!(fixtures.inserts, "i a b c file1\np\n");
        assert_eq!(fixtures.queries, "q a b c\n");
    }

    #[test]
    fn test_produce_empty() {
        let fixtures = produce::<&str>(&[]);

        assert_eq!(fixtures.inserts, "p\n");
        assert_eq!(fixtures.queries, "");
    }

    #[test]
    fn test_every_generated_line_parses() {
        let words = random_words(7, 30, &DEFAULT_VOCABULARY);
        let fixtures = produce(&words);

        for line in fixtures.inserts.lines().chain(fixtures.queries.lines()) {
            assert!(Command::parse(line).is_ok(), "line should parse: {line}");
        }
    }

    #[test]
    fn test_random_words_deterministic() {
        let first = random_words(42, 50, &DEFAULT_VOCABULARY);
        let second = random_words(42, 50, &DEFAULT_VOCABULARY);

        assert_eq!(first, second);
        assert_eq!(first.len(), 50);
        assert!(first.iter().all(|w| DEFAULT_VOCABULARY.contains(&w.as_str())));
    }

    #[test]
    fn test_random_words_empty_vocabulary() {
        assert!(random_words(1, 10, &[]).is_empty());
    }

    #[test]
    fn test_read_words_then_write_scripts() {
        let dir = tempdir().expect("create temp dir");
        let words_path = dir.path().join("random");
        std::fs::write(&words_path, "cat tabby\nsmall\n  dog pug large extra\n")
            .expect("write words");

        let words = read_words(&words_path).expect("read words");
        assert_eq!(words.len(), 7);

        let fixtures = write_scripts(dir.path(), &words).expect("write scripts");
        let inserts = std::fs::read_to_string(dir.path().join(INSERTS_FILE)).expect("read outfile");
        let queries = std::fs::read_to_string(dir.path().join(QUERIES_FILE)).expect("read queries");

        assert_eq!(inserts, "i cat tabby small file1\ni dog pug large file2\np\n");
        assert_eq!(queries, "q cat tabby small\nq dog pug large\n");
        assert_eq!(fixtures.inserts, inserts);
    }

    #[test]
    fn test_read_words_missing_file() {
        let dir = tempdir().expect("create temp dir");
        let missing = dir.path().join("no_such_words");

        let error = read_words(&missing).expect_err("should fail");

        assert!(matches!(&error, FixtureError::Read { path, .. } if *path == missing));
        assert!(error.to_string().starts_with("failed to read "));
    }

    #[test]
    fn test_write_scripts_missing_directory() {
        let dir = tempdir().expect("create temp dir");
        let missing = dir.path().join("absent");

        let error = write_scripts(&missing, &["a", "b", "c"]).expect_err("should fail");

        assert!(
            matches!(&error, FixtureError::Write { path, .. } if *path == missing.join(INSERTS_FILE))
        );
    }
}
