//! Command line parsing.
//!
//! Each input line holds one command, tokens separated by whitespace:
//!
//! - `i <ATTRIBUTE 1> <ATTRIBUTE 2> <ATTRIBUTE 3> <FILENAME>`: insert
//! - `q <ATTRIBUTE 1> <ATTRIBUTE 2> <ATTRIBUTE 3>`: query
//! - `p`: print everything
//!
//! A command with the wrong number of tokens is rejected as a whole.

use crate::index::{ATTRIBUTE_COUNT, LEAF_DEPTH};

/// A parsed command, borrowing its tokens from the input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    /// Attributes 1-3 followed by the filename.
    Insert([&'a str; LEAF_DEPTH]),
    /// Attributes 1-3.
    Query([&'a str; ATTRIBUTE_COUNT]),
    Print,
}

impl<'a> Command<'a> {
    pub const INSERT: &'static str = "i";
    pub const QUERY: &'static str = "q";
    pub const PRINT: &'static str = "p";

    /// Parse one input line.
    ///
    /// # Errors
    ///
    /// Returns an error if the line is blank, starts with anything other
    /// than `i`, `q` or `p`, or carries the wrong number of arguments.
    pub fn parse(line: &'a str) -> Result<Self, CommandError> {
        let mut tokens = line.split_ascii_whitespace();
        let Some(word) = tokens.next() else {
            return Err(CommandError::Empty);
        };
        let arguments: Vec<&'a str> = tokens.collect();

        match word {
            Self::INSERT => Ok(Self::Insert(exact_arguments(word, &arguments)?)),
            Self::QUERY => Ok(Self::Query(exact_arguments(word, &arguments)?)),
            Self::PRINT => {
                exact_arguments::<0>(word, &arguments)?;
                Ok(Self::Print)
            }
            _ => Err(CommandError::UnknownCommand(word.to_string())),
        }
    }
}

fn exact_arguments<'a, const N: usize>(
    command: &str,
    arguments: &[&'a str],
) -> Result<[&'a str; N], CommandError> {
    <[&'a str; N]>::try_from(arguments).map_err(|_| CommandError::WrongArgumentCount {
        command: command.to_string(),
        expected: N,
        found: arguments.len(),
    })
}

/// Why a line was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The line holds no tokens.
    Empty,
    /// The first token is not a known command.
    UnknownCommand(String),
    /// The command was given too few or too many arguments.
    WrongArgumentCount {
        command: String,
        expected: usize,
        found: usize,
    },
    /// The line exceeds the configured maximum length.
    LineTooLong { length: usize, max: usize },
    /// The line is not valid UTF-8.
    InvalidEncoding,
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty command"),
            Self::UnknownCommand(word) => write!(f, "unknown command '{word}'"),
            Self::WrongArgumentCount {
                command,
                expected,
                found,
            } => write!(
                f,
                "command '{command}' takes {expected} arguments, got {found}"
            ),
            Self::LineTooLong { length, max } => {
                write!(f, "line is {length} bytes long, limit is {max}")
            }
            Self::InvalidEncoding => write!(f, "line is not valid UTF-8"),
        }
    }
}

impl std::error::Error for CommandError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_insert() {
        assert_eq!(
            Command::parse("i cat tabby small c1.jpg\n"),
            Ok(Command::Insert(["cat", "tabby", "small", "c1.jpg"]))
        );
    }

    #[test]
    fn test_parse_query_with_extra_whitespace() {
        assert_eq!(
            Command::parse("  q\tcat  tabby small  "),
            Ok(Command::Query(["cat", "tabby", "small"]))
        );
    }

    #[test]
    fn test_parse_print() {
        assert_eq!(Command::parse("p\n"), Ok(Command::Print));
    }

    #[test]
    fn test_blank_line_rejected() {
        assert_eq!(Command::parse(""), Err(CommandError::Empty));
        assert_eq!(Command::parse("   \n"), Err(CommandError::Empty));
    }

    #[test]
    fn test_unknown_command_rejected() {
        assert_eq!(
            Command::parse("x a b c"),
            Err(CommandError::UnknownCommand("x".to_string()))
        );
        // Command words must be exactly one letter.
        assert_eq!(
            Command::parse("insert a b c d"),
            Err(CommandError::UnknownCommand("insert".to_string()))
        );
    }

    #[test]
    fn test_wrong_argument_counts_rejected() {
        assert_eq!(
            Command::parse("i a b c"),
            Err(CommandError::WrongArgumentCount {
                command: "i".to_string(),
                expected: 4,
                found: 3,
            })
        );
        assert_eq!(
            Command::parse("q a b c d"),
            Err(CommandError::WrongArgumentCount {
                command: "q".to_string(),
                expected: 3,
                found: 4,
            })
        );
        assert_eq!(
            Command::parse("p now"),
            Err(CommandError::WrongArgumentCount {
                command: "p".to_string(),
                expected: 0,
                found: 1,
            })
        );
    }

    #[test]
    fn test_error_display() {
        let error = CommandError::WrongArgumentCount {
            command: "q".to_string(),
            expected: 3,
            found: 1,
        };
        assert_eq!(error.to_string(), "command 'q' takes 3 arguments, got 1");
    }
}
