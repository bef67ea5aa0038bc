//! Common helpers for end-to-end tests.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::config::SessionConfig;
use crate::session::{Session, SessionSummary};

/// Everything a session produced for one script.
pub struct Transcript {
    pub stdout: String,
    pub stderr: String,
    pub summary: SessionSummary,
}

impl Transcript {
    /// Lines written to standard output.
    #[must_use]
    pub fn stdout_lines(&self) -> Vec<&str> {
        self.stdout.lines().collect()
    }

    /// Number of `Invalid command.` lines written to standard error.
    #[must_use]
    pub fn invalid_count(&self) -> usize {
        self.stderr
            .lines()
            .filter(|line| *line == crate::session::INVALID_COMMAND_MESSAGE)
            .count()
    }
}

/// Run `script` through a fresh session with the default configuration.
#[must_use]
pub fn run_script(script: &str) -> Transcript {
    run_reader(&SessionConfig::default(), script.as_bytes())
}

/// Run the script stored at `path`, the way `IMAGEDB_INPUT` does.
#[must_use]
pub fn run_file(path: &Path) -> Transcript {
    let file = File::open(path).expect("open script");
    run_reader(&SessionConfig::default(), BufReader::new(file))
}

fn run_reader<R: std::io::BufRead>(config: &SessionConfig, input: R) -> Transcript {
    let mut session = Session::new(config);
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();

    let summary = session
        .run(input, &mut stdout, &mut stderr)
        .expect("session should not fail");

    Transcript {
        stdout: String::from_utf8(stdout).expect("stdout is utf8"),
        stderr: String::from_utf8(stderr).expect("stderr is utf8"),
        summary,
    }
}

/// Build an insert line.
#[must_use]
pub fn insert(first: &str, second: &str, third: &str, filename: &str) -> String {
    format!("i {first} {second} {third} {filename}\n")
}

/// Build a query line.
#[must_use]
pub fn query(first: &str, second: &str, third: &str) -> String {
    format!("q {first} {second} {third}\n")
}

/// Build a print line.
#[must_use]
pub fn print() -> String {
    "p\n".to_string()
}
