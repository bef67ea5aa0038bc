//! Line-oriented command session.
//!
//! A session owns one [`ImageIndex`] and feeds it commands read from an
//! input stream until end of input. Query and print results go to the
//! output sink; rejected lines produce [`INVALID_COMMAND_MESSAGE`] on the
//! error sink and processing continues with the next line.

use std::io::{BufRead, Write};

use crate::command::{Command, CommandError};
use crate::config::SessionConfig;
use crate::index::{ImageIndex, IndexError, Insertion};

/// Written to the error sink for every rejected line.
pub const INVALID_COMMAND_MESSAGE: &str = "Invalid command.";

/// Counters describing a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Lines that parsed and executed.
    pub commands: u64,
    /// Lines rejected as invalid.
    pub invalid: u64,
    /// Distinct records in the index at the end of the run.
    pub records: usize,
}

pub struct Session {
    index: ImageIndex,
    max_line_length: usize,
    summary: SessionSummary,
}

impl Session {
    #[must_use]
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            index: ImageIndex::new(),
            max_line_length: config.max_line_length,
            summary: SessionSummary::default(),
        }
    }

    /// The index built up so far.
    #[must_use]
    pub const fn index(&self) -> &ImageIndex {
        &self.index
    }

    /// Process every line of `input` until end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing output fails, or if the
    /// index cannot allocate a node. Malformed lines are not errors.
    pub fn run<R, W, E>(
        &mut self,
        mut input: R,
        out: &mut W,
        err: &mut E,
    ) -> Result<SessionSummary, SessionError>
    where
        R: BufRead,
        W: Write,
        E: Write,
    {
        let mut buffer = Vec::new();
        let mut line_number: u64 = 0;

        loop {
            buffer.clear();
            if input
                .read_until(b'\n', &mut buffer)
                .map_err(SessionError::Input)?
                == 0
            {
                break;
            }
            line_number += 1;

            if let Err(e) = self.execute_line(&buffer, out) {
                match e {
                    LineError::Rejected(reason) => {
                        tracing::debug!("line {line_number} rejected: {reason}");
                        self.summary.invalid += 1;
                        writeln!(err, "{INVALID_COMMAND_MESSAGE}")
                            .map_err(SessionError::Output)?;
                    }
                    LineError::Fatal(e) => {
                        tracing::error!("line {line_number} failed: {e}");
                        return Err(e.into());
                    }
                }
            }
        }

        self.summary.records = self.index.len();
        Ok(self.summary)
    }

    fn execute_line<W: Write>(&mut self, raw: &[u8], out: &mut W) -> Result<(), LineError> {
        let raw = raw
            .strip_suffix(b"\n")
            .map_or(raw, |line| line.strip_suffix(b"\r").unwrap_or(line));
        if raw.len() > self.max_line_length {
            return Err(LineError::Rejected(CommandError::LineTooLong {
                length: raw.len(),
                max: self.max_line_length,
            }));
        }
        let line = std::str::from_utf8(raw)
            .map_err(|_| LineError::Rejected(CommandError::InvalidEncoding))?;
        let command = Command::parse(line).map_err(LineError::Rejected)?;

        self.execute(command, out).map_err(LineError::Fatal)?;
        self.summary.commands += 1;
        Ok(())
    }

    /// Run one parsed command against the index.
    ///
    /// # Errors
    ///
    /// Returns an error if the index cannot allocate or the output sink
    /// fails.
    pub fn execute<W: Write>(
        &mut self,
        command: Command<'_>,
        out: &mut W,
    ) -> Result<(), IndexError> {
        tracing::debug!("executing {command:?}");
        match command {
            Command::Insert(values) => {
                if self.index.insert(values)? == Insertion::AlreadyIndexed {
                    tracing::debug!("{values:?} already indexed");
                }
            }
            Command::Query(attributes) => {
                self.index.search(attributes, out)?;
                out.flush()?;
            }
            Command::Print => {
                self.index.print(out)?;
                out.flush()?;
            }
        }
        Ok(())
    }
}

enum LineError {
    Rejected(CommandError),
    Fatal(IndexError),
}

/// Errors that end a session.
#[derive(Debug)]
pub enum SessionError {
    /// The index failed.
    Index(IndexError),
    /// Reading commands failed.
    Input(std::io::Error),
    /// Reporting an invalid command failed.
    Output(std::io::Error),
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Index(e) => write!(f, "index error: {e}"),
            Self::Input(e) => write!(f, "input error: {e}"),
            Self::Output(e) => write!(f, "output error: {e}"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Index(e) => Some(e),
            Self::Input(e) | Self::Output(e) => Some(e),
        }
    }
}

impl From<IndexError> for SessionError {
    fn from(e: IndexError) -> Self {
        Self::Index(e)
    }
}
