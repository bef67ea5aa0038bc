//! Session configuration module.
//!
//! This module provides configuration loading for the `imagedb` binary from
//! environment variables.
//!
//! # Environment Variables
//!
//! - `IMAGEDB_INPUT`: Path of a command script to read instead of stdin (optional)
//! - `IMAGEDB_MAX_LINE_LENGTH`: Longest accepted command line in bytes (default: `1024`)
//!
//! # Invariants
//!
//! - `max_line_length` is always greater than zero

use std::path::PathBuf;

/// Session configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Command script to read. `None` means standard input.
    pub input: Option<PathBuf>,
    /// Lines longer than this many bytes (excluding the line ending) are
    /// rejected as invalid commands.
    pub max_line_length: usize,
}

/// Error returned when loading configuration fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable has an invalid value.
    InvalidValue { name: String, message: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { name, message } => {
                write!(f, "invalid value for {name}: {message}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            input: None,
            max_line_length: Self::DEFAULT_MAX_LINE_LENGTH,
        }
    }
}

impl SessionConfig {
    /// Default limit on the length of one command line.
    pub const DEFAULT_MAX_LINE_LENGTH: usize = 1024;

    const INPUT_VAR: &'static str = "IMAGEDB_INPUT";
    const MAX_LINE_LENGTH_VAR: &'static str = "IMAGEDB_MAX_LINE_LENGTH";

    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `IMAGEDB_MAX_LINE_LENGTH` is set but is not a
    /// positive integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let input = lookup(Self::INPUT_VAR)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);

        let max_line_length = match lookup(Self::MAX_LINE_LENGTH_VAR).filter(|v| !v.is_empty()) {
            Some(value) => Self::parse_max_line_length(&value)?,
            None => Self::DEFAULT_MAX_LINE_LENGTH,
        };

        Ok(Self {
            input,
            max_line_length,
        })
    }

    fn parse_max_line_length(value: &str) -> Result<usize, ConfigError> {
        match value.parse::<usize>() {
            Ok(0) | Err(_) => Err(ConfigError::InvalidValue {
                name: Self::MAX_LINE_LENGTH_VAR.to_string(),
                message: format!("'{value}' is not a positive number of bytes"),
            }),
            Ok(length) => Ok(length),
        }
    }
}
