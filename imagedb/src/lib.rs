#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]
// Life of a command:
// 1. A line comes in on stdin (or the configured script)
// 2. The tokenizer turns it into a `Command`, or rejects it
// 3. Inserts:
//     - Walk the tree, reusing nodes that already hold the value
//     - Append the missing tail as a fresh branch
//     - Re-sort every sibling chain
//    Queries:
//     - Descend one attribute level at a time
//     - Print the filenames under the matched node, or (NULL)
//    Print:
//     - Depth-first walk in sibling order, one line per filename
//
// System components:
//  - Node arena and tree engine (`index`)
//  - Command tokenizer (`command`)
//  - Session loop (`session`)

pub mod command;
pub mod config;
mod e2e_tests;
pub mod fixtures;
pub mod index;
pub mod session;
#[cfg(test)]
mod testing;

pub use command::{Command, CommandError};
pub use index::{ImageIndex, IndexError};
pub use session::{Session, SessionError, SessionSummary};
