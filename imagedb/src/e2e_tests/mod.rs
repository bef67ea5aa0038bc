//! End-to-end tests at the command script level.
//!
//! Each test file covers a specific scenario, feeding a complete script
//! through a session and checking what lands on stdout and stderr.

#![cfg(test)]

mod helpers;

mod test_duplicate_insert;
mod test_fixture_scripts;
mod test_invalid_commands;
mod test_many_inserts;
mod test_print_sorted;
mod test_query_empty_database;
mod test_query_partial_match;
