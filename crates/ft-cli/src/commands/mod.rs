//! Command implementations for the `ft` CLI.
//!
//! Each command module executes its operation and formats output according
//! to the requested format.

pub mod completions;
pub mod demo;
pub mod run;
