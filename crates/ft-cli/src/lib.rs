//! File tree CLI library.
//!
//! This library provides the core functionality for the `ft` tool,
//! exposing the script runner, commands, configuration and formatters so
//! they can be tested.

#![allow(clippy::format_push_string)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::unnecessary_wraps)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod formatters;
pub mod script;

pub use cli::{ExitCode, OutputFormat};
pub use config::Config;
