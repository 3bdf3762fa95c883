//! Run command implementation.
//!
//! Executes a command script against a fresh tree and prints a report of
//! every step.

use crate::cli::{ExitCode, OutputFormat};
use crate::script::{Executor, RunReport, Script};
use anyhow::{Context, Result};
use ft_core::{FileTree, TreeConfig};
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use tracing::{error, info};

/// Runs the script at `script`, or read from stdin when `None`.
///
/// Returns `ExitCode::INVALID_INPUT` if the script does not parse and
/// `ExitCode::ERROR` if any command failed.
///
/// # Errors
///
/// Returns an error if the script cannot be read or the report cannot be
/// formatted.
pub fn run(
    script: Option<&Path>,
    keep_going: bool,
    tree_config: TreeConfig,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    let text = match script {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display()))?,
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("failed to read script from stdin")?;
            text
        }
    };

    let report = match run_text(&text, keep_going, tree_config) {
        Ok(report) => report,
        Err(e) => {
            error!("{e:#}");
            eprintln!("error: {e:#}");
            return Ok(ExitCode::INVALID_INPUT);
        }
    };

    let formatted = crate::formatters::format_output(&report, output_format)
        .context("failed to format run report")?;
    println!("{formatted}");

    Ok(if report.failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::ERROR
    })
}

/// Parses and executes script text against a new, uninitialized tree.
///
/// # Errors
///
/// Returns an error if the script does not parse.
///
/// # Examples
///
/// ```
/// use ft_cli::commands::run::run_text;
/// use ft_core::TreeConfig;
///
/// let report = run_text("init\nmkdir a/b\ncount", false, TreeConfig::default())?;
/// assert_eq!(report.final_count, 2);
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn run_text(text: &str, keep_going: bool, tree_config: TreeConfig) -> Result<RunReport> {
    let script = Script::parse(text)?;
    info!(commands = script.len(), keep_going, "running script");
    let mut executor = Executor::new(FileTree::with_config(tree_config));
    Ok(executor.run(&script, keep_going))
}
