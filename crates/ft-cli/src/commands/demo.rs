//! Demo command implementation.
//!
//! Walks a tree through a fixed client scenario, from the uninitialized
//! state to `destroy`, and compares every step against the expected status
//! and output.

use crate::cli::{ExitCode, OutputFormat};
use crate::script::{Command, Executor};
use anyhow::{Context, Result};
use ft_core::{FileTree, Status, TreeConfig};
use serde::Serialize;
use tracing::{info, warn};

/// One scripted step with its expectation.
struct Expectation {
    line: &'static str,
    status: Status,
    output: Option<&'static str>,
}

const fn expect(line: &'static str, status: Status) -> Expectation {
    Expectation {
        line,
        status,
        output: None,
    }
}

const fn expect_output(line: &'static str, output: &'static str) -> Expectation {
    Expectation {
        line,
        status: Status::Success,
        output: Some(output),
    }
}

const SCENARIO: &[Expectation] = &[
    // Nothing works before init
    expect("mkdir 1root/2child/3gkid", Status::NotInitialized),
    expect_output("has-dir 1root/2child/3gkid", "false"),
    expect("rmdir 1root/2child/3gkid", Status::NotInitialized),
    expect("touch 1root/2child/3gkid/4ggk", Status::NotInitialized),
    expect_output("has-file 1root/2child/3gkid/4ggk", "false"),
    expect("rm 1root/2child/3gkid/4ggk", Status::NotInitialized),
    expect("print", Status::NotInitialized),
    expect("destroy", Status::NotInitialized),
    // An initialized empty tree
    expect("init", Status::Success),
    expect("init", Status::AlreadyInitialized),
    expect_output("has-dir 1root/2child/3gkid", "false"),
    expect_output("has-file 1root/2child/3gkid/4ggk", "false"),
    expect_output("print", ""),
    // Malformed paths
    expect("mkdir \"\"", Status::BadPath),
    expect("mkdir /1root/2child", Status::BadPath),
    expect("mkdir 1root/2child/", Status::BadPath),
    expect("mkdir 1root//2child", Status::BadPath),
    expect("touch \"\"", Status::BadPath),
    expect("touch /1root/2child", Status::BadPath),
    expect("touch 1root/2child/", Status::BadPath),
    expect("touch 1root//2child", Status::BadPath),
    // A file cannot be the root
    expect("touch A", Status::ConflictingPath),
    // Building and querying
    expect("mkdir 1root/2child/3gkid", Status::Success),
    expect_output("has-dir 1root/2child", "true"),
    expect_output("has-dir 1root/2child/3gkid", "true"),
    expect_output("has-file 1root/2child/3gkid", "false"),
    expect("mkdir 1root/2child/3gkid", Status::AlreadyInTree),
    expect("mkdir 1root/2child/3gk2/4ggk", Status::Success),
    expect("stat 1root/H", Status::NoSuchPath),
    expect("mkdir other", Status::ConflictingPath),
    expect("touch 1root/2child/3gkid/4file hello", Status::Success),
    expect_output("stat 1root/2child/3gkid/4file", "file, 5 bytes"),
    expect_output("cat 1root/2child/3gkid/4file", "hello"),
    // Kind mismatches
    expect("rmdir 1root/2child/3gkid/4file", Status::NotADirectory),
    expect("rm 1root/2child", Status::NotAFile),
    expect("mkdir 1root/2child/3gkid/4file/5deep", Status::NotADirectory),
    expect_output("count", "6"),
    expect_output(
        "print",
        "1root\n1root/2child\n1root/2child/3gk2\n1root/2child/3gk2/4ggk\n\
         1root/2child/3gkid\n1root/2child/3gkid/4file\n",
    ),
    // Teardown
    expect("rmdir 1root/2child/3gk2", Status::Success),
    expect_output("count", "4"),
    expect_output("check", "ok"),
    expect("destroy", Status::Success),
    expect("print", Status::NotInitialized),
];

/// Outcome of one demo step.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DemoStep {
    /// The command
    pub command: String,
    /// Expected status name
    pub expected: String,
    /// Actual status name
    pub actual: String,
    /// Command output, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Whether status and output matched the expectation
    pub passed: bool,
}

/// Report for the whole demo.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DemoReport {
    /// Steps in order
    pub steps: Vec<DemoStep>,
    /// Number of steps that matched
    pub passed: usize,
    /// Number of steps that did not match
    pub failed: usize,
}

/// Runs the scenario against a tree built from `tree_config`.
///
/// # Errors
///
/// Returns an error if a scenario line does not parse.
///
/// # Examples
///
/// ```
/// use ft_cli::commands::demo;
/// use ft_core::TreeConfig;
///
/// let report = demo::run_scenario(TreeConfig::default())?;
/// assert_eq!(report.failed, 0);
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn run_scenario(tree_config: TreeConfig) -> Result<DemoReport> {
    let mut executor = Executor::new(FileTree::with_config(tree_config));
    let mut steps = Vec::with_capacity(SCENARIO.len());

    for expectation in SCENARIO {
        let command: Command = expectation
            .line
            .parse()
            .with_context(|| format!("invalid scenario line `{}`", expectation.line))?;
        let outcome = executor.execute(&command);

        let expected = expectation.status.as_str();
        let passed = outcome.status == expected
            && expectation
                .output
                .is_none_or(|want| outcome.output.as_deref() == Some(want));
        if !passed {
            warn!(command = %command, expected, actual = %outcome.status, "demo step mismatch");
        }

        steps.push(DemoStep {
            command: command.to_string(),
            expected: expected.to_string(),
            actual: outcome.status,
            output: outcome.output,
            passed,
        });
    }

    let passed = steps.iter().filter(|step| step.passed).count();
    let failed = steps.len() - passed;
    info!(passed, failed, "demo finished");
    Ok(DemoReport {
        steps,
        passed,
        failed,
    })
}

/// Runs the demo command.
///
/// # Errors
///
/// Returns an error if the scenario cannot be run or formatted.
pub fn run(tree_config: TreeConfig, output_format: OutputFormat) -> Result<ExitCode> {
    let report = run_scenario(tree_config)?;
    let formatted = crate::formatters::format_output(&report, output_format)
        .context("failed to format demo report")?;
    println!("{formatted}");

    Ok(if report.failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::ERROR
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_passes() {
        let report = run_scenario(TreeConfig::default()).unwrap();
        let failures: Vec<_> = report.steps.iter().filter(|s| !s.passed).collect();
        assert!(failures.is_empty(), "{failures:#?}");
        assert_eq!(report.passed, SCENARIO.len());
    }

    #[test]
    fn test_scenario_lines_parse() {
        for expectation in SCENARIO {
            assert!(expectation.line.parse::<Command>().is_ok(), "{}", expectation.line);
        }
    }

    #[test]
    fn test_small_budget_fails_steps() {
        let config = TreeConfig::builder().max_nodes(2).build();
        let report = run_scenario(config).unwrap();
        assert!(report.failed > 0);
        let step = report
            .steps
            .iter()
            .find(|s| s.actual == "OUT_OF_MEMORY")
            .unwrap();
        assert!(!step.passed);
    }

    #[test]
    fn test_run_exit_code() {
        let code = run(TreeConfig::default(), OutputFormat::Json).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
    }
}
