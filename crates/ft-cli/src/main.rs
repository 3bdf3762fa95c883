//! File tree CLI.
//!
//! Drives an in-memory file tree from command scripts.
//!
//! # Architecture
//!
//! The CLI is organized around subcommands:
//! - `run` - Execute a command script against a fresh tree
//! - `demo` - Walk the built-in client scenario and check every step
//! - `completions` - Generate shell completions
//!
//! # Examples
//!
//! ```bash
//! # Run a script file
//! ft run build.ft
//!
//! # Pipe commands in, continuing past failures
//! printf 'init\nmkdir a/b\nprint\n' | ft --format text run --keep-going
//! ```

#![allow(clippy::missing_errors_doc)]

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use ft_cli::commands;
use ft_cli::{Config, ExitCode, OutputFormat};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// In-memory file tree driven from command scripts.
#[derive(Parser, Debug)]
#[command(name = "ft")]
#[command(version, about, long_about = None)]
#[command(author = "FileTree Team")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (json, text, pretty); defaults to the config file value
    #[arg(long = "format", global = true)]
    format: Option<String>,

    /// Configuration file (default: <config dir>/filetree/config.toml)
    #[arg(long, global = true, env = "FT_CONFIG")]
    config: Option<PathBuf>,

    /// Maximum number of live nodes, overriding the config file
    #[arg(long, global = true)]
    max_nodes: Option<usize>,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Execute a command script.
    ///
    /// One command per line; blank lines and `#` comments are ignored.
    /// Commands: init, destroy, mkdir PATH, touch PATH [TEXT], rmdir PATH,
    /// rm PATH, has-dir PATH, has-file PATH, stat PATH, cat PATH,
    /// write PATH TEXT, print, check, ls PATH, count.
    ///
    /// # Examples
    ///
    /// ```bash
    /// ft run setup.ft
    /// ft run --keep-going < setup.ft
    /// ```
    Run {
        /// Script file (reads stdin when omitted)
        script: Option<PathBuf>,

        /// Continue after a command fails
        #[arg(short, long)]
        keep_going: bool,
    },

    /// Run the built-in client scenario and check every step.
    Demo,

    /// Generate shell completions.
    Completions {
        /// Target shell for completion generation
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(max_nodes) = cli.max_nodes {
        config.tree.max_nodes = Some(max_nodes);
        config.validate()?;
    }

    init_logging(cli.verbose, &config.general.log_level)?;

    let output_format = cli
        .format
        .as_deref()
        .unwrap_or(config.general.default_format.as_str())
        .parse::<OutputFormat>()?;

    let exit_code = execute_command(cli.command, config, output_format)?;

    std::process::exit(exit_code.as_i32());
}

/// Initializes logging infrastructure.
///
/// `--verbose` forces debug level; otherwise `RUST_LOG` wins over the
/// configured level.
fn init_logging(verbose: bool, log_level: &str) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;

    Ok(())
}

/// Routes commands to their handlers and returns an exit code.
fn execute_command(
    command: Commands,
    config: Config,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    match command {
        Commands::Run { script, keep_going } => {
            commands::run::run(script.as_deref(), keep_going, config.tree, output_format)
        }
        Commands::Demo => commands::demo::run(config.tree, output_format),
        Commands::Completions { shell } => {
            use clap::CommandFactory;
            let mut cmd = Cli::command();
            commands::completions::run(shell, &mut cmd)
        }
    }
}
