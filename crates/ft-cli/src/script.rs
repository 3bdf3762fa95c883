//! Command scripts that drive a [`FileTree`].
//!
//! A script holds one command per line. Blank lines and lines starting with
//! `#` are ignored. Paths are single whitespace-free tokens; `""` stands for
//! the empty path. `touch` and `write` take the rest of the line as file
//! text.
//!
//! ```text
//! init
//! mkdir 1root/2child/3gkid
//! touch 1root/2child/notes hello there
//! stat 1root/2child/notes
//! print
//! ```
//!
//! # Examples
//!
//! ```
//! use ft_cli::script::{Executor, Script};
//! use ft_core::FileTree;
//!
//! let script = Script::parse("init\nmkdir a/b\nhas-dir a")?;
//! let mut executor = Executor::new(FileTree::new());
//! let report = executor.run(&script, false);
//!
//! assert_eq!(report.failed, 0);
//! assert_eq!(report.steps[2].outcome.output.as_deref(), Some("true"));
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::{Context, Result, bail};
use ft_core::{Checker, FileContents, FileTree, FtError, Stat, Status};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

/// Status reported by `check` when the tree is structurally broken.
pub const INVARIANT_VIOLATED: &str = "INVARIANT_VIOLATED";

/// One script command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Initialize the tree
    Init,
    /// Destroy the tree
    Destroy,
    /// Insert a directory
    Mkdir {
        /// Target path
        path: String,
    },
    /// Insert a file, optionally with text contents
    Touch {
        /// Target path
        path: String,
        /// File contents
        text: Option<String>,
    },
    /// Remove a directory and its subtree
    Rmdir {
        /// Target path
        path: String,
    },
    /// Remove a file
    Rm {
        /// Target path
        path: String,
    },
    /// Report whether a directory exists
    HasDir {
        /// Target path
        path: String,
    },
    /// Report whether a file exists
    HasFile {
        /// Target path
        path: String,
    },
    /// Report the kind and size of a node
    Stat {
        /// Target path
        path: String,
    },
    /// Print a file's contents
    Cat {
        /// Target path
        path: String,
    },
    /// Replace a file's contents
    Write {
        /// Target path
        path: String,
        /// New contents
        text: String,
    },
    /// Print the serialized tree
    Print,
    /// Run the invariant checker
    Check,
    /// List a directory's children
    Ls {
        /// Target path
        path: String,
    },
    /// Print the node count
    Count,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (keyword, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(keyword, rest)| (keyword, rest.trim_start()));

        let command = match keyword {
            "init" => no_args(keyword, rest, Self::Init)?,
            "destroy" => no_args(keyword, rest, Self::Destroy)?,
            "print" => no_args(keyword, rest, Self::Print)?,
            "check" => no_args(keyword, rest, Self::Check)?,
            "count" => no_args(keyword, rest, Self::Count)?,
            "mkdir" => Self::Mkdir {
                path: single_path(keyword, rest)?,
            },
            "rmdir" => Self::Rmdir {
                path: single_path(keyword, rest)?,
            },
            "rm" => Self::Rm {
                path: single_path(keyword, rest)?,
            },
            "has-dir" => Self::HasDir {
                path: single_path(keyword, rest)?,
            },
            "has-file" => Self::HasFile {
                path: single_path(keyword, rest)?,
            },
            "stat" => Self::Stat {
                path: single_path(keyword, rest)?,
            },
            "cat" => Self::Cat {
                path: single_path(keyword, rest)?,
            },
            "ls" => Self::Ls {
                path: single_path(keyword, rest)?,
            },
            "touch" => {
                let (path, text) = path_and_text(keyword, rest)?;
                Self::Touch { path, text }
            }
            "write" => {
                let (path, text) = path_and_text(keyword, rest)?;
                let text = text.with_context(|| format!("`{keyword}` needs a path and text"))?;
                Self::Write { path, text }
            }
            "" => bail!("empty command"),
            other => bail!("unknown command `{other}`"),
        };
        Ok(command)
    }
}

fn no_args(keyword: &str, rest: &str, command: Command) -> Result<Command> {
    if !rest.is_empty() {
        bail!("`{keyword}` takes no arguments");
    }
    Ok(command)
}

fn path_and_text(keyword: &str, rest: &str) -> Result<(String, Option<String>)> {
    if rest.is_empty() {
        bail!("`{keyword}` needs a path");
    }
    let (path, text) = rest
        .split_once(char::is_whitespace)
        .map_or((rest, None), |(path, text)| (path, Some(text.trim_start().to_string())));
    Ok((unquote(path), text))
}

fn single_path(keyword: &str, rest: &str) -> Result<String> {
    let (path, extra) = path_and_text(keyword, rest)?;
    if extra.is_some() {
        bail!("`{keyword}` takes exactly one path");
    }
    Ok(path)
}

fn unquote(token: &str) -> String {
    if token == "\"\"" {
        String::new()
    } else {
        token.to_string()
    }
}

fn quote(path: &str) -> &str {
    if path.is_empty() { "\"\"" } else { path }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init => f.write_str("init"),
            Self::Destroy => f.write_str("destroy"),
            Self::Print => f.write_str("print"),
            Self::Check => f.write_str("check"),
            Self::Count => f.write_str("count"),
            Self::Mkdir { path } => write!(f, "mkdir {}", quote(path)),
            Self::Rmdir { path } => write!(f, "rmdir {}", quote(path)),
            Self::Rm { path } => write!(f, "rm {}", quote(path)),
            Self::HasDir { path } => write!(f, "has-dir {}", quote(path)),
            Self::HasFile { path } => write!(f, "has-file {}", quote(path)),
            Self::Stat { path } => write!(f, "stat {}", quote(path)),
            Self::Cat { path } => write!(f, "cat {}", quote(path)),
            Self::Ls { path } => write!(f, "ls {}", quote(path)),
            Self::Touch { path, text: None } => write!(f, "touch {}", quote(path)),
            Self::Touch {
                path,
                text: Some(text),
            }
            | Self::Write { path, text } => {
                let keyword = if matches!(self, Self::Touch { .. }) {
                    "touch"
                } else {
                    "write"
                };
                write!(f, "{keyword} {} {text}", quote(path))
            }
        }
    }
}

/// A parsed command together with its source line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine {
    /// 1-based line number in the source text
    pub number: usize,
    /// The command on that line
    pub command: Command,
}

/// A parsed script.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    lines: Vec<ScriptLine>,
}

impl Script {
    /// Parses script text.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first line that is not a valid command.
    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = Vec::new();
        for (index, raw) in text.lines().enumerate() {
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let number = index + 1;
            let command = trimmed
                .parse()
                .with_context(|| format!("line {number}: `{trimmed}`"))?;
            lines.push(ScriptLine { number, command });
        }
        Ok(Self { lines })
    }

    /// Returns the number of commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` if the script has no commands.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Iterates over the commands in order.
    pub fn iter(&self) -> impl Iterator<Item = &ScriptLine> {
        self.lines.iter()
    }
}

/// Result of executing one command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    /// Status name, `SUCCESS` or the failure status
    pub status: String,
    /// Whether the command succeeded
    pub ok: bool,
    /// Command output or error message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

impl From<ft_core::Result<Option<String>>> for Outcome {
    fn from(result: ft_core::Result<Option<String>>) -> Self {
        match result {
            Ok(output) => Self {
                status: Status::Success.as_str().to_string(),
                ok: true,
                output,
            },
            Err(e) => Self {
                status: e.status().as_str().to_string(),
                ok: false,
                output: Some(e.to_string()),
            },
        }
    }
}

/// Report for one executed script line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    /// Source line number
    pub line: usize,
    /// The command as written
    pub command: String,
    /// What happened
    #[serde(flatten)]
    pub outcome: Outcome,
}

/// Report for a whole script run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Executed steps in order
    pub steps: Vec<StepReport>,
    /// Number of steps that failed
    pub failed: usize,
    /// Commands skipped after a failure
    pub skipped: usize,
    /// Node count when the run ended
    pub final_count: usize,
}

/// Executes commands against a tree it owns.
#[derive(Debug)]
pub struct Executor {
    tree: FileTree,
}

impl Executor {
    /// Creates an executor for `tree`.
    #[must_use]
    pub const fn new(tree: FileTree) -> Self {
        Self { tree }
    }

    /// Returns the tree.
    #[must_use]
    pub const fn tree(&self) -> &FileTree {
        &self.tree
    }

    /// Consumes the executor, returning the tree.
    #[must_use]
    pub fn into_tree(self) -> FileTree {
        self.tree
    }

    /// Runs every command of `script`.
    ///
    /// Without `keep_going`, the first failed command ends the run and the
    /// remaining commands are counted as skipped.
    pub fn run(&mut self, script: &Script, keep_going: bool) -> RunReport {
        let mut steps = Vec::with_capacity(script.len());
        let mut failed = 0;

        for line in script.iter() {
            let outcome = self.execute(&line.command);
            let ok = outcome.ok;
            steps.push(StepReport {
                line: line.number,
                command: line.command.to_string(),
                outcome,
            });
            if !ok {
                failed += 1;
                if !keep_going {
                    break;
                }
            }
        }

        let skipped = script.len() - steps.len();
        info!(executed = steps.len(), failed, skipped, "script finished");
        RunReport {
            steps,
            failed,
            skipped,
            final_count: self.tree.count(),
        }
    }

    /// Executes a single command.
    pub fn execute(&mut self, command: &Command) -> Outcome {
        debug!(%command, "executing");
        let result = match command {
            Command::Init => self.tree.init().map(|()| None),
            Command::Destroy => self.tree.destroy().map(|()| None),
            Command::Mkdir { path } => self.tree.insert_dir(path).map(|()| None),
            Command::Touch { path, text } => {
                let contents = text
                    .as_deref()
                    .map_or_else(FileContents::empty, FileContents::from);
                self.tree.insert_file(path, contents).map(|()| None)
            }
            Command::Rmdir { path } => self.tree.rm_dir(path).map(|()| None),
            Command::Rm { path } => self.tree.rm_file(path).map(|()| None),
            Command::HasDir { path } => Ok(Some(self.tree.contains_dir(path).to_string())),
            Command::HasFile { path } => Ok(Some(self.tree.contains_file(path).to_string())),
            Command::Stat { path } => self.tree.stat(path).map(|stat| Some(describe(stat))),
            Command::Cat { path } => match self.tree.get_file_contents(path) {
                Some(contents) => Ok(Some(render(contents))),
                None => Err(self.lookup_error(path)),
            },
            Command::Write { path, text } => {
                match self
                    .tree
                    .replace_file_contents(path, FileContents::from(text.as_str()))
                {
                    Some(previous) => Ok(Some(render(&previous))),
                    None => Err(self.lookup_error(path)),
                }
            }
            Command::Print => self
                .tree
                .serialize()
                .map(Some)
                .ok_or(FtError::NotInitialized),
            Command::Ls { path } => self.tree.list_dir(path).map(|children| {
                Some(
                    children
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join("\n"),
                )
            }),
            Command::Count => Ok(Some(self.tree.count().to_string())),
            Command::Check => return check(&self.tree),
        };
        Outcome::from(result)
    }

    /// Explains why `path` does not resolve to a file.
    fn lookup_error(&self, path: &str) -> FtError {
        match self.tree.stat(path) {
            Err(e) => e,
            Ok(_) => FtError::NotAFile {
                path: path.to_string(),
            },
        }
    }
}

fn check(tree: &FileTree) -> Outcome {
    match Checker::check(tree) {
        Ok(()) => Outcome {
            status: Status::Success.as_str().to_string(),
            ok: true,
            output: Some("ok".to_string()),
        },
        Err(violation) => Outcome {
            status: INVARIANT_VIOLATED.to_string(),
            ok: false,
            output: Some(violation.to_string()),
        },
    }
}

fn describe(stat: Stat) -> String {
    match stat {
        Stat::Directory => "directory".to_string(),
        Stat::File { size } => format!("file, {size} bytes"),
    }
}

fn render(contents: &FileContents) -> String {
    contents.data().map_or_else(
        || "<no data>".to_string(),
        |data| String::from_utf8_lossy(data).into_owned(),
    )
}
