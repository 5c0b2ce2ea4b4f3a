//! Command-line interface for `ag-issues`.
//!
//! This module provides the CLI parsing and command routing using clap.

pub mod commands;

use std::io::{IsTerminal, Read};
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::config::{CliOverrides, Config};
use crate::logging;

/// `ag-issues` - Per-project issue tracker.
#[derive(Parser, Debug)]
#[command(name = "ag-issues")]
#[command(
    author,
    version,
    about = "Per-project issue tracker (JSON on local disk)",
    long_about = None,
    after_help = "Issue IDs may be shortened to any unique prefix."
)]
pub struct Cli {
    /// Output format: text (default) or json
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Project to operate on (overrides directory detection)
    #[arg(long, global = true)]
    pub project: Option<String>,

    /// Data directory holding `issues/<project>.json`
    #[arg(long, global = true, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    #[must_use]
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            data_dir: self.data_dir.clone(),
            project: self.project.clone(),
        }
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Submit a new issue
    #[command(alias = "create")]
    Submit(SubmitArgs),

    /// List issues
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show issue details
    Show(ShowArgs),

    /// Add a comment to an issue
    Comment(CommentArgs),

    /// Update an existing issue
    Update(UpdateArgs),

    /// Delete an issue
    Delete(DeleteArgs),

    /// List projects that have issues
    Projects,

    /// Generate shell completions
    Completions(CompletionsArgs),

    /// Show version information
    Version,
}

#[derive(Args, Debug, Default)]
pub struct SubmitArgs {
    /// Issue title
    #[arg(long, short)]
    pub title: Option<String>,

    /// Issue description (read from stdin when omitted)
    #[arg(long, short)]
    pub description: Option<String>,

    /// Priority: low, medium, high, critical
    #[arg(long, short)]
    pub priority: Option<String>,

    /// Comma-separated labels
    #[arg(long, short, value_delimiter = ',')]
    pub labels: Vec<String>,
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Filter by status
    #[arg(long, short)]
    pub status: Option<String>,

    /// Filter by priority
    #[arg(long, short)]
    pub priority: Option<String>,

    /// Filter by label
    #[arg(long, short)]
    pub label: Option<String>,

    /// Filter by assignee
    #[arg(long)]
    pub assignee: Option<String>,

    /// Sort key: created, updated, priority, status
    #[arg(long)]
    pub sort: Option<String>,

    /// Reverse the sort order
    #[arg(long, short)]
    pub reverse: bool,

    /// Show at most N issues
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Show the full view of every issue
    #[arg(long)]
    pub detailed: bool,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Issue ID or unique prefix
    pub id: String,
}

#[derive(Args, Debug)]
pub struct CommentArgs {
    /// Issue ID or unique prefix
    pub id: String,

    /// Comment text (read from stdin when omitted)
    #[arg(long, short)]
    pub content: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct UpdateArgs {
    /// Issue ID or unique prefix
    pub id: String,

    /// New title
    #[arg(long)]
    pub title: Option<String>,

    /// New description
    #[arg(long)]
    pub description: Option<String>,

    /// New status: open, in_progress, resolved, closed
    #[arg(long, short)]
    pub status: Option<String>,

    /// New priority
    #[arg(long, short)]
    pub priority: Option<String>,

    /// Assign to someone
    #[arg(long, conflicts_with = "unassign")]
    pub assignee: Option<String>,

    /// Clear the assignee
    #[arg(long)]
    pub unassign: bool,

    /// Add a label (repeatable)
    #[arg(long = "add-label")]
    pub add_labels: Vec<String>,

    /// Remove a label (repeatable)
    #[arg(long = "remove-label")]
    pub remove_labels: Vec<String>,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Issue ID or unique prefix
    pub id: String,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Read free text from stdin until EOF.
///
/// A prompt is printed to stderr only when stdin is a terminal.
///
/// # Errors
///
/// Returns an error if stdin cannot be read.
pub fn read_stdin(what: &str) -> Result<String> {
    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        eprintln!("Enter {what} (finish with Ctrl-D):");
    }
    let mut buf = String::new();
    stdin.read_to_string(&mut buf)?;
    Ok(buf.trim_end().to_string())
}

/// Run a parsed command line.
///
/// # Errors
///
/// Returns an error if configuration, project resolution or the command
/// itself fails.
pub fn run(cli: Cli) -> Result<()> {
    match &cli.command {
        Commands::Completions(args) => return commands::completions::execute(args),
        Commands::Version => return commands::version::execute(cli.json),
        _ => {}
    }

    let config = Config::load(&cli.overrides())?;
    logging::init_logging(
        cli.verbose,
        cli.quiet,
        config.log_filter.as_deref(),
        config.log_format,
    )
    .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    let json = cli.json;
    match cli.command {
        Commands::Submit(args) => commands::submit::execute(&args, json, &config),
        Commands::List(args) => commands::list::execute(&args, json, &config),
        Commands::Show(args) => commands::show::execute(&args, json, &config),
        Commands::Comment(args) => commands::comment::execute(&args, json, &config),
        Commands::Update(args) => commands::update::execute(&args, json, &config),
        Commands::Delete(args) => commands::delete::execute(&args, json, &config),
        Commands::Projects => commands::projects::execute(json, &config),
        Commands::Completions(_) | Commands::Version => Ok(()),
    }
}
