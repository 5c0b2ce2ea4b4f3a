//! Show command implementation.

use anyhow::Result;

use super::open_project;
use crate::cli::ShowArgs;
use crate::config::Config;
use crate::format::{TextStyle, format_issue_detail, print_json};

/// Execute the show command.
///
/// # Errors
///
/// Returns an error if the ID matches no issue or several, or the project
/// document cannot be read.
pub fn execute(args: &ShowArgs, json: bool, config: &Config) -> Result<()> {
    let ctx = open_project(config)?;
    let issue = ctx.store.get_issue(&ctx.project_id, &args.id)?;

    if json {
        print_json(&issue)?;
    } else {
        print!("{}", format_issue_detail(&issue, TextStyle::for_stdout()));
    }
    Ok(())
}
