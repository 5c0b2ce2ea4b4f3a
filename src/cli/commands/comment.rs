//! Comment command implementation.

use anyhow::Result;

use super::open_project;
use crate::cli::{CommentArgs, read_stdin};
use crate::config::Config;
use crate::format::print_json;

/// Execute the comment command.
///
/// # Errors
///
/// Returns an error if the content is blank, the ID does not resolve, or the
/// project document cannot be read or written.
pub fn execute(args: &CommentArgs, json: bool, config: &Config) -> Result<()> {
    let ctx = open_project(config)?;
    let content = match &args.content {
        Some(c) => c.clone(),
        None => read_stdin("comment")?,
    };

    let comment = ctx
        .store
        .comment(&ctx.project_id, &args.id, &config.current_user(), &content)?;

    if json {
        print_json(&comment)?;
    } else {
        println!(
            "Added comment to {}",
            issues_lib::util::short_id(&comment.issue_id)
        );
    }
    Ok(())
}
