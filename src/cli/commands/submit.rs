//! Submit command implementation.

use anyhow::Result;
use issues_lib::{IssuesError, NewIssue, Priority};

use super::open_project;
use crate::cli::{SubmitArgs, read_stdin};
use crate::config::Config;
use crate::format::print_json;

/// Execute the submit command.
///
/// # Errors
///
/// Returns an error if the title is missing, a field is invalid, or the
/// project document cannot be read or written.
pub fn execute(args: &SubmitArgs, json: bool, config: &Config) -> Result<()> {
    let title = args
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| IssuesError::validation("title", "cannot be empty"))?;

    let priority = match &args.priority {
        Some(p) => p.parse::<Priority>()?,
        None => config.default_priority,
    };

    let ctx = open_project(config)?;

    let description = match &args.description {
        Some(d) => d.clone(),
        None => read_stdin("description")?,
    };

    let new_issue = NewIssue {
        title: title.to_string(),
        description,
        priority,
        author: config.current_user(),
        labels: split_labels(&args.labels),
    };
    let issue = ctx.store.submit(&ctx.project_id, &new_issue)?;

    if json {
        print_json(&issue)?;
    } else {
        println!("Created {}: {}", issue.id, issue.title);
    }
    Ok(())
}

/// Trim label entries and drop empty ones.
fn split_labels(raw: &[String]) -> Vec<String> {
    raw.iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}
