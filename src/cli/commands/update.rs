//! Update command implementation.

use anyhow::Result;
use issues_lib::{IssueUpdate, Priority, Status};

use super::open_project;
use crate::cli::UpdateArgs;
use crate::config::Config;
use crate::format::print_json;

/// Execute the update command.
///
/// # Errors
///
/// Returns an error if no change is requested, a value is invalid, the ID
/// does not resolve, or the project document cannot be read or written.
pub fn execute(args: &UpdateArgs, json: bool, config: &Config) -> Result<()> {
    let update = build_update(args)?;
    let ctx = open_project(config)?;
    let issue = ctx.store.update(&ctx.project_id, &args.id, &update)?;

    if json {
        print_json(&issue)?;
    } else {
        println!("Updated {}: {}", issue.short_id(), issue.title);
    }
    Ok(())
}

/// Convert CLI args to an update bundle.
fn build_update(args: &UpdateArgs) -> Result<IssueUpdate> {
    let assignee = if args.unassign {
        Some(None)
    } else {
        args.assignee.clone().map(Some)
    };

    Ok(IssueUpdate {
        title: args.title.clone(),
        description: args.description.clone(),
        status: args.status.as_deref().map(str::parse::<Status>).transpose()?,
        priority: args
            .priority
            .as_deref()
            .map(str::parse::<Priority>)
            .transpose()?,
        assignee,
        add_labels: args.add_labels.clone(),
        remove_labels: args.remove_labels.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unassign_clears() {
        let args = UpdateArgs {
            id: "abc".to_string(),
            unassign: true,
            ..Default::default()
        };
        assert_eq!(build_update(&args).unwrap().assignee, Some(None));
    }

    #[test]
    fn test_invalid_status_rejected() {
        let args = UpdateArgs {
            id: "abc".to_string(),
            status: Some("done".to_string()),
            ..Default::default()
        };
        let err = build_update(&args).unwrap_err();
        assert!(err.to_string().contains("Invalid status"));
    }

    #[test]
    fn test_no_flags_is_empty_update() {
        let args = UpdateArgs {
            id: "abc".to_string(),
            ..Default::default()
        };
        assert!(build_update(&args).unwrap().is_empty());
    }
}
