//! List command implementation.
//!
//! Filters are conjunctive; sorting happens after filtering, then
//! `--reverse` and `--limit` are applied.

use anyhow::Result;
use issues_lib::query::{self, ListFilters, SortKey};
use issues_lib::{Issue, Priority, Status};

use super::open_project;
use crate::cli::ListArgs;
use crate::config::Config;
use crate::format::{IssueList, TextStyle, format_issue_detail, format_issue_line, print_json};

/// Execute the list command.
///
/// # Errors
///
/// Returns an error if a filter or sort value is invalid, or the project
/// document cannot be read.
pub fn execute(args: &ListArgs, json: bool, config: &Config) -> Result<()> {
    let filters = build_filters(args)?;
    let sort = match &args.sort {
        Some(key) => key.parse::<SortKey>()?,
        None => config.default_sort,
    };

    let ctx = open_project(config)?;
    let issues = ctx.store.load(&ctx.project_id)?;
    let selected = select(&issues, &filters, sort, args.reverse, args.limit);

    if json {
        return print_json(&IssueList::new(&ctx.project_id, selected));
    }

    if selected.is_empty() {
        println!("No issues found.");
        return Ok(());
    }
    let style = TextStyle::for_stdout();
    for issue in &selected {
        if args.detailed {
            println!("{}", format_issue_detail(issue, style));
        } else {
            println!("{}", format_issue_line(issue, style));
        }
    }
    println!("\n{} issue(s)", selected.len());
    Ok(())
}

/// Convert CLI args to query filters.
fn build_filters(args: &ListArgs) -> Result<ListFilters> {
    Ok(ListFilters {
        status: args.status.as_deref().map(str::parse::<Status>).transpose()?,
        priority: args
            .priority
            .as_deref()
            .map(str::parse::<Priority>)
            .transpose()?,
        label: args.label.clone(),
        assignee: args.assignee.clone(),
    })
}

fn select<'a>(
    issues: &'a [Issue],
    filters: &ListFilters,
    sort: SortKey,
    reverse: bool,
    limit: Option<usize>,
) -> Vec<&'a Issue> {
    let mut selected = query::sort(query::filter(issues, filters), sort);
    if reverse {
        selected.reverse();
    }
    if let Some(limit) = limit {
        selected.truncate(limit);
    }
    selected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_issue(id: &str, priority: Priority, status: Status) -> Issue {
        Issue {
            id: id.to_string(),
            project_id: "web".to_string(),
            title: id.to_string(),
            priority,
            status,
            ..Default::default()
        }
    }

    #[test]
    fn test_build_filters_rejects_unknown_status() {
        let args = ListArgs {
            status: Some("done".to_string()),
            ..Default::default()
        };
        assert!(build_filters(&args).is_err());
    }

    #[test]
    fn test_build_filters_accepts_aliases() {
        let args = ListArgs {
            status: Some("in-progress".to_string()),
            priority: Some("HIGH".to_string()),
            ..Default::default()
        };
        let filters = build_filters(&args).unwrap();
        assert_eq!(filters.status, Some(Status::InProgress));
        assert_eq!(filters.priority, Some(Priority::High));
    }

    #[test]
    fn test_select_reverse_and_limit() {
        let issues = vec![
            make_issue("a", Priority::Low, Status::Open),
            make_issue("b", Priority::Critical, Status::Open),
            make_issue("c", Priority::Medium, Status::Closed),
        ];
        let filters = ListFilters::default();

        let ids = |v: Vec<&Issue>| v.into_iter().map(|i| i.id.clone()).collect::<Vec<_>>();
        assert_eq!(
            ids(select(&issues, &filters, SortKey::Priority, false, None)),
            vec!["b", "c", "a"]
        );
        assert_eq!(
            ids(select(&issues, &filters, SortKey::Priority, true, Some(2))),
            vec!["a", "c"]
        );
    }
}
