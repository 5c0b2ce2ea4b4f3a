//! Projects command implementation.

use anyhow::Result;
use issues_lib::ProjectStore;

use crate::config::Config;
use crate::format::{ProjectSummary, print_json};

/// Execute the projects command.
///
/// # Errors
///
/// Returns an error if the issues directory or a project document cannot be
/// read.
pub fn execute(json: bool, config: &Config) -> Result<()> {
    let store = ProjectStore::new(config.data_dir.clone());
    let summaries = store
        .list_projects()?
        .into_iter()
        .map(|project_id| -> Result<ProjectSummary> {
            let issues = store.load(&project_id)?;
            Ok(ProjectSummary {
                issue_count: issues.len(),
                open_count: issues.iter().filter(|i| !i.status.is_terminal()).count(),
                project_id,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    if json {
        return print_json(&summaries);
    }
    if summaries.is_empty() {
        println!("No projects found in {}", store.issues_dir().display());
        return Ok(());
    }
    for summary in &summaries {
        println!(
            "{}  {} issue(s), {} open",
            summary.project_id, summary.issue_count, summary.open_count
        );
    }
    Ok(())
}
