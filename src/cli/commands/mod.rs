//! Command implementations.

pub mod comment;
pub mod completions;
pub mod delete;
pub mod list;
pub mod projects;
pub mod show;
pub mod submit;
pub mod update;
pub mod version;

use anyhow::Result;
use issues_lib::{ProjectStore, resolve_project_id};

use crate::config::Config;

/// Store plus the project a command operates on.
#[derive(Debug)]
pub struct ProjectContext {
    pub store: ProjectStore,
    pub project_id: String,
}

/// Resolve the current project and open its store.
///
/// # Errors
///
/// Returns an error if the working directory is unavailable or no project
/// can be resolved.
pub fn open_project(config: &Config) -> Result<ProjectContext> {
    let cwd = std::env::current_dir()?;
    let project_id = resolve_project_id(
        config.project_override.as_deref(),
        &cwd,
        &config.project_resolution(),
    )?;
    Ok(ProjectContext {
        store: ProjectStore::new(config.data_dir.clone()),
        project_id,
    })
}
