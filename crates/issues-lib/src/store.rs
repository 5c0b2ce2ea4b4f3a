//! Project store: the only read/write path between projects and disk.
//!
//! Each project is one JSON document under `<root>/issues/<project>.json`.
//! Every operation is a full load, an in-memory change, and a full save.
//! Nothing is locked; two processes writing the same project race and the
//! last writer wins.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::document;
use crate::error::{IssuesError, Result};
use crate::model::{Comment, Issue};
use crate::query::{IssueUpdate, NewIssue};

/// File name of the per-directory project marker.
pub const PROJECT_MARKER: &str = ".ag-issues";

/// Inputs for resolving which project a command operates on.
#[derive(Debug, Clone, Default)]
pub struct ProjectResolution {
    /// Root directory whose immediate children are projects.
    pub projects_dir: Option<PathBuf>,
    /// Fallback when nothing else applies.
    pub default_project: Option<String>,
}

/// Determine the project ID for a command.
///
/// Tries, in order: the explicit override, the first component of `cwd`
/// below `projects_dir`, the nearest `.ag-issues` marker file walking up
/// from `cwd`, then the configured default.
///
/// # Errors
///
/// Returns `Config` if no project can be determined, or `Validation` if the
/// resolved ID is not a safe file name.
pub fn resolve_project_id(
    explicit: Option<&str>,
    cwd: &Path,
    resolution: &ProjectResolution,
) -> Result<String> {
    let explicit = explicit.map(str::trim).filter(|p| !p.is_empty());
    let cwd = dunce::canonicalize(cwd).unwrap_or_else(|_| cwd.to_path_buf());

    let resolved = explicit
        .map(str::to_string)
        .or_else(|| {
            resolution
                .projects_dir
                .as_deref()
                .and_then(|dir| project_from_projects_dir(&cwd, dir))
        })
        .or_else(|| project_from_marker(&cwd))
        .or_else(|| {
            resolution
                .default_project
                .as_deref()
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string)
        })
        .ok_or_else(|| {
            IssuesError::Config(format!(
                "could not determine project for {}; pass --project or set a default",
                cwd.display()
            ))
        })?;

    validate_project_id(&resolved)?;
    tracing::debug!(project = %resolved, "resolved project");
    Ok(resolved)
}

fn project_from_projects_dir(cwd: &Path, projects_dir: &Path) -> Option<String> {
    let projects_dir =
        dunce::canonicalize(projects_dir).unwrap_or_else(|_| projects_dir.to_path_buf());
    let rel = cwd.strip_prefix(&projects_dir).ok()?;
    rel.components()
        .next()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
}

fn project_from_marker(cwd: &Path) -> Option<String> {
    for dir in cwd.ancestors() {
        let marker = dir.join(PROJECT_MARKER);
        if !marker.is_file() {
            continue;
        }
        let content = std::fs::read_to_string(&marker).ok()?;
        let named = content.trim();
        if !named.is_empty() {
            return Some(named.to_string());
        }
        return dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());
    }
    None
}

/// Check that a project ID can be used as a file stem.
///
/// # Errors
///
/// Returns `Validation` for empty IDs, path separators, `..`, or a leading dot.
pub fn validate_project_id(project_id: &str) -> Result<()> {
    if project_id.trim().is_empty() {
        return Err(IssuesError::validation("project", "cannot be empty"));
    }
    if project_id.contains(['/', '\\']) || project_id.contains("..") {
        return Err(IssuesError::validation(
            "project",
            format!("'{project_id}' must not contain path separators or '..'"),
        ));
    }
    if project_id.starts_with('.') {
        return Err(IssuesError::validation(
            "project",
            format!("'{project_id}' must not start with '.'"),
        ));
    }
    Ok(())
}

// ============================================================================
// ID Resolution
// ============================================================================

/// Index of the issue matching a full ID or a unique ID prefix.
///
/// An exact match always wins. Otherwise the input is matched as a
/// case-insensitive prefix; more than one hit is an error listing every
/// candidate.
///
/// # Errors
///
/// Returns `InvalidId` for blank input, `IssueNotFound` when nothing
/// matches, or `AmbiguousId` when the prefix matches several issues.
pub fn position_by_id(issues: &[Issue], id_or_prefix: &str) -> Result<usize> {
    let input = id_or_prefix.trim();
    if input.is_empty() {
        return Err(IssuesError::InvalidId {
            id: id_or_prefix.to_string(),
        });
    }

    if let Some(pos) = issues.iter().position(|i| i.id == input) {
        return Ok(pos);
    }

    let needle = input.to_ascii_lowercase();
    let matches: Vec<usize> = issues
        .iter()
        .enumerate()
        .filter(|(_, i)| i.id.to_ascii_lowercase().starts_with(&needle))
        .map(|(pos, _)| pos)
        .collect();

    match matches.as_slice() {
        [] => Err(IssuesError::IssueNotFound {
            id: input.to_string(),
        }),
        [pos] => Ok(*pos),
        _ => Err(IssuesError::AmbiguousId {
            partial: input.to_string(),
            matches: matches.iter().map(|&pos| issues[pos].id.clone()).collect(),
        }),
    }
}

/// Find an issue by full ID or unique prefix.
///
/// # Errors
///
/// See [`position_by_id`].
pub fn find_by_id<'a>(issues: &'a [Issue], id_or_prefix: &str) -> Result<&'a Issue> {
    position_by_id(issues, id_or_prefix).map(|pos| &issues[pos])
}

/// Mutable variant of [`find_by_id`].
///
/// # Errors
///
/// See [`position_by_id`].
pub fn find_by_id_mut<'a>(issues: &'a mut [Issue], id_or_prefix: &str) -> Result<&'a mut Issue> {
    let pos = position_by_id(issues, id_or_prefix)?;
    Ok(&mut issues[pos])
}

/// Apply every mutation in `update` to `issue`.
///
/// All inputs are validated before anything changes.
///
/// # Errors
///
/// Returns `Validation` for an empty update, a blank title, or a blank label.
pub fn apply_update(issue: &mut Issue, update: &IssueUpdate) -> Result<()> {
    if update.is_empty() {
        return Err(IssuesError::validation("update", "no changes requested"));
    }
    if update.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
        return Err(IssuesError::validation("title", "cannot be empty"));
    }
    if update.add_labels.iter().any(|l| l.trim().is_empty()) {
        return Err(IssuesError::validation("label", "cannot be empty"));
    }

    if let Some(title) = &update.title {
        issue.set_title(title)?;
    }
    if let Some(description) = &update.description {
        issue.set_description(description);
    }
    if let Some(status) = update.status {
        issue.set_status(status);
    }
    if let Some(priority) = update.priority {
        issue.set_priority(priority);
    }
    if let Some(assignee) = &update.assignee {
        issue.set_assignee(assignee.as_deref());
    }
    for label in &update.add_labels {
        issue.add_label(label)?;
    }
    for label in &update.remove_labels {
        issue.remove_label(label);
    }

    Ok(())
}

fn check_document(path: &Path, project_id: &str, issues: &[Issue]) -> Result<()> {
    let mut seen = HashSet::with_capacity(issues.len());
    for issue in issues {
        if issue.project_id != project_id {
            return Err(IssuesError::ProjectMismatch {
                path: path.to_path_buf(),
                expected: project_id.to_string(),
                found: issue.project_id.clone(),
            });
        }
        if !seen.insert(issue.id.as_str()) {
            return Err(IssuesError::DuplicateId {
                path: path.to_path_buf(),
                id: issue.id.clone(),
            });
        }
        check_issue(issue).map_err(|reason| {
            IssuesError::format(path, format!("issue {}: {reason}", issue.id))
        })?;
    }
    Ok(())
}

/// Per-issue invariants that a stored document must already satisfy.
fn check_issue(issue: &Issue) -> std::result::Result<(), String> {
    if issue.title.trim().is_empty() {
        return Err("empty title".to_string());
    }
    let mut labels = HashSet::with_capacity(issue.labels.len());
    for label in &issue.labels {
        if label.trim().is_empty() {
            return Err("empty label".to_string());
        }
        if !labels.insert(label.as_str()) {
            return Err(format!("duplicate label '{label}'"));
        }
    }
    let mut comment_ids = HashSet::with_capacity(issue.comments.len());
    for comment in &issue.comments {
        if comment.content.trim().is_empty() {
            return Err(format!("comment {} has empty content", comment.id));
        }
        if !comment_ids.insert(comment.id.as_str()) {
            return Err(format!("duplicate comment id {}", comment.id));
        }
    }
    Ok(())
}

// ============================================================================
// Store
// ============================================================================

/// Disk-backed issue store rooted at a data directory.
#[derive(Debug, Clone)]
pub struct ProjectStore {
    root: PathBuf,
}

impl ProjectStore {
    /// Create a store rooted at `root`. Nothing is touched on disk until the
    /// first save.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding one document per project.
    #[must_use]
    pub fn issues_dir(&self) -> PathBuf {
        self.root.join("issues")
    }

    /// Path of a project's document.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the project ID is not a safe file stem.
    pub fn project_path(&self, project_id: &str) -> Result<PathBuf> {
        validate_project_id(project_id)?;
        Ok(self.issues_dir().join(format!("{project_id}.json")))
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Load every issue of a project. An unseen project has no issues.
    ///
    /// # Errors
    ///
    /// Returns `Format` on malformed documents, issues filed under another
    /// project, duplicate IDs, or issues breaking title, label or comment
    /// rules; `Io` on read failure.
    pub fn load(&self, project_id: &str) -> Result<Vec<Issue>> {
        let path = self.project_path(project_id)?;
        let issues = document::load(&path)?;
        check_document(&path, project_id, &issues)?;
        Ok(issues)
    }

    /// Replace a project's document with `issues`.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if an issue belongs to another project, or `Io`
    /// on write failure.
    pub fn save(&self, project_id: &str, issues: &[Issue]) -> Result<()> {
        let path = self.project_path(project_id)?;
        if let Some(stray) = issues.iter().find(|i| i.project_id != project_id) {
            return Err(IssuesError::validation(
                "project_id",
                format!(
                    "issue {} belongs to '{}', not '{project_id}'",
                    stray.id, stray.project_id
                ),
            ));
        }
        document::save(&path, issues)
    }

    // ========================================================================
    // CRUD
    // ========================================================================

    /// Create a new issue and persist it.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for a blank title or label, plus any load/save error.
    pub fn submit(&self, project_id: &str, new_issue: &NewIssue) -> Result<Issue> {
        let mut issues = self.load(project_id)?;
        let issue = Issue::new(
            project_id,
            &new_issue.title,
            &new_issue.description,
            new_issue.priority,
            &new_issue.author,
            &new_issue.labels,
        )?;
        issues.push(issue.clone());
        self.save(project_id, &issues)?;

        tracing::info!(project = project_id, id = %issue.id, "submitted issue");
        Ok(issue)
    }

    /// Look up a single issue by full ID or unique prefix.
    ///
    /// # Errors
    ///
    /// Returns `IssueNotFound`, `AmbiguousId`, or any load error.
    pub fn get_issue(&self, project_id: &str, id_or_prefix: &str) -> Result<Issue> {
        let issues = self.load(project_id)?;
        find_by_id(&issues, id_or_prefix).cloned()
    }

    /// Apply `update` to one issue and persist.
    ///
    /// # Errors
    ///
    /// Returns lookup errors, `Validation` for bad updates, or any load/save error.
    pub fn update(&self, project_id: &str, id_or_prefix: &str, update: &IssueUpdate) -> Result<Issue> {
        let mut issues = self.load(project_id)?;
        let issue = find_by_id_mut(&mut issues, id_or_prefix)?;
        apply_update(issue, update)?;
        let updated = issue.clone();
        self.save(project_id, &issues)?;

        tracing::info!(project = project_id, id = %updated.id, "updated issue");
        Ok(updated)
    }

    /// Append a comment to one issue and persist.
    ///
    /// # Errors
    ///
    /// Returns lookup errors, `Validation` for blank content, or any load/save error.
    pub fn comment(
        &self,
        project_id: &str,
        id_or_prefix: &str,
        author: &str,
        content: &str,
    ) -> Result<Comment> {
        let mut issues = self.load(project_id)?;
        let issue = find_by_id_mut(&mut issues, id_or_prefix)?;
        let comment = issue.add_comment(author, content)?;
        self.save(project_id, &issues)?;

        tracing::info!(project = project_id, id = %comment.issue_id, "added comment");
        Ok(comment)
    }

    /// Remove an issue from its project and persist.
    ///
    /// # Errors
    ///
    /// Returns lookup errors or any load/save error.
    pub fn delete(&self, project_id: &str, id_or_prefix: &str) -> Result<Issue> {
        let mut issues = self.load(project_id)?;
        let pos = position_by_id(&issues, id_or_prefix)?;
        let removed = issues.remove(pos);
        self.save(project_id, &issues)?;

        tracing::info!(project = project_id, id = %removed.id, "deleted issue");
        Ok(removed)
    }

    /// Project IDs that have a document, sorted.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the issues directory exists but cannot be read.
    pub fn list_projects(&self) -> Result<Vec<String>> {
        let dir = self.issues_dir();
        let entries = match std::fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(IssuesError::Io(e)),
        };

        let mut projects = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") && path.is_file() {
                if let Some(stem) = path.file_stem() {
                    projects.push(stem.to_string_lossy().into_owned());
                }
            }
        }
        projects.sort();
        Ok(projects)
    }
}
