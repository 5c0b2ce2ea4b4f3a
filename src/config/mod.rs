//! Configuration management for `ag_issues`.
//!
//! Configuration is layered, lowest precedence first:
//! - Built-in defaults
//! - User config file (`$AG_ISSUES_CONFIG`, else `<config dir>/ag-issues/config.yaml`)
//! - Environment variable overrides (`AG_ISSUES_*`)
//! - Command-line overrides (`--data-dir`, `--project`)

use std::path::{Path, PathBuf};

use issues_lib::{IssuesError, Priority, ProjectResolution, SortKey};
use serde::Deserialize;

/// Environment variable naming an explicit config file.
pub const ENV_CONFIG: &str = "AG_ISSUES_CONFIG";
pub const ENV_DATA_DIR: &str = "AG_ISSUES_DATA_DIR";
pub const ENV_PROJECTS_DIR: &str = "AG_ISSUES_PROJECTS_DIR";
pub const ENV_PROJECT: &str = "AG_ISSUES_PROJECT";
pub const ENV_AUTHOR: &str = "AG_ISSUES_AUTHOR";

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Overrides supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub data_dir: Option<PathBuf>,
    pub project: Option<String>,
}

/// On-disk config file shape. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    data_dir: Option<PathBuf>,
    projects_dir: Option<PathBuf>,
    default_project: Option<String>,
    default_priority: Option<String>,
    default_sort: Option<String>,
    author: Option<String>,
    log_filter: Option<String>,
    log_format: Option<LogFormat>,
}

/// Effective configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding `issues/<project>.json`.
    pub data_dir: PathBuf,
    /// Directory whose immediate children are projects.
    pub projects_dir: Option<PathBuf>,
    pub default_project: Option<String>,
    pub default_priority: Priority,
    pub default_sort: SortKey,
    pub author: Option<String>,
    pub log_filter: Option<String>,
    pub log_format: LogFormat,
    /// `--project` from the command line.
    pub project_override: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        let home = home_dir();
        Self {
            data_dir: home.join("Agentic").join("shared").join("agentic-issues"),
            projects_dir: Some(home.join("Agentic").join("projects")),
            default_project: None,
            default_priority: Priority::Medium,
            default_sort: SortKey::Priority,
            author: None,
            log_filter: None,
            log_format: LogFormat::Text,
            project_override: None,
        }
    }
}

impl Config {
    /// Load configuration from the environment, the config file, and
    /// command-line overrides.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the config file exists but cannot be parsed or
    /// holds invalid values.
    pub fn load(overrides: &CliOverrides) -> Result<Self, IssuesError> {
        Self::load_with(overrides, |key| std::env::var(key).ok())
    }

    /// Like [`Config::load`], reading environment variables through `env`.
    ///
    /// # Errors
    ///
    /// See [`Config::load`].
    pub fn load_with<F>(overrides: &CliOverrides, env: F) -> Result<Self, IssuesError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = |key: &str| env(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        let path = env(ENV_CONFIG).map(PathBuf::from).or_else(default_config_path);
        if let Some(path) = path {
            if let Some(file) = read_config_file(&path)? {
                config.apply_file(file, &path)?;
            }
        }

        if let Some(dir) = env(ENV_DATA_DIR) {
            config.data_dir = expand_home(Path::new(&dir));
        }
        if let Some(dir) = env(ENV_PROJECTS_DIR) {
            config.projects_dir = Some(expand_home(Path::new(&dir)));
        }
        if let Some(project) = env(ENV_PROJECT) {
            config.default_project = Some(project);
        }
        if let Some(author) = env(ENV_AUTHOR) {
            config.author = Some(author);
        }

        if let Some(dir) = &overrides.data_dir {
            config.data_dir.clone_from(dir);
        }
        config.project_override.clone_from(&overrides.project);

        tracing::debug!(data_dir = %config.data_dir.display(), "configuration loaded");
        Ok(config)
    }

    fn apply_file(&mut self, file: ConfigFile, path: &Path) -> Result<(), IssuesError> {
        let invalid = |e: IssuesError| IssuesError::Config(format!("{}: {e}", path.display()));

        if let Some(dir) = file.data_dir {
            self.data_dir = expand_home(&dir);
        }
        if let Some(dir) = file.projects_dir {
            self.projects_dir = Some(expand_home(&dir));
        }
        if file.default_project.is_some() {
            self.default_project = file.default_project;
        }
        if let Some(priority) = file.default_priority {
            self.default_priority = priority.parse().map_err(invalid)?;
        }
        if let Some(sort) = file.default_sort {
            self.default_sort = sort.parse().map_err(invalid)?;
        }
        if file.author.is_some() {
            self.author = file.author;
        }
        if file.log_filter.is_some() {
            self.log_filter = file.log_filter;
        }
        if let Some(format) = file.log_format {
            self.log_format = format;
        }
        Ok(())
    }

    /// Inputs for project resolution derived from this config.
    #[must_use]
    pub fn project_resolution(&self) -> ProjectResolution {
        ProjectResolution {
            projects_dir: self.projects_dir.clone(),
            default_project: self.default_project.clone(),
        }
    }

    /// Name recorded as author of new issues and comments.
    #[must_use]
    pub fn current_user(&self) -> String {
        self.author
            .clone()
            .or_else(|| std::env::var("USER").ok())
            .or_else(|| std::env::var("USERNAME").ok())
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| "unknown".to_string())
    }
}

fn read_config_file(path: &Path) -> Result<Option<ConfigFile>, IssuesError> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(IssuesError::Config(format!(
                "cannot read {}: {e}",
                path.display()
            )));
        }
    };
    if raw.trim().is_empty() {
        return Ok(None);
    }
    serde_yaml::from_str(&raw)
        .map(Some)
        .map_err(|e| IssuesError::Config(format!("invalid config {}: {e}", path.display())))
}

fn default_config_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|dirs| dirs.config_dir().join("ag-issues").join("config.yaml"))
}

fn home_dir() -> PathBuf {
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => home_dir().join(rest),
        Err(_) => path.to_path_buf(),
    }
}
