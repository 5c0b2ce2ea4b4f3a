//! Error types for `issues-lib`.
//!
//! Every variant belongs to one [`ErrorKind`], which is what callers map to
//! exit codes and user-facing messages. The library itself never prints.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Primary error type for issues-lib operations.
#[derive(Error, Debug)]
pub enum IssuesError {
    // === Validation Errors ===
    /// Field validation failed.
    #[error("Validation failed: {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Invalid status value.
    #[error("Invalid status: '{status}' (expected open, in_progress, resolved, closed)")]
    InvalidStatus { status: String },

    /// Invalid priority value.
    #[error("Invalid priority: '{priority}' (expected low, medium, high, critical)")]
    InvalidPriority { priority: String },

    /// Unknown sort key.
    #[error("Invalid sort key: '{key}' (expected created, updated, priority, status)")]
    InvalidSortKey { key: String },

    /// Issue ID input is unusable (e.g. empty).
    #[error("Invalid issue ID: '{id}'")]
    InvalidId { id: String },

    // === Format Errors ===
    /// A persisted project document could not be decoded.
    #[error("Malformed issue file {}: {reason}", path.display())]
    Format { path: PathBuf, reason: String },

    /// A project document holds an issue belonging to another project.
    #[error("Project mismatch in {}: expected '{expected}', found '{found}'", path.display())]
    ProjectMismatch {
        path: PathBuf,
        expected: String,
        found: String,
    },

    /// A project document holds the same issue ID twice.
    #[error("Duplicate issue ID in {}: {id}", path.display())]
    DuplicateId { path: PathBuf, id: String },

    // === Lookup Errors ===
    /// No issue matches the given ID or prefix.
    #[error("Issue not found: {id}")]
    IssueNotFound { id: String },

    /// Partial ID matches multiple issues.
    #[error("Ambiguous ID '{partial}': matches {}", matches.join(", "))]
    AmbiguousId {
        partial: String,
        matches: Vec<String>,
    },

    // === Configuration Errors ===
    /// No project could be determined, or configuration is unusable.
    #[error("Configuration error: {0}")]
    Config(String),

    // === I/O Errors ===
    /// File system I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse error categories surfaced to the command layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input shape or enum value; fixable by correcting the input.
    Validation,
    /// Persisted data unreadable or schema-invalid.
    Format,
    /// No issue matches.
    NotFound,
    /// Prefix matched more than one issue.
    AmbiguousId,
    /// No project could be resolved.
    Configuration,
    /// Operating system I/O failure.
    Io,
}

impl ErrorKind {
    /// Machine-readable SCREAMING_SNAKE code.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "VALIDATION_ERROR",
            Self::Format => "FORMAT_ERROR",
            Self::NotFound => "NOT_FOUND",
            Self::AmbiguousId => "AMBIGUOUS_ID",
            Self::Configuration => "CONFIGURATION_ERROR",
            Self::Io => "IO_ERROR",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl IssuesError {
    #[must_use]
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn format(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Format {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. }
            | Self::InvalidStatus { .. }
            | Self::InvalidPriority { .. }
            | Self::InvalidSortKey { .. }
            | Self::InvalidId { .. } => ErrorKind::Validation,
            Self::Format { .. } | Self::ProjectMismatch { .. } | Self::DuplicateId { .. } => {
                ErrorKind::Format
            }
            Self::IssueNotFound { .. } => ErrorKind::NotFound,
            Self::AmbiguousId { .. } => ErrorKind::AmbiguousId,
            Self::Config(_) => ErrorKind::Configuration,
            Self::Io(_) | Self::Json(_) => ErrorKind::Io,
        }
    }

    /// Full IDs an ambiguous prefix matched, if any.
    #[must_use]
    pub fn candidates(&self) -> &[String] {
        match self {
            Self::AmbiguousId { matches, .. } => matches,
            _ => &[],
        }
    }
}

/// Result type using `IssuesError`.
pub type Result<T> = std::result::Result<T, IssuesError>;
