//! Core data types for issues-lib.
//!
//! Field names and enum spellings are the on-disk wire format; files written
//! by older versions of the tool load unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{IssuesError, Result};
use crate::util;

/// Issue lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl Status {
    /// Every status, in canonical order.
    pub const ALL: [Self; 4] = [Self::Open, Self::InProgress, Self::Resolved, Self::Closed];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Resolved => "resolved",
            Self::Closed => "closed",
        }
    }

    /// Position in the canonical workflow (open first).
    #[must_use]
    pub const fn rank(&self) -> u8 {
        match self {
            Self::Open => 0,
            Self::InProgress => 1,
            Self::Resolved => 2,
            Self::Closed => 3,
        }
    }

    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Resolved | Self::Closed)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = IssuesError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "in_progress" | "in-progress" | "inprogress" => Ok(Self::InProgress),
            "resolved" => Ok(Self::Resolved),
            "closed" => Ok(Self::Closed),
            _ => Err(IssuesError::InvalidStatus {
                status: s.to_string(),
            }),
        }
    }
}

/// Issue priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Priority {
    /// Every priority, most severe first.
    pub const ALL: [Self; 4] = [Self::Critical, Self::High, Self::Medium, Self::Low];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    /// Severity rank; higher is more urgent.
    #[must_use]
    pub const fn severity(&self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
            Self::Critical => 3,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = IssuesError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            _ => Err(IssuesError::InvalidPriority {
                priority: s.to_string(),
            }),
        }
    }
}

/// Serde adapters for the timestamp wire format.
mod timestamp {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::util::{format_timestamp, parse_timestamp};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_timestamp(ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_timestamp(&raw).map_err(serde::de::Error::custom)
    }

    pub mod option {
        use super::{DateTime, Deserialize, Deserializer, Serializer, Utc};
        use crate::util::{format_timestamp, parse_timestamp};

        #[allow(clippy::ref_option)]
        pub fn serialize<S: Serializer>(
            ts: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match ts {
                Some(ts) => serializer.serialize_str(&format_timestamp(ts)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                Some(raw) if !raw.is_empty() => parse_timestamp(&raw)
                    .map(Some)
                    .map_err(serde::de::Error::custom),
                _ => Ok(None),
            }
        }
    }
}

/// The primary issue entity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Issue {
    /// Random unique ID.
    pub id: String,

    /// Owning project; matches the document the issue is stored in.
    pub project_id: String,

    /// Title (non-empty).
    pub title: String,

    /// Free-text description, possibly empty.
    pub description: String,

    pub status: Status,

    pub priority: Priority,

    /// Creator; never changes.
    pub author: String,

    #[serde(default)]
    pub assignee: Option<String>,

    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,

    /// Null until the first mutation after creation.
    #[serde(default, with = "timestamp::option")]
    pub updated_at: Option<DateTime<Utc>>,

    /// Comments in insertion order.
    #[serde(default)]
    pub comments: Vec<Comment>,

    /// Labels in insertion order, without duplicates.
    #[serde(default)]
    pub labels: Vec<String>,
}

impl Default for Issue {
    fn default() -> Self {
        Self {
            id: String::new(),
            project_id: String::new(),
            title: String::new(),
            description: String::new(),
            status: Status::default(),
            priority: Priority::default(),
            author: String::new(),
            assignee: None,
            created_at: Utc::now(),
            updated_at: None,
            comments: Vec::new(),
            labels: Vec::new(),
        }
    }
}

impl Issue {
    /// Create a new open issue with a fresh ID.
    ///
    /// Labels are trimmed and de-duplicated, keeping first occurrence order.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the title or any label is blank.
    pub fn new<I, S>(
        project_id: &str,
        title: &str,
        description: &str,
        priority: Priority,
        author: &str,
        labels: I,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let title = validate_title(title)?;

        let mut issue = Self {
            id: util::generate_id(),
            project_id: project_id.to_string(),
            title,
            description: description.to_string(),
            status: Status::Open,
            priority,
            author: author.to_string(),
            assignee: None,
            created_at: Utc::now(),
            updated_at: None,
            comments: Vec::new(),
            labels: Vec::new(),
        };

        for label in labels {
            let label = validate_label(label.as_ref())?;
            if !issue.labels.contains(&label) {
                issue.labels.push(label);
            }
        }

        Ok(issue)
    }

    /// Short display form of the ID.
    #[must_use]
    pub fn short_id(&self) -> &str {
        util::short_id(&self.id)
    }

    /// Append a comment and stamp `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the content is blank.
    pub fn add_comment(&mut self, author: &str, content: &str) -> Result<Comment> {
        if content.trim().is_empty() {
            return Err(IssuesError::validation("content", "cannot be empty"));
        }

        let comment = Comment {
            id: util::generate_id(),
            issue_id: self.id.clone(),
            author: author.to_string(),
            content: content.to_string(),
            created_at: Utc::now(),
            updated_at: None,
        };
        self.comments.push(comment.clone());
        self.touch();

        Ok(comment)
    }

    pub fn set_status(&mut self, status: Status) {
        self.status = status;
        self.touch();
    }

    pub fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
        self.touch();
    }

    /// Assign to a user, or clear the assignee with `None`.
    pub fn set_assignee(&mut self, assignee: Option<&str>) {
        self.assignee = assignee.map(str::to_string);
        self.touch();
    }

    /// # Errors
    ///
    /// Returns `Validation` if the title is blank.
    pub fn set_title(&mut self, title: &str) -> Result<()> {
        self.title = validate_title(title)?;
        self.touch();
        Ok(())
    }

    pub fn set_description(&mut self, description: &str) {
        self.description = description.to_string();
        self.touch();
    }

    /// Add a label. Adding a label that is already present changes nothing.
    ///
    /// Returns whether the label set changed.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the label is blank.
    pub fn add_label(&mut self, label: &str) -> Result<bool> {
        let label = validate_label(label)?;
        if self.labels.contains(&label) {
            return Ok(false);
        }
        self.labels.push(label);
        self.touch();
        Ok(true)
    }

    /// Remove a label. Removing an absent label is a no-op.
    ///
    /// Returns whether the label set changed.
    pub fn remove_label(&mut self, label: &str) -> bool {
        let label = label.trim();
        match self.labels.iter().position(|l| l == label) {
            Some(pos) => {
                self.labels.remove(pos);
                self.touch();
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }
}

fn validate_title(title: &str) -> Result<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(IssuesError::validation("title", "cannot be empty"));
    }
    Ok(title.to_string())
}

fn validate_label(label: &str) -> Result<String> {
    let label = label.trim();
    if label.is_empty() {
        return Err(IssuesError::validation("label", "cannot be empty"));
    }
    Ok(label.to_string())
}

/// A comment on an issue.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Comment {
    /// Random ID, unique within the issue.
    pub id: String,
    pub issue_id: String,
    pub author: String,
    pub content: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default, with = "timestamp::option")]
    pub updated_at: Option<DateTime<Utc>>,
}
