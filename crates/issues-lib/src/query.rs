//! Query and filter types for issue operations.
//!
//! Everything here is pure: inputs are borrowed and never mutated, and each
//! function returns a new ordered sequence.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::{IssuesError, Result};
use crate::model::{Issue, Priority, Status};

/// Fields for a new issue.
#[derive(Debug, Clone, Default)]
pub struct NewIssue {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub author: String,
    pub labels: Vec<String>,
}

/// Fields to update on an issue.
#[derive(Debug, Clone, Default)]
pub struct IssueUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    /// `Some(None)` clears the assignee.
    pub assignee: Option<Option<String>>,
    pub add_labels: Vec<String>,
    pub remove_labels: Vec<String>,
}

impl IssueUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.assignee.is_none()
            && self.add_labels.is_empty()
            && self.remove_labels.is_empty()
    }
}

/// Filter options for listing issues. Every provided criterion must hold.
#[derive(Debug, Clone, Default)]
pub struct ListFilters {
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    /// Exact, case-sensitive label membership.
    pub label: Option<String>,
    /// Exact assignee match.
    pub assignee: Option<String>,
}

impl ListFilters {
    #[must_use]
    pub fn matches(&self, issue: &Issue) -> bool {
        if self.status.is_some_and(|s| issue.status != s) {
            return false;
        }
        if self.priority.is_some_and(|p| issue.priority != p) {
            return false;
        }
        if let Some(label) = &self.label {
            if !issue.has_label(label) {
                return false;
            }
        }
        if let Some(assignee) = &self.assignee {
            if issue.assignee.as_deref() != Some(assignee.as_str()) {
                return false;
            }
        }
        true
    }
}

/// Sort key for listing issues.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum SortKey {
    /// Newest first.
    Created,
    /// Most recently updated first; never-updated issues last.
    Updated,
    /// Critical, high, medium, low.
    #[default]
    Priority,
    /// Open, in_progress, resolved, closed.
    Status,
}

impl SortKey {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Priority => "priority",
            Self::Status => "status",
        }
    }

    fn compare(self, a: &Issue, b: &Issue) -> Ordering {
        match self {
            Self::Created => b.created_at.cmp(&a.created_at),
            Self::Updated => match (a.updated_at, b.updated_at) {
                (Some(x), Some(y)) => y.cmp(&x),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            Self::Priority => b.priority.severity().cmp(&a.priority.severity()),
            Self::Status => a.status.rank().cmp(&b.status.rank()),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = IssuesError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "created" | "created_at" => Ok(Self::Created),
            "updated" | "updated_at" => Ok(Self::Updated),
            "priority" => Ok(Self::Priority),
            "status" => Ok(Self::Status),
            _ => Err(IssuesError::InvalidSortKey { key: s.to_string() }),
        }
    }
}

/// Keep the issues matching every criterion, in input order.
#[must_use]
pub fn filter<'a, I>(issues: I, filters: &ListFilters) -> Vec<&'a Issue>
where
    I: IntoIterator<Item = &'a Issue>,
{
    issues
        .into_iter()
        .filter(|issue| filters.matches(issue))
        .collect()
}

/// Order issues by `key`. The sort is stable: ties keep their input order.
#[must_use]
pub fn sort<'a, I>(issues: I, key: SortKey) -> Vec<&'a Issue>
where
    I: IntoIterator<Item = &'a Issue>,
{
    let mut sorted: Vec<&Issue> = issues.into_iter().collect();
    sorted.sort_by(|a, b| key.compare(a, b));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use chrono::{Duration, TimeZone, Utc};
    use proptest::prelude::*;

    fn make_issue(id: &str, status: Status, priority: Priority, labels: &[&str]) -> Issue {
        Issue {
            id: id.to_string(),
            project_id: "demo".to_string(),
            title: format!("Issue {id}"),
            status,
            priority,
            labels: labels.iter().map(ToString::to_string).collect(),
            ..Default::default()
        }
    }

    fn ids(issues: &[&Issue]) -> Vec<String> {
        issues.iter().map(|i| i.id.clone()).collect()
    }

    fn fixture() -> Vec<Issue> {
        vec![
            make_issue("a", Status::Open, Priority::Low, &["bug"]),
            make_issue("b", Status::Closed, Priority::High, &["bug", "ui"]),
            make_issue("c", Status::Open, Priority::High, &["ui"]),
            make_issue("d", Status::InProgress, Priority::Critical, &["bug"]),
            make_issue("e", Status::Open, Priority::Medium, &["bug"]),
        ]
    }

    #[test]
    fn test_filter_without_criteria_returns_input() {
        let issues = fixture();
        let result = filter(&issues, &ListFilters::default());
        assert_eq!(ids(&result), vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_filter_is_conjunctive() {
        let issues = fixture();
        let filters = ListFilters {
            status: Some(Status::Open),
            label: Some("bug".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&filter(&issues, &filters)), vec!["a", "e"]);
    }

    #[test]
    fn test_filter_by_priority() {
        let issues = fixture();
        let filters = ListFilters {
            priority: Some(Priority::High),
            ..Default::default()
        };
        assert_eq!(ids(&filter(&issues, &filters)), vec!["b", "c"]);
    }

    #[test]
    fn test_filter_label_is_case_sensitive() {
        let issues = fixture();
        let filters = ListFilters {
            label: Some("Bug".to_string()),
            ..Default::default()
        };
        assert!(filter(&issues, &filters).is_empty());
    }

    #[test]
    fn test_filter_by_assignee() {
        let mut issues = fixture();
        issues[2].assignee = Some("carol".to_string());
        let filters = ListFilters {
            assignee: Some("carol".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&filter(&issues, &filters)), vec!["c"]);
    }

    #[test]
    fn test_sort_priority_is_stable() {
        let issues = fixture();
        let sorted = sort(&issues, SortKey::Priority);
        assert_eq!(ids(&sorted), vec!["d", "b", "c", "e", "a"]);
    }

    #[test]
    fn test_sort_status_canonical_order() {
        let mut issues = fixture();
        issues.push(make_issue("f", Status::Resolved, Priority::Low, &[]));
        let sorted = sort(&issues, SortKey::Status);
        assert_eq!(ids(&sorted), vec!["a", "c", "e", "d", "f", "b"]);
    }

    #[test]
    fn test_sort_created_newest_first_with_stable_ties() {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut issues = fixture();
        issues[0].created_at = base;
        issues[1].created_at = base + Duration::hours(2);
        issues[2].created_at = base + Duration::hours(1);
        issues[3].created_at = base + Duration::hours(2);
        issues[4].created_at = base;

        let sorted = sort(&issues, SortKey::Created);
        assert_eq!(ids(&sorted), vec!["b", "d", "c", "a", "e"]);
    }

    #[test]
    fn test_sort_updated_puts_never_updated_last() {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut issues = fixture();
        issues[1].updated_at = Some(base);
        issues[3].updated_at = Some(base + Duration::minutes(5));

        let sorted = sort(&issues, SortKey::Updated);
        assert_eq!(ids(&sorted), vec!["d", "b", "a", "c", "e"]);
    }

    #[test]
    fn test_sort_does_not_mutate_input() {
        let issues = fixture();
        let before = issues.clone();
        let _ = sort(&issues, SortKey::Priority);
        assert_eq!(issues, before);
    }

    #[test]
    fn test_sort_key_parse() {
        assert_eq!("created".parse::<SortKey>().unwrap(), SortKey::Created);
        assert_eq!("updated_at".parse::<SortKey>().unwrap(), SortKey::Updated);
        let err = "title".parse::<SortKey>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_issue_update_is_empty() {
        assert!(IssueUpdate::default().is_empty());
        let update = IssueUpdate {
            assignee: Some(None),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }

    fn arb_issue() -> impl Strategy<Value = Issue> {
        (
            0..4usize,
            0..4usize,
            prop::collection::vec(prop::sample::select(vec!["bug", "ui", "docs"]), 0..3),
        )
            .prop_map(|(s, p, labels)| {
                make_issue("x", Status::ALL[s], Priority::ALL[p], &labels)
            })
    }

    proptest! {
        #[test]
        fn prop_filter_equals_both_predicates(issues in prop::collection::vec(arb_issue(), 0..20)) {
            let filters = ListFilters {
                status: Some(Status::Open),
                label: Some("bug".to_string()),
                ..Default::default()
            };
            let expected: Vec<&Issue> = issues
                .iter()
                .filter(|i| i.status == Status::Open && i.has_label("bug"))
                .collect();
            prop_assert_eq!(filter(&issues, &filters), expected);
        }

        #[test]
        fn prop_sort_priority_is_ordered_and_stable(issues in prop::collection::vec(arb_issue(), 0..20)) {
            let indexed: Vec<Issue> = issues
                .into_iter()
                .enumerate()
                .map(|(n, mut i)| { i.id = format!("{n:03}"); i })
                .collect();
            let sorted = sort(&indexed, SortKey::Priority);
            for pair in sorted.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                prop_assert!(a.priority.severity() >= b.priority.severity());
                if a.priority == b.priority {
                    prop_assert!(a.id < b.id);
                }
            }
        }
    }
}
