use issues_lib::Issue;
use serde::Serialize;

/// Issue list for `list --json`.
#[derive(Debug, Clone, Serialize)]
pub struct IssueList<'a> {
    pub project_id: &'a str,
    pub count: usize,
    pub issues: Vec<&'a Issue>,
}

impl<'a> IssueList<'a> {
    #[must_use]
    pub fn new(project_id: &'a str, issues: Vec<&'a Issue>) -> Self {
        Self {
            project_id,
            count: issues.len(),
            issues,
        }
    }
}

/// One entry of `projects --json`.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectSummary {
    pub project_id: String,
    pub issue_count: usize,
    pub open_count: usize,
}

/// Result of `delete --json`.
#[derive(Debug, Clone, Serialize)]
pub struct Deleted<'a> {
    pub deleted: &'a Issue,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_list_shape() {
        let issue = Issue {
            id: "abc".to_string(),
            project_id: "web".to_string(),
            title: "t".to_string(),
            ..Default::default()
        };
        let list = IssueList::new("web", vec![&issue]);
        let value = serde_json::to_value(&list).unwrap();
        assert_eq!(value["project_id"], "web");
        assert_eq!(value["count"], 1);
        assert_eq!(value["issues"][0]["id"], "abc");
        assert!(value["issues"][0]["updated_at"].is_null());
    }
}
