//! Text formatting for terminal output.
//!
//! - List lines: `{short id} {status} {priority} {title}`
//! - Detailed view with description, metadata, labels and comments
//!
//! Colour is applied only when requested by the caller, which decides based
//! on whether stdout is a terminal.

use std::fmt::Write as _;

use crossterm::style::Stylize;
use issues_lib::{Issue, Priority, Status};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Timestamp layout for human-readable views.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Width of the status column (`in_progress`).
const STATUS_WIDTH: usize = 11;
/// Width of the priority column (`critical`).
const PRIORITY_WIDTH: usize = 8;

/// Rendering options.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextStyle {
    pub color: bool,
    /// Maximum display width of a line; `None` means unbounded.
    pub width: Option<usize>,
}

impl TextStyle {
    /// Style for stdout: colour and truncation only on a terminal.
    #[must_use]
    pub fn for_stdout() -> Self {
        use std::io::IsTerminal;
        if std::io::stdout().is_terminal() {
            Self {
                color: true,
                width: crossterm::terminal::size().ok().map(|(cols, _)| usize::from(cols)),
            }
        } else {
            Self::default()
        }
    }
}

/// Status name, padded and optionally coloured.
#[must_use]
pub fn format_status(status: Status, color: bool) -> String {
    let padded = format!("{:<STATUS_WIDTH$}", status.as_str());
    if !color {
        return padded;
    }
    match status {
        Status::Open => padded.green().to_string(),
        Status::InProgress => padded.yellow().to_string(),
        Status::Resolved => padded.blue().to_string(),
        Status::Closed => padded.dark_grey().to_string(),
    }
}

/// Priority name, padded; critical is bold when coloured.
#[must_use]
pub fn format_priority(priority: Priority, color: bool) -> String {
    let padded = format!("{:<PRIORITY_WIDTH$}", priority.as_str());
    if color && priority == Priority::Critical {
        padded.red().bold().to_string()
    } else {
        padded
    }
}

/// Cut `text` to at most `max` display columns, ending in `…` when cut.
#[must_use]
pub fn truncate_to_width(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let budget = max - 1;
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}

/// Format a single-line issue summary.
#[must_use]
pub fn format_issue_line(issue: &Issue, style: TextStyle) -> String {
    let prefix_width = issue.short_id().width() + STATUS_WIDTH + PRIORITY_WIDTH + 3;
    let title = match style.width {
        Some(width) => truncate_to_width(&issue.title, width.saturating_sub(prefix_width).max(10)),
        None => issue.title.clone(),
    };
    format!(
        "{} {} {} {}",
        issue.short_id(),
        format_status(issue.status, style.color),
        format_priority(issue.priority, style.color),
        title
    )
}

/// Format the full view of one issue, comments included.
#[must_use]
pub fn format_issue_detail(issue: &Issue, style: TextStyle) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", issue.id, issue.title);
    let _ = writeln!(
        out,
        "Status: {}  Priority: {}",
        format_status(issue.status, style.color).trim_end(),
        format_priority(issue.priority, style.color).trim_end()
    );
    let _ = writeln!(out, "Author: {}", issue.author);
    let _ = writeln!(
        out,
        "Assignee: {}",
        issue.assignee.as_deref().unwrap_or("(unassigned)")
    );
    let _ = writeln!(out, "Created: {}", issue.created_at.format(TIME_FORMAT));
    if let Some(updated) = issue.updated_at {
        let _ = writeln!(out, "Updated: {}", updated.format(TIME_FORMAT));
    }
    if !issue.labels.is_empty() {
        let _ = writeln!(out, "Labels: {}", issue.labels.join(", "));
    }
    if !issue.description.is_empty() {
        let _ = writeln!(out, "\n{}", issue.description);
    }
    if !issue.comments.is_empty() {
        let _ = writeln!(out, "\nComments ({}):", issue.comments.len());
        for (n, comment) in issue.comments.iter().enumerate() {
            let _ = writeln!(
                out,
                "  {}. {} ({})",
                n + 1,
                comment.author,
                comment.created_at.format(TIME_FORMAT)
            );
            for line in comment.content.lines() {
                let _ = writeln!(out, "     {line}");
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn make_test_issue() -> Issue {
        Issue {
            id: "1a2b3c4d-0000-4000-8000-000000000000".to_string(),
            project_id: "web".to_string(),
            title: "Test title".to_string(),
            description: "Steps to reproduce".to_string(),
            author: "alice".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap(),
            ..Default::default()
        }
    }

    #[test]
    fn test_format_issue_line_plain() {
        let issue = make_test_issue();
        let line = format_issue_line(&issue, TextStyle::default());
        assert_eq!(line, "1a2b3c4d open        medium   Test title");
    }

    #[test]
    fn test_format_issue_line_in_progress() {
        let mut issue = make_test_issue();
        issue.status = Status::InProgress;
        issue.priority = Priority::Critical;
        let line = format_issue_line(&issue, TextStyle::default());
        assert!(line.contains("in_progress critical"));
    }

    #[test]
    fn test_colour_keeps_text() {
        assert_eq!(format_status(Status::Open, false), "open       ");
        assert!(format_status(Status::Closed, true).contains("closed"));
        assert!(format_priority(Priority::Critical, true).contains("critical"));
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("abcdefghij", 5), "abcd…");
        assert_eq!(truncate_to_width("日本語テキスト", 5), "日本…");
        assert_eq!(truncate_to_width("abc", 0), "");
    }

    #[test]
    fn test_line_respects_width() {
        let mut issue = make_test_issue();
        issue.title = "x".repeat(200);
        let line = format_issue_line(
            &issue,
            TextStyle {
                color: false,
                width: Some(60),
            },
        );
        assert_eq!(line.width(), 60);
        assert!(line.ends_with('…'));
    }

    #[test]
    fn test_detail_lists_numbered_comments() {
        let mut issue = make_test_issue();
        issue.labels = vec!["bug".to_string(), "ui".to_string()];
        issue.add_comment("bob", "first").unwrap();
        issue.add_comment("carol", "second\nline two").unwrap();

        let detail = format_issue_detail(&issue, TextStyle::default());
        assert!(detail.starts_with("1a2b3c4d-0000-4000-8000-000000000000 Test title\n"));
        assert!(detail.contains("Status: open  Priority: medium"));
        assert!(detail.contains("Assignee: (unassigned)"));
        assert!(detail.contains("Created: 2024-03-01 09:30"));
        assert!(detail.contains("Updated: "));
        assert!(detail.contains("Labels: bug, ui"));
        assert!(detail.contains("Comments (2):"));
        assert!(detail.contains("  1. bob ("));
        assert!(detail.contains("  2. carol ("));
        assert!(detail.contains("     line two"));
    }

    #[test]
    fn test_detail_omits_empty_sections() {
        let mut issue = make_test_issue();
        issue.description.clear();
        let detail = format_issue_detail(&issue, TextStyle::default());
        assert!(!detail.contains("Updated:"));
        assert!(!detail.contains("Labels:"));
        assert!(!detail.contains("Comments"));
    }
}
