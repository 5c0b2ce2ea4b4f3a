//! Output formatting for `ag-issues`.
//!
//! Human-readable text goes to stdout; with `--json` stdout carries a single
//! JSON document and diagnostics stay on stderr.

mod output;
mod text;

pub use output::{Deleted, IssueList, ProjectSummary};
pub use text::{
    TIME_FORMAT, TextStyle, format_issue_detail, format_issue_line, format_priority,
    format_status, truncate_to_width,
};

use serde::Serialize;

/// Print `value` as pretty JSON on stdout.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
