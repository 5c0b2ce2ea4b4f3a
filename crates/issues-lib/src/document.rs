//! Whole-document JSON file I/O for a project's issues.
//!
//! A project document is one JSON array of issues. It is always read and
//! written in full.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::error::{IssuesError, Result};
use crate::model::Issue;

/// Load issues from a project document.
///
/// A missing file, or one containing only whitespace, yields an empty list.
///
/// # Errors
///
/// Returns `Io` if the file cannot be read, or `Format` if it is not a JSON
/// array of valid issues.
pub fn load(path: &Path) -> Result<Vec<Issue>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no issue file yet");
            return Ok(Vec::new());
        }
        Err(e) => return Err(IssuesError::Io(e)),
    };

    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    let issues: Vec<Issue> =
        serde_json::from_str(&raw).map_err(|e| IssuesError::format(path, e.to_string()))?;

    tracing::debug!(path = %path.display(), count = issues.len(), "loaded issues");
    Ok(issues)
}

/// Save issues to a project document with atomic write.
///
/// Writes to a temp file in the same directory, fsyncs, then renames over
/// the target so readers never observe a partial document.
///
/// # Errors
///
/// Returns `Io` if the file cannot be written.
pub fn save(path: &Path, issues: &[Issue]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tmp_path = path.with_file_name(format!("{file_name}.tmp.{}", std::process::id()));

    let json = serde_json::to_string_pretty(issues)?;

    let result = (|| -> Result<()> {
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.write_all(b"\n")?;
        file.sync_all()?;
        drop(file);
        fs::rename(&tmp_path, path)?;
        Ok(())
    })();

    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result?;

    tracing::debug!(path = %path.display(), count = issues.len(), "saved issues");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::model::{Priority, Status};

    fn make_issue(title: &str) -> Issue {
        Issue::new("demo", title, "", Priority::Medium, "tester", ["bug"]).unwrap()
    }

    #[test]
    fn test_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("issues").join("demo.json");

        let mut issue = make_issue("Test issue");
        issue.set_status(Status::Resolved);
        issue.add_comment("bob", "done").unwrap();
        let issues = vec![issue, make_issue("Second")];

        save(&path, &issues).unwrap();

        let loaded = load(&path).unwrap();
        assert_eq!(loaded, issues);
    }

    #[test]
    fn test_document_is_json_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("demo.json");
        save(&path, &[make_issue("One")]).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("demo.json");
        save(&path, &[make_issue("One")]).unwrap();
        save(&path, &[make_issue("Two")]).unwrap();

        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["demo.json".to_string()]);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load(&dir.path().join("nope.json")).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_load_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.json");
        fs::write(&path, "  \n").unwrap();

        assert!(load(&path).unwrap().is_empty());
    }

    #[test]
    fn test_load_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "[{\"id\": ").unwrap();

        let err = load(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn test_load_unknown_status() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("demo.json");
        save(&path, &[make_issue("One")]).unwrap();

        let raw = fs::read_to_string(&path)
            .unwrap()
            .replace("\"status\": \"open\"", "\"status\": \"blocked\"");
        fs::write(&path, raw).unwrap();

        let err = load(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
        assert!(err.to_string().contains("blocked"));
    }

    #[test]
    fn test_load_rejects_non_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("obj.json");
        fs::write(&path, "{}").unwrap();

        assert_eq!(load(&path).unwrap_err().kind(), ErrorKind::Format);
    }
}
