//! Mapping from errors to exit codes and structured error output.

use issues_lib::{ErrorKind, IssuesError};
use serde::Serialize;

/// Process exit codes.
pub mod exit_code {
    pub const SUCCESS: u8 = 0;
    pub const INTERNAL: u8 = 1;
    pub const NOT_FOUND: u8 = 3;
    pub const VALIDATION: u8 = 4;
    pub const FORMAT: u8 = 6;
    pub const CONFIGURATION: u8 = 7;
    pub const IO: u8 = 8;
}

/// Exit code for an error kind.
#[must_use]
pub const fn exit_code_for(kind: ErrorKind) -> u8 {
    match kind {
        ErrorKind::Validation => exit_code::VALIDATION,
        ErrorKind::Format => exit_code::FORMAT,
        ErrorKind::NotFound | ErrorKind::AmbiguousId => exit_code::NOT_FOUND,
        ErrorKind::Configuration => exit_code::CONFIGURATION,
        ErrorKind::Io => exit_code::IO,
    }
}

/// Body of a structured error.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub kind: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub candidates: Vec<String>,
}

/// Structured error printed with `--json`.
#[derive(Debug, Serialize)]
pub struct ErrorReport {
    pub error: ErrorBody,
}

/// Error reduced to what the process edge needs.
#[derive(Debug)]
pub struct Failure {
    pub exit_code: u8,
    pub report: ErrorReport,
}

impl Failure {
    /// Classify an error from the command layer.
    #[must_use]
    pub fn from_anyhow(err: &anyhow::Error) -> Self {
        if let Some(issues_err) = find_issues_error(err) {
            return Self::from_issues_error(issues_err, format!("{err:#}"));
        }
        if let Some(io_err) = err.downcast_ref::<std::io::Error>() {
            return Self {
                exit_code: exit_code::IO,
                report: ErrorReport {
                    error: ErrorBody {
                        code: ErrorKind::Io.as_str(),
                        kind: "io",
                        message: io_err.to_string(),
                        candidates: Vec::new(),
                    },
                },
            };
        }
        Self {
            exit_code: exit_code::INTERNAL,
            report: ErrorReport {
                error: ErrorBody {
                    code: "INTERNAL_ERROR",
                    kind: "internal",
                    message: format!("{err:#}"),
                    candidates: Vec::new(),
                },
            },
        }
    }

    fn from_issues_error(err: &IssuesError, message: String) -> Self {
        let kind = err.kind();
        Self {
            exit_code: exit_code_for(kind),
            report: ErrorReport {
                error: ErrorBody {
                    code: kind.as_str(),
                    kind: kind_name(kind),
                    message,
                    candidates: err.candidates().to_vec(),
                },
            },
        }
    }

    /// Human-readable rendering for stderr.
    #[must_use]
    pub fn to_text(&self) -> String {
        let body = &self.report.error;
        let mut out = format!("Error: {}", body.message);
        if !body.candidates.is_empty() {
            out.push_str("\nCandidates:");
            for candidate in &body.candidates {
                out.push_str(&format!("\n  {candidate}"));
            }
        }
        out
    }

    /// JSON rendering for stderr.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self.report)
            .unwrap_or_else(|_| format!("{{\"error\":{{\"code\":\"{}\"}}}}", self.report.error.code))
    }
}

fn find_issues_error(err: &anyhow::Error) -> Option<&IssuesError> {
    err.chain().find_map(|cause| cause.downcast_ref::<IssuesError>())
}

const fn kind_name(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::Validation => "validation",
        ErrorKind::Format => "format",
        ErrorKind::NotFound => "not_found",
        ErrorKind::AmbiguousId => "ambiguous_id",
        ErrorKind::Configuration => "configuration",
        ErrorKind::Io => "io",
    }
}
