//! `issues-lib` - Per-project issue storage and queries.
//!
//! Each project's issues live in one JSON document on local disk. The
//! library loads a project's full collection, mutates it in memory, and
//! writes the whole document back.
//!
//! # Quick Start
//!
//! ```no_run
//! use issues_lib::{IssueUpdate, ListFilters, NewIssue, ProjectStore, SortKey, Status};
//! use issues_lib::query;
//!
//! let store = ProjectStore::new("/tmp/issue-data");
//!
//! // Create
//! let issue = store
//!     .submit("web", &NewIssue { title: "Fix login".into(), ..Default::default() })
//!     .unwrap();
//!
//! // Update by short ID
//! store
//!     .update("web", issue.short_id(), &IssueUpdate { status: Some(Status::InProgress), ..Default::default() })
//!     .unwrap();
//!
//! // Query
//! let issues = store.load("web").unwrap();
//! let open = query::filter(&issues, &ListFilters { status: Some(Status::Open), ..Default::default() });
//! let ordered = query::sort(open, SortKey::Priority);
//! ```

pub mod document;
pub mod error;
pub mod model;
pub mod query;
pub mod store;
pub mod util;

pub use error::{ErrorKind, IssuesError, Result};
pub use model::{Comment, Issue, Priority, Status};
pub use query::{IssueUpdate, ListFilters, NewIssue, SortKey};
pub use store::{ProjectResolution, ProjectStore, find_by_id, resolve_project_id};
