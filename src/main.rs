//! `ag-issues` - Per-project issue tracker
//!
//! Each project's issues live in one JSON document on local disk.

use std::process::ExitCode;

fn main() -> ExitCode {
    ag_issues::run()
}
