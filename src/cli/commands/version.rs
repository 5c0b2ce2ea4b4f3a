//! Version command implementation.

use anyhow::Result;
use serde::Serialize;

use crate::format::print_json;

#[derive(Serialize)]
struct VersionOutput<'a> {
    name: &'a str,
    version: &'a str,
    build: &'a str,
}

/// Execute the version command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(json: bool) -> Result<()> {
    let output = VersionOutput {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        build: if cfg!(debug_assertions) {
            "dev"
        } else {
            "release"
        },
    };

    if json {
        print_json(&output)?;
    } else {
        println!("ag-issues {} ({})", output.version, output.build);
    }
    Ok(())
}
