//! Delete command implementation.

use anyhow::Result;

use super::open_project;
use crate::cli::DeleteArgs;
use crate::config::Config;
use crate::format::{Deleted, print_json};

/// Execute the delete command.
///
/// # Errors
///
/// Returns an error if the ID does not resolve or the project document
/// cannot be read or written.
pub fn execute(args: &DeleteArgs, json: bool, config: &Config) -> Result<()> {
    let ctx = open_project(config)?;
    let removed = ctx.store.delete(&ctx.project_id, &args.id)?;

    if json {
        print_json(&Deleted { deleted: &removed })?;
    } else {
        println!("Deleted {}: {}", removed.short_id(), removed.title);
    }
    Ok(())
}
