//! Logging setup using `tracing`.
//!
//! Diagnostics go to stderr so stdout stays clean for command output
//! (including `--json`).

use tracing_subscriber::EnvFilter;

use crate::config::LogFormat;

/// Map CLI verbosity flags to a filter directive.
#[must_use]
pub fn verbosity_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber.
///
/// `RUST_LOG` wins when set. Otherwise an explicit `-v`/`-q` wins over the
/// configured `filter`, which wins over the default of `warn`.
///
/// # Errors
///
/// Returns an error if the filter directive is invalid or a global
/// subscriber is already installed.
pub fn init_logging(
    verbose: u8,
    quiet: bool,
    filter: Option<&str>,
    format: LogFormat,
) -> anyhow::Result<()> {
    let directive = if verbose > 0 || quiet {
        verbosity_directive(verbose, quiet)
    } else {
        filter.unwrap_or_else(|| verbosity_directive(0, false))
    };

    let env_filter = match std::env::var("RUST_LOG") {
        Ok(value) if !value.is_empty() => EnvFilter::try_new(value)?,
        _ => EnvFilter::try_new(directive)?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    match format {
        LogFormat::Text => builder
            .without_time()
            .try_init()
            .map_err(|e| anyhow::anyhow!(e))?,
        LogFormat::Json => builder
            .json()
            .try_init()
            .map_err(|e| anyhow::anyhow!(e))?,
    }

    Ok(())
}
