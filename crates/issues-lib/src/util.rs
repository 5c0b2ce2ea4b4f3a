//! ID generation and timestamp helpers.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use uuid::Uuid;

/// Number of leading characters shown for an ID in compact views.
pub const SHORT_ID_LEN: usize = 8;

// ============================================================================
// ID Generation
// ============================================================================

/// Generate a fresh random identifier (UUID v4, 122 random bits).
#[must_use]
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// Leading characters of an ID, suitable for display and prefix lookup.
#[must_use]
pub fn short_id(id: &str) -> &str {
    id.char_indices()
        .nth(SHORT_ID_LEN)
        .map_or(id, |(idx, _)| &id[..idx])
}

// ============================================================================
// Timestamps
// ============================================================================

/// Format a timestamp as RFC 3339 UTC, keeping sub-second precision.
#[must_use]
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Parse an ISO-8601 timestamp.
///
/// Accepts RFC 3339 with an offset, or a naive `YYYY-MM-DDTHH:MM:SS[.f]`
/// value (legacy files), which is taken as UTC.
///
/// # Errors
///
/// Returns the parse failure message if neither form matches.
pub fn parse_timestamp(value: &str) -> std::result::Result<DateTime<Utc>, String> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| format!("invalid timestamp '{value}': {e}"))
}
