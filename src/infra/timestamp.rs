//! ISO-8601 UTC timestamps: generation, lenient parsing, display formatting.

use chrono::{DateTime, Local, NaiveDateTime, SecondsFormat, TimeZone, Utc};

/// Returns the current UTC time as an ISO-8601 string with second precision,
/// e.g. `2024-07-15T08:30:00+00:00`.
pub fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, false)
}

/// Parses an ISO-8601 timestamp string.
///
/// Accepts an explicit offset or a trailing `Z`. Falls back to the naive
/// `YYYY-MM-DDTHH:MM:SS` form, which is interpreted as UTC. Returns `None`
/// for anything unparseable; never panics.
pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Formats a stored timestamp string for display in the local timezone as
/// `YYYY-MM-DD HH:MM`. Unparseable input formats as `"N/A"`.
pub fn format_display(raw: &str) -> String {
    match parse(raw) {
        Some(dt) => dt
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M")
            .to_string(),
        None => "N/A".to_string(),
    }
}
