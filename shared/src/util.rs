//! Date/time helpers for the backend's ISO-8601 local-datetime strings

use chrono::NaiveDateTime;

/// Wire format used by the backend (`2026-03-01T09:30:00`)
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Pad a `datetime-local` value (`YYYY-MM-DDTHH:MM`, 16 chars) to seconds
/// precision by appending `:00`; values of any other length are returned
/// trimmed but otherwise untouched.
pub fn pad_datetime_local(value: &str) -> String {
    let value = value.trim();
    if value.len() == 16 {
        format!("{}:00", value)
    } else {
        value.to_string()
    }
}

/// Parse a `datetime-local` or full local-datetime string
pub fn parse_local_datetime(value: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(&pad_datetime_local(value), DATETIME_FORMAT)
}
