//! Date parsing shared by the report and the mutation tools

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use mcp_common::{invalid_params, IntoMcpError, McpError};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid date '{0}': expected YYYY-MM-DD, YYYY-MM-DD HH:MM or an ISO 8601 timestamp")]
pub struct DateError(pub String);

impl IntoMcpError for DateError {
    fn into_mcp_error(self) -> McpError {
        invalid_params(self.to_string())
    }
}

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

fn from_naive(naive: NaiveDateTime) -> Option<DateTime<Local>> {
    Local.from_local_datetime(&naive).earliest()
}

/// Parse a timestamp in local time.
///
/// Accepts RFC 3339 (with offset), naive date-times, which are read as local
/// time, and bare dates, which mean local midnight.
pub fn parse_timestamp(text: &str) -> Option<DateTime<Local>> {
    let text = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Local));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return from_naive(naive);
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| from_naive(date.and_time(NaiveTime::MIN)))
}

/// `M/D` without padding or year, in local time
pub fn format_compact_date(text: &str) -> Option<String> {
    parse_timestamp(text).map(|dt| format!("{}/{}", dt.month(), dt.day()))
}

/// Calendar date for human-readable output
pub fn format_long_date(text: &str) -> Option<String> {
    parse_timestamp(text).map(|dt| dt.format("%Y-%m-%d").to_string())
}

/// Normalise a client-supplied date into an RFC 3339 timestamp.
///
/// OmniJS `new Date(...)` reads bare dates as UTC midnight, which lands on
/// the previous day west of Greenwich; sending a full local timestamp avoids
/// that.
pub fn normalize_input_date(text: &str) -> Result<String, DateError> {
    parse_timestamp(text)
        .map(|dt| dt.to_rfc3339())
        .ok_or_else(|| DateError(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_date_has_no_padding() {
        assert_eq!(format_compact_date("2024-03-05").as_deref(), Some("3/5"));
        assert_eq!(format_compact_date("2024-11-20 09:30").as_deref(), Some("11/20"));
    }

    #[test]
    fn test_compact_date_from_rfc3339_midday() {
        // Noon UTC stays on the same calendar day for every offset within ±11h
        assert_eq!(
            format_compact_date("2024-07-04T12:00:00.000Z").as_deref(),
            Some("7/4")
        );
    }

    #[test]
    fn test_unparseable_date_is_absent() {
        assert_eq!(format_compact_date("next tuesday"), None);
        assert_eq!(format_compact_date(""), None);
    }

    #[test]
    fn test_normalize_bare_date_is_local_midnight() {
        let normalized = normalize_input_date("2024-12-31").unwrap();
        let parsed = DateTime::parse_from_rfc3339(&normalized).unwrap();
        let local = parsed.with_timezone(&Local);
        assert_eq!((local.month(), local.day()), (12, 31));
        assert_eq!(local.time(), NaiveTime::MIN);
    }

    #[test]
    fn test_normalize_keeps_explicit_offset_instant() {
        let normalized = normalize_input_date("2024-06-01T08:00:00Z").unwrap();
        let parsed = DateTime::parse_from_rfc3339(&normalized).unwrap();
        let expected = DateTime::parse_from_rfc3339("2024-06-01T08:00:00Z").unwrap();
        assert_eq!(parsed, expected);
    }

    #[test]
    fn test_date_error_is_invalid_params() {
        let err = DateError("someday".into()).into_mcp_error();
        assert_eq!(err.code, rmcp::model::ErrorCode::INVALID_PARAMS);
        assert!(err.message.contains("invalid date 'someday'"));
    }

    #[test]
    fn test_normalize_rejects_garbage() {
        assert_eq!(
            normalize_input_date("tomorrow"),
            Err(DateError("tomorrow".to_string()))
        );
    }
}
