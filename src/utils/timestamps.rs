//! Timestamp formatting and lenient parsing for API parameters.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

/// Formats a timestamp as RFC 3339 UTC with microsecond precision.
///
/// The output uses a `Z` suffix so it survives being echoed back in a
/// query string without escaping.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use waf_dashboard::utils::timestamps::format_timestamp;
///
/// let ts = Utc.with_ymd_and_hms(2025, 3, 1, 12, 30, 0).unwrap();
/// assert_eq!(format_timestamp(ts), "2025-03-01T12:30:00.000000Z");
/// ```
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parses a client supplied timestamp.
///
/// Accepts RFC 3339 (`2025-03-01T12:30:00Z`, `2025-03-01T07:30:00-05:00`) and
/// naive ISO 8601 (`2025-03-01T12:30:00.123`), the latter read as UTC.
/// A space is accepted in place of `T`. Returns `None` for anything else.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }

    // Query strings decode '+' to ' ', which mangles offsets like "+00:00".
    if let Some((head, offset)) = raw.rsplit_once(' ')
        && offset.contains(':')
        && let Ok(ts) = DateTime::parse_from_rfc3339(&format!("{head}+{offset}"))
    {
        return Some(ts.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn test_parse_rfc3339_with_z() {
        let ts = parse_timestamp("2025-03-01T12:30:00Z").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2025, 3, 1, 12, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let ts = parse_timestamp("2025-03-01T07:30:00-05:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2025, 3, 1, 12, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_offset_with_plus_decoded_as_space() {
        let ts = parse_timestamp("2025-03-01T12:30:00.000000 00:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2025, 3, 1, 12, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_naive_is_utc() {
        let ts = parse_timestamp("2025-03-01T12:30:00.250").unwrap();
        assert_eq!(ts.timestamp_subsec_millis(), 250);
        assert_eq!(
            ts.with_nanosecond(0).unwrap(),
            Utc.with_ymd_and_hms(2025, 3, 1, 12, 30, 0).unwrap()
        );

        assert!(parse_timestamp("2025-03-01 12:30:00").is_some());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("   ").is_none());
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("2025-13-40T99:00:00Z").is_none());
    }

    #[test]
    fn test_format_roundtrips_through_parse() {
        let ts = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap()
            + chrono::Duration::microseconds(123_456);
        let formatted = format_timestamp(ts);

        assert_eq!(formatted, "2024-12-31T23:59:59.123456Z");
        assert_eq!(parse_timestamp(&formatted), Some(ts));
    }
}
