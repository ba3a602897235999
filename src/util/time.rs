//! Timestamp parsing and en-GB style formatting for tracking dates.

use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Years at or below this are backend placeholder dates, not real ones.
const SENTINEL_YEAR_CEILING: i32 = 1900;

/// Parses a backend timestamp.
///
/// Accepts RFC 3339 values, offset-less date-times (read as UTC) and plain
/// dates. Returns `None` for anything unparseable or dated 1900 or earlier.
pub fn parse_timestamp(raw: &str) -> Option<OffsetDateTime> {
    let normalized = normalize(raw)?;
    let parsed = OffsetDateTime::parse(&normalized, &Rfc3339).ok()?;
    if parsed.year() <= SENTINEL_YEAR_CEILING {
        return None;
    }
    Some(parsed)
}

/// `18/08/2025`
pub fn format_date(dt: OffsetDateTime) -> String {
    format!(
        "{:02}/{:02}/{:04}",
        dt.day(),
        u8::from(dt.month()),
        dt.year()
    )
}

/// `09:00 am`
pub fn format_time(dt: OffsetDateTime) -> String {
    let hour = dt.hour();
    let period = if hour < 12 { "am" } else { "pm" };
    let hour12 = match hour % 12 {
        0 => 12,
        other => other,
    };
    format!("{:02}:{:02} {period}", hour12, dt.minute())
}

/// Date and time for table cells; empty when the value is absent or invalid.
pub fn format_date_time(raw: Option<&str>) -> String {
    raw.and_then(parse_timestamp)
        .map(|dt| format!("{} {}", format_date(dt), format_time(dt)))
        .unwrap_or_default()
}

fn normalize(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let Some((date, clock)) = trimmed.split_once(|c: char| c == 'T' || c == 't' || c == ' ')
    else {
        return Some(format!("{trimmed}T00:00:00Z"));
    };

    let clock = clock.trim();
    let has_offset = clock.ends_with(['Z', 'z']) || clock.contains(['+', '-']);
    if has_offset {
        return Some(format!("{date}T{clock}"));
    }

    let mut clock = clock.to_string();
    if clock.matches(':').count() == 1 {
        clock.push_str(":00");
    }
    Some(format!("{date}T{clock}Z"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rfc3339() {
        let dt = parse_timestamp("2025-08-18T09:00:00Z").unwrap();
        assert_eq!(format_date(dt), "18/08/2025");
        assert_eq!(format_time(dt), "09:00 am");
    }

    #[test]
    fn parses_offset_less_and_fractional_values() {
        let dt = parse_timestamp("2024-03-05T14:07:30.123").unwrap();
        assert_eq!(format_date(dt), "05/03/2024");
        assert_eq!(format_time(dt), "02:07 pm");

        let dt = parse_timestamp("2024-03-05 00:15").unwrap();
        assert_eq!(format_time(dt), "12:15 am");
    }

    #[test]
    fn parses_plain_dates() {
        let dt = parse_timestamp("2024-01-01").unwrap();
        assert_eq!(format_date(dt), "01/01/2024");
        assert_eq!(format_time(dt), "12:00 am");
    }

    #[test]
    fn keeps_explicit_offsets() {
        let dt = parse_timestamp("2024-06-01T18:30:00+02:00").unwrap();
        assert_eq!(format_time(dt), "06:30 pm");
    }

    #[test]
    fn rejects_sentinel_and_garbage() {
        assert!(parse_timestamp("0001-01-01T00:00:00").is_none());
        assert!(parse_timestamp("1900-12-31T23:59:59Z").is_none());
        assert!(parse_timestamp("not a date").is_none());
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("1901-01-01").is_some());
    }

    #[test]
    fn table_format_is_empty_for_missing_values() {
        assert_eq!(format_date_time(None), "");
        assert_eq!(format_date_time(Some("0001-01-01T00:00:00")), "");
        assert_eq!(
            format_date_time(Some("2025-08-21T10:00:00Z")),
            "21/08/2025 10:00 am"
        );
    }
}
