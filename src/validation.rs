//! Shared validation primitives consumed by every entity.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

use crate::error::AppError;

static TAG_PATTERN: OnceLock<Regex> = OnceLock::new();
static DATETIME_PATTERN: OnceLock<Regex> = OnceLock::new();

fn tag_pattern() -> &'static Regex {
    TAG_PATTERN.get_or_init(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"))
}

fn datetime_pattern() -> &'static Regex {
    DATETIME_PATTERN.get_or_init(|| {
        Regex::new(r"^(\d{4})-(\d{2})-(\d{2})[ T](\d{2}):(\d{2}):(\d{2})(?:\.(\d{1,6}))?$")
            .expect("datetime pattern is valid")
    })
}

/// Strip markup tags and ASCII control characters, then trim.
pub fn sanitize_content(input: &str) -> String {
    let stripped = tag_pattern().replace_all(input, "");
    stripped
        .chars()
        .filter(|c| !c.is_ascii_control())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Validate a fixed-length hexadecimal field. Returns the trimmed, lowercased value.
pub fn hex_field(label: &str, value: &str, expected_len: usize) -> Result<String, AppError> {
    let value = value.trim().to_lowercase();
    if value.is_empty() {
        return Err(AppError::Invalid(format!("{label} is empty or insecure")));
    }
    if !value.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(AppError::Invalid(format!("{label} is empty or insecure")));
    }
    if value.chars().count() != expected_len {
        return Err(AppError::Range(format!(
            "{label} must be {expected_len} characters"
        )));
    }
    Ok(value)
}

/// Parse a timestamp from request input. Absent or null input means "now".
/// Numbers are milliseconds since the Unix epoch; strings are wall-clock
/// `YYYY-MM-DD HH:MM:SS[.ffffff]` values.
pub fn parse_timestamp(input: Option<&Value>) -> Result<DateTime<Utc>, AppError> {
    match input {
        None | Some(Value::Null) => Ok(Utc::now()),
        Some(Value::Number(n)) => {
            let millis = n
                .as_i64()
                .ok_or_else(|| AppError::Invalid("timestamp is not a whole number of milliseconds".into()))?;
            timestamp_from_millis(millis)
        }
        Some(Value::String(s)) => parse_datetime_str(s),
        Some(_) => Err(AppError::Invalid(
            "timestamp must be a number or a string".into(),
        )),
    }
}

/// Interpret a count of milliseconds since the epoch as a UTC timestamp.
pub fn timestamp_from_millis(millis: i64) -> Result<DateTime<Utc>, AppError> {
    match Utc.timestamp_millis_opt(millis) {
        chrono::LocalResult::Single(dt) => Ok(dt),
        _ => Err(AppError::Range("timestamp is out of range".into())),
    }
}

/// Parse a `YYYY-MM-DD HH:MM:SS[.ffffff]` string. An empty string means "now".
/// Text that does not match the shape is invalid input; a well-shaped value
/// with impossible calendar or clock components is out of range.
pub fn parse_datetime_str(input: &str) -> Result<DateTime<Utc>, AppError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(Utc::now());
    }
    let caps = datetime_pattern()
        .captures(input)
        .ok_or_else(|| AppError::Invalid(format!("timestamp is not a valid date: {input}")))?;

    // The pattern guarantees each group is a short digit run, so these parses cannot fail.
    let year: i32 = caps[1].parse().unwrap_or_default();
    let month: u32 = caps[2].parse().unwrap_or_default();
    let day: u32 = caps[3].parse().unwrap_or_default();
    let hour: u32 = caps[4].parse().unwrap_or_default();
    let minute: u32 = caps[5].parse().unwrap_or_default();
    let second: u32 = caps[6].parse().unwrap_or_default();
    let micros: u32 = caps
        .get(7)
        .map(|m| {
            let mut digits = m.as_str().to_string();
            while digits.len() < 6 {
                digits.push('0');
            }
            digits.parse().unwrap_or_default()
        })
        .unwrap_or(0);

    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| AppError::Range(format!("date is out of range: {input}")))?;
    let time = NaiveTime::from_hms_micro_opt(hour, minute, second, micros)
        .ok_or_else(|| AppError::Range(format!("time is out of range: {input}")))?;
    Ok(NaiveDateTime::new(date, time).and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use serde_json::json;

    #[test]
    fn absent_timestamp_defaults_to_now() {
        let before = Utc::now();
        let parsed = parse_timestamp(None).unwrap();
        let after = Utc::now();
        assert!(parsed >= before && parsed <= after);
    }

    #[test]
    fn null_timestamp_defaults_to_now() {
        let parsed = parse_timestamp(Some(&Value::Null)).unwrap();
        assert!((Utc::now() - parsed).num_seconds() < 5);
    }

    #[test]
    fn millisecond_timestamps_round_trip() {
        let parsed = parse_timestamp(Some(&json!(1500000000000i64))).unwrap();
        assert_eq!(parsed.timestamp_millis(), 1500000000000);
    }

    #[test]
    fn wall_clock_strings_parse() {
        let parsed = parse_datetime_str("2017-07-14 02:40:00.123456").unwrap();
        assert_eq!(parsed.year(), 2017);
        assert_eq!(parsed.month(), 7);
        assert_eq!(parsed.hour(), 2);
        assert_eq!(parsed.timestamp_subsec_micros(), 123456);
    }

    #[test]
    fn garbage_is_invalid() {
        assert!(matches!(
            parse_datetime_str("not a date"),
            Err(AppError::Invalid(_))
        ));
        assert!(matches!(
            parse_timestamp(Some(&json!(true))),
            Err(AppError::Invalid(_))
        ));
        assert!(matches!(
            parse_timestamp(Some(&json!(1.5))),
            Err(AppError::Invalid(_))
        ));
    }

    #[test]
    fn out_of_range_components_are_range_errors() {
        assert!(matches!(
            parse_datetime_str("2017-13-01 00:00:00"),
            Err(AppError::Range(_))
        ));
        assert!(matches!(
            parse_datetime_str("2017-02-30 00:00:00"),
            Err(AppError::Range(_))
        ));
        assert!(matches!(
            parse_datetime_str("2017-01-01 25:00:00"),
            Err(AppError::Range(_))
        ));
        assert!(matches!(
            timestamp_from_millis(i64::MAX),
            Err(AppError::Range(_))
        ));
    }

    #[test]
    fn hex_field_normalizes_and_bounds() {
        let token = hex_field("profile activation token", "  ABCDEF0123456789abcdef0123456789 ", 32).unwrap();
        assert_eq!(token, "abcdef0123456789abcdef0123456789");

        assert!(matches!(
            hex_field("profile activation token", "", 32),
            Err(AppError::Invalid(_))
        ));
        assert!(matches!(
            hex_field("profile activation token", "zzzz", 32),
            Err(AppError::Invalid(_))
        ));
        assert!(matches!(
            hex_field("profile activation token", "abc123", 32),
            Err(AppError::Range(_))
        ));
    }

    #[test]
    fn sanitize_strips_markup_and_control_characters() {
        assert_eq!(sanitize_content("<b>hello</b> world"), "hello world");
        assert_eq!(sanitize_content("  plain  "), "plain");
        assert_eq!(sanitize_content("a\x07b"), "ab");
        assert_eq!(sanitize_content("<script>alert(1)</script>"), "alert(1)");
    }
}
