//! Timestamp parsing and the canonical timestamp form.
//!
//! Every date-like cell is rewritten as `YYYY-MM-DD HH:MM:SS`. Values carrying
//! a UTC offset are converted to UTC first; date-only values map to midnight.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

/// Output format of normalized timestamps.
pub const CANONICAL_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Output format of `purchase_date`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const DATETIME_FORMATS: [&str; 10] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%Y/%m/%dT%H:%M:%S",
];

const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%z"];

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

/// Parse a timestamp cell. Blank or unrecognized input yields `None`.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    try_parse_datetime(trimmed)
        .or_else(|| try_parse_with_offset(trimmed))
        .or_else(|| try_parse_date(trimmed).map(|d| d.and_time(NaiveTime::MIN)))
}

fn try_parse_datetime(value: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

/// RFC 3339 and space-separated values with an offset, converted to UTC.
fn try_parse_with_offset(value: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }
    OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(value, fmt).ok())
        .map(|dt| dt.naive_utc())
}

fn try_parse_date(value: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

/// Format a timestamp in canonical form.
pub fn format_canonical(dt: NaiveDateTime) -> String {
    dt.format(CANONICAL_FORMAT).to_string()
}

/// Parse and re-format a cell; `None` when it does not parse.
pub fn normalize_timestamp(value: &str) -> Option<String> {
    parse_timestamp(value).map(format_canonical)
}

/// Whole days from `start` to `end`, rounded toward negative infinity.
///
/// A delivery 36 hours after the reference is 1 day; one 12 hours before
/// it is -1 day.
pub fn whole_days_between(start: NaiveDateTime, end: NaiveDateTime) -> i64 {
    let delta = end - start;
    // `num_seconds` truncates toward zero; a negative sub-second part means
    // the floored second is one lower.
    let seconds = delta.num_seconds() - i64::from(delta.subsec_nanos() < 0);
    seconds.div_euclid(86_400)
}
