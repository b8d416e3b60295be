//! Date formatting for table cells.
//!
//! The API sends MongoDB timestamps as RFC 3339 strings
//! (`2024-03-15T14:02:26.123Z`); the panel shows them as `15 Mar 2024`.

use chrono::{DateTime, NaiveDate, Utc};

fn parse(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// `2024-03-15T14:02:26.123Z` -> `15 Mar 2024, 14:02`
pub fn format_datetime(value: &str) -> String {
    match parse(value) {
        Some(dt) => dt.format("%d %b %Y, %H:%M").to_string(),
        None => value.to_string(),
    }
}

/// `2024-03-15` or a full timestamp -> `15 Mar 2024`
pub fn format_date(value: &str) -> String {
    if let Some(dt) = parse(value) {
        return dt.format("%d %b %Y").to_string();
    }
    match NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d") {
        Ok(date) => date.format("%d %b %Y").to_string(),
        Err(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_datetime() {
        assert_eq!(format_datetime("2024-03-15T14:02:26.123Z"), "15 Mar 2024, 14:02");
        assert_eq!(format_datetime("2024-12-31T23:59:59+00:00"), "31 Dec 2024, 23:59");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-15"), "15 Mar 2024");
        assert_eq!(format_date("2024-03-15T14:02:26.123Z"), "15 Mar 2024");
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(format_datetime("invalid"), "invalid");
        assert_eq!(format_date(""), "");
    }
}
