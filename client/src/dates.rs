//! Date handling for backend payloads.
//!
//! Reservation dates arrive as strings and not every deployment sends the
//! same shape: some send plain `YYYY-MM-DD`, others append a time component
//! or a timezone offset. Matching a reservation against a calendar day
//! needs all of them collapsed to the plain form first.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Collapse a backend date string to `YYYY-MM-DD`.
///
/// Tries the plain form, RFC 3339, and the two datetime shapes seen in the
/// wild (`T`-separated and space-separated). As a last resort the first ten
/// characters are taken when they parse as a date on their own. Strings
/// that match nothing come back unchanged so they can still be displayed.
#[must_use]
pub fn normalize(raw: &str) -> String {
    if NaiveDate::parse_from_str(raw, "%Y-%m-%d").is_ok() {
        return raw.to_string();
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return ts.date_naive().to_string();
    }

    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, format) {
            return ts.date().to_string();
        }
    }

    if let Some(prefix) = raw.get(..10) {
        if NaiveDate::parse_from_str(prefix, "%Y-%m-%d").is_ok() {
            return prefix.to_string();
        }
    }

    raw.to_string()
}

/// Whether a backend date string names the given calendar day.
#[must_use]
pub fn matches_day(raw: &str, day: NaiveDate) -> bool {
    normalize(raw) == day.to_string()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_plain_date_passes_through() {
        assert_eq!(normalize("2025-06-10"), "2025-06-10");
    }

    #[test]
    fn test_rfc3339_collapses_to_date() {
        assert_eq!(normalize("2025-06-10T14:30:00Z"), "2025-06-10");
        assert_eq!(normalize("2025-06-10T14:30:00+02:00"), "2025-06-10");
    }

    #[test]
    fn test_datetime_without_offset_collapses() {
        assert_eq!(normalize("2025-06-10T14:30:00"), "2025-06-10");
        assert_eq!(normalize("2025-06-10 14:30:00"), "2025-06-10");
    }

    #[test]
    fn test_unknown_suffix_falls_back_to_prefix() {
        assert_eq!(normalize("2025-06-10T14:30:00.123456"), "2025-06-10");
    }

    #[test]
    fn test_garbage_comes_back_unchanged() {
        assert_eq!(normalize("not a date"), "not a date");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("2025-06"), "2025-06");
    }

    #[test]
    fn test_matches_day_ignores_time_component() {
        let day = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        assert!(matches_day("2025-06-10T09:00:00Z", day));
        assert!(!matches_day("2025-06-11", day));
    }
}
