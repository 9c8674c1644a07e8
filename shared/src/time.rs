//! Local-time timestamps
//!
//! Tickets carry their creation time already converted to the store's
//! local time (`created_at_local`). We keep it as a naive local wall-clock
//! value so that rendering never depends on the machine's timezone.

use chrono::{DateTime, Local, NaiveDateTime};

/// Wire/display format for local timestamps
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Calendar date format used by filters (`YYYY-MM-DD`)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse a local timestamp
///
/// Accepts naive ISO-8601 (`T` or space separated, optional fraction) and
/// RFC 3339 with an offset, which is converted to this machine's local time.
pub fn parse_local_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Local).naive_local())
}

/// Today's calendar date in local time (`YYYY-MM-DD`)
pub fn today_local() -> String {
    Local::now().date_naive().format(DATE_FORMAT).to_string()
}

/// Date part for display (`YYYY-MM-DD`)
pub fn format_date(dt: &NaiveDateTime) -> String {
    dt.format(DATE_FORMAT).to_string()
}

/// Time part for display (`HH:MM:SS`)
pub fn format_time(dt: &NaiveDateTime) -> String {
    dt.format("%H:%M:%S").to_string()
}

/// Date and time for display (`YYYY-MM-DD HH:MM:SS`)
pub fn format_datetime(dt: &NaiveDateTime) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Serde adapter for local timestamps
pub mod local_timestamp {
    use super::{TIMESTAMP_FORMAT, parse_local_timestamp};
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(dt: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&dt.format(TIMESTAMP_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        parse_local_timestamp(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid timestamp: {}", raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 22)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_parse_naive_variants() {
        assert_eq!(parse_local_timestamp("2024-01-22T14:32:15"), Some(at(14, 32, 15)));
        assert_eq!(parse_local_timestamp("2024-01-22 14:32:15"), Some(at(14, 32, 15)));
        assert_eq!(
            parse_local_timestamp("2024-01-22T14:32:15.250").map(|d| d.format("%H:%M:%S").to_string()),
            Some("14:32:15".to_string())
        );
        assert_eq!(parse_local_timestamp("2024-01-22 14:32"), Some(at(14, 32, 0)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_local_timestamp("yesterday"), None);
        assert_eq!(parse_local_timestamp(""), None);
    }

    #[test]
    fn test_display_helpers() {
        let dt = at(9, 5, 3);
        assert_eq!(format_date(&dt), "2024-01-22");
        assert_eq!(format_time(&dt), "09:05:03");
        assert_eq!(format_datetime(&dt), "2024-01-22 09:05:03");
    }

    #[test]
    fn test_today_is_a_date() {
        let today = today_local();
        assert!(chrono::NaiveDate::parse_from_str(&today, DATE_FORMAT).is_ok());
    }
}
