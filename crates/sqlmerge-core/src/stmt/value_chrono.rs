use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::{stmt::Value, Error, Result};

/// Text layouts accepted for timestamps, tried in order. These cover the
/// forms SQLite's date and time functions produce.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

impl Value {
    /// Interprets the value as a point in time.
    ///
    /// Text is parsed as RFC 3339 (normalized to UTC), then as one of the
    /// SQLite timestamp layouts, then as a bare date (midnight). Integers
    /// are Unix epoch seconds. Anything else is a type conversion error.
    pub fn to_datetime(&self) -> Result<NaiveDateTime> {
        match self {
            Value::Text(text) => parse_datetime(text.trim())
                .ok_or_else(|| Error::type_conversion(self.clone(), "DateTime")),
            Value::Integer(secs) => DateTime::<Utc>::from_timestamp(*secs, 0)
                .map(|dt| dt.naive_utc())
                .ok_or_else(|| Error::type_conversion(self.clone(), "DateTime")),
            _ => Err(Error::type_conversion(self.clone(), "DateTime")),
        }
    }
}

fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}
