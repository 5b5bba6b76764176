//! Shared utility functions for WQ crates.

/// Date utility functions
pub mod dates {
    use anyhow::anyhow;
    use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

    /// Canonical storage format: fixed width so text ordering is time ordering.
    pub const STORAGE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

    /// Naive date-time layouts accepted from source files, interpreted as UTC.
    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
    ];

    /// Parse a source timestamp into a UTC instant.
    ///
    /// Accepts RFC 3339 with an offset (converted to UTC), a naive
    /// date-time (taken as UTC) or a bare `YYYY-MM-DD` (midnight UTC).
    pub fn parse_timestamp_utc(s: &str) -> anyhow::Result<DateTime<Utc>> {
        let s = s.trim();
        if s.is_empty() {
            return Err(anyhow!("empty timestamp"));
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(dt.with_timezone(&Utc));
        }
        for format in NAIVE_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
                return Ok(Utc.from_utc_datetime(&naive));
            }
        }
        let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|e| anyhow!("unrecognised timestamp {:?}: {}", s, e))?;
        date.and_hms_opt(0, 0, 0)
            .map(|naive| Utc.from_utc_datetime(&naive))
            .ok_or_else(|| anyhow!("invalid midnight for {}", date))
    }

    /// Format an instant for SQLite storage (`YYYY-MM-DDTHH:MM:SSZ`).
    pub fn format_storage(ts: &DateTime<Utc>) -> String {
        ts.format(STORAGE_FORMAT).to_string()
    }

    /// Parse a value written by [`format_storage`].
    pub fn parse_storage(s: &str) -> anyhow::Result<DateTime<Utc>> {
        let naive = NaiveDateTime::parse_from_str(s, STORAGE_FORMAT)?;
        Ok(Utc.from_utc_datetime(&naive))
    }

    /// Format an instant as "YYYY-MM-DD"
    pub fn format_date(ts: &DateTime<Utc>) -> String {
        ts.format("%Y-%m-%d").to_string()
    }

}

/// Numeric helpers
pub mod numbers {
    /// Round to a fixed number of decimal places (half away from zero).
    pub fn round_to(value: f64, places: u32) -> f64 {
        let factor = 10f64.powi(places as i32);
        (value * factor).round() / factor
    }

    /// Round to two decimal places, the precision used for summary statistics.
    pub fn round2(value: f64) -> f64 {
        round_to(value, 2)
    }

}
