//! Row-to-entity parsing helpers.
//!
//! Every repo needs to convert `libsql::Row` (column-indexed) into typed
//! entity structs. These helpers isolate the parsing logic and handle the
//! dual datetime format issue (`SQLite`'s `datetime('now')` vs Rust's
//! `to_rfc3339()`).

use chrono::{DateTime, Utc};

use crate::error::StoreError;

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// Handles both RFC 3339 (`"2026-08-25T14:30:00+00:00"`) and `SQLite`'s
/// default format (`"2026-08-25 14:30:00"`).
///
/// # Errors
///
/// Returns `StoreError::Query` if the string cannot be parsed as either format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, StoreError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| StoreError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty
/// string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
/// You must use `get::<Option<String>>()` for nullable columns.
///
/// # Errors
///
/// Returns `StoreError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, StoreError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Read a nullable INTEGER column.
///
/// # Errors
///
/// Returns `StoreError` if the column read fails.
pub fn get_opt_i64(row: &libsql::Row, idx: i32) -> Result<Option<i64>, StoreError> {
    Ok(row.get::<Option<i64>>(idx)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_rfc3339() {
        let dt = parse_datetime("2026-08-25T14:30:00+00:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2026, 8, 25, 14, 30, 0).unwrap());
    }

    #[test]
    fn parses_sqlite_default_format() {
        let dt = parse_datetime("2026-08-25 14:30:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2026, 8, 25, 14, 30, 0).unwrap());
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_datetime("yesterday at noon").is_err());
    }

    #[test]
    fn rfc3339_text_order_agrees_with_chronological_order() {
        // The search predicates compare timestamp columns as TEXT. This holds
        // because every value is UTC with a fixed offset and zero-padded
        // fields, including across fractional-second precision.
        let earlier = Utc.with_ymd_and_hms(2026, 8, 25, 14, 30, 0).unwrap();
        let later = earlier + chrono::Duration::milliseconds(500);
        let latest = earlier + chrono::Duration::seconds(1);
        let a = earlier.to_rfc3339();
        let b = later.to_rfc3339();
        let c = latest.to_rfc3339();
        assert!(a < b, "{a} should sort before {b}");
        assert!(b < c, "{b} should sort before {c}");
    }
}
