//! Row-to-entity parsing helpers.
//!
//! Repos convert `libsql::Row` (column-indexed) into typed entity structs.
//! These helpers isolate the parsing and handle the dual datetime format
//! (`SQLite`'s `CURRENT_TIMESTAMP` vs Rust's `to_rfc3339()`).

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::DatabaseError;

/// Storage format for DATE columns.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// Handles both RFC 3339 (`"2026-02-09T14:30:00+00:00"`) and `SQLite`'s default
/// format (`"2026-02-09 14:30:00"`).
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string cannot be parsed as either format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Parse an optional TEXT column as `Option<DateTime<Utc>>`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if a non-empty string cannot be parsed.
pub fn parse_optional_datetime(s: Option<&str>) -> Result<Option<DateTime<Utc>>, DatabaseError> {
    match s {
        Some(s) if !s.is_empty() => Ok(Some(parse_datetime(s)?)),
        _ => Ok(None),
    }
}

/// Parse a DATE column stored as `YYYY-MM-DD`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string is not a calendar date.
pub fn parse_date(s: &str) -> Result<NaiveDate, DatabaseError> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|e| DatabaseError::Query(format!("Failed to parse date '{s}': {e}")))
}

/// Parse a nullable DATE column.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if a non-empty string is not a calendar date.
pub fn parse_optional_date(s: Option<&str>) -> Result<Option<NaiveDate>, DatabaseError> {
    match s {
        Some(s) if !s.is_empty() => Ok(Some(parse_date(s)?)),
        _ => Ok(None),
    }
}

/// Render a date for storage.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
/// You must use `get::<Option<String>>()` for nullable columns.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Read a nullable REAL column. Integers stored in a REAL-affinity column
/// come back as integers when they have no fractional part.
///
/// # Errors
///
/// Returns `DatabaseError::Query` for a non-numeric value.
#[allow(clippy::cast_precision_loss)]
pub fn get_opt_f64(row: &libsql::Row, idx: i32) -> Result<Option<f64>, DatabaseError> {
    match row.get_value(idx)? {
        libsql::Value::Null => Ok(None),
        libsql::Value::Real(v) => Ok(Some(v)),
        libsql::Value::Integer(v) => Ok(Some(v as f64)),
        other => Err(DatabaseError::Query(format!(
            "expected a number in column {idx}, got {other:?}"
        ))),
    }
}

/// Quote an SQL identifier, doubling any embedded quote.
///
/// Only catalogue names are ever passed here; quoting keeps the generated
/// SQL valid even for names that collide with keywords.
#[must_use]
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn parses_sqlite_timestamp() {
        let dt = parse_datetime("2026-02-09 14:30:00").unwrap();
        assert_eq!(dt.hour(), 14);
        assert_eq!(dt.day(), 9);
    }

    #[test]
    fn parses_rfc3339_timestamp() {
        let dt = parse_datetime("2026-02-09T14:30:00+02:00").unwrap();
        assert_eq!(dt.hour(), 12);
    }

    #[test]
    fn rejects_garbage_timestamp() {
        assert!(parse_datetime("yesterday").is_err());
    }

    #[test]
    fn optional_values_treat_empty_as_none() {
        assert_eq!(parse_optional_datetime(Some("")).unwrap(), None);
        assert_eq!(parse_optional_date(None).unwrap(), None);
        assert_eq!(parse_optional_date(Some("")).unwrap(), None);
    }

    #[test]
    fn dates_round_trip_through_storage_format() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
        let stored = format_date(date);
        assert_eq!(stored, "2025-03-31");
        assert_eq!(parse_date(&stored).unwrap(), date);
        assert!(parse_date("31/03/2025").is_err());
    }

    #[test]
    fn quote_ident_escapes_quotes() {
        assert_eq!(quote_ident("project"), "\"project\"");
        assert_eq!(quote_ident("a\"b"), "\"a\"\"b\"");
    }
}
