//! Legacy relational source.
//!
//! The legacy database is only ever read, once per entity kind, with a
//! "fetch all rows" query. Rows are decoded into loosely typed [`SourceRow`]s
//! and coerced into document records by the migrators.

mod resolver;
mod sqlite;

pub use resolver::*;
pub use sqlite::*;

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::errors::AppError;

/// A single column value as read from the legacy database.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Timestamp(DateTime<Utc>),
    Bytes(Vec<u8>),
}

/// One row of a legacy table, keyed by column name.
pub type SourceRow = BTreeMap<String, SqlValue>;

/// Read-only access to the legacy database.
#[allow(async_fn_in_trait)]
pub trait RelationalSource {
    /// Fetch every row of `table`.
    async fn fetch_all(&self, table: &str) -> Result<Vec<SourceRow>, AppError>;
}

/// Parse the timestamp spellings found in legacy date and datetime columns.
///
/// Values without an offset are taken as UTC; bare dates are midnight UTC.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f%#z") {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2023, 5, 1, 10, 30, 0).unwrap();

        assert_eq!(parse_timestamp("2023-05-01T10:30:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2023-05-01T20:30:00+10:00"), Some(expected));
        assert_eq!(parse_timestamp("2023-05-01 10:30:00"), Some(expected));
        assert_eq!(parse_timestamp("2023-05-01T10:30:00.000"), Some(expected));
        assert_eq!(parse_timestamp("2023-05-01 10:30"), Some(expected));
        assert_eq!(parse_timestamp(" 2023-05-01 10:30:00+00 "), Some(expected));
    }

    #[test]
    fn test_parse_bare_date_is_midnight_utc() {
        assert_eq!(
            parse_timestamp("2024-02-29"),
            Some(Utc.with_ymd_and_hms(2024, 2, 29, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert_eq!(parse_timestamp("next tuesday"), None);
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("2024-13-01"), None);
    }
}
