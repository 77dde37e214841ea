//! Typed access to legacy rows.
//!
//! Each accessor coerces the stored value into the shape the document
//! expects. Errors are plain messages; the migrator adds the entity and row
//! context.

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};

use crate::source::{parse_timestamp, SourceRow, SqlValue};

pub type RowResult<T> = Result<T, String>;

/// Unix timestamps at or above this magnitude are taken as milliseconds.
const MILLIS_THRESHOLD: i64 = 100_000_000_000;

/// Read-only view of one legacy row.
pub struct RowReader<'a> {
    row: &'a SourceRow,
}

impl<'a> RowReader<'a> {
    pub fn new(row: &'a SourceRow) -> Self {
        Self { row }
    }

    /// The column's value, treating SQL NULL like an absent column.
    fn value(&self, column: &str) -> Option<&'a SqlValue> {
        match self.row.get(column) {
            None | Some(SqlValue::Null) => None,
            Some(value) => Some(value),
        }
    }

    fn required(&self, column: &str) -> RowResult<&'a SqlValue> {
        self.value(column)
            .ok_or_else(|| format!("missing required column `{}`", column))
    }

    /// Identifier column; integer keys become strings.
    pub fn id(&self, column: &str) -> RowResult<String> {
        match self.required(column)? {
            SqlValue::Text(s) if !s.trim().is_empty() => Ok(s.clone()),
            SqlValue::Int(n) => Ok(n.to_string()),
            other => Err(unexpected(column, "an identifier", other)),
        }
    }

    pub fn opt_id(&self, column: &str) -> RowResult<Option<String>> {
        match self.value(column) {
            None => Ok(None),
            Some(_) => self.id(column).map(Some),
        }
    }

    pub fn text(&self, column: &str) -> RowResult<String> {
        let value = self.required(column)?;
        scalar_text(value).ok_or_else(|| unexpected(column, "text", value))
    }

    pub fn opt_text(&self, column: &str) -> RowResult<Option<String>> {
        match self.value(column) {
            None => Ok(None),
            Some(value) => scalar_text(value)
                .map(Some)
                .ok_or_else(|| unexpected(column, "text", value)),
        }
    }

    /// Decimal or numeric column as a plain number.
    pub fn number(&self, column: &str) -> RowResult<f64> {
        let value = self.required(column)?;
        as_number(value).ok_or_else(|| unexpected(column, "a number", value))
    }

    pub fn opt_number(&self, column: &str) -> RowResult<Option<f64>> {
        match self.value(column) {
            None => Ok(None),
            Some(value) => as_number(value)
                .map(Some)
                .ok_or_else(|| unexpected(column, "a number", value)),
        }
    }

    pub fn integer(&self, column: &str) -> RowResult<i64> {
        let value = self.required(column)?;
        as_integer(value).ok_or_else(|| unexpected(column, "an integer", value))
    }

    pub fn opt_integer(&self, column: &str) -> RowResult<Option<i64>> {
        match self.value(column) {
            None => Ok(None),
            Some(value) => as_integer(value)
                .map(Some)
                .ok_or_else(|| unexpected(column, "an integer", value)),
        }
    }

    /// Integer column that falls back to `default` when NULL or absent.
    pub fn integer_or(&self, column: &str, default: i64) -> RowResult<i64> {
        Ok(self.opt_integer(column)?.unwrap_or(default))
    }

    /// Boolean column that falls back to `default` when NULL or absent.
    pub fn flag_or(&self, column: &str, default: bool) -> RowResult<bool> {
        match self.value(column) {
            None => Ok(default),
            Some(value) => as_flag(value).ok_or_else(|| unexpected(column, "a boolean", value)),
        }
    }

    /// Date or datetime column as an ISO-8601 string.
    pub fn timestamp(&self, column: &str) -> RowResult<String> {
        let value = self.required(column)?;
        as_timestamp(value)
            .map(iso)
            .ok_or_else(|| unexpected(column, "a date", value))
    }

    /// Nullable date column; NULL becomes `None`, never an error.
    pub fn opt_timestamp(&self, column: &str) -> RowResult<Option<String>> {
        match self.value(column) {
            None => Ok(None),
            Some(value) => as_timestamp(value)
                .map(|ts| Some(iso(ts)))
                .ok_or_else(|| unexpected(column, "a date", value)),
        }
    }

    /// Array-valued column. NULL or absent becomes an empty list.
    ///
    /// Accepts a JSON array, a `{a,b}` array literal or comma-separated text.
    pub fn list(&self, column: &str) -> RowResult<Vec<String>> {
        match self.value(column) {
            None => Ok(Vec::new()),
            Some(SqlValue::Text(s)) => parse_list(s).map_err(|e| format!("column `{}`: {}", column, e)),
            Some(other) => Err(unexpected(column, "a list", other)),
        }
    }

    /// Short description of the row's identity for error messages.
    pub fn describe(&self) -> String {
        match self.row.get("id") {
            Some(SqlValue::Text(id)) => format!(" (id {})", id),
            Some(SqlValue::Int(id)) => format!(" (id {})", id),
            _ => String::new(),
        }
    }
}

/// Render a timestamp the way the document stores it.
pub fn iso(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn scalar_text(value: &SqlValue) -> Option<String> {
    match value {
        SqlValue::Text(s) => Some(s.clone()),
        SqlValue::Int(n) => Some(n.to_string()),
        SqlValue::Float(f) => Some(f.to_string()),
        SqlValue::Bool(b) => Some(b.to_string()),
        SqlValue::Timestamp(ts) => Some(iso(*ts)),
        SqlValue::Null | SqlValue::Bytes(_) => None,
    }
}

fn as_number(value: &SqlValue) -> Option<f64> {
    match value {
        SqlValue::Int(n) => Some(*n as f64),
        SqlValue::Float(f) if f.is_finite() => Some(*f),
        SqlValue::Text(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

fn as_integer(value: &SqlValue) -> Option<i64> {
    match value {
        SqlValue::Int(n) => Some(*n),
        SqlValue::Float(f) if f.fract() == 0.0 && f.is_finite() => Some(*f as i64),
        SqlValue::Text(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_flag(value: &SqlValue) -> Option<bool> {
    match value {
        SqlValue::Bool(b) => Some(*b),
        SqlValue::Int(n) => Some(*n != 0),
        SqlValue::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "t" | "yes" | "1" => Some(true),
            "false" | "f" | "no" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn as_timestamp(value: &SqlValue) -> Option<DateTime<Utc>> {
    match value {
        SqlValue::Timestamp(ts) => Some(*ts),
        SqlValue::Text(s) => parse_timestamp(s),
        SqlValue::Int(n) if n.unsigned_abs() >= MILLIS_THRESHOLD.unsigned_abs() => {
            Utc.timestamp_millis_opt(*n).single()
        }
        SqlValue::Int(n) => Utc.timestamp_opt(*n, 0).single(),
        _ => None,
    }
}

fn parse_list(s: &str) -> Result<Vec<String>, String> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(Vec::new());
    }

    if s.starts_with('[') {
        let items: Vec<serde_json::Value> =
            serde_json::from_str(s).map_err(|e| format!("invalid JSON array: {}", e))?;
        return Ok(items
            .into_iter()
            .filter(|item| !item.is_null())
            .map(|item| match item {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            })
            .collect());
    }

    let inner = s
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
        .unwrap_or(s);
    Ok(inner
        .split(',')
        .map(|item| item.trim().trim_matches('"').to_string())
        .filter(|item| !item.is_empty())
        .collect())
}

fn unexpected(column: &str, expected: &str, found: &SqlValue) -> String {
    let kind = match found {
        SqlValue::Null => "NULL",
        SqlValue::Bool(_) => "a boolean",
        SqlValue::Int(_) => "an integer",
        SqlValue::Float(_) => "a float",
        SqlValue::Text(_) => "text",
        SqlValue::Timestamp(_) => "a timestamp",
        SqlValue::Bytes(_) => "binary data",
    };
    match found {
        SqlValue::Text(s) => format!("column `{}`: expected {}, found {} {:?}", column, expected, kind, s),
        _ => format!("column `{}`: expected {}, found {}", column, expected, kind),
    }
}
