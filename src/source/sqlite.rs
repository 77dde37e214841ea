//! SQLite-backed legacy source.

use std::future::Future;
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{Column, Row, TypeInfo, ValueRef};

use super::{parse_timestamp, RelationalSource, SourceRow, SqlValue};
use crate::errors::AppError;

/// Read-only connection pool to the legacy database.
#[derive(Clone)]
pub struct SqlSource {
    pool: SqlitePool,
    query_timeout: Duration,
}

impl SqlSource {
    /// Open the database at `url` read-only and check that it answers.
    pub async fn connect(url: &str, timeout: Duration) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(url)?
            .read_only(true)
            .busy_timeout(timeout);

        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .acquire_timeout(timeout)
            .connect_with(options)
            .await?;

        sqlx::query("SELECT 1").execute(&pool).await?;

        Ok(Self::from_pool(pool, timeout))
    }

    pub fn from_pool(pool: SqlitePool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }
}

impl RelationalSource for SqlSource {
    async fn fetch_all(&self, table: &str) -> Result<Vec<SourceRow>, AppError> {
        // Table names come from the fixed collection list, never from input.
        let sql = format!("SELECT * FROM \"{}\"", table);
        let rows = bounded_query(
            table,
            self.query_timeout,
            sqlx::query(&sql).fetch_all(&self.pool),
        )
        .await?;

        rows.iter().map(decode_row).collect()
    }
}

/// Await `query`, failing with a source error once `limit` has passed.
pub async fn bounded_query<T, F>(table: &str, limit: Duration, query: F) -> Result<T, AppError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(limit, query).await {
        Ok(result) => Ok(result?),
        Err(_) => Err(AppError::Source(format!(
            "Query on {} timed out after {:?}",
            table, limit
        ))),
    }
}

/// Decode a row using the declared column type where it matters and the
/// stored value's class otherwise.
fn decode_row(row: &SqliteRow) -> Result<SourceRow, AppError> {
    let mut decoded = SourceRow::new();

    for column in row.columns() {
        let idx = column.ordinal();
        let declared = column.type_info().name().to_ascii_uppercase();
        let raw = row.try_get_raw(idx)?;
        if raw.is_null() {
            decoded.insert(column.name().to_string(), SqlValue::Null);
            continue;
        }
        let stored = raw.type_info().name().to_ascii_uppercase();

        let value = match (declared.as_str(), stored.as_str()) {
            ("BOOLEAN", "INTEGER") => SqlValue::Bool(row.try_get_unchecked::<i64, _>(idx)? != 0),
            ("DATETIME" | "DATE", "TEXT") => {
                let text: String = row.try_get_unchecked(idx)?;
                match parse_timestamp(&text) {
                    Some(ts) => SqlValue::Timestamp(ts),
                    None => SqlValue::Text(text),
                }
            }
            (_, "INTEGER") => SqlValue::Int(row.try_get_unchecked(idx)?),
            (_, "REAL") => SqlValue::Float(row.try_get_unchecked(idx)?),
            (_, "BLOB") => SqlValue::Bytes(row.try_get_unchecked(idx)?),
            _ => SqlValue::Text(row.try_get_unchecked(idx)?),
        };
        decoded.insert(column.name().to_string(), value);
    }

    Ok(decoded)
}
