//! DuckDB backend.

use super::{Location, TableSource};
use crate::error::{FixtureError, Result};
use crate::value::Value;
use chrono::{DateTime, NaiveDate, NaiveTime};
use duckdb::types::{TimeUnit, ValueRef};
use duckdb::{params, AccessMode, Config, Connection};

/// Days from 0001-01-01 (CE day 1) to 1970-01-01
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Read-only DuckDB connection
pub struct DuckDbSource {
    conn: Connection,
}

impl DuckDbSource {
    /// Open the database. File databases are opened read-only so a missing
    /// file fails instead of being created.
    pub fn open(dsn: &str, location: &Location) -> Result<Self> {
        let conn = match location {
            Location::Memory => Connection::open_in_memory(),
            Location::File(path) => {
                tracing::debug!(path = %path.display(), "opening DuckDB database");
                Config::default()
                    .access_mode(AccessMode::ReadOnly)
                    .and_then(|config| Connection::open_with_flags(path, config))
            }
        }
        .map_err(|e| FixtureError::wrong_connection(dsn, e))?;

        Ok(Self { conn })
    }
}

impl TableSource for DuckDbSource {
    fn backend_name(&self) -> &'static str {
        "duckdb"
    }

    fn table_columns(&self, table: &str) -> Result<Vec<String>> {
        let sql = "SELECT column_name FROM information_schema.columns \
                   WHERE table_schema = current_schema() AND lower(table_name) = lower(?) \
                   ORDER BY ordinal_position";
        let mut stmt = self
            .conn
            .prepare(sql)
            .map_err(|e| FixtureError::query(sql, e))?;
        let names = stmt
            .query_map(params![table], |row| row.get::<_, String>(0))
            .map_err(|e| FixtureError::query(sql, e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| FixtureError::query(sql, e))?;
        Ok(names)
    }

    fn select_rows(&self, sql: &str, column_count: usize) -> Result<Vec<Vec<Value>>> {
        let mut stmt = self
            .conn
            .prepare(sql)
            .map_err(|e| FixtureError::query(sql, e))?;
        let mut query_rows = stmt.query([]).map_err(|e| FixtureError::query(sql, e))?;

        let mut rows = Vec::new();
        while let Some(row) = query_rows.next().map_err(|e| FixtureError::query(sql, e))? {
            let mut values = Vec::with_capacity(column_count);
            for i in 0..column_count {
                let value = row.get_ref(i).map_err(|e| FixtureError::query(sql, e))?;
                values.push(convert_value(value));
            }
            rows.push(values);
        }

        Ok(rows)
    }
}

fn to_micros(unit: TimeUnit, value: i64) -> i64 {
    match unit {
        TimeUnit::Second => value.saturating_mul(1_000_000),
        TimeUnit::Millisecond => value.saturating_mul(1_000),
        TimeUnit::Microsecond => value,
        TimeUnit::Nanosecond => value / 1_000,
    }
}

fn convert_value(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Boolean(b) => Value::Bool(b),
        ValueRef::TinyInt(n) => Value::Int(n.into()),
        ValueRef::SmallInt(n) => Value::Int(n.into()),
        ValueRef::Int(n) => Value::Int(n.into()),
        ValueRef::BigInt(n) => Value::Int(n),
        ValueRef::HugeInt(n) => Value::BigInt(n),
        ValueRef::UTinyInt(n) => Value::UInt(n.into()),
        ValueRef::USmallInt(n) => Value::UInt(n.into()),
        ValueRef::UInt(n) => Value::UInt(n.into()),
        ValueRef::UBigInt(n) => Value::UInt(n),
        ValueRef::Float(f) => Value::Float(f.into()),
        ValueRef::Double(f) => Value::Float(f),
        ValueRef::Decimal(d) => Value::Decimal(d.to_string()),
        ValueRef::Text(s) => Value::Text(String::from_utf8_lossy(s).into_owned()),
        ValueRef::Blob(b) => Value::Blob(b.to_vec()),
        ValueRef::Date32(days) => {
            match NaiveDate::from_num_days_from_ce_opt(UNIX_EPOCH_DAYS_FROM_CE + days) {
                Some(date) => Value::Date(date),
                None => Value::Int(days.into()),
            }
        }
        ValueRef::Timestamp(unit, ts) => {
            let micros = to_micros(unit, ts);
            match DateTime::from_timestamp_micros(micros) {
                Some(dt) => Value::Timestamp(dt.naive_utc()),
                None => Value::Int(ts),
            }
        }
        ValueRef::Time64(unit, t) => {
            let micros = to_micros(unit, t);
            let secs = (micros / 1_000_000) as u32;
            let nanos = ((micros % 1_000_000) * 1_000) as u32;
            match NaiveTime::from_num_seconds_from_midnight_opt(secs, nanos) {
                Some(time) => Value::Time(time),
                None => Value::Int(t),
            }
        }
        other => {
            tracing::debug!(value = ?other, "no native mapping, rendering as text");
            Value::Text(format!("{:?}", other))
        }
    }
}
